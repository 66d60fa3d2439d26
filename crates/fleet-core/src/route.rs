//! Planned visiting order of a schedule's stops.

use crate::Point3;

/// An ordered sequence of points to visit.
///
/// Produced by the route planner; one point per stop that resolved to
/// coordinates.  Persisted as an ordered list of `(x, y, z)` tuples keyed by
/// schedule id.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Route {
    pub points: Vec<Point3>,
}

impl Route {
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    pub fn empty() -> Self {
        Self { points: Vec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point3> {
        self.points.iter()
    }

    /// Sum of straight-line distances between consecutive points.
    pub fn path_length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    pub fn to_tuples(&self) -> Vec<(f64, f64, f64)> {
        self.points.iter().map(|p| p.to_tuple()).collect()
    }

    pub fn from_tuples(tuples: impl IntoIterator<Item = (f64, f64, f64)>) -> Self {
        Self { points: tuples.into_iter().map(Point3::from).collect() }
    }
}

impl From<Vec<Point3>> for Route {
    fn from(points: Vec<Point3>) -> Self {
        Self { points }
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a Point3;
    type IntoIter = std::slice::Iter<'a, Point3>;
    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
