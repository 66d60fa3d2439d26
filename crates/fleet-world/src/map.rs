//! Road waypoint index for destination snapping.
//!
//! An R-tree (via `rstar`) maps an arbitrary `Point3` to the nearest road
//! waypoint.  Navigation targets are snapped before driving so a vehicle is
//! never sent to a point off the drivable surface.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use fleet_core::Point3;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 3-D `[x, y, z]` waypoint.
#[derive(Clone)]
struct WaypointEntry {
    point: [f64; 3],
}

impl RTreeObject for WaypointEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for WaypointEntry {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── RoadMap ───────────────────────────────────────────────────────────────────

/// Set of drivable waypoints with nearest-neighbour lookup.
pub struct RoadMap {
    index: RTree<WaypointEntry>,
}

impl RoadMap {
    /// A map with no waypoints; [`snap`](Self::snap) returns its input.
    pub fn empty() -> Self {
        Self { index: RTree::new() }
    }

    /// Bulk-load the index (O(N log N), faster than N inserts).
    pub fn from_waypoints(waypoints: impl IntoIterator<Item = Point3>) -> Self {
        let entries: Vec<WaypointEntry> = waypoints
            .into_iter()
            .map(|p| WaypointEntry { point: [p.x, p.y, p.z] })
            .collect();
        Self { index: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.index.size()
    }

    pub fn is_empty(&self) -> bool {
        self.index.size() == 0
    }

    /// Nearest waypoint to `point`, or `point` itself if the map is empty.
    pub fn snap(&self, point: Point3) -> Point3 {
        self.index
            .nearest_neighbor(&[point.x, point.y, point.z])
            .map(|e| Point3::new(e.point[0], e.point[1], e.point[2]))
            .unwrap_or(point)
    }
}

impl Default for RoadMap {
    fn default() -> Self {
        Self::empty()
    }
}
