//! `RoutePlanner` trait and the greedy nearest-neighbour implementation.

use std::collections::HashMap;

use tracing::{debug, info};

use fleet_core::{Point3, Route, ScheduleId, Stop};
use fleet_store::LocationStore;

use crate::{PlannerError, PlannerResult};

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Pluggable stop-ordering strategy.
///
/// # Contract
///
/// - Stops for which `resolve` returns `None` are dropped from the route.
/// - The returned route is a permutation of the resolved points.
/// - Same input, same output.
pub trait RoutePlanner: Send + Sync {
    fn plan(&self, stops: &[Stop], resolve: &dyn Fn(&Stop) -> Option<Point3>) -> Route;
}

// ── NearestNeighborPlanner ────────────────────────────────────────────────────

/// Greedy nearest-neighbour ordering.  See [`plan`].
#[derive(Clone, Copy, Debug, Default)]
pub struct NearestNeighborPlanner;

impl RoutePlanner for NearestNeighborPlanner {
    fn plan(&self, stops: &[Stop], resolve: &dyn Fn(&Stop) -> Option<Point3>) -> Route {
        plan(stops, resolve)
    }
}

/// Order `stops` greedily by nearest neighbour.
///
/// The first stop that resolves seeds the route.  Each following point is
/// the unvisited one closest (Euclidean) to the last visited point; on equal
/// distance the earlier stop in `stops` wins.
pub fn plan<F>(stops: &[Stop], resolve: F) -> Route
where
    F: Fn(&Stop) -> Option<Point3>,
{
    let mut remaining: Vec<Point3> = Vec::with_capacity(stops.len());
    for stop in stops {
        match resolve(stop) {
            Some(point) => remaining.push(point),
            None => info!(%stop, "UnresolvableStop: dropped from route"),
        }
    }
    if remaining.is_empty() {
        return Route::empty();
    }

    let mut ordered = Vec::with_capacity(remaining.len());
    let mut last = remaining.remove(0);
    ordered.push(last);

    while !remaining.is_empty() {
        let mut best = 0;
        let mut best_dist = last.distance(remaining[0]);
        for (i, p) in remaining.iter().enumerate().skip(1) {
            let d = last.distance(*p);
            if d < best_dist {
                best = i;
                best_dist = d;
            }
        }
        // `remove` keeps the rest in input order so later ties still favour
        // earlier stops.
        last = remaining.remove(best);
        ordered.push(last);
    }

    debug!(stops = stops.len(), points = ordered.len(), "route planned");
    Route::new(ordered)
}

// ── Store-backed helpers ──────────────────────────────────────────────────────

/// Plan `stops`, resolving each through `store` (stop → location → point).
pub fn plan_stops<P, S>(planner: &P, store: &S, stops: &[Stop]) -> PlannerResult<Route>
where
    P: RoutePlanner + ?Sized,
    S: LocationStore + ?Sized,
{
    let mut resolved: HashMap<&Stop, Point3> = HashMap::with_capacity(stops.len());
    for stop in stops {
        if let Some(point) = store.resolve_stop_point(stop)? {
            resolved.insert(stop, point);
        }
    }
    Ok(planner.plan(stops, &|stop| resolved.get(stop).copied()))
}

/// Route for a stored schedule, planning and caching it on first use.
///
/// A route already saved under `id` is returned as is.  Otherwise the
/// schedule's stops are planned and the result saved under `id`.
pub fn route_for_schedule<P, S>(planner: &P, store: &S, id: &ScheduleId) -> PlannerResult<Route>
where
    P: RoutePlanner + ?Sized,
    S: LocationStore + ?Sized,
{
    if let Some(route) = store.load_route(id)? {
        debug!(schedule = %id, "cached route");
        return Ok(route);
    }
    let stops = store
        .schedule(id)?
        .ok_or_else(|| PlannerError::UnknownSchedule(id.clone()))?;
    let route = plan_stops(planner, store, &stops)?;
    store.save_route(id, &route)?;
    info!(schedule = %id, points = route.len(), "route planned and saved");
    Ok(route)
}
