//! `fleet-planner`: orders a schedule's stops into a drivable route.
//!
//! The default [`NearestNeighborPlanner`] is a greedy heuristic: start at
//! the first stop that resolves, then repeatedly visit the closest unvisited
//! one.  It is O(n²) and not optimal; it is meant for schedules of tens of
//! stops, not a travelling-salesman solver.
//!
//! | Function               | Resolves through        | Persists |
//! |------------------------|-------------------------|----------|
//! | [`plan`]               | caller's closure        | no       |
//! | [`plan_stops`]         | a `LocationStore`       | no       |
//! | [`route_for_schedule`] | a `LocationStore`       | yes      |

pub mod error;
pub mod planner;


pub use error::{PlannerError, PlannerResult};
pub use planner::{NearestNeighborPlanner, RoutePlanner, plan, plan_stops, route_for_schedule};
