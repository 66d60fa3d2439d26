//! Add/remove edits on a stored schedule.

use fleet_core::{ScheduleId, Stop};
use tracing::{info, warn};

use crate::{LocationStore, StoreResult};

/// How [`modify_schedule`] changes the stop list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduleEdit {
    /// Append stops not yet on the schedule.
    Add,
    /// Drop every listed stop from the schedule.
    Remove,
}

/// Apply `edit` to schedule `id` and return the stops that were skipped.
///
/// For `Add` the skipped stops are those already on the schedule (or repeated
/// in `stops`); for `Remove` they are the ones that were not on it.  The edit
/// runs through [`LocationStore::edit_schedule`], so it is atomic with respect
/// to other edits of the same schedule.  The route cached under `id` is
/// deleted whenever the stop list changes, so the next lookup replans it.
pub fn modify_schedule<S: LocationStore + ?Sized>(
    store: &S,
    id: &ScheduleId,
    edit: ScheduleEdit,
    stops: &[Stop],
) -> StoreResult<Vec<Stop>> {
    let mut skipped = Vec::new();
    let changed = store.edit_schedule(id, &mut |current: &mut Vec<Stop>| {
        skipped.clear();
        apply(edit, current, stops, &mut skipped)
    })?;

    for stop in &skipped {
        warn!(schedule = %id, %stop, ?edit, "stop skipped");
    }
    if changed {
        info!(schedule = %id, ?edit, skipped = skipped.len(), "schedule edited");
    }
    Ok(skipped)
}

/// Returns `true` if `current` changed.
fn apply(
    edit: ScheduleEdit,
    current: &mut Vec<Stop>,
    stops: &[Stop],
    skipped: &mut Vec<Stop>,
) -> bool {
    match edit {
        ScheduleEdit::Add => {
            for stop in stops {
                if current.contains(stop) {
                    skipped.push(stop.clone());
                } else {
                    current.push(stop.clone());
                }
            }
        }
        ScheduleEdit::Remove => {
            for stop in stops {
                let before = current.len();
                current.retain(|s| s != stop);
                if current.len() == before {
                    skipped.push(stop.clone());
                }
            }
        }
    }
    skipped.len() < stops.len()
}
