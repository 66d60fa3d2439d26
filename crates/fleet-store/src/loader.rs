//! CSV location loader.
//!
//! # CSV format
//!
//! One row per stop.  Several stops may share a location id as long as they
//! agree on its coordinates.
//!
//! ```csv
//! stop_name,location_id,x,y,z
//! depot,loc-0,0.0,0.0,0.0
//! bakery,loc-1,10.0,0.0,0.0
//! north gate,loc-2,3.0,40.0,0.0
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use fleet_core::{LocationId, Point3, Stop};

use crate::{LocationStore, StoreError, StoreResult};

#[derive(Deserialize)]
struct LocationRecord {
    stop_name:   String,
    location_id: String,
    x:           f64,
    y:           f64,
    z:           f64,
}

/// Register every row of the CSV file at `path` into `store`.
///
/// Returns the number of stops registered.
pub fn load_locations_csv<S: LocationStore + ?Sized>(
    path: &Path,
    store: &S,
) -> StoreResult<usize> {
    let file = std::fs::File::open(path)?;
    load_locations_reader(file, store)
}

/// Like [`load_locations_csv`] but accepts any `Read` source.
///
/// A location id that is already stored with the same coordinates is reused.
/// Conflicting coordinates, or a stop name that is already registered, fail
/// with `StoreError::AlreadyRegistered`.  Rows before the failing one stay
/// registered.
pub fn load_locations_reader<R: Read, S: LocationStore + ?Sized>(
    reader: R,
    store: &S,
) -> StoreResult<usize> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut count = 0;

    for result in csv_reader.deserialize::<LocationRecord>() {
        let row = result?;
        let stop = Stop::new(row.stop_name.trim());
        if stop.as_str().is_empty() {
            return Err(StoreError::Parse(format!(
                "empty stop name for location {:?}",
                row.location_id
            )));
        }
        let location = LocationId::new(row.location_id.trim());
        let point = Point3::new(row.x, row.y, row.z);

        match store.resolve_location(&location)? {
            Some(existing) if existing == point => {}
            Some(_) => return Err(StoreError::location_taken(&location)),
            None => store.register_location(&location, point)?,
        }
        store.register_stop(&stop, &location)?;
        count += 1;
    }

    info!(stops = count, "locations loaded");
    Ok(count)
}
