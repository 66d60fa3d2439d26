//! SQLite-backed `LocationStore` (feature `sqlite`).
//!
//! One database file with six tables:
//!
//! | Table            | Key                  | Columns        |
//! |------------------|----------------------|----------------|
//! | `locations`      | `location_id`        | `x, y, z`      |
//! | `stops`          | `stop_name`          | `location_id`  |
//! | `routes`         | `schedule_id`        | –              |
//! | `route_points`   | `(schedule_id, seq)` | `x, y, z`      |
//! | `schedules`      | `schedule_id`        | –              |
//! | `schedule_stops` | `(schedule_id, seq)` | `stop_name`    |
//!
//! The header tables (`routes`, `schedules`) make an empty route or an empty
//! schedule distinguishable from a missing one.

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use fleet_core::{LocationId, Point3, Route, ScheduleId, Stop};

use crate::{LocationStore, StoreError, StoreResult};

const SCHEMA: &str = "
    PRAGMA journal_mode = WAL;
    PRAGMA synchronous  = NORMAL;
    CREATE TABLE IF NOT EXISTS locations (
        location_id TEXT PRIMARY KEY,
        x           REAL NOT NULL,
        y           REAL NOT NULL,
        z           REAL NOT NULL
    );
    CREATE TABLE IF NOT EXISTS stops (
        stop_name   TEXT PRIMARY KEY,
        location_id TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS routes (
        schedule_id TEXT PRIMARY KEY
    );
    CREATE TABLE IF NOT EXISTS route_points (
        schedule_id TEXT    NOT NULL,
        seq         INTEGER NOT NULL,
        x           REAL    NOT NULL,
        y           REAL    NOT NULL,
        z           REAL    NOT NULL,
        PRIMARY KEY (schedule_id, seq)
    );
    CREATE TABLE IF NOT EXISTS schedules (
        schedule_id TEXT PRIMARY KEY
    );
    CREATE TABLE IF NOT EXISTS schedule_stops (
        schedule_id TEXT    NOT NULL,
        seq         INTEGER NOT NULL,
        stop_name   TEXT    NOT NULL,
        PRIMARY KEY (schedule_id, seq)
    );";

/// Store persisted in a single SQLite database.
///
/// The connection sits behind a mutex so the store can be shared across
/// threads like [`MemoryStore`](crate::MemoryStore).
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and initialise the schema.
    pub fn open(path: &Path) -> StoreResult<Self> {
        Self::init(Connection::open(path)?)
    }

    /// Private in-memory database, mostly for tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn: Mutex::new(conn) })
    }
}

fn read_point(row: &rusqlite::Row<'_>, first: usize) -> rusqlite::Result<Point3> {
    Ok(Point3::new(row.get(first)?, row.get(first + 1)?, row.get(first + 2)?))
}

fn row_exists(conn: &Connection, sql: &str, key: &str) -> StoreResult<bool> {
    let found = conn.query_row(sql, params![key], |_| Ok(())).optional()?;
    Ok(found.is_some())
}

fn schedule_stops(conn: &Connection, id: &str) -> StoreResult<Vec<Stop>> {
    let mut stmt = conn.prepare_cached(
        "SELECT stop_name FROM schedule_stops WHERE schedule_id = ?1 ORDER BY seq",
    )?;
    let stops = stmt
        .query_map(params![id], |row| row.get::<_, String>(0))?
        .map(|name| name.map(Stop::from))
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(stops)
}

fn write_schedule_stops(
    tx: &rusqlite::Transaction<'_>,
    id: &str,
    stops: &[Stop],
) -> StoreResult<()> {
    tx.execute("DELETE FROM schedule_stops WHERE schedule_id = ?1", params![id])?;
    let mut stmt = tx.prepare_cached(
        "INSERT INTO schedule_stops (schedule_id, seq, stop_name) VALUES (?1, ?2, ?3)",
    )?;
    for (seq, stop) in stops.iter().enumerate() {
        stmt.execute(params![id, seq as i64, stop.as_str()])?;
    }
    Ok(())
}

impl LocationStore for SqliteStore {
    fn register_location(&self, id: &LocationId, point: Point3) -> StoreResult<()> {
        let changed = self.conn.lock().execute(
            "INSERT OR IGNORE INTO locations (location_id, x, y, z) VALUES (?1, ?2, ?3, ?4)",
            params![id.as_str(), point.x, point.y, point.z],
        )?;
        if changed == 0 {
            return Err(StoreError::location_taken(id));
        }
        debug!(location = %id, %point, "location registered");
        Ok(())
    }

    fn register_stop(&self, stop: &Stop, location: &LocationId) -> StoreResult<()> {
        let changed = self.conn.lock().execute(
            "INSERT OR IGNORE INTO stops (stop_name, location_id) VALUES (?1, ?2)",
            params![stop.as_str(), location.as_str()],
        )?;
        if changed == 0 {
            return Err(StoreError::stop_taken(stop));
        }
        debug!(%stop, %location, "stop registered");
        Ok(())
    }

    fn resolve_stop(&self, stop: &Stop) -> StoreResult<Option<LocationId>> {
        let id = self
            .conn
            .lock()
            .query_row(
                "SELECT location_id FROM stops WHERE stop_name = ?1",
                params![stop.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(id.map(LocationId::from))
    }

    fn resolve_location(&self, id: &LocationId) -> StoreResult<Option<Point3>> {
        let point = self
            .conn
            .lock()
            .query_row(
                "SELECT x, y, z FROM locations WHERE location_id = ?1",
                params![id.as_str()],
                |row| read_point(row, 0),
            )
            .optional()?;
        Ok(point)
    }

    fn locations(&self) -> StoreResult<Vec<(LocationId, Point3)>> {
        let conn = self.conn.lock();
        let mut stmt =
            conn.prepare_cached("SELECT location_id, x, y, z FROM locations ORDER BY location_id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((LocationId::from(row.get::<_, String>(0)?), read_point(row, 1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn save_route(&self, id: &ScheduleId, route: &Route) -> StoreResult<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        tx.execute("INSERT OR IGNORE INTO routes (schedule_id) VALUES (?1)", params![id.as_str()])?;
        tx.execute("DELETE FROM route_points WHERE schedule_id = ?1", params![id.as_str()])?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO route_points (schedule_id, seq, x, y, z) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (seq, p) in route.iter().enumerate() {
                stmt.execute(params![id.as_str(), seq as i64, p.x, p.y, p.z])?;
            }
        }
        tx.commit()?;
        debug!(schedule = %id, points = route.len(), "route saved");
        Ok(())
    }

    fn load_route(&self, id: &ScheduleId) -> StoreResult<Option<Route>> {
        let conn = self.conn.lock();
        if !row_exists(&conn, "SELECT 1 FROM routes WHERE schedule_id = ?1", id.as_str())? {
            return Ok(None);
        }
        let mut stmt = conn.prepare_cached(
            "SELECT x, y, z FROM route_points WHERE schedule_id = ?1 ORDER BY seq",
        )?;
        let points = stmt
            .query_map(params![id.as_str()], |row| read_point(row, 0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Some(Route::new(points)))
    }

    fn delete_route(&self, id: &ScheduleId) -> StoreResult<bool> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM route_points WHERE schedule_id = ?1", params![id.as_str()])?;
        let removed = tx.execute("DELETE FROM routes WHERE schedule_id = ?1", params![id.as_str()])?;
        tx.commit()?;
        Ok(removed > 0)
    }

    fn routes(&self) -> StoreResult<Vec<ScheduleId>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached("SELECT schedule_id FROM routes ORDER BY schedule_id")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .map(|id| id.map(ScheduleId::from))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ids)
    }

    fn create_schedule(&self, id: &ScheduleId, stops: &[Stop]) -> StoreResult<bool> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let created = tx.execute(
            "INSERT OR IGNORE INTO schedules (schedule_id) VALUES (?1)",
            params![id.as_str()],
        )?;
        if created == 0 {
            debug!(schedule = %id, "schedule already exists");
            return Ok(false);
        }
        write_schedule_stops(&tx, id.as_str(), stops)?;
        tx.commit()?;
        debug!(schedule = %id, stops = stops.len(), "schedule created");
        Ok(true)
    }

    fn schedule(&self, id: &ScheduleId) -> StoreResult<Option<Vec<Stop>>> {
        let conn = self.conn.lock();
        if !row_exists(&conn, "SELECT 1 FROM schedules WHERE schedule_id = ?1", id.as_str())? {
            return Ok(None);
        }
        schedule_stops(&conn, id.as_str()).map(Some)
    }

    fn update_schedule(&self, id: &ScheduleId, stops: &[Stop]) -> StoreResult<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        if !row_exists(&tx, "SELECT 1 FROM schedules WHERE schedule_id = ?1", id.as_str())? {
            return Err(StoreError::UnknownSchedule(id.clone()));
        }
        write_schedule_stops(&tx, id.as_str(), stops)?;
        tx.commit()?;
        Ok(())
    }

    fn edit_schedule(
        &self,
        id: &ScheduleId,
        edit: &mut dyn FnMut(&mut Vec<Stop>) -> bool,
    ) -> StoreResult<bool> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        if !row_exists(&tx, "SELECT 1 FROM schedules WHERE schedule_id = ?1", id.as_str())? {
            return Err(StoreError::UnknownSchedule(id.clone()));
        }
        let mut stops = schedule_stops(&tx, id.as_str())?;
        if !edit(&mut stops) {
            return Ok(false);
        }
        write_schedule_stops(&tx, id.as_str(), &stops)?;
        tx.execute("DELETE FROM route_points WHERE schedule_id = ?1", params![id.as_str()])?;
        let dropped = tx.execute("DELETE FROM routes WHERE schedule_id = ?1", params![id.as_str()])?;
        tx.commit()?;
        if dropped > 0 {
            debug!(schedule = %id, "cached route invalidated");
        }
        Ok(true)
    }

    fn schedules(&self) -> StoreResult<Vec<(ScheduleId, Vec<Stop>)>> {
        let conn = self.conn.lock();
        let ids = {
            let mut stmt =
                conn.prepare_cached("SELECT schedule_id FROM schedules ORDER BY schedule_id")?;
            let ids = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            ids
        };
        ids.into_iter()
            .map(|id| {
                let stops = schedule_stops(&conn, &id)?;
                Ok((ScheduleId::from(id), stops))
            })
            .collect()
    }
}
