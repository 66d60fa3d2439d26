//! Unit tests for fleet-store.
//!
//! The trait contract is checked against both backends through
//! `contract::*` helpers; the SQLite run is feature-gated.

#[cfg(test)]
mod contract {
    use fleet_core::{LocationId, Point3, Route, ScheduleId, Stop};

    use crate::{LocationStore, StoreError};

    pub fn locations_are_write_once<S: LocationStore>(store: &S) {
        let id = LocationId::new("loc-1");
        store.register_location(&id, Point3::new(1.0, 2.0, 3.0)).unwrap();
        let err = store.register_location(&id, Point3::new(9.0, 9.0, 9.0)).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyRegistered { kind: "location", .. }));
        assert_eq!(store.resolve_location(&id).unwrap(), Some(Point3::new(1.0, 2.0, 3.0)));
        assert_eq!(store.resolve_location(&LocationId::new("nope")).unwrap(), None);
    }

    pub fn stops_are_write_once<S: LocationStore>(store: &S) {
        let stop = Stop::new("bakery");
        store.register_location(&LocationId::new("a"), Point3::ORIGIN).unwrap();
        store.register_stop(&stop, &LocationId::new("a")).unwrap();
        let err = store.register_stop(&stop, &LocationId::new("b")).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyRegistered { kind: "stop", .. }));
        assert_eq!(store.resolve_stop(&stop).unwrap(), Some(LocationId::new("a")));
        assert_eq!(store.resolve_stop_point(&stop).unwrap(), Some(Point3::ORIGIN));
        assert_eq!(store.resolve_stop_point(&Stop::new("ghost")).unwrap(), None);
    }

    pub fn route_round_trip<S: LocationStore>(store: &S) {
        let id = ScheduleId::new("morning");
        let route = Route::from_tuples([(0.0, 0.0, 0.0), (3.5, -1.25, 0.0), (10.0, 0.0, 2.0)]);
        assert_eq!(store.load_route(&id).unwrap(), None);
        store.save_route(&id, &route).unwrap();
        assert_eq!(store.load_route(&id).unwrap(), Some(route));

        // Overwrite replaces, never appends.
        let shorter = Route::from_tuples([(1.0, 1.0, 1.0)]);
        store.save_route(&id, &shorter).unwrap();
        assert_eq!(store.load_route(&id).unwrap(), Some(shorter));

        let empty_id = ScheduleId::new("empty");
        store.save_route(&empty_id, &Route::empty()).unwrap();
        assert_eq!(store.load_route(&empty_id).unwrap(), Some(Route::empty()));
        assert_eq!(store.routes().unwrap(), vec![empty_id.clone(), id.clone()]);

        assert!(store.delete_route(&id).unwrap());
        assert!(!store.delete_route(&id).unwrap());
        assert_eq!(store.load_route(&id).unwrap(), None);
    }

    pub fn schedules<S: LocationStore>(store: &S) {
        let id = ScheduleId::new("s1");
        let stops = vec![Stop::new("a"), Stop::new("b")];
        assert!(store.create_schedule(&id, &stops).unwrap());
        assert!(!store.create_schedule(&id, &[Stop::new("x")]).unwrap());
        assert_eq!(store.schedule(&id).unwrap(), Some(stops));

        store.update_schedule(&id, &[Stop::new("c")]).unwrap();
        assert_eq!(store.schedule(&id).unwrap(), Some(vec![Stop::new("c")]));

        let missing = ScheduleId::new("missing");
        assert!(store.schedule(&missing).unwrap().is_none());
        assert!(matches!(
            store.update_schedule(&missing, &[]),
            Err(StoreError::UnknownSchedule(_))
        ));

        store.create_schedule(&ScheduleId::new("a0"), &[]).unwrap();
        let all = store.schedules().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], (ScheduleId::new("a0"), vec![]));
        assert_eq!(all[1].0, id);
    }

    pub fn edit_schedule_commits_only_changes<S: LocationStore>(store: &S) {
        let id = ScheduleId::new("s1");
        store.create_schedule(&id, &[Stop::new("a")]).unwrap();
        store.save_route(&id, &Route::from_tuples([(1.0, 0.0, 0.0)])).unwrap();

        // A no-op edit leaves the stops and the cached route alone.
        let changed = store
            .edit_schedule(&id, &mut |stops: &mut Vec<Stop>| {
                stops.push(Stop::new("scratch"));
                false
            })
            .unwrap();
        assert!(!changed);
        assert_eq!(store.schedule(&id).unwrap(), Some(vec![Stop::new("a")]));
        assert!(store.load_route(&id).unwrap().is_some());

        let changed = store
            .edit_schedule(&id, &mut |stops: &mut Vec<Stop>| {
                stops.push(Stop::new("b"));
                true
            })
            .unwrap();
        assert!(changed);
        assert_eq!(store.schedule(&id).unwrap(), Some(vec![Stop::new("a"), Stop::new("b")]));
        assert_eq!(store.load_route(&id).unwrap(), None);

        let err = store
            .edit_schedule(&ScheduleId::new("missing"), &mut |_: &mut Vec<Stop>| true)
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownSchedule(_)));
    }

    pub fn locations_listed_sorted<S: LocationStore>(store: &S) {
        store.register_location(&LocationId::new("b"), Point3::new(2.0, 0.0, 0.0)).unwrap();
        store.register_location(&LocationId::new("a"), Point3::new(1.0, 0.0, 0.0)).unwrap();
        let all = store.locations().unwrap();
        assert_eq!(
            all,
            vec![
                (LocationId::new("a"), Point3::new(1.0, 0.0, 0.0)),
                (LocationId::new("b"), Point3::new(2.0, 0.0, 0.0)),
            ]
        );
    }
}

// ── MemoryStore ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod memory {
    use super::contract;
    use crate::MemoryStore;

    #[test]
    fn locations_are_write_once() {
        contract::locations_are_write_once(&MemoryStore::new());
    }

    #[test]
    fn stops_are_write_once() {
        contract::stops_are_write_once(&MemoryStore::new());
    }

    #[test]
    fn route_round_trip() {
        contract::route_round_trip(&MemoryStore::new());
    }

    #[test]
    fn schedules() {
        contract::schedules(&MemoryStore::new());
    }

    #[test]
    fn edit_schedule_commits_only_changes() {
        contract::edit_schedule_commits_only_changes(&MemoryStore::new());
    }

    #[test]
    fn locations_listed_sorted() {
        contract::locations_listed_sorted(&MemoryStore::new());
    }
}

// ── SqliteStore ───────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite {
    use fleet_core::{LocationId, Point3, Route, ScheduleId};

    use super::contract;
    use crate::{LocationStore, SqliteStore};

    fn store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    #[test]
    fn locations_are_write_once() {
        contract::locations_are_write_once(&store());
    }

    #[test]
    fn stops_are_write_once() {
        contract::stops_are_write_once(&store());
    }

    #[test]
    fn route_round_trip() {
        contract::route_round_trip(&store());
    }

    #[test]
    fn schedules() {
        contract::schedules(&store());
    }

    #[test]
    fn edit_schedule_commits_only_changes() {
        contract::edit_schedule_commits_only_changes(&store());
    }

    #[test]
    fn locations_listed_sorted() {
        contract::locations_listed_sorted(&store());
    }

    #[test]
    fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fleet.db");
        let id = ScheduleId::new("persisted");
        let route = Route::from_tuples([(1.0, 2.0, 3.0), (4.0, 5.0, 6.0)]);
        {
            let store = SqliteStore::open(&path).unwrap();
            store.register_location(&LocationId::new("l"), Point3::new(7.0, 8.0, 9.0)).unwrap();
            store.save_route(&id, &route).unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.load_route(&id).unwrap(), Some(route));
        assert_eq!(
            store.resolve_location(&LocationId::new("l")).unwrap(),
            Some(Point3::new(7.0, 8.0, 9.0))
        );
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::{Cursor, Write};

    use fleet_core::{LocationId, Point3, Stop};

    use crate::{LocationStore, MemoryStore, StoreError, load_locations_csv, load_locations_reader};

    #[test]
    fn loads_rows_and_shares_locations() {
        let csv = "stop_name,location_id,x,y,z\n\
                   depot,loc-0,0,0,0\n\
                   bakery,loc-1,10,0,0\n\
                   bakery back door,loc-1,10,0,0\n";
        let store = MemoryStore::new();
        let n = load_locations_reader(Cursor::new(csv), &store).unwrap();
        assert_eq!(n, 3);
        assert_eq!(store.locations().unwrap().len(), 2);
        assert_eq!(
            store.resolve_stop_point(&Stop::new("bakery back door")).unwrap(),
            Some(Point3::new(10.0, 0.0, 0.0))
        );
    }

    #[test]
    fn conflicting_coordinates_rejected() {
        let csv = "stop_name,location_id,x,y,z\n\
                   a,loc,0,0,0\n\
                   b,loc,1,0,0\n";
        let store = MemoryStore::new();
        let err = load_locations_reader(Cursor::new(csv), &store).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyRegistered { kind: "location", .. }));
        // The first row stays registered.
        assert_eq!(store.resolve_stop(&Stop::new("a")).unwrap(), Some(LocationId::new("loc")));
        assert_eq!(store.resolve_stop(&Stop::new("b")).unwrap(), None);
    }

    #[test]
    fn bad_number_is_csv_error() {
        let csv = "stop_name,location_id,x,y,z\na,loc,zero,0,0\n";
        let err = load_locations_reader(Cursor::new(csv), &MemoryStore::new()).unwrap_err();
        assert!(matches!(err, StoreError::Csv(_)));
    }

    #[test]
    fn empty_stop_name_is_parse_error() {
        let csv = "stop_name,location_id,x,y,z\n  ,loc,0,0,0\n";
        let err = load_locations_reader(Cursor::new(csv), &MemoryStore::new()).unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "stop_name,location_id,x,y,z").unwrap();
        writeln!(file, "gate,g,1.5,2.5,0").unwrap();
        let store = MemoryStore::new();
        assert_eq!(load_locations_csv(file.path(), &store).unwrap(), 1);
        assert_eq!(
            store.resolve_stop_point(&Stop::new("gate")).unwrap(),
            Some(Point3::new(1.5, 2.5, 0.0))
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_locations_csv(&dir.path().join("absent.csv"), &MemoryStore::new()).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}

// ── Schedule edits ────────────────────────────────────────────────────────────

#[cfg(test)]
mod schedule_edits {
    use std::sync::Arc;
    use std::thread;

    use fleet_core::{Route, ScheduleId, Stop};

    use crate::{LocationStore, MemoryStore, ScheduleEdit, StoreError, modify_schedule};

    fn stops(names: &[&str]) -> Vec<Stop> {
        names.iter().map(|n| Stop::new(*n)).collect()
    }

    fn seeded() -> (MemoryStore, ScheduleId) {
        let store = MemoryStore::new();
        let id = ScheduleId::new("route-7");
        store.create_schedule(&id, &stops(&["a", "b"])).unwrap();
        store.save_route(&id, &Route::from_tuples([(0.0, 0.0, 0.0)])).unwrap();
        (store, id)
    }

    #[test]
    fn add_appends_unseen_and_reports_duplicates() {
        let (store, id) = seeded();
        let skipped = modify_schedule(&store, &id, ScheduleEdit::Add, &stops(&["b", "c", "c"])).unwrap();
        assert_eq!(skipped, stops(&["b", "c"]));
        assert_eq!(store.schedule(&id).unwrap(), Some(stops(&["a", "b", "c"])));
        assert_eq!(store.load_route(&id).unwrap(), None);
    }

    #[test]
    fn remove_drops_listed_stops() {
        let (store, id) = seeded();
        let skipped = modify_schedule(&store, &id, ScheduleEdit::Remove, &stops(&["a", "z"])).unwrap();
        assert_eq!(skipped, stops(&["z"]));
        assert_eq!(store.schedule(&id).unwrap(), Some(stops(&["b"])));
        assert_eq!(store.load_route(&id).unwrap(), None);
    }

    #[test]
    fn no_change_keeps_cached_route() {
        let (store, id) = seeded();
        let skipped = modify_schedule(&store, &id, ScheduleEdit::Add, &stops(&["a"])).unwrap();
        assert_eq!(skipped, stops(&["a"]));
        assert!(store.load_route(&id).unwrap().is_some());
    }

    #[test]
    fn concurrent_adds_are_all_kept() {
        let (store, id) = seeded();
        let store = Arc::new(store);
        let workers: Vec<_> = (0..8)
            .map(|w| {
                let store = Arc::clone(&store);
                let id = id.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        let stop = Stop::new(format!("w{w}-{i}"));
                        modify_schedule(&*store, &id, ScheduleEdit::Add, &[stop]).unwrap();
                    }
                })
            })
            .collect();
        for w in workers {
            w.join().unwrap();
        }
        assert_eq!(store.schedule(&id).unwrap().unwrap().len(), 2 + 8 * 25);
    }

    #[test]
    fn unknown_schedule_reported() {
        let store = MemoryStore::new();
        let err = modify_schedule(&store, &ScheduleId::new("nope"), ScheduleEdit::Add, &[])
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownSchedule(_)));
    }
}
