//! depot: smallest end-to-end run of the rust_fleet dispatch framework.
//!
//! Registers a handful of stops in an in-memory store, plans two delivery
//! rounds, and drives three trucks around a synthetic yard on the kinematic
//! reference world.
//!
//! ```text
//! cargo run -p depot                     # defaults
//! cargo run -p depot -- fleet.json       # FleetConfig overrides (partial JSON)
//! RUST_LOG=debug cargo run -p depot      # per-leg logging
//! ```

mod map;

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use fleet_core::{FleetConfig, Point3, ScheduleId, Status, Stop, VehicleId};
use fleet_sim::{DispatchTarget, FleetBuilder, NavObserver, NavOutcome};
use fleet_store::{LocationStore, MemoryStore, ScheduleEdit, load_locations_reader, modify_schedule};

// ── Stops ─────────────────────────────────────────────────────────────────────

const LOCATIONS_CSV: &str = "\
stop_name,location_id,x,y,z\n\
yard office,loc-office,0,0,0\n\
bakery,loc-bakery,20,20,0\n\
pharmacy,loc-pharmacy,40,20,0\n\
hardware,loc-hardware,10,40,0\n\
florist,loc-florist,30,40,0\n\
school,loc-school,40,0,0\n\
school gate,loc-school,40,0,0\n\
";

/// Per-leg tick budget used when the config leaves it unbounded.
const LEG_BUDGET_TICKS: u64 = 2_000;

const ROUNDS: [(&str, &[&str]); 2] = [
    ("morning", &["florist", "bakery", "hardware", "pharmacy"]),
    ("afternoon", &["school", "pharmacy", "bakery"]),
];

// ── Observer ──────────────────────────────────────────────────────────────────

struct ArrivalLog;

impl NavObserver for ArrivalLog {
    fn on_waypoint(&self, id: &VehicleId, index: usize, point: Point3) {
        info!(vehicle = %id, index, %point, "arrived");
    }

    fn on_finished(&self, id: &VehicleId, outcome: NavOutcome) {
        match outcome {
            NavOutcome::Delivered => info!(vehicle = %id, "round complete"),
            other => warn!(vehicle = %id, outcome = %other, "round ended early"),
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => FleetConfig::default(),
    };
    let config = FleetConfig {
        max_ticks_per_leg: config.max_ticks_per_leg.or(Some(LEG_BUDGET_TICKS)),
        ..config
    };
    println!("=== depot: rust_fleet dispatch ===");
    println!(
        "Tick: {} ms  |  Arrival: {}  |  Steering: {:?}  |  Seed: {}",
        config.tick_period_ms, config.arrival_threshold, config.steering, config.seed
    );

    // 1. Store: stops and schedules.
    let store = Arc::new(MemoryStore::new());
    let registered = load_locations_reader(Cursor::new(LOCATIONS_CSV), &*store)?;
    println!("Registered {registered} stops at {} locations", store.locations()?.len());

    for (name, stops) in ROUNDS {
        let stops: Vec<Stop> = stops.iter().map(|s| Stop::new(*s)).collect();
        store.create_schedule(&ScheduleId::new(name), &stops)?;
    }
    let skipped = modify_schedule(
        &*store,
        &ScheduleId::new("afternoon"),
        ScheduleEdit::Add,
        &[Stop::new("bakery"), Stop::new("school gate")],
    )?;
    println!("Afternoon round: {} stop(s) already scheduled", skipped.len());

    // 2. Fleet over the yard world.
    let world = Arc::new(map::build_world(config.seed));
    let fleet = FleetBuilder::new(world, Arc::clone(&store))
        .config(config)
        .observer(Arc::new(ArrivalLog))
        .build()?;
    println!("Spawn bays: {}", fleet.spawn_points().len());

    for (name, _) in ROUNDS {
        let route = fleet.plan_schedule(&ScheduleId::new(name))?;
        println!("Route {name}: {} points, {:.1} units", route.len(), route.path_length());
    }

    // 3. Dispatch.
    fleet.start_clock()?;
    let t0 = Instant::now();

    let handles = vec![
        fleet.dispatch_vehicle(&"truck-1".into(), DispatchTarget::Schedule("morning".into()))?,
        fleet.dispatch_vehicle(&"truck-2".into(), DispatchTarget::Schedule("afternoon".into()))?,
        fleet.dispatch_vehicle(
            &"truck-3".into(),
            DispatchTarget::Route(fleet.plan_route(&[Stop::new("school"), Stop::new("yard office")])?),
        )?,
    ];

    for handle in handles {
        let id = handle.vehicle().clone();
        let outcome = handle.join();
        let telemetry = fleet
            .vehicle_telemetry(&id)
            .context("vehicle vanished before its telemetry could be read")?;
        println!(
            "{id}: {outcome} at {} (tick {}, speed {:.2})",
            telemetry.position, telemetry.tick, telemetry.speed
        );
    }

    fleet.stop_clock();
    let elapsed = t0.elapsed();
    println!();
    println!("Ticks: {}  |  Wall: {:.2?}", fleet.current_tick(), elapsed);

    // 4. Summary.
    let delivered = fleet
        .vehicles()
        .iter()
        .filter(|id| fleet.vehicle_status(id) == Some(Status::Delivered))
        .count();
    println!("Delivered: {delivered}/{}", fleet.vehicles().len());

    let destroyed = fleet.destroy_all_vehicles();
    fleet.shutdown();
    println!("Destroyed {destroyed} vehicles");
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

fn load_config(path: &Path) -> Result<FleetConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: FleetConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}
