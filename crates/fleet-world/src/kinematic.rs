//! `KinematicWorld`: a deterministic, in-memory reference simulator.
//!
//! # Vehicle model
//!
//! Each actor is a point with a yaw and a scalar forward speed.  Per step of
//! `dt = fixed_delta_secs`:
//!
//! ```text
//! if brake > 0:  speed -= brake * brake_decel * dt          (floored at 0)
//! else:          speed moves toward throttle * max_speed by at most accel * dt
//! yaw      += steer * max_yaw_rate_deg * dt
//! location += forward(yaw) * speed * dt
//! ```
//!
//! The model is intentionally crude (no slip, no collisions); it exists to
//! drive the navigation loop end-to-end in tests and demos.

use std::collections::HashMap;

use parking_lot::Mutex;

use fleet_core::{ActorHandle, Point3, SimRng};

use crate::{RoadMap, SpawnPoint, Transform, VehicleControl, WorldError, WorldResult, WorldSim};

// ── Parameters ────────────────────────────────────────────────────────────────

/// Tunables of the point-mass model.
#[derive(Clone, Debug, PartialEq)]
pub struct KinematicParams {
    /// Simulated seconds per `advance()`.  Default 0.05 (20 steps/s).
    pub fixed_delta_secs: f64,
    /// Speed at full throttle (units/s).
    pub max_speed:        f64,
    /// Acceleration toward the throttle's target speed (units/s²).
    pub accel:            f64,
    /// Deceleration at full brake (units/s²).
    pub brake_decel:      f64,
    /// Yaw rate at full steering lock (degrees/s).
    pub max_yaw_rate_deg: f64,
}

impl Default for KinematicParams {
    fn default() -> Self {
        Self {
            fixed_delta_secs: 0.05,
            max_speed:        10.0,
            accel:            4.0,
            brake_decel:      8.0,
            max_yaw_rate_deg: 180.0,
        }
    }
}

// ── Actor state ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct Actor {
    transform:        Transform,
    speed:            f64,
    control:          VehicleControl,
    controls_applied: u64,
}

impl Actor {
    fn step(&mut self, p: &KinematicParams) {
        let dt = p.fixed_delta_secs;
        let c  = self.control;

        if c.brake > 0.0 {
            self.speed = (self.speed - c.brake as f64 * p.brake_decel * dt).max(0.0);
        } else {
            let target = c.throttle as f64 * p.max_speed;
            let dv     = (target - self.speed).clamp(-p.accel * dt, p.accel * dt);
            self.speed += dv;
        }

        self.transform.yaw_deg += c.steer as f64 * p.max_yaw_rate_deg * dt;
        self.transform.location =
            self.transform.location + self.transform.forward().scale(self.speed * dt);
    }
}

struct WorldState {
    actors:      HashMap<ActorHandle, Actor>,
    next_handle: u64,
    rng:         SimRng,
    frame:       u64,
}

// ── KinematicWorld ────────────────────────────────────────────────────────────

/// Thread-safe in-memory world.  Create via [`KinematicWorldBuilder`].
pub struct KinematicWorld {
    params:       KinematicParams,
    spawn_points: Vec<SpawnPoint>,
    max_actors:   Option<usize>,
    map:          RoadMap,
    state:        Mutex<WorldState>,
}

impl KinematicWorld {
    /// Shorthand for a world with a single spawn point and default params.
    pub fn with_spawn_point(spawn: SpawnPoint) -> Self {
        KinematicWorldBuilder::new().spawn_point(spawn).build()
    }

    /// Number of live actors.
    pub fn actor_count(&self) -> usize {
        self.state.lock().actors.len()
    }

    /// Number of completed `advance()` calls.
    pub fn frame(&self) -> u64 {
        self.state.lock().frame
    }

    /// How many `apply_control` calls the actor has received.
    pub fn controls_applied(&self, handle: ActorHandle) -> Option<u64> {
        self.state.lock().actors.get(&handle).map(|a| a.controls_applied)
    }

    /// The control the actor is currently following.
    pub fn current_control(&self, handle: ActorHandle) -> Option<VehicleControl> {
        self.state.lock().actors.get(&handle).map(|a| a.control)
    }

    /// Teleport an actor (scenario setup; not part of [`WorldSim`]).
    pub fn set_transform(&self, handle: ActorHandle, transform: Transform) -> WorldResult<()> {
        let mut state = self.state.lock();
        let actor = state.actors.get_mut(&handle).ok_or(WorldError::UnknownActor(handle))?;
        actor.transform = transform;
        Ok(())
    }

    pub fn params(&self) -> &KinematicParams {
        &self.params
    }
}

impl WorldSim for KinematicWorld {
    fn spawn(&self) -> WorldResult<ActorHandle> {
        let mut state = self.state.lock();

        if let Some(max) = self.max_actors {
            if state.actors.len() >= max {
                return Err(WorldError::SpawnFailed(format!("actor limit {max} reached")));
            }
        }
        let spawn = *state
            .rng
            .choose(&self.spawn_points)
            .ok_or_else(|| WorldError::SpawnFailed("no valid spawn points".into()))?;

        let handle = ActorHandle(state.next_handle);
        state.next_handle += 1;
        state.actors.insert(handle, Actor {
            transform:        spawn,
            speed:            0.0,
            control:          VehicleControl::default(),
            controls_applied: 0,
        });
        Ok(handle)
    }

    fn destroy(&self, handle: ActorHandle) -> WorldResult<()> {
        self.state
            .lock()
            .actors
            .remove(&handle)
            .map(|_| ())
            .ok_or(WorldError::UnknownActor(handle))
    }

    fn apply_control(&self, handle: ActorHandle, control: VehicleControl) -> WorldResult<()> {
        let mut state = self.state.lock();
        let actor = state.actors.get_mut(&handle).ok_or(WorldError::UnknownActor(handle))?;
        actor.control = control;
        actor.controls_applied += 1;
        Ok(())
    }

    fn transform(&self, handle: ActorHandle) -> WorldResult<Transform> {
        self.state
            .lock()
            .actors
            .get(&handle)
            .map(|a| a.transform)
            .ok_or(WorldError::UnknownActor(handle))
    }

    fn velocity(&self, handle: ActorHandle) -> WorldResult<Point3> {
        self.state
            .lock()
            .actors
            .get(&handle)
            .map(|a| a.transform.forward().scale(a.speed))
            .ok_or(WorldError::UnknownActor(handle))
    }

    fn advance(&self) {
        let mut state = self.state.lock();
        // Iteration order over actors does not matter: actors do not interact.
        for actor in state.actors.values_mut() {
            actor.step(&self.params);
        }
        state.frame += 1;
    }

    fn snap_to_map(&self, point: Point3) -> Point3 {
        self.map.snap(point)
    }

    fn spawn_points(&self) -> Vec<SpawnPoint> {
        self.spawn_points.clone()
    }
}

// ── KinematicWorldBuilder ─────────────────────────────────────────────────────

/// Fluent builder for [`KinematicWorld`].
///
/// | Method              | Default                          |
/// |---------------------|----------------------------------|
/// | `.spawn_point(p)`   | none; spawning fails until set   |
/// | `.params(p)`        | [`KinematicParams::default`]     |
/// | `.seed(s)`          | 42                               |
/// | `.max_actors(n)`    | unlimited                        |
/// | `.waypoints(iter)`  | empty map (no snapping)          |
pub struct KinematicWorldBuilder {
    params:       KinematicParams,
    spawn_points: Vec<SpawnPoint>,
    seed:         u64,
    max_actors:   Option<usize>,
    waypoints:    Vec<Point3>,
}

impl KinematicWorldBuilder {
    pub fn new() -> Self {
        Self {
            params:       KinematicParams::default(),
            spawn_points: Vec::new(),
            seed:         42,
            max_actors:   None,
            waypoints:    Vec::new(),
        }
    }

    pub fn params(mut self, params: KinematicParams) -> Self {
        self.params = params;
        self
    }

    /// Add a spawn pose.  Each spawn picks one of them at random (seeded).
    pub fn spawn_point(mut self, spawn: SpawnPoint) -> Self {
        self.spawn_points.push(spawn);
        self
    }

    pub fn spawn_points(mut self, spawns: impl IntoIterator<Item = SpawnPoint>) -> Self {
        self.spawn_points.extend(spawns);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Refuse to spawn more than `n` live actors.
    pub fn max_actors(mut self, n: usize) -> Self {
        self.max_actors = Some(n);
        self
    }

    /// Road waypoints used by [`WorldSim::snap_to_map`].
    pub fn waypoints(mut self, waypoints: impl IntoIterator<Item = Point3>) -> Self {
        self.waypoints.extend(waypoints);
        self
    }

    pub fn build(self) -> KinematicWorld {
        KinematicWorld {
            params:       self.params,
            spawn_points: self.spawn_points,
            max_actors:   self.max_actors,
            map:          RoadMap::from_waypoints(self.waypoints),
            state:        Mutex::new(WorldState {
                actors:      HashMap::new(),
                next_handle: 0,
                rng:         SimRng::new(self.seed),
                frame:       0,
            }),
        }
    }
}

impl Default for KinematicWorldBuilder {
    fn default() -> Self {
        Self::new()
    }
}
