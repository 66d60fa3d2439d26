//! Synthetic depot yard: a square road grid with spawn bays along its
//! southern edge.
//!
//! ```text
//!   y=40  +----+----+----+----+
//!         |    |    |    |    |
//!   y=20  +----+----+----+----+
//!         |    |    |    |    |
//!   y=0   +----+----+----+----+
//!        x=0  10   20   30   40
//!         ^ bays at (0,0), (10,0), (20,0) facing north
//! ```

use fleet_core::Point3;
use fleet_world::{KinematicWorld, KinematicWorldBuilder, Transform};

const GRID_STEP_X: f64 = 10.0;
const GRID_STEP_Y: f64 = 20.0;
const COLUMNS:     usize = 5;
const ROWS:        usize = 3;

/// Waypoints every half grid step along every road.
fn waypoints() -> Vec<Point3> {
    let mut points = Vec::new();
    let width = GRID_STEP_X * (COLUMNS - 1) as f64;
    let height = GRID_STEP_Y * (ROWS - 1) as f64;
    for row in 0..ROWS {
        let y = row as f64 * GRID_STEP_Y;
        let mut x = 0.0;
        while x <= width {
            points.push(Point3::new(x, y, 0.0));
            x += GRID_STEP_X / 2.0;
        }
    }
    for col in 0..COLUMNS {
        let x = col as f64 * GRID_STEP_X;
        let mut y = GRID_STEP_Y / 2.0;
        while y < height {
            points.push(Point3::new(x, y, 0.0));
            y += GRID_STEP_Y / 2.0;
        }
    }
    points
}

pub fn build_world(seed: u64) -> KinematicWorld {
    let bays = (0..3).map(|i| Transform::new(Point3::new(i as f64 * GRID_STEP_X, 0.0, 0.0), 90.0));
    KinematicWorldBuilder::new()
        .spawn_points(bays)
        .waypoints(waypoints())
        .seed(seed)
        .build()
}
