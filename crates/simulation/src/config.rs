use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Simulation time added by every fixed tick while a run is active.
pub const SIM_TIME_STEP: f32 = 0.1;

/// Default fixed-tick rate. The scene was tuned against a 60 fps render loop,
/// so one simulation tick per rendered frame.
pub const DEFAULT_TICK_HZ: f64 = 60.0;

/// Default seed used when no explicit seed is provided.
pub const DEFAULT_SEED: u64 = 42;

/// Buildings are scattered in `[-BUILDING_SPREAD, BUILDING_SPREAD)` on x and z.
pub const BUILDING_SPREAD: f32 = 8.0;
/// Trees are scattered in `[-TREE_SPREAD, TREE_SPREAD)` on x and z.
pub const TREE_SPREAD: f32 = 9.0;

pub const DEFAULT_BUILDING_ATTEMPTS: u32 = 50;
pub const DEFAULT_TREE_ATTEMPTS: u32 = 100;

/// Park centers on the ground plane (x, z).
pub const PARK_CENTERS: [Vec2; 3] = [
    Vec2::new(-6.0, -6.0),
    Vec2::new(5.0, 5.0),
    Vec2::new(-4.0, 4.0),
];
/// Half side length of the square no-build zone around each park center.
pub const PARK_HALF_SIZE: f32 = 2.0;
/// Trees within this radius of a park center are always kept.
pub const PARK_TREE_RADIUS: f32 = 3.0;
/// Chance of keeping a tree candidate that is not near a park.
pub const REMOTE_TREE_KEEP_CHANCE: f32 = 0.3;
/// Minimum horizontal distance between a tree and any building.
pub const TREE_BUILDING_CLEARANCE: f32 = 1.0;

/// Runtime configuration for one simulation session.
///
/// Insert it before adding `SimulationPlugin` to override the defaults; the
/// plugin seeds `SimRng` and the fixed clock from it.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seed for city generation and every random draw during a run.
    pub seed: u64,
    /// Candidate building placements tried during generation.
    pub building_attempts: u32,
    /// Candidate tree placements tried during generation.
    pub tree_attempts: u32,
    /// Fixed simulation ticks per second of wall time.
    pub tick_hz: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            building_attempts: DEFAULT_BUILDING_ATTEMPTS,
            tree_attempts: DEFAULT_TREE_ATTEMPTS,
            tick_hz: DEFAULT_TICK_HZ,
        }
    }
}

impl SimulationConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Tick rate actually used by the fixed clock. Non-finite or
    /// non-positive rates fall back to the default.
    pub fn effective_tick_hz(&self) -> f64 {
        if self.tick_hz.is_finite() && self.tick_hz > 0.0 {
            self.tick_hz
        } else {
            DEFAULT_TICK_HZ
        }
    }
}
