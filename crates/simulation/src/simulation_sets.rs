//! Deterministic ordering of one simulation tick via `SystemSet` phases.
//!
//! ```text
//! Clock  →  Disaster  →  Secondary  →  Stats
//! ```
//!
//! * **Clock** – advance the tick counter, so every later phase sees the new
//!   simulation time.
//! * **Disaster** – the selected disaster rewrites buildings, water and
//!   ground.
//! * **Secondary** – trees react to the disaster.
//! * **Stats** – read-only aggregation over the buildings.
//!
//! The whole chain only runs while the phase is `Running`.

use bevy::prelude::*;

use crate::sim_clock::simulation_running;

/// Ordered phases for systems running in the `FixedUpdate` schedule.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DisasterSet {
    Clock,
    Disaster,
    Secondary,
    Stats,
}

pub struct SimulationSetsPlugin;

impl Plugin for SimulationSetsPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                DisasterSet::Clock,
                DisasterSet::Disaster,
                DisasterSet::Secondary,
                DisasterSet::Stats,
            )
                .chain()
                .run_if(simulation_running),
        );
    }
}
