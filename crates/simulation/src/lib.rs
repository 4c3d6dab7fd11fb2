use bevy::prelude::*;

pub mod buildings;
pub mod config;
pub mod control;
pub mod disasters;
pub mod error;
pub mod session;
pub mod sim_clock;
pub mod sim_rng;
pub mod simulation_sets;
pub mod stats;
pub mod surfaces;
pub mod trees;
pub mod world_init;

#[cfg(test)]
pub mod test_harness;

pub use config::SimulationConfig;
pub use control::SimulationCommand;
pub use disasters::{DisasterKind, Intensity};
pub use error::SimulationError;
pub use session::DisasterSession;
pub use sim_clock::SimulationPhase;
pub use simulation_sets::DisasterSet;
pub use stats::{DisasterStats, RiskLevel, StatsReport};

use sim_rng::SimRng;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // A config inserted before the plugin wins over the defaults.
        let config = match app.world().get_resource::<SimulationConfig>() {
            Some(config) => config.clone(),
            None => {
                let config = SimulationConfig::default();
                app.insert_resource(config.clone());
                config
            }
        };

        app.insert_resource(SimRng::from_seed_u64(config.seed))
            .insert_resource(Time::<Fixed>::from_hz(config.effective_tick_hz()))
            .add_systems(Startup, world_init::init_world);

        app.add_plugins((
            simulation_sets::SimulationSetsPlugin,
            surfaces::SurfacesPlugin,
            sim_clock::SimClockPlugin,
            disasters::DisastersPlugin,
            trees::TreesPlugin,
            stats::StatsPlugin,
            control::ControlPlugin,
        ));
    }
}
