//! `digital_twin`: headless real-time disaster run.
//!
//! Generates the city, starts the configured disaster and logs the stats
//! panel as one JSON line per displayed second until the configured
//! duration has elapsed.

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use simulation::sim_clock::{tick_elapsed_clock, ElapsedClock, SimulationPhase};
use simulation::{DisasterStats, SimulationCommand, StatsReport};

mod run_config;

use run_config::RunConfig;

const FRAME_RATE: f64 = 60.0;

fn main() {
    let config = match RunConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("digital_twin: {err}");
            std::process::exit(2);
        }
    };

    let mut app = App::new();
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / FRAME_RATE,
        ))),
    )
    .add_plugins(LogPlugin::default())
    .insert_resource(config.simulation_config())
    .insert_resource(config)
    .add_plugins(simulation::SimulationPlugin)
    .add_systems(Startup, start_run)
    .add_systems(
        Update,
        (report_stats, stop_after_duration)
            .chain()
            .after(tick_elapsed_clock),
    );

    app.run();
}

fn start_run(config: Res<RunConfig>, mut commands: EventWriter<SimulationCommand>) {
    let kind = match config.kind() {
        Ok(kind) => Some(kind),
        Err(err) => {
            warn!("{err}; running without a disaster");
            None
        }
    };
    info!(
        "Starting run: seed {}, {} at intensity {} for {}s",
        config.seed, config.disaster, config.intensity, config.duration_secs
    );
    commands.send(SimulationCommand::Start {
        kind,
        intensity: config.intensity,
    });
}

/// One JSON line each time the displayed clock rolls over.
fn report_stats(
    phase: Res<SimulationPhase>,
    clock: Res<ElapsedClock>,
    stats: Res<DisasterStats>,
    mut last_reported: Local<Option<u32>>,
) {
    if *phase != SimulationPhase::Running || *last_reported == Some(clock.seconds) {
        return;
    }
    *last_reported = Some(clock.seconds);
    match serde_json::to_string(&StatsReport::new(&stats, &clock)) {
        Ok(line) => info!("{line}"),
        Err(err) => warn!("Failed to encode stats: {err}"),
    }
}

fn stop_after_duration(
    config: Res<RunConfig>,
    clock: Res<ElapsedClock>,
    phase: Res<SimulationPhase>,
    stats: Res<DisasterStats>,
    mut exit: EventWriter<AppExit>,
) {
    if clock.seconds >= config.duration_secs {
        info!(
            "Run finished at {} ({}, {} risk)",
            clock.formatted(),
            phase.label(),
            stats.risk_level.label()
        );
        exit.send(AppExit::Success);
    }
}
