//! Run lifecycle: start, pause/resume and reset.
//!
//! The transitions are plain functions over the `World`, used both by
//! `DisasterSession` and by `apply_simulation_commands`, which drains
//! `SimulationCommand` events sent by UI code running in the same app.

use bevy::prelude::*;

use crate::buildings::{Building, BuildingOriginal};
use crate::disasters::{DisasterKind, DisasterSettings, Intensity};
use crate::sim_clock::{ElapsedClock, SimulationClock, SimulationPhase};
use crate::stats::{compute_stats, DisasterStats};
use crate::surfaces::{GroundSurface, Tint, WaterSurface};
use crate::trees::restore_trees;

/// Requests from the control panel.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum SimulationCommand {
    /// Reset, then run `kind` at `intensity`. `None` runs without effects.
    Start {
        kind: Option<DisasterKind>,
        intensity: Intensity,
    },
    TogglePause,
    Reset,
}

/// Banner shown while a run is active.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct AlertPanel {
    pub message: Option<String>,
}

pub fn start_message(kind: Option<DisasterKind>, intensity: Intensity) -> String {
    let name = kind.map_or("Unknown", DisasterKind::name);
    format!("{name} simulation started with intensity {intensity}")
}

/// Restore every building, tree and surface to its spawn state and go Idle.
pub fn reset_simulation(world: &mut World) {
    let mut buildings =
        world.query::<(&mut Building, &BuildingOriginal, &mut Transform, &mut Tint)>();
    for (mut building, original, mut transform, mut tint) in buildings.iter_mut(world) {
        building.restore();
        *transform = original.transform;
        tint.0 = original.tint;
    }
    restore_trees(world);

    world.insert_resource(WaterSurface::default());
    world.insert_resource(GroundSurface::default());
    world.insert_resource(DisasterStats::default());
    world.insert_resource(SimulationClock::default());
    world.insert_resource(ElapsedClock::default());
    world.insert_resource(AlertPanel::default());
    world.insert_resource(SimulationPhase::Idle);
}

/// Start a new run, replacing any run in progress.
pub fn start_disaster(world: &mut World, kind: Option<DisasterKind>, intensity: Intensity) {
    reset_simulation(world);

    world.insert_resource(DisasterSettings { kind, intensity });
    if let Some(mut water) = world.get_resource_mut::<WaterSurface>() {
        water.visible = kind.is_some_and(DisasterKind::uses_water);
    }
    let message = start_message(kind, intensity);
    info!("{message}");
    world.insert_resource(AlertPanel {
        message: Some(message),
    });
    world.insert_resource(SimulationPhase::Running);
    refresh_stats(world);
}

/// Pause a running simulation or resume a paused one. Ignored while Idle.
pub fn toggle_pause(world: &mut World) {
    let Some(mut phase) = world.get_resource_mut::<SimulationPhase>() else {
        return;
    };
    match *phase {
        SimulationPhase::Running => {
            *phase = SimulationPhase::Paused;
            info!("Simulation paused");
        }
        SimulationPhase::Paused => {
            *phase = SimulationPhase::Running;
            info!("Simulation resumed");
        }
        SimulationPhase::Idle => {
            debug!("Pause toggled while idle, ignoring");
        }
    }
}

/// Recompute the stats panel from the current buildings.
pub fn refresh_stats(world: &mut World) {
    let intensity = world
        .get_resource::<DisasterSettings>()
        .map(|settings| settings.intensity)
        .unwrap_or_default();
    let mut buildings = world.query::<&Building>();
    let stats = compute_stats(buildings.iter(world), intensity);
    world.insert_resource(stats);
}

pub fn apply_command(world: &mut World, command: SimulationCommand) {
    match command {
        SimulationCommand::Start { kind, intensity } => start_disaster(world, kind, intensity),
        SimulationCommand::TogglePause => toggle_pause(world),
        SimulationCommand::Reset => {
            reset_simulation(world);
            info!("Simulation reset");
        }
    }
}

/// Drains pending `SimulationCommand`s and applies them in order.
pub fn apply_simulation_commands(world: &mut World) {
    let pending: Vec<SimulationCommand> =
        match world.get_resource_mut::<Events<SimulationCommand>>() {
            Some(mut events) => events.drain().collect(),
            None => {
                warn!("SimulationCommand events not registered");
                return;
            }
        };
    for command in pending {
        apply_command(world, command);
    }
}

pub struct ControlPlugin;

impl Plugin for ControlPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SimulationCommand>()
            .init_resource::<AlertPanel>()
            .add_systems(PreUpdate, apply_simulation_commands);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_message() {
        assert_eq!(
            start_message(Some(DisasterKind::Tsunami), Intensity::new(7)),
            "Tsunami simulation started with intensity 7"
        );
        assert_eq!(
            start_message(None, Intensity::new(3)),
            "Unknown simulation started with intensity 3"
        );
    }
}
