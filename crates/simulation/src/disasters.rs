//! Per-tick disaster updates.
//!
//! One system, `run_disaster_tick`, resolves the selected disaster and runs
//! its update over every building and the shared surfaces. Each disaster
//! lives in its own submodule as plain functions over components, so the
//! formulas can be tested without an `App`.

use bevy::prelude::*;

use crate::buildings::{Building, BuildingOriginal};
use crate::sim_clock::SimulationClock;
use crate::surfaces::{GroundSurface, Tint, WaterSurface};
use crate::DisasterSet;

pub mod earthquake;
pub mod flood;
pub mod tsunami;
pub mod types;
pub mod volcano;

pub use types::{DisasterKind, DisasterSettings, DisasterTick, Intensity};

/// Every building with the components a disaster may rewrite.
pub type BuildingQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut Building,
        &'static BuildingOriginal,
        &'static mut Transform,
        &'static mut Tint,
    ),
>;

/// Runs the selected disaster for the current tick. A run without a
/// selected disaster only advances time.
pub fn run_disaster_tick(
    clock: Res<SimulationClock>,
    settings: Res<DisasterSettings>,
    mut water: ResMut<WaterSurface>,
    mut ground: ResMut<GroundSurface>,
    mut buildings: BuildingQuery,
) {
    let Some(kind) = settings.kind else {
        return;
    };
    let tick = DisasterTick::new(clock.sim_time(), settings.intensity);

    match kind {
        DisasterKind::Flood => flood::apply(&tick, &mut water, &mut ground, &mut buildings),
        DisasterKind::Tsunami => tsunami::apply(&tick, &mut water, &mut ground, &mut buildings),
        DisasterKind::Earthquake => earthquake::apply(&tick, &mut buildings),
        DisasterKind::Volcano => volcano::apply(&tick, &mut ground, &mut buildings),
    }
}

pub struct DisastersPlugin;

impl Plugin for DisastersPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DisasterSettings>().add_systems(
            FixedUpdate,
            run_disaster_tick.in_set(DisasterSet::Disaster),
        );
    }
}
