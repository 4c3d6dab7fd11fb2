//! The two clocks of a run.
//!
//! `SimulationClock` counts fixed ticks and derives simulation time from
//! them; it drives every disaster formula. `ElapsedClock` counts displayed
//! wall-clock seconds from frame time. Both only move while the phase is
//! `Running`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::SIM_TIME_STEP;

/// Run lifecycle: Idle -> Running -> Paused <-> Running -> Idle (reset).
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SimulationPhase {
    #[default]
    Idle,
    Running,
    Paused,
}

impl SimulationPhase {
    pub fn label(self) -> &'static str {
        match self {
            SimulationPhase::Idle => "Idle",
            SimulationPhase::Running => "Running",
            SimulationPhase::Paused => "Paused",
        }
    }
}

/// Fixed-step simulation clock.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationClock {
    pub ticks: u64,
}

impl SimulationClock {
    /// Elapsed simulation time, `ticks * 0.1`.
    pub fn sim_time(&self) -> f32 {
        (self.ticks as f64 * SIM_TIME_STEP as f64) as f32
    }

    pub fn advance(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }

    pub fn reset(&mut self) {
        self.ticks = 0;
    }
}

/// Displayed run time in whole seconds.
#[derive(Resource, Debug, Clone)]
pub struct ElapsedClock {
    pub seconds: u32,
    timer: Timer,
}

impl Default for ElapsedClock {
    fn default() -> Self {
        Self {
            seconds: 0,
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

impl ElapsedClock {
    /// Advance by one frame of wall time, returns the number of seconds that
    /// rolled over.
    pub fn tick(&mut self, delta: std::time::Duration) -> u32 {
        self.timer.tick(delta);
        let rolled = self.timer.times_finished_this_tick();
        self.seconds = self.seconds.saturating_add(rolled);
        rolled
    }

    /// Zero the display and discard any partial second.
    pub fn reset(&mut self) {
        self.seconds = 0;
        self.timer.reset();
    }

    /// `HH:MM:SS`. Hours keep counting past 99.
    pub fn formatted(&self) -> String {
        format_hms(self.seconds)
    }
}

pub fn format_hms(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Run condition: the phase is `Running`.
pub fn simulation_running(phase: Res<SimulationPhase>) -> bool {
    *phase == SimulationPhase::Running
}

pub fn advance_simulation_clock(mut clock: ResMut<SimulationClock>) {
    clock.advance();
}

/// Counts displayed seconds from frame time. Paused or idle frames are
/// dropped, so resuming continues from the frozen value.
pub fn tick_elapsed_clock(
    time: Res<Time>,
    phase: Res<SimulationPhase>,
    mut clock: ResMut<ElapsedClock>,
) {
    if *phase != SimulationPhase::Running {
        return;
    }
    if clock.tick(time.delta()) > 0 {
        debug!("Simulation time {}", clock.formatted());
    }
}

pub struct SimClockPlugin;

impl Plugin for SimClockPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationPhase>()
            .init_resource::<SimulationClock>()
            .init_resource::<ElapsedClock>()
            .add_systems(
                FixedUpdate,
                advance_simulation_clock.in_set(crate::DisasterSet::Clock),
            )
            .add_systems(Update, tick_elapsed_clock);
    }
}
