//! `DisasterSession`: one headless simulation behind the control-panel API.
//!
//! A session owns its own Bevy `App`, so several can coexist (tests,
//! benches, the runner binary) without sharing state. Time only moves when
//! the caller asks: `step` runs exactly one fixed tick, `frame` advances the
//! app by one frame of wall time.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::buildings::{building_bundle, Building};
use crate::config::SimulationConfig;
use crate::control::{self, AlertPanel, SimulationCommand};
use crate::disasters::{DisasterKind, DisasterSettings, Intensity};
use crate::sim_clock::{ElapsedClock, SimulationClock, SimulationPhase};
use crate::stats::{DisasterStats, StatsReport};
use crate::surfaces::{GroundSurface, Tint, WaterSurface};
use crate::trees::{Tree, TreePart, TreeSpec};
use crate::world_init::SkipWorldInit;
use crate::SimulationPlugin;

/// Snapshot of one building as a renderer would read it.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingView {
    pub entity: Entity,
    pub building: Building,
    pub transform: Transform,
    pub tint: Tint,
}

/// Snapshot of one tree and its parts' colors, trunk first.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeView {
    pub entity: Entity,
    pub transform: Transform,
    pub part_tints: Vec<Tint>,
}

pub struct DisasterSession {
    app: App,
}

impl DisasterSession {
    /// Session with a generated city.
    pub fn new(config: SimulationConfig) -> Self {
        Self::build(config, false)
    }

    /// Session without generated content, to be filled with
    /// `spawn_building` / `spawn_tree`.
    pub fn empty(config: SimulationConfig) -> Self {
        Self::build(config, true)
    }

    fn build(config: SimulationConfig, skip_world_init: bool) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));
        if skip_world_init {
            app.insert_resource(SkipWorldInit);
        }
        app.insert_resource(config);
        app.add_plugins(SimulationPlugin);
        // Run Startup so the city exists before the first call.
        app.update();
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Control panel
    // -----------------------------------------------------------------------

    pub fn start(&mut self, kind: DisasterKind, intensity: i64) {
        control::start_disaster(self.world_mut(), Some(kind), Intensity::new(intensity));
    }

    /// Start from a selector value. An unknown name starts a run with no
    /// disaster effect and returns `None`.
    pub fn start_named(&mut self, name: &str, intensity: i64) -> Option<DisasterKind> {
        let kind = match name.parse::<DisasterKind>() {
            Ok(kind) => Some(kind),
            Err(err) => {
                warn!("{err}; running without a disaster");
                None
            }
        };
        control::start_disaster(self.world_mut(), kind, Intensity::new(intensity));
        kind
    }

    pub fn toggle_pause(&mut self) {
        control::toggle_pause(self.world_mut());
    }

    pub fn reset(&mut self) {
        control::reset_simulation(self.world_mut());
    }

    /// Queue a command; it is applied at the start of the next `frame`.
    pub fn send(&mut self, command: SimulationCommand) {
        self.world_mut().send_event(command);
    }

    // -----------------------------------------------------------------------
    // Time
    // -----------------------------------------------------------------------

    /// Exactly one simulation tick. Does nothing unless Running.
    pub fn step(&mut self) {
        self.world_mut().run_schedule(FixedUpdate);
    }

    pub fn steps(&mut self, n: u32) {
        for _ in 0..n {
            self.step();
        }
    }

    /// One frame of wall time: applies queued commands, runs the fixed ticks
    /// that fit in `dt` and ticks the wall clock. Long frames are not
    /// clamped, every accumulated tick runs.
    pub fn frame(&mut self, dt: Duration) {
        let mut virtual_time = self.world_mut().resource_mut::<Time<Virtual>>();
        if dt > virtual_time.max_delta() {
            virtual_time.set_max_delta(dt);
        }
        self.app.insert_resource(TimeUpdateStrategy::ManualDuration(dt));
        self.app.update();
    }

    // -----------------------------------------------------------------------
    // Read-out
    // -----------------------------------------------------------------------

    pub fn stats(&self) -> StatsReport {
        let world = self.world();
        let stats = world
            .get_resource::<DisasterStats>()
            .cloned()
            .unwrap_or_default();
        let clock = world
            .get_resource::<ElapsedClock>()
            .cloned()
            .unwrap_or_default();
        StatsReport::new(&stats, &clock)
    }

    pub fn phase(&self) -> SimulationPhase {
        self.world()
            .get_resource::<SimulationPhase>()
            .copied()
            .unwrap_or_default()
    }

    pub fn sim_time(&self) -> f32 {
        self.world()
            .get_resource::<SimulationClock>()
            .map_or(0.0, SimulationClock::sim_time)
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.world()
            .get_resource::<ElapsedClock>()
            .map_or(0, |clock| clock.seconds)
    }

    pub fn settings(&self) -> DisasterSettings {
        self.world()
            .get_resource::<DisasterSettings>()
            .copied()
            .unwrap_or_default()
    }

    pub fn water(&self) -> WaterSurface {
        self.world()
            .get_resource::<WaterSurface>()
            .cloned()
            .unwrap_or_default()
    }

    pub fn ground(&self) -> GroundSurface {
        self.world()
            .get_resource::<GroundSurface>()
            .copied()
            .unwrap_or_default()
    }

    pub fn alert(&self) -> Option<String> {
        self.world()
            .get_resource::<AlertPanel>()
            .and_then(|panel| panel.message.clone())
    }

    /// Every building, in spawn order.
    pub fn buildings(&mut self) -> Vec<BuildingView> {
        let world = self.world_mut();
        let mut query = world.query::<(Entity, &Building, &Transform, &Tint)>();
        let mut views: Vec<BuildingView> = query
            .iter(world)
            .map(|(entity, building, transform, tint)| BuildingView {
                entity,
                building: building.clone(),
                transform: *transform,
                tint: *tint,
            })
            .collect();
        views.sort_by_key(|view| view.entity);
        views
    }

    /// Every tree, in spawn order.
    pub fn trees(&mut self) -> Vec<TreeView> {
        let world = self.world_mut();
        let mut query =
            world.query_filtered::<(Entity, &Transform, Option<&Children>), With<Tree>>();
        let mut parts = world.query_filtered::<&Tint, With<TreePart>>();
        let world: &World = world;
        let mut views = Vec::new();
        for (entity, transform, children) in query.iter(world) {
            let part_tints = children
                .map(|children| {
                    children
                        .iter()
                        .filter_map(|child| parts.get(world, *child).ok().copied())
                        .collect()
                })
                .unwrap_or_default();
            views.push(TreeView {
                entity,
                transform: *transform,
                part_tints,
            });
        }
        views.sort_by_key(|view| view.entity);
        views
    }

    // -----------------------------------------------------------------------
    // Scene input
    // -----------------------------------------------------------------------

    pub fn spawn_building(&mut self, building: Building, position: Vec3) -> Entity {
        self.world_mut()
            .spawn(building_bundle(building, position))
            .id()
    }

    pub fn spawn_tree(&mut self, spec: &TreeSpec) -> Entity {
        let transform = spec.transform();
        self.world_mut()
            .spawn((Tree { original: transform }, transform))
            .with_children(|parent| {
                for part in spec.parts() {
                    parent.spawn(part);
                }
            })
            .id()
    }

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}
