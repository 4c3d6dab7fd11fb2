//! # TestCity: headless integration test harness
//!
//! A fluent builder over an empty `DisasterSession`. Tests place the
//! buildings and trees they need, start a disaster, advance ticks and
//! assert on the resulting records.

use std::time::Duration;

use bevy::prelude::*;

use crate::buildings::Building;
use crate::config::SimulationConfig;
use crate::disasters::DisasterKind;
use crate::session::{BuildingView, DisasterSession, TreeView};
use crate::sim_clock::SimulationPhase;
use crate::surfaces::{GROUND_COLOR, WATER_COLOR};
use crate::trees::TreeSpec;

pub struct TestCity {
    session: DisasterSession,
}

impl Default for TestCity {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCity {
    /// Empty city, no generated content.
    pub fn new() -> Self {
        Self {
            session: DisasterSession::empty(SimulationConfig::default()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            session: DisasterSession::empty(SimulationConfig::with_seed(seed)),
        }
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            session: DisasterSession::empty(config),
        }
    }

    /// City generated from `seed`.
    pub fn generated(seed: u64) -> Self {
        Self {
            session: DisasterSession::new(SimulationConfig::with_seed(seed)),
        }
    }

    // -----------------------------------------------------------------------
    // World setup (builder pattern, consumes and returns Self)
    // -----------------------------------------------------------------------

    /// Ground-standing building with its footprint centered on `(x, z)`.
    pub fn with_building(mut self, x: f32, z: f32, height: f32, population: u32) -> Self {
        self.session.spawn_building(
            Building::new(0.8, 0.8, height, population, 0.6),
            Vec3::new(x, height / 2.0, z),
        );
        self
    }

    pub fn with_building_record(mut self, building: Building, position: Vec3) -> Self {
        self.session.spawn_building(building, position);
        self
    }

    pub fn with_tree(mut self, x: f32, z: f32) -> Self {
        self.session
            .spawn_tree(&TreeSpec::upright(Vec3::new(x, 0.0, z), 1.0));
        self
    }

    pub fn with_tree_spec(mut self, spec: TreeSpec) -> Self {
        self.session.spawn_tree(&spec);
        self
    }

    pub fn running(mut self, kind: DisasterKind, intensity: i64) -> Self {
        self.session.start(kind, intensity);
        self
    }

    // -----------------------------------------------------------------------
    // Time
    // -----------------------------------------------------------------------

    pub fn tick(&mut self, n: u32) -> &mut Self {
        self.session.steps(n);
        self
    }

    /// `n` frames of 100 ms wall time.
    pub fn frames(&mut self, n: u32) -> &mut Self {
        for _ in 0..n {
            self.session.frame(Duration::from_millis(100));
        }
        self
    }

    // -----------------------------------------------------------------------
    // Access
    // -----------------------------------------------------------------------

    pub fn session(&mut self) -> &mut DisasterSession {
        &mut self.session
    }

    pub fn buildings(&mut self) -> Vec<BuildingView> {
        self.session.buildings()
    }

    pub fn trees(&mut self) -> Vec<TreeView> {
        self.session.trees()
    }

    pub fn integrities(&mut self) -> Vec<f32> {
        self.buildings()
            .iter()
            .map(|view| view.building.integrity)
            .collect()
    }

    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    pub fn assert_phase(&self, expected: SimulationPhase) {
        assert_eq!(self.session.phase(), expected);
    }

    pub fn assert_integrity_in_range(&mut self) {
        for integrity in self.integrities() {
            assert!(
                (0.0..=1.0).contains(&integrity),
                "integrity {integrity} out of range"
            );
        }
    }

    /// Water hidden at rest and the ground back to its rest color.
    pub fn assert_surfaces_at_rest(&self) {
        let water = self.session.water();
        assert!(!water.visible, "water still visible");
        assert!((water.level - -0.1).abs() < f32::EPSILON);
        assert!((water.opacity - 0.6).abs() < f32::EPSILON);
        assert_eq!(water.color, WATER_COLOR);
        assert_eq!(self.session.ground().tint, GROUND_COLOR);
    }
}
