use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::surfaces::{Tint, BUILDING_COLOR};

/// Integrity below which a building counts as affected.
pub const AFFECTED_INTEGRITY: f32 = 0.9;

/// Structural record of one building.
///
/// The building's box is centered on its `Transform`, so an undamaged
/// building sits at `y = height / 2`.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    pub population: u32,
    /// 1.0 = undamaged, 0.0 = destroyed. Only ever lowered during a run.
    pub integrity: f32,
    /// Earthquake stress above this value damages the building.
    pub damage_threshold: f32,
}

impl Building {
    pub fn new(width: f32, depth: f32, height: f32, population: u32, damage_threshold: f32) -> Self {
        Self {
            width,
            depth,
            height,
            population,
            integrity: 1.0,
            damage_threshold,
        }
    }

    /// Lower integrity by `amount`, flooring at zero. Negative amounts are
    /// ignored so integrity can never grow during a run.
    pub fn apply_damage(&mut self, amount: f32) {
        if amount.is_nan() || amount <= 0.0 {
            return;
        }
        self.integrity = (self.integrity - amount).clamp(0.0, 1.0);
    }

    /// `1 - integrity`, the input of every damage tint.
    pub fn damage(&self) -> f32 {
        1.0 - self.integrity
    }

    pub fn is_affected(&self) -> bool {
        self.integrity < AFFECTED_INTEGRITY
    }

    /// Residents displaced by the current damage level.
    pub fn affected_population(&self) -> u64 {
        (self.population as f32 * self.damage()).floor().max(0.0) as u64
    }

    /// Horizontal distance of `position` from the world origin.
    pub fn horizontal_distance(position: Vec3) -> f32 {
        Vec2::new(position.x, position.z).length()
    }

    /// World-space y of the building's base when its center is at `center_y`.
    pub fn base_y(&self, center_y: f32) -> f32 {
        center_y - self.height / 2.0
    }

    pub fn restore(&mut self) {
        self.integrity = 1.0;
    }
}

/// Snapshot taken at spawn time; reset restores it.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BuildingOriginal {
    pub transform: Transform,
    pub tint: Color,
}

/// Everything a building entity is spawned with.
pub fn building_bundle(
    building: Building,
    position: Vec3,
) -> (Building, BuildingOriginal, Transform, Tint) {
    let transform = Transform::from_translation(position);
    (
        building,
        BuildingOriginal {
            transform,
            tint: BUILDING_COLOR,
        },
        transform,
        Tint(BUILDING_COLOR),
    )
}
