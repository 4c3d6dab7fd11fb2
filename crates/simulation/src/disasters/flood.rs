//! Rising and falling flood water.
//!
//! The level oscillates between 0 and `2 * intensity / 5`; every building whose
//! base is under water loses integrity in proportion to the water depth.

use bevy::prelude::*;

use crate::buildings::Building;
use crate::surfaces::{GroundSurface, Tint, WaterSurface};

use super::types::DisasterTick;
use super::BuildingQuery;

/// Integrity lost per unit of water pressure per tick.
const PRESSURE_DAMAGE: f32 = 0.001;
/// Water pressure per unit of depth.
const PRESSURE_PER_DEPTH: f32 = 0.1;

/// `(sin(t * 0.2) + 1) * (i / 10) * 2`
pub fn water_level(time: f32, intensity: f32) -> f32 {
    ((time * 0.2).sin() + 1.0) * (intensity / 10.0) * 2.0
}

pub fn water_opacity(time: f32) -> f32 {
    0.6 + time.sin() * 0.1
}

/// Wet ground drifts toward blue-gray as the water rises.
pub fn ground_rgb(level: f32) -> [f32; 3] {
    let saturation = (level / 2.0).min(1.0);
    [
        0.486 - saturation * 0.2,
        0.731 - saturation * 0.3,
        0.241,
    ]
}

pub fn damage_rgb(damage: f32) -> [f32; 3] {
    [0.5 + damage * 0.2, 0.5 + damage * 0.1, 0.6 + damage * 0.2]
}

/// Depth of water above the base of a building centered at `center_y`.
pub fn water_depth(level: f32, building: &Building, center_y: f32) -> f32 {
    (level - building.base_y(center_y)).max(0.0)
}

/// Apply one tick of flood water to a single building. Dry buildings are
/// left untouched.
pub fn flood_building(level: f32, building: &mut Building, transform: &Transform, tint: &mut Tint) {
    let depth = water_depth(level, building, transform.translation.y);
    if depth <= 0.0 {
        return;
    }
    let pressure = depth * PRESSURE_PER_DEPTH;
    building.apply_damage(pressure * PRESSURE_DAMAGE);
    let [r, g, b] = damage_rgb(building.damage());
    *tint = Tint::rgb(r, g, b);
}

pub fn apply(
    tick: &DisasterTick,
    water: &mut WaterSurface,
    ground: &mut GroundSurface,
    buildings: &mut BuildingQuery,
) {
    let level = water_level(tick.time, tick.intensity);
    water.level = level;
    water.opacity = water_opacity(tick.time);

    let [r, g, b] = ground_rgb(level);
    ground.set_rgb(r, g, b);

    for (mut building, _, transform, mut tint) in buildings.iter_mut() {
        flood_building(level, &mut building, &transform, &mut tint);
    }
}
