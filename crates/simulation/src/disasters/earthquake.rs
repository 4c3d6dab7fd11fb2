//! Earthquake: out-of-phase seismic waves shake every building.
//!
//! Position and rotation are recomputed from the original pose each tick, so
//! the shaking never drifts. Only integrity accumulates.

use bevy::prelude::*;

use crate::buildings::{Building, BuildingOriginal};
use crate::surfaces::Tint;

use super::types::DisasterTick;
use super::BuildingQuery;

/// Simulation time is sped up for seismic waves.
const TIME_SCALE: f32 = 5.0;
const SHAKE_PER_INTENSITY: f32 = 0.15;
const PHASE_PER_DISTANCE: f32 = 0.5;
const SWAY_PER_INTENSITY: f32 = 0.02;
const STRESS_DAMAGE_PER_INTENSITY: f32 = 0.001;
/// Height at which a building shakes exactly as much as the ground.
const REFERENCE_HEIGHT: f32 = 4.0;

/// Horizontal ground motion at one building for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeismicWave {
    pub phase_shift: f32,
    pub x: f32,
    pub z: f32,
}

/// Waves travel outward from the origin, so distance shifts their phase.
pub fn seismic_wave(scaled_time: f32, distance: f32, intensity: f32) -> SeismicWave {
    let phase_shift = distance * PHASE_PER_DISTANCE;
    let max_shake = intensity * SHAKE_PER_INTENSITY;
    SeismicWave {
        phase_shift,
        x: (scaled_time + phase_shift).sin() * max_shake,
        z: (scaled_time + phase_shift).cos() * max_shake,
    }
}

pub fn height_factor(height: f32) -> f32 {
    height / REFERENCE_HEIGHT
}

pub fn stress(wave: &SeismicWave, height_factor: f32) -> f32 {
    (wave.x.abs() + wave.z.abs()) * height_factor
}

pub fn damage_rgb(damage: f32) -> [f32; 3] {
    [0.55 + damage * 0.45, 0.55 - damage * 0.25, 0.55 - damage * 0.25]
}

pub fn shake_building(
    tick: &DisasterTick,
    building: &mut Building,
    original: &BuildingOriginal,
    transform: &mut Transform,
    tint: &mut Tint,
) {
    let time = tick.time * TIME_SCALE;
    let origin = original.transform.translation;
    let wave = seismic_wave(time, Building::horizontal_distance(origin), tick.intensity);
    let factor = height_factor(building.height);

    transform.translation.x = origin.x + wave.x * factor;
    transform.translation.z = origin.z + wave.z * factor;

    let sway = SWAY_PER_INTENSITY * tick.intensity * factor;
    let yaw = (time * 2.0 + wave.phase_shift).sin() * sway;
    let pitch = (time * 2.0 + wave.phase_shift).cos() * sway;
    let (_, _, roll) = original.transform.rotation.to_euler(EulerRot::XYZ);
    transform.rotation = Quat::from_euler(EulerRot::XYZ, pitch, yaw, roll);

    if stress(&wave, factor) > building.damage_threshold {
        building.apply_damage(STRESS_DAMAGE_PER_INTENSITY * tick.intensity);
    }

    let [r, g, b] = damage_rgb(building.damage());
    *tint = Tint::rgb(r, g, b);
}

pub fn apply(tick: &DisasterTick, buildings: &mut BuildingQuery) {
    for (mut building, original, mut transform, mut tint) in buildings.iter_mut() {
        shake_building(tick, &mut building, original, &mut transform, &mut tint);
    }
}
