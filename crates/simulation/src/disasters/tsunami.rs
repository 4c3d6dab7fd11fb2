//! Tsunami: a faster, higher version of the flood with wave impact.

use bevy::prelude::*;

use crate::buildings::Building;
use crate::surfaces::{GroundSurface, Tint, WaterSurface};

use super::flood::water_depth;
use super::types::DisasterTick;
use super::BuildingQuery;

const IMPACT_PER_DEPTH: f32 = 0.15;
const IMPACT_DAMAGE: f32 = 0.005;

/// `(sin(t * 0.5) + 1) * (i / 5) * 4`
pub fn wave_height(time: f32, intensity: f32) -> f32 {
    ((time * 0.5).sin() + 1.0) * (intensity / 5.0) * 4.0
}

pub fn wave_speed(intensity: f32) -> f32 {
    intensity * 0.2
}

pub fn water_opacity(time: f32, wave_speed: f32) -> f32 {
    0.7 + (time * wave_speed).sin() * 0.2
}

pub fn ground_rgb(level: f32) -> [f32; 3] {
    let saturation = (level / 3.0).min(1.0);
    [
        0.486 - saturation * 0.3,
        0.731 - saturation * 0.4,
        0.241,
    ]
}

pub fn damage_rgb(damage: f32) -> [f32; 3] {
    [0.4 + damage * 0.3, 0.4 + damage * 0.1, 0.5 + damage * 0.3]
}

/// Roll angle of a building hit by the wave.
pub fn sway(time: f32, wave_speed: f32, intensity: f32) -> f32 {
    (time * wave_speed).sin() * 0.1 * intensity
}

pub fn tsunami_building(
    tick: &DisasterTick,
    level: f32,
    building: &mut Building,
    transform: &mut Transform,
    tint: &mut Tint,
) {
    let impact = water_depth(level, building, transform.translation.y);
    if impact <= 0.0 {
        return;
    }
    let speed = wave_speed(tick.intensity);
    let impact_force = impact * speed * IMPACT_PER_DEPTH;
    building.apply_damage(impact_force * IMPACT_DAMAGE);

    let (pitch, yaw, _) = transform.rotation.to_euler(EulerRot::XYZ);
    let roll = sway(tick.time, speed, tick.intensity);
    transform.rotation = Quat::from_euler(EulerRot::XYZ, pitch, yaw, roll);

    let [r, g, b] = damage_rgb(building.damage());
    *tint = Tint::rgb(r, g, b);
}

pub fn apply(
    tick: &DisasterTick,
    water: &mut WaterSurface,
    ground: &mut GroundSurface,
    buildings: &mut BuildingQuery,
) {
    let level = wave_height(tick.time, tick.intensity);
    water.level = level;
    water.opacity = water_opacity(tick.time, wave_speed(tick.intensity));

    let [r, g, b] = ground_rgb(level);
    ground.set_rgb(r, g, b);

    for (mut building, _, mut transform, mut tint) in buildings.iter_mut() {
        tsunami_building(tick, level, &mut building, &mut transform, &mut tint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(time: f32, intensity: f32) -> DisasterTick {
        DisasterTick { time, intensity }
    }

    #[test]
    fn test_wave_height_at_zero() {
        // (0 + 1) * (10 / 5) * 4
        assert!((wave_height(0.0, 10.0) - 8.0).abs() < 1e-6);
        assert!((wave_height(0.0, 5.0) - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_wave_speed() {
        assert!((wave_speed(10.0) - 2.0).abs() < 1e-6);
        assert!((wave_speed(1.0) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_ground_saturation_caps_at_three() {
        assert_eq!(ground_rgb(3.0), ground_rgb(30.0));
        let wet = ground_rgb(3.0);
        assert!((wet[0] - 0.186).abs() < 1e-6);
        assert!((wet[1] - 0.331).abs() < 1e-6);
    }

    #[test]
    fn test_impact_damage_formula() {
        let mut building = Building::new(1.0, 1.0, 2.0, 10, 0.6);
        let mut transform = Transform::from_xyz(0.0, 1.0, 0.0);
        let mut tint = Tint::rgb(0.0, 0.0, 0.0);
        let t = tick(0.0, 10.0);
        tsunami_building(&t, 2.0, &mut building, &mut transform, &mut tint);
        // depth 2 * speed 2 * 0.15 = 0.6 impact -> 0.003 damage
        assert!((building.integrity - 0.997).abs() < 1e-6);
    }

    #[test]
    fn test_roll_follows_wave() {
        let mut building = Building::new(1.0, 1.0, 2.0, 10, 0.6);
        let mut transform = Transform::from_xyz(0.0, 1.0, 0.0);
        let mut tint = Tint::rgb(0.0, 0.0, 0.0);
        let t = tick(1.0, 5.0);
        tsunami_building(&t, 3.0, &mut building, &mut transform, &mut tint);
        let (_, _, roll) = transform.rotation.to_euler(EulerRot::XYZ);
        let expected = sway(1.0, wave_speed(5.0), 5.0);
        assert!((roll - expected).abs() < 1e-4, "roll {roll} expected {expected}");
    }

    #[test]
    fn test_building_above_wave_keeps_state() {
        let mut building = Building::new(1.0, 1.0, 2.0, 10, 0.6);
        building.integrity = 0.5;
        let mut transform = Transform::from_xyz(0.0, 10.0, 0.0);
        let before = transform;
        let mut tint = Tint::rgb(0.3, 0.3, 0.3);
        tsunami_building(&tick(2.0, 8.0), 1.0, &mut building, &mut transform, &mut tint);
        assert_eq!(building.integrity, 0.5);
        assert_eq!(transform, before);
        assert_eq!(tint, Tint::rgb(0.3, 0.3, 0.3));
    }
}
