//! Volcano at the world origin.
//!
//! The lava front grows outward at 0.1 units per unit of simulation time and
//! wraps at `MAX_LAVA_RADIUS`, one pulse every 150 time units. Buildings
//! inside the front take heat damage and melt into the ground.

use bevy::prelude::*;

use crate::buildings::{Building, BuildingOriginal};
use crate::surfaces::{GroundSurface, Tint};

use super::types::DisasterTick;
use super::BuildingQuery;

pub const MAX_LAVA_RADIUS: f32 = 15.0;
const SPREAD_RATE: f32 = 0.1;
const HEAT_DAMAGE_PER_INTENSITY: f32 = 0.01;
/// A melted building never shrinks below this fraction of its height.
const MIN_MELT_SCALE: f32 = 0.1;

/// Current radius of the lava front.
pub fn lava_spread(time: f32) -> f32 {
    (time * SPREAD_RATE).rem_euclid(MAX_LAVA_RADIUS)
}

/// Heat damage for one tick at `distance` from the crater.
pub fn heat_damage(distance: f32, intensity: f32) -> f32 {
    (1.0 - distance / MAX_LAVA_RADIUS) * intensity * HEAT_DAMAGE_PER_INTENSITY
}

pub fn damage_rgb(damage: f32) -> [f32; 3] {
    [0.8 + damage * 0.2, 0.2 - damage * 0.2, 0.2 - damage * 0.2]
}

/// Ash darkens the ground as the front spreads.
pub fn ground_rgb(spread: f32) -> [f32; 3] {
    let darkness = (spread / MAX_LAVA_RADIUS).min(1.0);
    let v = 0.3 - darkness * 0.2;
    [v, v, v]
}

pub fn burn_building(
    tick: &DisasterTick,
    spread: f32,
    building: &mut Building,
    original: &BuildingOriginal,
    transform: &mut Transform,
    tint: &mut Tint,
) {
    let distance = Building::horizontal_distance(transform.translation);
    if distance >= spread {
        return;
    }
    building.apply_damage(heat_damage(distance, tick.intensity));

    let [r, g, b] = damage_rgb(building.damage());
    *tint = Tint::rgb(r, g, b);

    // Melt: shrink vertically and keep the base on the ground.
    let scale_y = building.integrity.max(MIN_MELT_SCALE);
    transform.scale.y = original.transform.scale.y * scale_y;
    transform.translation.y = original.transform.translation.y * scale_y;
}

pub fn apply(tick: &DisasterTick, ground: &mut GroundSurface, buildings: &mut BuildingQuery) {
    let spread = lava_spread(tick.time);

    let [r, g, b] = ground_rgb(spread);
    ground.set_rgb(r, g, b);

    for (mut building, original, mut transform, mut tint) in buildings.iter_mut() {
        burn_building(tick, spread, &mut building, original, &mut transform, &mut tint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings::building_bundle;

    #[test]
    fn test_lava_spread_is_periodic() {
        for step in 0..300 {
            let t = step as f32 * 0.5;
            let a = lava_spread(t);
            let b = lava_spread(t + 150.0);
            assert!((a - b).abs() < 1e-3 || (a - b).abs() > 14.99, "t={t}: {a} vs {b}");
        }
        assert!((lava_spread(20.0) - 2.0).abs() < 1e-5);
        assert!((lava_spread(170.0) - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_lava_spread_stays_below_max() {
        for step in 0..10_000 {
            let spread = lava_spread(step as f32 * 0.1);
            assert!((0.0..MAX_LAVA_RADIUS).contains(&spread));
        }
    }

    #[test]
    fn test_heat_damage_falls_off_with_distance() {
        assert!((heat_damage(0.0, 10.0) - 0.1).abs() < 1e-6);
        assert!((heat_damage(7.5, 10.0) - 0.05).abs() < 1e-6);
        assert!(heat_damage(15.0, 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_building_outside_front_untouched() {
        let (mut building, original, mut transform, mut tint) =
            building_bundle(Building::new(1.0, 1.0, 2.0, 10, 0.6), Vec3::new(5.0, 1.0, 0.0));
        let before = (transform, tint);
        let tick = DisasterTick { time: 10.0, intensity: 10.0 };
        burn_building(&tick, 4.0, &mut building, &original, &mut transform, &mut tint);
        assert_eq!(building.integrity, 1.0);
        assert_eq!((transform, tint), before);
    }

    #[test]
    fn test_melt_keeps_base_on_ground() {
        let (mut building, original, mut transform, mut tint) =
            building_bundle(Building::new(1.0, 1.0, 3.0, 10, 0.6), Vec3::new(1.0, 1.5, 0.0));
        let tick = DisasterTick { time: 100.0, intensity: 10.0 };
        for _ in 0..5 {
            burn_building(&tick, 10.0, &mut building, &original, &mut transform, &mut tint);
        }
        let scale = transform.scale.y;
        assert!((scale - building.integrity).abs() < 1e-6);
        assert!((transform.translation.y - 1.5 * scale).abs() < 1e-6);
        // base of the scaled box: center - height * scale / 2 == 0
        assert!((transform.translation.y - 3.0 * scale / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_melt_scale_floor() {
        let (mut building, original, mut transform, mut tint) =
            building_bundle(Building::new(1.0, 1.0, 2.0, 10, 0.6), Vec3::new(0.0, 1.0, 0.0));
        let tick = DisasterTick { time: 100.0, intensity: 10.0 };
        for _ in 0..50 {
            burn_building(&tick, 10.0, &mut building, &original, &mut transform, &mut tint);
        }
        assert_eq!(building.integrity, 0.0);
        assert!((transform.scale.y - 0.1).abs() < 1e-6);
        assert!((transform.translation.y - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_ground_ash() {
        assert_eq!(ground_rgb(0.0), [0.3, 0.3, 0.3]);
        let ashen = ground_rgb(7.5);
        assert!((ashen[0] - 0.2).abs() < 1e-6);
    }
}
