//! Decorative trees and their reaction to the running disaster.
//!
//! A tree is a root entity carrying `Tree` and a `Transform`, with one trunk
//! and two or three foliage layers as children. Trees hold no structural
//! state; disasters only rotate them or burn their foliage.

use bevy::prelude::*;

use crate::disasters::volcano::lava_spread;
use crate::disasters::{DisasterKind, DisasterSettings};
use crate::sim_clock::SimulationClock;
use crate::sim_rng::SimRng;
use crate::surfaces::{Tint, BURNT_COLOR, FOLIAGE_COLOR, TRUNK_COLOR};
use crate::DisasterSet;

/// Parts with a red channel below this are foliage.
const FOLIAGE_RED_LIMIT: f32 = 0.4;
const WATER_SWAY_PER_INTENSITY: f32 = 0.1;
const QUAKE_JITTER_PER_INTENSITY: f32 = 0.05;

/// Root of a tree. `original` is the spawn-time pose restored on reset.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Tree {
    pub original: Transform,
}

/// Trunk or foliage layer of a tree.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct TreePart {
    pub original_tint: Color,
}

/// Placement of one generated tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeSpec {
    /// Ground position; y is always 0.
    pub position: Vec3,
    pub scale: f32,
    pub yaw: f32,
    /// One entry per foliage layer, bottom first.
    pub foliage_yaws: Vec<f32>,
    pub tilt_x: f32,
    pub tilt_z: f32,
}

impl TreeSpec {
    /// Upright tree with two foliage layers.
    pub fn upright(position: Vec3, scale: f32) -> Self {
        Self {
            position: Vec3::new(position.x, 0.0, position.z),
            scale,
            yaw: 0.0,
            foliage_yaws: vec![0.0, 0.0],
            tilt_x: 0.0,
            tilt_z: 0.0,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(Quat::from_euler(
            EulerRot::XYZ,
            self.tilt_x,
            self.yaw,
            self.tilt_z,
        ))
    }

    /// Child parts in local space: the trunk, then foliage from the bottom up.
    pub fn parts(&self) -> Vec<(TreePart, Tint, Transform)> {
        let s = self.scale;
        let mut parts = Vec::with_capacity(1 + self.foliage_yaws.len());
        parts.push((
            TreePart { original_tint: TRUNK_COLOR },
            Tint(TRUNK_COLOR),
            Transform::from_xyz(0.0, 0.25 * s, 0.0).with_scale(Vec3::splat(s)),
        ));
        for (layer, yaw) in self.foliage_yaws.iter().enumerate() {
            let j = layer as f32;
            parts.push((
                TreePart { original_tint: FOLIAGE_COLOR },
                Tint(FOLIAGE_COLOR),
                Transform::from_xyz(0.0, (0.8 + j * 0.4) * s, 0.0)
                    .with_rotation(Quat::from_rotation_y(*yaw))
                    .with_scale(Vec3::new(
                        s * (1.0 - j * 0.15),
                        s * (1.0 - j * 0.1),
                        s * (1.0 - j * 0.15),
                    )),
            ));
        }
        parts
    }
}

pub fn is_foliage(tint: &Tint) -> bool {
    tint.red() < FOLIAGE_RED_LIMIT
}

/// Pitch and roll of a tree standing in moving water.
pub fn water_sway(time: f32, intensity: f32) -> f32 {
    (time * 2.0).sin() * WATER_SWAY_PER_INTENSITY * intensity
}

fn with_pitch_roll(original: &Transform, pitch: f32, roll: f32) -> Quat {
    let (_, yaw, _) = original.rotation.to_euler(EulerRot::XYZ);
    Quat::from_euler(EulerRot::XYZ, pitch, yaw, roll)
}

pub fn react_trees(
    clock: Res<SimulationClock>,
    settings: Res<DisasterSettings>,
    mut rng: ResMut<SimRng>,
    mut trees: Query<(&Tree, &mut Transform, Option<&Children>)>,
    mut parts: Query<&mut Tint, With<TreePart>>,
) {
    let Some(kind) = settings.kind else {
        return;
    };
    let time = clock.sim_time();
    let intensity = settings.intensity.as_f32();

    match kind {
        DisasterKind::Flood | DisasterKind::Tsunami => {
            let sway = water_sway(time, intensity);
            for (tree, mut transform, _) in &mut trees {
                transform.rotation = with_pitch_roll(&tree.original, sway, sway);
            }
        }
        DisasterKind::Earthquake => {
            let jitter = QUAKE_JITTER_PER_INTENSITY * intensity;
            for (tree, mut transform, _) in &mut trees {
                let pitch = rng.symmetric(jitter);
                let roll = rng.symmetric(jitter);
                transform.rotation = with_pitch_roll(&tree.original, pitch, roll);
            }
        }
        DisasterKind::Volcano => {
            let spread = lava_spread(time);
            for (tree, _, children) in &trees {
                let distance = Vec2::new(tree.original.translation.x, tree.original.translation.z)
                    .length();
                if distance >= spread {
                    continue;
                }
                let Some(children) = children else {
                    continue;
                };
                for &child in children.iter() {
                    if let Ok(mut tint) = parts.get_mut(child) {
                        if is_foliage(&tint) {
                            tint.0 = BURNT_COLOR;
                        }
                    }
                }
            }
        }
    }
}

/// Put every tree back to its spawn pose and colors.
pub fn restore_trees(world: &mut World) {
    let mut trees = world.query::<(&Tree, &mut Transform)>();
    for (tree, mut transform) in trees.iter_mut(world) {
        *transform = tree.original;
    }
    let mut parts = world.query::<(&TreePart, &mut Tint)>();
    for (part, mut tint) in parts.iter_mut(world) {
        tint.0 = part.original_tint;
    }
}

pub struct TreesPlugin;

impl Plugin for TreesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, react_trees.in_set(DisasterSet::Secondary));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts_layout() {
        let mut spec = TreeSpec::upright(Vec3::new(1.0, 3.0, 2.0), 1.0);
        spec.foliage_yaws = vec![0.0, 1.0, 2.0];
        assert_eq!(spec.position.y, 0.0);
        let parts = spec.parts();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0].1, Tint(TRUNK_COLOR));
        assert!(parts[1..].iter().all(|(_, tint, _)| *tint == Tint(FOLIAGE_COLOR)));
        assert!((parts[3].2.translation.y - 1.6).abs() < 1e-6);
    }

    #[test]
    fn test_only_foliage_matches_red_limit() {
        let parts = TreeSpec::upright(Vec3::ZERO, 1.2).parts();
        let foliage = parts.iter().filter(|(_, tint, _)| is_foliage(tint)).count();
        assert_eq!(foliage, 2);
    }

    #[test]
    fn test_water_sway_bounds() {
        assert_eq!(water_sway(0.0, 10.0), 0.0);
        for step in 0..500 {
            let s = water_sway(step as f32 * 0.1, 10.0);
            assert!(s.abs() <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn test_pitch_roll_keeps_yaw() {
        let original = Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, 0.03, 1.2, -0.02));
        let rotation = with_pitch_roll(&original, 0.1, 0.1);
        let (pitch, yaw, roll) = rotation.to_euler(EulerRot::XYZ);
        assert!((yaw - 1.2).abs() < 1e-4);
        assert!((pitch - 0.1).abs() < 1e-4);
        assert!((roll - 0.1).abs() < 1e-4);
    }
}
