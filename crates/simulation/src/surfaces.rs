//! Shared surfaces and the tint component the renderer reads.
//!
//! The water plane and the ground are single shared records, so they live in
//! resources. Per-object colors (buildings, tree parts) live in `Tint`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Rest color of the ground (`#7cba3d`).
pub const GROUND_COLOR: Color = Color::srgb(0.486_274_5, 0.729_411_8, 0.239_215_7);
/// Color of the water plane (`#0077be`).
pub const WATER_COLOR: Color = Color::srgb(0.0, 0.466_666_7, 0.745_098_0);
/// Undamaged building color (`#8c8c8c`).
pub const BUILDING_COLOR: Color = Color::srgb(0.549_019_6, 0.549_019_6, 0.549_019_6);
/// Foliage color of a fresh tree (`#228b22`).
pub const FOLIAGE_COLOR: Color = Color::srgb(0.133_333_3, 0.545_098_0, 0.133_333_3);
/// Trunk color (`#8b4513`).
pub const TRUNK_COLOR: Color = Color::srgb(0.545_098_0, 0.270_588_2, 0.074_509_8);
/// Foliage after the lava front has passed.
pub const BURNT_COLOR: Color = Color::srgb(0.2, 0.1, 0.0);

/// Height of the hidden water plane, just under the ground.
pub const WATER_REST_LEVEL: f32 = -0.1;
/// Opacity of the water plane at rest.
pub const WATER_REST_OPACITY: f32 = 0.6;

/// Display color of a building or tree part.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Tint(pub Color);

impl Tint {
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self(Color::srgb(r, g, b))
    }

    /// sRGB channels, in the space the tint formulas are written in.
    pub fn channels(&self) -> [f32; 3] {
        let c = self.0.to_srgba();
        [c.red, c.green, c.blue]
    }

    pub fn red(&self) -> f32 {
        self.0.to_srgba().red
    }
}

/// The flood/tsunami water plane.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterSurface {
    /// World-space y of the plane.
    pub level: f32,
    pub opacity: f32,
    pub visible: bool,
    #[serde(skip, default = "water_color")]
    pub color: Color,
}

fn water_color() -> Color {
    WATER_COLOR
}

impl Default for WaterSurface {
    fn default() -> Self {
        Self {
            level: WATER_REST_LEVEL,
            opacity: WATER_REST_OPACITY,
            visible: false,
            color: WATER_COLOR,
        }
    }
}

/// The ground plane, tinted by water saturation or volcanic ash.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GroundSurface {
    pub tint: Color,
}

impl Default for GroundSurface {
    fn default() -> Self {
        Self { tint: GROUND_COLOR }
    }
}

impl GroundSurface {
    pub fn set_rgb(&mut self, r: f32, g: f32, b: f32) {
        self.tint = Color::srgb(r, g, b);
    }

    pub fn channels(&self) -> [f32; 3] {
        Tint(self.tint).channels()
    }
}

pub struct SurfacesPlugin;

impl Plugin for SurfacesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WaterSurface>()
            .init_resource::<GroundSurface>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_surface_default_is_hidden_at_rest() {
        let water = WaterSurface::default();
        assert!(!water.visible);
        assert!((water.level - WATER_REST_LEVEL).abs() < f32::EPSILON);
        assert!((water.opacity - WATER_REST_OPACITY).abs() < f32::EPSILON);
    }

    #[test]
    fn test_ground_default_color() {
        let ground = GroundSurface::default();
        let [r, g, b] = ground.channels();
        assert!((r - 124.0 / 255.0).abs() < 1e-6);
        assert!((g - 186.0 / 255.0).abs() < 1e-6);
        assert!((b - 61.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_foliage_and_trunk_are_told_apart_by_red_channel() {
        assert!(Tint(FOLIAGE_COLOR).red() < 0.4);
        assert!(Tint(TRUNK_COLOR).red() >= 0.4);
        assert!(Tint(BURNT_COLOR).red() < 0.4);
    }

    #[test]
    fn test_tint_rgb_roundtrip() {
        let tint = Tint::rgb(0.5, 0.25, 0.75);
        assert_eq!(tint.channels(), [0.5, 0.25, 0.75]);
    }

    #[test]
    fn test_water_surface_serde_roundtrip() {
        let water = WaterSurface {
            level: 1.5,
            opacity: 0.7,
            visible: true,
            color: WATER_COLOR,
        };
        let json = serde_json::to_string(&water).expect("serialize");
        let restored: WaterSurface = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, water);
    }
}
