use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::buildings::Building;
use crate::disasters::{DisasterSettings, Intensity};
use crate::sim_clock::ElapsedClock;
use crate::DisasterSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_intensity(intensity: Intensity) -> Self {
        match intensity.get() {
            i if i > 7 => RiskLevel::High,
            i if i > 4 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// The stats panel. Zeroed on reset.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisasterStats {
    pub affected_buildings: u32,
    pub affected_population: u64,
    pub evacuation_routes: u32,
    pub risk_level: RiskLevel,
}

/// Aggregate building damage. Read-only over the buildings.
pub fn compute_stats<'a>(
    buildings: impl IntoIterator<Item = &'a Building>,
    intensity: Intensity,
) -> DisasterStats {
    let mut affected_buildings = 0u32;
    let mut affected_population = 0u64;
    for building in buildings {
        if building.is_affected() {
            affected_buildings += 1;
            affected_population += building.affected_population();
        }
    }
    DisasterStats {
        affected_buildings,
        affected_population,
        evacuation_routes: u32::from(intensity.get()) * 2,
        risk_level: RiskLevel::from_intensity(intensity),
    }
}

pub fn update_disaster_stats(
    settings: Res<DisasterSettings>,
    buildings: Query<&Building>,
    mut stats: ResMut<DisasterStats>,
) {
    *stats = compute_stats(&buildings, settings.intensity);
}

/// Stats panel plus the formatted wall clock, as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    #[serde(flatten)]
    pub stats: DisasterStats,
    /// `HH:MM:SS`
    pub elapsed: String,
}

impl StatsReport {
    pub fn new(stats: &DisasterStats, clock: &ElapsedClock) -> Self {
        Self {
            stats: stats.clone(),
            elapsed: clock.formatted(),
        }
    }
}

pub struct StatsPlugin;

impl Plugin for StatsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DisasterStats>().add_systems(
            FixedUpdate,
            update_disaster_stats.in_set(DisasterSet::Stats),
        );
    }
}
