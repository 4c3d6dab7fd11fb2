// =============================================================================
// World generation: buildings outside the parks, trees clustered around them.
// =============================================================================

use bevy::prelude::*;

use crate::buildings::{building_bundle, Building};
use crate::config::{
    SimulationConfig, BUILDING_SPREAD, PARK_CENTERS, PARK_HALF_SIZE, PARK_TREE_RADIUS,
    REMOTE_TREE_KEEP_CHANCE, TREE_BUILDING_CLEARANCE, TREE_SPREAD,
};
use crate::sim_rng::SimRng;
use crate::trees::{Tree, TreeSpec};

/// Marker resource that, when present, causes `init_world` to skip city
/// generation. Used by the test harness and by sessions fed from an external
/// scene.
#[derive(Resource)]
pub struct SkipWorldInit;

/// Placement of one generated building. The center sits at `height / 2`.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingSpec {
    pub position: Vec3,
    pub building: Building,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityPlan {
    pub buildings: Vec<BuildingSpec>,
    pub trees: Vec<TreeSpec>,
}

/// Inside the square no-build zone of any park.
pub fn is_in_park(x: f32, z: f32) -> bool {
    PARK_CENTERS
        .iter()
        .any(|park| (x - park.x).abs() < PARK_HALF_SIZE && (z - park.y).abs() < PARK_HALF_SIZE)
}

pub fn is_near_park(x: f32, z: f32, radius: f32) -> bool {
    let point = Vec2::new(x, z);
    PARK_CENTERS.iter().any(|park| point.distance(*park) < radius)
}

fn is_too_close_to_buildings(x: f32, z: f32, buildings: &[BuildingSpec]) -> bool {
    let point = Vec2::new(x, z);
    buildings.iter().any(|spec| {
        point.distance(Vec2::new(spec.position.x, spec.position.z)) < TREE_BUILDING_CLEARANCE
    })
}

/// Uniform draw in `[-half, half)`.
fn spread(rng: &mut SimRng, half: f32) -> f32 {
    rng.unit() * half * 2.0 - half
}

fn plan_buildings(config: &SimulationConfig, rng: &mut SimRng) -> Vec<BuildingSpec> {
    let mut buildings = Vec::new();
    for _ in 0..config.building_attempts {
        let x = spread(rng, BUILDING_SPREAD);
        let z = spread(rng, BUILDING_SPREAD);
        if is_in_park(x, z) {
            continue;
        }
        let height = rng.unit() * 3.0 + 1.0;
        let width = rng.unit() * 0.5 + 0.5;
        let depth = rng.unit() * 0.5 + 0.5;
        let population = (rng.unit() * 100.0).floor() as u32;
        let damage_threshold = rng.unit() * 0.3 + 0.5;
        buildings.push(BuildingSpec {
            position: Vec3::new(x, height / 2.0, z),
            building: Building::new(width, depth, height, population, damage_threshold),
        });
    }
    buildings
}

fn plan_trees(
    config: &SimulationConfig,
    rng: &mut SimRng,
    buildings: &[BuildingSpec],
) -> Vec<TreeSpec> {
    let mut trees = Vec::new();
    for _ in 0..config.tree_attempts {
        let x = spread(rng, TREE_SPREAD);
        let z = spread(rng, TREE_SPREAD);
        if is_too_close_to_buildings(x, z, buildings) {
            continue;
        }
        if !is_near_park(x, z, PARK_TREE_RADIUS) && rng.unit() > REMOTE_TREE_KEEP_CHANCE {
            continue;
        }

        let scale = 0.7 + rng.unit() * 0.6;
        let layers = 2 + (rng.unit() * 2.0).floor() as usize;
        let foliage_yaws = (0..layers)
            .map(|_| rng.unit() * std::f32::consts::TAU)
            .collect();
        let yaw = rng.unit() * std::f32::consts::TAU;
        let tilt_x = (rng.unit() - 0.5) * 0.1;
        let tilt_z = (rng.unit() - 0.5) * 0.1;

        trees.push(TreeSpec {
            position: Vec3::new(x, 0.0, z),
            scale,
            yaw,
            foliage_yaws,
            tilt_x,
            tilt_z,
        });
    }
    trees
}

/// Lay out the whole city. Identical seeds give identical plans.
pub fn plan_city(config: &SimulationConfig, rng: &mut SimRng) -> CityPlan {
    let buildings = plan_buildings(config, rng);
    let trees = plan_trees(config, rng, &buildings);
    CityPlan { buildings, trees }
}

pub fn spawn_building(commands: &mut Commands, spec: &BuildingSpec) -> Entity {
    commands
        .spawn(building_bundle(spec.building.clone(), spec.position))
        .id()
}

pub fn spawn_tree(commands: &mut Commands, spec: &TreeSpec) -> Entity {
    let transform = spec.transform();
    commands
        .spawn((Tree { original: transform }, transform))
        .with_children(|parent| {
            for part in spec.parts() {
                parent.spawn(part);
            }
        })
        .id()
}

pub fn init_world(
    mut commands: Commands,
    mut rng: ResMut<SimRng>,
    config: Res<SimulationConfig>,
    skip: Option<Res<SkipWorldInit>>,
) {
    if skip.is_some() {
        return;
    }
    let plan = plan_city(&config, &mut rng);
    for spec in &plan.buildings {
        spawn_building(&mut commands, spec);
    }
    for spec in &plan.trees {
        spawn_tree(&mut commands, spec);
    }
    info!(
        "City generated (seed {}): {} buildings, {} trees",
        config.seed,
        plan.buildings.len(),
        plan.trees.len()
    );
}
