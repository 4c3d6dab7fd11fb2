//! Runner settings read from `TWIN_*` environment variables.

use std::str::FromStr;

use bevy::prelude::*;

use simulation::config::{SimulationConfig, DEFAULT_SEED, DEFAULT_TICK_HZ};
use simulation::{DisasterKind, Intensity, SimulationError};

pub const DEFAULT_DISASTER: &str = "flood";
pub const DEFAULT_INTENSITY: i64 = 5;
pub const DEFAULT_DURATION_SECS: u32 = 10;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub seed: u64,
    /// Selector value; an unknown name runs without a disaster.
    pub disaster: String,
    pub intensity: Intensity,
    /// Displayed seconds before the runner exits.
    pub duration_secs: u32,
    pub tick_hz: f64,
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, SimulationError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| SimulationError::InvalidNumber {
                key: key.to_string(),
                value: raw,
            }),
    }
}

impl RunConfig {
    pub fn from_env() -> Result<Self, SimulationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SimulationError> {
        Ok(Self {
            seed: parse_var(&lookup, "TWIN_SEED", DEFAULT_SEED)?,
            disaster: lookup("TWIN_DISASTER").unwrap_or_else(|| DEFAULT_DISASTER.to_string()),
            intensity: Intensity::new(parse_var(&lookup, "TWIN_INTENSITY", DEFAULT_INTENSITY)?),
            duration_secs: parse_var(&lookup, "TWIN_DURATION_SECS", DEFAULT_DURATION_SECS)?,
            tick_hz: parse_var(&lookup, "TWIN_TICK_HZ", DEFAULT_TICK_HZ)?,
        })
    }

    pub fn kind(&self) -> Result<DisasterKind, SimulationError> {
        self.disaster.parse()
    }

    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            seed: self.seed,
            tick_hz: self.tick_hz,
            ..SimulationConfig::default()
        }
    }
}
