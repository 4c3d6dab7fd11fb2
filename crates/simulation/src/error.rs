// ---------------------------------------------------------------------------
// SimulationError: typed errors for values parsed at the edges
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors raised while turning outside input (UI selections, environment
/// variables) into simulation settings.
///
/// The simulation itself never fails: once a value is parsed it is clamped
/// into range. These errors only surface at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// The disaster name does not match any known disaster.
    UnknownDisaster(String),
    /// A numeric setting could not be parsed.
    InvalidNumber { key: String, value: String },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::UnknownDisaster(name) => write!(
                f,
                "Unknown disaster type '{name}' (expected flood, earthquake, tsunami or volcano)"
            ),
            SimulationError::InvalidNumber { key, value } => {
                write!(f, "Invalid value for {key}: '{value}' is not a number")
            }
        }
    }
}

impl std::error::Error for SimulationError {}
