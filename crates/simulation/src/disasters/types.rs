use std::fmt;
use std::str::FromStr;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

// =============================================================================
// DisasterKind
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisasterKind {
    Flood,
    Earthquake,
    Tsunami,
    Volcano,
}

impl DisasterKind {
    pub const ALL: [DisasterKind; 4] = [
        DisasterKind::Flood,
        DisasterKind::Earthquake,
        DisasterKind::Tsunami,
        DisasterKind::Volcano,
    ];

    /// Identifier used by the UI selector.
    pub fn id(self) -> &'static str {
        match self {
            DisasterKind::Flood => "flood",
            DisasterKind::Earthquake => "earthquake",
            DisasterKind::Tsunami => "tsunami",
            DisasterKind::Volcano => "volcano",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DisasterKind::Flood => "Flood",
            DisasterKind::Earthquake => "Earthquake",
            DisasterKind::Tsunami => "Tsunami",
            DisasterKind::Volcano => "Volcano",
        }
    }

    /// Whether the water plane is shown during this disaster.
    pub fn uses_water(self) -> bool {
        matches!(self, DisasterKind::Flood | DisasterKind::Tsunami)
    }
}

impl fmt::Display for DisasterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DisasterKind {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DisasterKind::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SimulationError::UnknownDisaster(s.to_string()))
    }
}

// =============================================================================
// Intensity
// =============================================================================

/// Severity slider value, always within `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Intensity(u8);

impl Intensity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Clamp any integer into the valid range.
    pub fn new(raw: i64) -> Self {
        Self(raw.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn as_f32(self) -> f32 {
        self.0 as f32
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self(5)
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Settings and per-tick context
// =============================================================================

/// What the current run simulates.
///
/// `kind` is `None` when the run was started with a name that matched no
/// disaster; such a run ticks time and stats but applies no effect.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DisasterSettings {
    pub kind: Option<DisasterKind>,
    pub intensity: Intensity,
}

/// Inputs shared by every disaster update within one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisasterTick {
    /// Elapsed simulation time.
    pub time: f32,
    pub intensity: f32,
}

impl DisasterTick {
    pub fn new(time: f32, intensity: Intensity) -> Self {
        Self {
            time,
            intensity: intensity.as_f32(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        assert_eq!("flood".parse::<DisasterKind>(), Ok(DisasterKind::Flood));
        assert_eq!(" Earthquake ".parse::<DisasterKind>(), Ok(DisasterKind::Earthquake));
        assert_eq!("TSUNAMI".parse::<DisasterKind>(), Ok(DisasterKind::Tsunami));
        assert_eq!("volcano".parse::<DisasterKind>(), Ok(DisasterKind::Volcano));
    }

    #[test]
    fn test_parse_unknown_name() {
        assert_eq!(
            "floood".parse::<DisasterKind>(),
            Err(SimulationError::UnknownDisaster("floood".to_string()))
        );
    }

    #[test]
    fn test_id_roundtrip() {
        for kind in DisasterKind::ALL {
            assert_eq!(kind.id().parse::<DisasterKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_uses_water() {
        assert!(DisasterKind::Flood.uses_water());
        assert!(DisasterKind::Tsunami.uses_water());
        assert!(!DisasterKind::Earthquake.uses_water());
        assert!(!DisasterKind::Volcano.uses_water());
    }

    #[test]
    fn test_intensity_clamps() {
        assert_eq!(Intensity::new(0).get(), 1);
        assert_eq!(Intensity::new(-20).get(), 1);
        assert_eq!(Intensity::new(7).get(), 7);
        assert_eq!(Intensity::new(11).get(), 10);
        assert_eq!(Intensity::new(i64::MAX).get(), 10);
    }

    #[test]
    fn test_settings_default() {
        let settings = DisasterSettings::default();
        assert_eq!(settings.kind, None);
        assert_eq!(settings.intensity.get(), 5);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&DisasterKind::Volcano).expect("serialize");
        assert_eq!(json, "\"volcano\"");
    }
}
