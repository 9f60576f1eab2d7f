use crate::models::{or_zero, MeasurementBlocks};
use serde::{Deserialize, Serialize};

/// Distance scale selection exposed to the caller.
///
/// The mode names describe the desired display interpretation of a
/// round-trip-encoded raw value, so the factors read inverted: `TwoWay`
/// applies no scaling (raw value is already one-way) and `OneWay` halves
/// (raw value is round-trip). The mapping is kept exactly as the reference
/// viewer behaves; see DESIGN.md for the naming discussion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMode {
    /// Inspect the blocks and pick the factor heuristically
    Auto,
    /// Force factor 0.5: halve raw distances
    OneWay,
    /// Force factor 1.0: use raw distances unchanged
    TwoWay,
}

impl Default for DistanceMode {
    fn default() -> Self {
        DistanceMode::Auto
    }
}

impl std::str::FromStr for DistanceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(DistanceMode::Auto),
            "oneway" => Ok(DistanceMode::OneWay),
            "twoway" => Ok(DistanceMode::TwoWay),
            _ => Err(format!(
                "Invalid distance mode: {} (expected auto, oneway or twoway)",
                s
            )),
        }
    }
}

impl std::fmt::Display for DistanceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistanceMode::Auto => write!(f, "auto"),
            DistanceMode::OneWay => write!(f, "oneway"),
            DistanceMode::TwoWay => write!(f, "twoway"),
        }
    }
}

/// Ratio band where the device is reporting round-trip distances
const ROUND_TRIP_BAND: (f64, f64) = (1.7, 2.3);

/// Ratio band where the device is already reporting one-way distances
const ONE_WAY_BAND: (f64, f64) = (0.85, 1.15);

/// Fallback when the ratio is unavailable or out of both bands; round-trip
/// encoding is the more common raw format, so halving is the safer default.
const DEFAULT_FACTOR: f64 = 0.5;

/// Distance calibration engine.
///
/// Produces the positive scale factor that maps raw device distances to
/// one-way physical fiber distance. Pure and total: always returns a factor,
/// never fails.
pub struct DistanceCalibrator;

impl DistanceCalibrator {
    /// Resolve the scale factor for the selected mode.
    ///
    /// Fixed modes bypass the block inspection entirely.
    pub fn resolve(mode: DistanceMode, blocks: &MeasurementBlocks) -> f64 {
        match mode {
            DistanceMode::TwoWay => 1.0,
            DistanceMode::OneWay => 0.5,
            DistanceMode::Auto => Self::auto_factor(blocks),
        }
    }

    /// Heuristic factor from the ratio of the maximum event distance to the
    /// device-reported fiber length.
    ///
    /// A ratio near 2 means event distances are round-trip and must be
    /// halved; near 1 means they are already one-way. Anything else (missing
    /// or zero inputs included) falls back to halving.
    pub fn auto_factor(blocks: &MeasurementBlocks) -> f64 {
        let Some(ke) = blocks.key_events.as_ref() else {
            return DEFAULT_FACTOR;
        };

        let fiber_length = or_zero(ke.fiber_length);
        let max_ev = ke.max_event_distance();

        if fiber_length != 0.0 && max_ev != 0.0 {
            let r = max_ev / fiber_length;
            if ROUND_TRIP_BAND.0 < r && r < ROUND_TRIP_BAND.1 {
                return 0.5;
            }
            if ONE_WAY_BAND.0 < r && r < ONE_WAY_BAND.1 {
                return 1.0;
            }
        }

        DEFAULT_FACTOR
    }
}
