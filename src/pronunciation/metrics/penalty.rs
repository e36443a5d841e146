use serde::{Deserialize, Serialize};

use crate::pronunciation::{PronunciationError, Result};

/// Penalty applied when the pitch deviation is strictly above `above`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyBand {
    pub above: f64,
    pub penalty: f64,
}

const DEFAULT_BANDS: [PenaltyBand; 3] = [
    PenaltyBand {
        above: 10.0,
        penalty: 0.3,
    },
    PenaltyBand {
        above: 6.0,
        penalty: 0.2,
    },
    PenaltyBand {
        above: 4.0,
        penalty: 0.1,
    },
];

/// Maps `|observed - reference|` mean pitch to a similarity penalty.
///
/// Bands are checked from the widest deviation down; the first one exceeded
/// wins and anything at or below the last threshold costs nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PitchPenaltyPolicy {
    bands: Vec<PenaltyBand>,
}

impl Default for PitchPenaltyPolicy {
    fn default() -> Self {
        Self {
            bands: DEFAULT_BANDS.to_vec(),
        }
    }
}

impl PitchPenaltyPolicy {
    pub fn new(bands: Vec<PenaltyBand>) -> Result<Self> {
        let policy = Self { bands };
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<()> {
        for band in &self.bands {
            if !band.above.is_finite() || !(0.0..=1.0).contains(&band.penalty) {
                return Err(PronunciationError::config(format!(
                    "penalty band {:?} must have a finite threshold and a penalty in [0, 1]",
                    band
                )));
            }
        }
        if self.bands.windows(2).any(|pair| pair[0].above <= pair[1].above) {
            return Err(PronunciationError::config(
                "penalty band thresholds must be strictly descending",
            ));
        }
        Ok(())
    }

    pub fn penalty(&self, observed_mean_pitch: f64, reference_mean_pitch: f64) -> f64 {
        let deviation = (observed_mean_pitch - reference_mean_pitch).abs();
        self.bands
            .iter()
            .find(|band| deviation > band.above)
            .map_or(0.0, |band| band.penalty)
    }
}

/// Penalty under the default bands (>10: 0.3, >6: 0.2, >4: 0.1).
pub fn penalty(observed_mean_pitch: f64, reference_mean_pitch: f64) -> f64 {
    let deviation = (observed_mean_pitch - reference_mean_pitch).abs();
    DEFAULT_BANDS
        .iter()
        .find(|band| deviation > band.above)
        .map_or(0.0, |band| band.penalty)
}
