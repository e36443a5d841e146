use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pronunciation::{
    PitchPenaltyPolicy, PitchTrackerSettings, PronunciationError, Result, SimilarityGranularity,
    TierThresholds,
};

/// File name looked up under the assets root.
pub const ASSESSMENT_FILE: &str = "assessment.json";

/// Tunables for scoring. Every field is optional in the JSON form; missing
/// fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentConfig {
    pub similarity: SimilarityGranularity,
    pub penalty: PitchPenaltyPolicy,
    pub tiers: TierThresholds,
    pub pitch: PitchTrackerSettings,
}

impl AssessmentConfig {
    pub fn from_json(data: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(data).map_err(PronunciationError::config)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `<root>/assessment.json` if present, defaults otherwise.
    pub fn load_from_assets(root: &Path) -> Result<Self> {
        let path = root.join(ASSESSMENT_FILE);
        if !path.is_file() {
            debug!(path = %path.display(), "no assessment config, using defaults");
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)?;
        Self::from_json(&data).map_err(|err| {
            PronunciationError::config(format!("{}: {err}", path.display()))
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.penalty.validate()?;
        self.tiers.validate()?;
        self.pitch.validate()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{AssessmentConfig, ASSESSMENT_FILE};
    use crate::pronunciation::{PronunciationError, SimilarityGranularity};

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AssessmentConfig::load_from_assets(dir.path()).unwrap();
        assert_eq!(config, AssessmentConfig::default());
        assert_eq!(config.similarity, SimilarityGranularity::Words);
    }

    #[test]
    fn partial_file_overrides_named_fields() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(ASSESSMENT_FILE),
            r#"{"similarity": "characters", "tiers": {"exact": 0.9}}"#,
        )
        .unwrap();
        let config = AssessmentConfig::load_from_assets(dir.path()).unwrap();
        assert_eq!(config.similarity, SimilarityGranularity::Characters);
        assert_eq!(config.tiers.exact, 0.9);
        assert_eq!(config.tiers.nearly, 0.6);
        assert_eq!(config.pitch.fft_size, 2048);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(ASSESSMENT_FILE), "{ not json").unwrap();
        let err = AssessmentConfig::load_from_assets(dir.path()).unwrap_err();
        assert!(matches!(err, PronunciationError::Config { .. }));
    }
}
