mod penalty;
mod similarity;
mod tier;

pub use penalty::{penalty, PenaltyBand, PitchPenaltyPolicy};
pub use similarity::{similarity, similarity_with, SimilarityGranularity};
pub use tier::TierThresholds;

use tracing::debug;

use crate::config::AssessmentConfig;
use crate::pronunciation::Scores;

/// Combines lexical similarity and the pitch penalty into a tiered score.
#[derive(Debug, Clone, Default)]
pub struct MetricCalculator {
    granularity: SimilarityGranularity,
    penalty: PitchPenaltyPolicy,
    tiers: TierThresholds,
}

impl MetricCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AssessmentConfig) -> Self {
        Self {
            granularity: config.similarity,
            penalty: config.penalty.clone(),
            tiers: config.tiers,
        }
    }

    /// Scores `recognized` against `reference`; both are lower-cased first.
    pub fn score(
        &self,
        reference: &str,
        recognized: &str,
        observed_mean_pitch: f64,
        reference_mean_pitch: f64,
    ) -> Scores {
        let similarity = similarity_with(
            &recognized.to_lowercase(),
            &reference.to_lowercase(),
            self.granularity,
        );
        let penalty = self.penalty.penalty(observed_mean_pitch, reference_mean_pitch);
        let final_score = similarity - penalty;
        let tier = self.tiers.classify(final_score);
        debug!(
            similarity,
            penalty,
            final_score,
            ?tier,
            "scored attempt"
        );
        Scores {
            similarity,
            penalty,
            final_score,
            tier,
        }
    }
}
