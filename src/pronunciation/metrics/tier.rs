use serde::{Deserialize, Serialize};

use crate::pronunciation::{PronunciationError, Result, Tier};

/// Inclusive lower bounds for each feedback tier; scores below `slightly`
/// (and NaN) are [`Tier::Wrong`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub exact: f64,
    pub nearly: f64,
    pub slightly: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            exact: 0.8,
            nearly: 0.6,
            slightly: 0.4,
        }
    }
}

impl TierThresholds {
    pub fn validate(&self) -> Result<()> {
        let ordered = self.exact > self.nearly && self.nearly > self.slightly;
        if !ordered || !self.exact.is_finite() || !self.slightly.is_finite() {
            return Err(PronunciationError::config(format!(
                "tier thresholds must be finite and strictly descending, got {:?}",
                self
            )));
        }
        Ok(())
    }

    pub fn classify(&self, final_score: f64) -> Tier {
        if final_score >= self.exact {
            Tier::Exact
        } else if final_score >= self.nearly {
            Tier::Nearly
        } else if final_score >= self.slightly {
            Tier::Slightly
        } else {
            Tier::Wrong
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TierThresholds;
    use crate::pronunciation::Tier;

    #[test]
    fn representative_scores() {
        let tiers = TierThresholds::default();
        let got: Vec<Tier> = [0.9, 0.7, 0.5, 0.1]
            .into_iter()
            .map(|score| tiers.classify(score))
            .collect();
        assert_eq!(got, vec![Tier::Exact, Tier::Nearly, Tier::Slightly, Tier::Wrong]);
    }

    #[test]
    fn lower_bounds_are_inclusive() {
        let tiers = TierThresholds::default();
        assert_eq!(tiers.classify(0.8), Tier::Exact);
        assert_eq!(tiers.classify(0.6), Tier::Nearly);
        assert_eq!(tiers.classify(0.4), Tier::Slightly);
        assert_eq!(tiers.classify(0.399_999), Tier::Wrong);
    }

    #[test]
    fn out_of_range_scores_still_classify() {
        let tiers = TierThresholds::default();
        assert_eq!(tiers.classify(-0.3), Tier::Wrong);
        assert_eq!(tiers.classify(f64::NAN), Tier::Wrong);
        assert_eq!(tiers.classify(1.0), Tier::Exact);
    }

    #[test]
    fn rejects_overlapping_thresholds() {
        let tiers = TierThresholds {
            exact: 0.5,
            nearly: 0.6,
            slightly: 0.4,
        };
        assert!(tiers.validate().is_err());
        assert!(TierThresholds::default().validate().is_ok());
    }
}
