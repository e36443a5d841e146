pub mod alignment;
pub mod assessor;
pub mod cli;
pub mod features;
pub mod metrics;
pub mod report;
pub mod session;
pub mod speech;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use alignment::dictionary::{PhonemeSequence, PronunciationDictionary, WordPhonemes};
pub use alignment::{diff, DiffKind, DiffOp};
pub use assessor::Assessor;
pub use features::{PitchEstimator, PitchSummary, PitchTrack, PitchTracker, PitchTrackerSettings};
pub use metrics::{MetricCalculator, PitchPenaltyPolicy, SimilarityGranularity, TierThresholds};

/// Convenient alias for results returned by pronunciation modules.
pub type Result<T> = std::result::Result<T, PronunciationError>;

/// Failures surfaced by the assessment engine and its collaborators.
#[derive(Debug, Error)]
pub enum PronunciationError {
    /// Speech-to-text produced nothing usable for this recording.
    #[error("could not understand audio")]
    Recognition,
    #[error("could not request results from the speech recognition service; {detail}")]
    RecognitionService { detail: String },
    #[error("unable to read recorded audio: {detail}")]
    AudioDecode { detail: String },
    #[error("audio capture failed: {detail}")]
    Capture { detail: String },
    #[error("speech playback failed: {detail}")]
    Playback { detail: String },
    #[error("pronunciation dictionary error: {detail}")]
    Dictionary { detail: String },
    #[error("invalid configuration: {detail}")]
    Config { detail: String },
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl PronunciationError {
    pub fn recognition_service(err: impl Display) -> Self {
        Self::RecognitionService {
            detail: err.to_string(),
        }
    }

    pub fn audio_decode(err: impl Display) -> Self {
        Self::AudioDecode {
            detail: err.to_string(),
        }
    }

    pub fn capture(err: impl Display) -> Self {
        Self::Capture {
            detail: err.to_string(),
        }
    }

    pub fn playback(err: impl Display) -> Self {
        Self::Playback {
            detail: err.to_string(),
        }
    }

    pub fn dictionary(err: impl Display) -> Self {
        Self::Dictionary {
            detail: err.to_string(),
        }
    }

    pub fn config(err: impl Display) -> Self {
        Self::Config {
            detail: err.to_string(),
        }
    }

    /// True for failures that only void the current attempt.
    pub fn is_attempt_failure(&self) -> bool {
        matches!(
            self,
            Self::Recognition
                | Self::RecognitionService { .. }
                | Self::AudioDecode { .. }
                | Self::Capture { .. }
        )
    }
}

/// One practice phrase with the pitch statistics of its model pronunciation.
///
/// `std_pitch` is carried for display and future use; scoring only reads
/// `mean_pitch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceItem {
    #[serde(alias = "spelling")]
    pub text: String,
    pub mean_pitch: f64,
    pub std_pitch: f64,
}

impl ReferenceItem {
    pub fn new(text: impl Into<String>, mean_pitch: f64, std_pitch: f64) -> Result<Self> {
        let item = Self {
            text: text.into(),
            mean_pitch,
            std_pitch,
        };
        item.validate()?;
        Ok(item)
    }

    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(PronunciationError::config(
                "reference text must contain at least one word",
            ));
        }
        Ok(())
    }
}

/// Discrete feedback label derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Exact,
    Nearly,
    Slightly,
    Wrong,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Tier::Exact => "Exactly correct!",
            Tier::Nearly => "Nearly correct!",
            Tier::Slightly => "Slightly correct.",
            Tier::Wrong => "Wrong.",
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of assessing one recorded attempt. Built once by [`Assessor`] and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResult {
    reference_text: String,
    recognized_text: String,
    similarity_score: f64,
    pitch_deviation_penalty: f64,
    final_score: f64,
    observed_mean_pitch: f64,
    observed_pitch_std: f64,
    voiced_pitch: Option<PitchSummary>,
    reference_phonemes: PhonemeSequence,
    recognized_phonemes: PhonemeSequence,
    diff_trace: Vec<DiffOp>,
    tier: Tier,
    duration: f64,
}

/// Scalar outputs of the metric stage, grouped for [`AssessmentResult::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    pub similarity: f64,
    pub penalty: f64,
    pub final_score: f64,
    pub tier: Tier,
}

/// Pitch-side observations, grouped for [`AssessmentResult::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchObservation {
    pub mean: f64,
    pub std: f64,
    pub voiced: Option<PitchSummary>,
    pub duration: f64,
}

impl AssessmentResult {
    pub(crate) fn new(
        reference_text: &str,
        recognized_text: &str,
        scores: Scores,
        pitch: PitchObservation,
        reference_phonemes: PhonemeSequence,
        recognized_phonemes: PhonemeSequence,
        diff_trace: Vec<DiffOp>,
    ) -> Self {
        Self {
            reference_text: reference_text.to_string(),
            recognized_text: recognized_text.to_string(),
            similarity_score: scores.similarity,
            pitch_deviation_penalty: scores.penalty,
            final_score: scores.final_score,
            observed_mean_pitch: pitch.mean,
            observed_pitch_std: pitch.std,
            voiced_pitch: pitch.voiced,
            reference_phonemes,
            recognized_phonemes,
            diff_trace,
            tier: scores.tier,
            duration: pitch.duration,
        }
    }

    pub fn reference_text(&self) -> &str {
        &self.reference_text
    }

    pub fn recognized_text(&self) -> &str {
        &self.recognized_text
    }

    /// Lexical similarity before the pitch penalty.
    pub fn similarity_score(&self) -> f64 {
        self.similarity_score
    }

    pub fn pitch_deviation_penalty(&self) -> f64 {
        self.pitch_deviation_penalty
    }

    /// `similarity_score - pitch_deviation_penalty`; may be negative.
    pub fn final_score(&self) -> f64 {
        self.final_score
    }

    pub fn observed_mean_pitch(&self) -> f64 {
        self.observed_mean_pitch
    }

    /// Spread of the whole pitch grid, the counterpart of `std_pitch`.
    pub fn observed_pitch_std(&self) -> f64 {
        self.observed_pitch_std
    }

    pub fn voiced_pitch(&self) -> Option<&PitchSummary> {
        self.voiced_pitch.as_ref()
    }

    pub fn reference_phonemes(&self) -> &PhonemeSequence {
        &self.reference_phonemes
    }

    pub fn recognized_phonemes(&self) -> &PhonemeSequence {
        &self.recognized_phonemes
    }

    pub fn diff_trace(&self) -> &[DiffOp] {
        &self.diff_trace
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Recording length in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::{PronunciationError, ReferenceItem, Tier};

    #[test]
    fn reference_item_requires_text() {
        assert!(ReferenceItem::new("  ", 60.0, 2.0).is_err());
        let item = ReferenceItem::new("hello world", 60.0, 2.0).unwrap();
        assert_eq!(item.text, "hello world");
    }

    #[test]
    fn reference_item_reads_dataset_field_names() {
        let item: ReferenceItem =
            serde_json::from_str(r#"{"spelling": "good morning", "mean_pitch": 55.0, "std_pitch": 3.5}"#)
                .unwrap();
        assert_eq!(item.text, "good morning");
        assert_eq!(item.mean_pitch, 55.0);
    }

    #[test]
    fn tier_labels_match_console_feedback() {
        assert_eq!(Tier::Exact.to_string(), "Exactly correct!");
        assert_eq!(Tier::Wrong.label(), "Wrong.");
    }

    #[test]
    fn only_attempt_failures_are_recoverable() {
        assert!(PronunciationError::Recognition.is_attempt_failure());
        assert!(PronunciationError::recognition_service("503").is_attempt_failure());
        assert!(!PronunciationError::config("bad").is_attempt_failure());
        let message = PronunciationError::recognition_service("status 503").to_string();
        assert!(message.contains("status 503"));
    }
}
