use std::sync::Arc;

use tracing::{debug, info};

use crate::config::AssessmentConfig;
use crate::types::AudioData;

use super::alignment::{self, dictionary::PronunciationDictionary};
use super::features::{PitchEstimator, PitchTracker};
use super::metrics::MetricCalculator;
use super::speech::SpeechRecognizer;
use super::{AssessmentResult, PitchObservation, PronunciationError, ReferenceItem, Result};

/// Scores one recorded attempt against a reference phrase.
///
/// Holds only read-only state, so a single assessor can serve any number of
/// attempts, including from several threads when `P` is `Sync`.
pub struct Assessor<P = PitchTracker> {
    dictionary: Arc<PronunciationDictionary>,
    pitch: P,
    metrics: MetricCalculator,
}

impl Assessor<PitchTracker> {
    /// Fails with [`PronunciationError::Config`] when `config` does not validate.
    pub fn new(
        dictionary: Arc<PronunciationDictionary>,
        config: &AssessmentConfig,
    ) -> Result<Self> {
        Self::with_estimator(dictionary, config, PitchTracker::new(config.pitch.clone()))
    }
}

impl<P: PitchEstimator> Assessor<P> {
    pub fn with_estimator(
        dictionary: Arc<PronunciationDictionary>,
        config: &AssessmentConfig,
        pitch: P,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            dictionary,
            pitch,
            metrics: MetricCalculator::from_config(config),
        })
    }

    pub fn dictionary(&self) -> &PronunciationDictionary {
        &self.dictionary
    }

    /// Scores `recognized_text` and `recording` against `reference`.
    ///
    /// An empty transcript is a [`PronunciationError::Recognition`]; a
    /// recording without usable samples is a
    /// [`PronunciationError::AudioDecode`]. Either way no result is produced.
    pub fn assess(
        &self,
        reference: &ReferenceItem,
        recognized_text: &str,
        recording: &AudioData,
    ) -> Result<AssessmentResult> {
        reference.validate()?;
        if recognized_text.trim().is_empty() {
            return Err(PronunciationError::Recognition);
        }

        let reference_phonemes = self.dictionary.transcribe(&reference.text);
        let track = self.pitch.extract(recording)?;
        let observed_mean_pitch = track.mean();
        debug!(
            observed_mean_pitch,
            reference_mean_pitch = reference.mean_pitch,
            frames = track.frame_count(),
            "pitch observed"
        );

        let scores = self.metrics.score(
            &reference.text,
            recognized_text,
            observed_mean_pitch,
            reference.mean_pitch,
        );
        let recognized_phonemes = self.dictionary.transcribe(recognized_text);
        let diff_trace = alignment::diff(&reference_phonemes, &recognized_phonemes);
        let pitch = PitchObservation {
            mean: observed_mean_pitch,
            std: track.std(),
            voiced: track.voiced_summary(),
            duration: track.duration(),
        };

        info!(
            reference = %reference.text,
            recognized = %recognized_text,
            final_score = scores.final_score,
            tier = ?scores.tier,
            "attempt assessed"
        );
        Ok(AssessmentResult::new(
            &reference.text,
            recognized_text,
            scores,
            pitch,
            reference_phonemes,
            recognized_phonemes,
            diff_trace,
        ))
    }

    /// Transcribes `recording` with `recognizer`, then assesses it.
    /// Recognition failures propagate untouched and are not retried.
    pub fn assess_recording<R>(
        &self,
        reference: &ReferenceItem,
        recognizer: &R,
        recording: &AudioData,
    ) -> Result<AssessmentResult>
    where
        R: SpeechRecognizer + ?Sized,
    {
        let recognized = recognizer.recognize(recording)?;
        self.assess(reference, &recognized, recording)
    }
}
