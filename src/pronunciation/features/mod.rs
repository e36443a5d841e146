mod piptrack;
mod spectrum;
mod track;

pub use track::{hz_to_midi, midi_to_hz, PitchSummary, PitchTrack};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::audio::resample;
use crate::pronunciation::{PronunciationError, Result};
use crate::types::AudioData;

/// Fixed constants of the pitch tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchTrackerSettings {
    /// Recordings are resampled to this rate before analysis.
    pub analysis_rate: u32,
    pub fft_size: usize,
    pub hop_size: usize,
    pub fmin: f64,
    pub fmax: f64,
    /// Candidate floor relative to the loudest bin of each frame.
    pub threshold: f64,
}

impl Default for PitchTrackerSettings {
    fn default() -> Self {
        Self {
            analysis_rate: 22_050,
            fft_size: 2_048,
            hop_size: 512,
            fmin: 150.0,
            fmax: 4_000.0,
            threshold: 0.1,
        }
    }
}

impl PitchTrackerSettings {
    pub fn validate(&self) -> Result<()> {
        if self.analysis_rate == 0 || self.hop_size == 0 || self.fft_size < 4 {
            return Err(PronunciationError::config(
                "pitch tracker needs a positive analysis rate, hop and an FFT size of at least 4",
            ));
        }
        if !(self.fmin >= 0.0 && self.fmin < self.fmax) {
            return Err(PronunciationError::config(format!(
                "pitch search band [{}, {}) is empty",
                self.fmin, self.fmax
            )));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(PronunciationError::config(format!(
                "pitch threshold {} must lie in [0, 1]",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// Source of pitch tracks for recorded attempts.
pub trait PitchEstimator {
    fn extract(&self, clip: &AudioData) -> Result<PitchTrack>;
}

/// Spectral peak-picking pitch tracker.
#[derive(Debug, Clone, Default)]
pub struct PitchTracker {
    settings: PitchTrackerSettings,
}

impl PitchTracker {
    pub fn new(settings: PitchTrackerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PitchTrackerSettings {
        &self.settings
    }

    /// Length of `clip` in seconds after resampling to the analysis rate.
    pub fn duration(&self, clip: &AudioData) -> Result<f64> {
        ensure_readable(clip)?;
        let count = resample::resampled_len(
            clip.samples.len(),
            clip.sample_rate,
            self.settings.analysis_rate,
        );
        Ok(count as f64 / self.settings.analysis_rate as f64)
    }
}

impl PitchEstimator for PitchTracker {
    fn extract(&self, clip: &AudioData) -> Result<PitchTrack> {
        ensure_readable(clip)?;
        let rate = self.settings.analysis_rate;
        let samples = resample::linear_resample(&clip.samples, clip.sample_rate, rate)
            .map_err(PronunciationError::audio_decode)?;
        let frames =
            spectrum::magnitude_frames(&samples, self.settings.fft_size, self.settings.hop_size);
        let frequencies = spectrum::bin_frequencies(self.settings.fft_size, rate);
        let (pitches, magnitudes) = piptrack::pick_peaks(&frames, &frequencies, &self.settings);
        let duration = samples.len() as f64 / rate as f64;
        debug!(
            input_rate = clip.sample_rate,
            analysis_rate = rate,
            frames = frames.len(),
            duration,
            "pitch track extracted"
        );
        PitchTrack::new(pitches, magnitudes, duration)
    }
}

fn ensure_readable(clip: &AudioData) -> Result<()> {
    if clip.samples.is_empty() {
        return Err(PronunciationError::audio_decode(
            "recording contains no samples",
        ));
    }
    if clip.sample_rate == 0 {
        return Err(PronunciationError::audio_decode(
            "recording has a sample rate of zero",
        ));
    }
    if clip.samples.iter().any(|s| !s.is_finite()) {
        return Err(PronunciationError::audio_decode(
            "recording contains non-finite samples",
        ));
    }
    Ok(())
}
