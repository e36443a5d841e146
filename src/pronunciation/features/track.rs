use ndarray::{Array2, Axis};
use serde::Serialize;

use crate::pronunciation::{PronunciationError, Result};

/// Per-frame pitch candidates for one recording.
///
/// Both grids are `bins x frames`; a cell is non-zero only where the tracker
/// found a candidate. `duration` is the analysed signal length in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct PitchTrack {
    pitches: Array2<f32>,
    magnitudes: Array2<f32>,
    duration: f64,
}

/// Statistics over the strongest candidate of each voiced frame, in MIDI notes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PitchSummary {
    pub mean_midi: f64,
    pub std_midi: f64,
    pub voiced_frames: usize,
}

impl PitchTrack {
    pub fn new(pitches: Array2<f32>, magnitudes: Array2<f32>, duration: f64) -> Result<Self> {
        if pitches.dim() != magnitudes.dim() {
            return Err(PronunciationError::audio_decode(format!(
                "pitch grid {:?} and magnitude grid {:?} differ in shape",
                pitches.dim(),
                magnitudes.dim()
            )));
        }
        if pitches.is_empty() {
            return Err(PronunciationError::audio_decode(
                "recording produced no analysis frames",
            ));
        }
        Ok(Self {
            pitches,
            magnitudes,
            duration,
        })
    }

    pub fn pitches(&self) -> &Array2<f32> {
        &self.pitches
    }

    pub fn magnitudes(&self) -> &Array2<f32> {
        &self.magnitudes
    }

    pub fn frame_count(&self) -> usize {
        self.pitches.len_of(Axis(1))
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Mean over the whole pitch grid, empty cells included.
    pub fn mean(&self) -> f64 {
        self.pitches.iter().map(|&p| p as f64).sum::<f64>() / self.pitches.len() as f64
    }

    /// Population standard deviation over the whole pitch grid.
    pub fn std(&self) -> f64 {
        let mean = self.mean();
        let variance = self
            .pitches
            .iter()
            .map(|&p| (p as f64 - mean).powi(2))
            .sum::<f64>()
            / self.pitches.len() as f64;
        variance.sqrt()
    }

    /// Pitch of the highest-magnitude candidate in each frame, `None` where the
    /// frame has no candidate.
    pub fn dominant_pitches(&self) -> Vec<Option<f32>> {
        self.magnitudes
            .axis_iter(Axis(1))
            .zip(self.pitches.axis_iter(Axis(1)))
            .map(|(magnitudes, pitches)| {
                magnitudes
                    .iter()
                    .zip(pitches.iter())
                    .filter(|(m, p)| **m > 0.0 && **p > 0.0)
                    .max_by(|(a, _), (b, _)| a.total_cmp(b))
                    .map(|(_, &p)| p)
            })
            .collect()
    }

    pub fn voiced_summary(&self) -> Option<PitchSummary> {
        let notes: Vec<f64> = self
            .dominant_pitches()
            .into_iter()
            .flatten()
            .map(|hz| hz_to_midi(hz as f64))
            .collect();
        if notes.is_empty() {
            return None;
        }
        let count = notes.len() as f64;
        let mean_midi = notes.iter().sum::<f64>() / count;
        let std_midi = (notes.iter().map(|n| (n - mean_midi).powi(2)).sum::<f64>() / count).sqrt();
        Some(PitchSummary {
            mean_midi,
            std_midi,
            voiced_frames: notes.len(),
        })
    }
}

pub fn hz_to_midi(hz: f64) -> f64 {
    12.0 * (hz / 440.0).log2() + 69.0
}

pub fn midi_to_hz(note: f64) -> f64 {
    440.0 * 2f64.powf((note - 69.0) / 12.0)
}
