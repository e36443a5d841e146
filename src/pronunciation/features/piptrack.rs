use ndarray::Array2;

use super::PitchTrackerSettings;

/// Parabolic-interpolation peak picking over a magnitude spectrogram.
///
/// A bin becomes a pitch candidate when it lies inside `[fmin, fmax)`, is a
/// local maximum along frequency and exceeds `threshold` times the loudest bin
/// of its frame. Returns `(pitches, magnitudes)` shaped `bins x frames`, zero
/// everywhere except at candidates.
pub(super) fn pick_peaks(
    frames: &[Vec<f64>],
    frequencies: &[f64],
    settings: &PitchTrackerSettings,
) -> (Array2<f32>, Array2<f32>) {
    let bins = frames
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(0)
        .min(frequencies.len());
    let mut pitches = Array2::<f32>::zeros((bins, frames.len()));
    let mut magnitudes = Array2::<f32>::zeros((bins, frames.len()));
    let hz_per_bin = settings.analysis_rate as f64 / settings.fft_size as f64;

    for (t, frame) in frames.iter().enumerate() {
        let frame = &frame[..bins.min(frame.len())];
        let loudest = frame.iter().copied().fold(0.0_f64, f64::max);
        let floor = settings.threshold * loudest;
        for bin in 1..frame.len().saturating_sub(1) {
            let freq = frequencies[bin];
            if freq < settings.fmin || freq >= settings.fmax {
                continue;
            }
            let (below, here, above) = (frame[bin - 1], frame[bin], frame[bin + 1]);
            if !(here > below && here >= above && here > floor) {
                continue;
            }
            let slope = 0.5 * (above - below);
            let curvature = 2.0 * here - above - below;
            let shift = if curvature.abs() < f64::MIN_POSITIVE {
                slope / (curvature + 1.0)
            } else {
                slope / curvature
            };
            pitches[[bin, t]] = ((bin as f64 + shift) * hz_per_bin) as f32;
            magnitudes[[bin, t]] = (here + 0.5 * slope * shift) as f32;
        }
    }
    (pitches, magnitudes)
}
