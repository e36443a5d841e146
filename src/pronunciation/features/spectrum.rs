use aus::spectrum;
use aus::WindowType;

/// Magnitude spectrogram as `frames x bins`, with the signal centred by
/// zero-padding half a window on each side so every sample lands in a frame.
pub(super) fn magnitude_frames(samples: &[f32], fft_size: usize, hop_size: usize) -> Vec<Vec<f64>> {
    let pad = fft_size / 2;
    let mut padded = vec![0.0_f64; samples.len() + 2 * pad];
    for (slot, &sample) in padded[pad..].iter_mut().zip(samples) {
        *slot = sample as f64;
    }
    let stft = spectrum::rstft(&padded, fft_size, hop_size, WindowType::Hanning);
    let (magnitude, _phase) = spectrum::complex_to_polar_rstft(&stft);
    magnitude
}

/// Centre frequency of each real-FFT bin.
pub(super) fn bin_frequencies(fft_size: usize, sample_rate: u32) -> Vec<f64> {
    spectrum::rfftfreq(fft_size, sample_rate)
}
