use anyhow::{ensure, Result};

/// Number of samples `linear_resample` produces for `len` input samples.
pub fn resampled_len(len: usize, source_rate: u32, target_rate: u32) -> usize {
    if len == 0 || source_rate == target_rate || source_rate == 0 {
        return len;
    }
    let ratio = target_rate as f64 / source_rate as f64;
    ((len as f64) * ratio).ceil().max(1.0) as usize
}

/// Linearly resample `samples` from `source_rate` to `target_rate`.
pub fn linear_resample(samples: &[f32], source_rate: u32, target_rate: u32) -> Result<Vec<f32>> {
    ensure!(source_rate > 0, "source sample rate must be positive");
    ensure!(target_rate > 0, "target sample rate must be positive");
    if samples.is_empty() || source_rate == target_rate {
        return Ok(samples.to_vec());
    }
    let step = source_rate as f64 / target_rate as f64;
    let last = samples.len() - 1;
    let output = (0..resampled_len(samples.len(), source_rate, target_rate))
        .map(|i| {
            let position = i as f64 * step;
            let left = (position.floor() as usize).min(last);
            let right = (left + 1).min(last);
            let t = (position - left as f64) as f32;
            samples[left] + (samples[right] - samples[left]) * t
        })
        .collect();
    Ok(output)
}
