#![allow(dead_code)]

use clearspeak::types::AudioData;

pub const SAMPLE_RATE: u32 = 16_000;

/// Sine tone at `freq` Hz, `seconds` long.
pub fn tone(freq: f32, seconds: f32) -> AudioData {
    let total = (SAMPLE_RATE as f32 * seconds) as usize;
    let samples = (0..total)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            (2.0 * std::f32::consts::PI * freq * t).sin() * 0.5
        })
        .collect();
    AudioData::new(samples, SAMPLE_RATE)
}
