use std::path::Path;

use anyhow::{Context, Result};

use crate::types::AudioData;

/// Write `audio` as a 16-bit mono WAV file.
pub fn encode_audio<P: AsRef<Path>>(audio: &AudioData, path: P) -> Result<()> {
    let path = path.as_ref();
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("failed to create WAV file: {}", path.display()))?;
    for &sample in &audio.samples {
        writer
            .write_sample(to_pcm16(sample))
            .context("failed to write audio sample")?;
    }
    writer.finalize().context("failed to finalize WAV file")?;
    Ok(())
}

fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

#[cfg(test)]
mod tests {
    use super::{encode_audio, to_pcm16};
    use crate::audio::decoder::decode_audio;
    use crate::types::AudioData;

    #[test]
    fn clamps_out_of_range_samples() {
        assert_eq!(to_pcm16(2.0), i16::MAX);
        assert_eq!(to_pcm16(-2.0), -i16::MAX);
        assert_eq!(to_pcm16(0.0), 0);
    }

    #[test]
    fn written_wav_decodes_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attempt.wav");
        let audio = AudioData::new(vec![0.5; 2_205], 22_050);
        encode_audio(&audio, &path).unwrap();

        let decoded = decode_audio(&path).unwrap();
        assert_eq!(decoded.sample_rate, 22_050);
        assert_eq!(decoded.samples.len(), 2_205);
        assert!(decoded.samples.iter().all(|s| (s - 0.5).abs() < 1e-3));
    }
}
