use std::path::{Path, PathBuf};

use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use super::SpeechRecognizer;
use crate::audio::resample;
use crate::pronunciation::{PronunciationError, Result};
use crate::types::AudioData;

/// Whisper models expect 16 kHz mono input.
const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// Environment variable naming the ggml model when no path is given.
pub const MODEL_ENV: &str = "WHISPER_MODEL_PATH";
const DEFAULT_MODEL: &str = "./models/ggml-base.en.bin";

/// Offline speech-to-text backed by a local whisper.cpp model.
pub struct WhisperRecognizer {
    ctx: WhisperContext,
    language: String,
}

impl WhisperRecognizer {
    /// Loads `model`, falling back to `$WHISPER_MODEL_PATH` and then
    /// `./models/ggml-base.en.bin`.
    pub fn load(model: Option<&Path>) -> Result<Self> {
        let path = model.map(Path::to_path_buf).unwrap_or_else(|| {
            std::env::var_os(MODEL_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL))
        });
        let path_str = path.to_str().ok_or_else(|| {
            PronunciationError::config(format!("model path {:?} is not valid UTF-8", path))
        })?;
        let ctx = WhisperContext::new_with_params(path_str, WhisperContextParameters::default())
            .map_err(|err| {
                PronunciationError::recognition_service(format!(
                    "failed to load whisper model {}: {err}",
                    path.display()
                ))
            })?;
        info!(model = %path.display(), "whisper model loaded");
        Ok(Self {
            ctx,
            language: "en".to_string(),
        })
    }
}

impl SpeechRecognizer for WhisperRecognizer {
    fn recognize(&self, recording: &AudioData) -> Result<String> {
        if recording.is_empty() {
            return Err(PronunciationError::Recognition);
        }
        let samples =
            resample::linear_resample(&recording.samples, recording.sample_rate, WHISPER_SAMPLE_RATE)
                .map_err(PronunciationError::audio_decode)?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(Some(self.language.as_str()));
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        let mut state = self
            .ctx
            .create_state()
            .map_err(PronunciationError::recognition_service)?;
        state
            .full(params, &samples)
            .map_err(PronunciationError::recognition_service)?;

        let mut text = String::new();
        for segment in state.as_iter() {
            let piece = segment
                .to_str()
                .map_err(PronunciationError::recognition_service)?;
            text.push_str(piece);
        }
        let text = text.trim().to_string();
        debug!(transcript = %text, "whisper transcript");
        if text.is_empty() {
            return Err(PronunciationError::Recognition);
        }
        Ok(text)
    }
}
