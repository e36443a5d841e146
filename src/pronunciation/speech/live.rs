use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, warn};

use super::{AudioSource, SpeechSynthesizer};
use crate::audio::capture::{record_audio, CaptureConfig};
use crate::audio::playback;
use crate::pronunciation::{PronunciationError, Result};
use crate::types::AudioData;

const SPEECH_ENDPOINT: &str = "https://api.streamelements.com/kappa/v2/speech";
const DEFAULT_VOICE: &str = "Brian";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Reads phrases aloud through the StreamElements TTS endpoint.
pub struct StreamElementsVoice {
    client: Client,
    voice: String,
}

impl StreamElementsVoice {
    pub fn new() -> Result<Self> {
        Self::with_voice(DEFAULT_VOICE)
    }

    pub fn with_voice(voice: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(PronunciationError::playback)?;
        Ok(Self {
            client,
            voice: voice.into(),
        })
    }
}

impl SpeechSynthesizer for StreamElementsVoice {
    fn speak(&self, text: &str) -> Result<()> {
        let response = self
            .client
            .get(SPEECH_ENDPOINT)
            .query(&[("voice", self.voice.as_str()), ("text", text.trim())])
            .send()
            .map_err(PronunciationError::playback)?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "speech endpoint returned non-success status");
            return Err(PronunciationError::playback(format!("Error: {}", status.as_u16())));
        }
        let bytes = response.bytes().map_err(PronunciationError::playback)?;
        debug!(bytes = bytes.len(), voice = %self.voice, "speech audio received");
        playback::play_encoded(bytes.to_vec()).map_err(PronunciationError::playback)
    }
}

/// Default input device, or a named one, recorded for a fixed window.
#[derive(Debug, Clone, Default)]
pub struct MicrophoneSource {
    device_name: Option<String>,
}

impl MicrophoneSource {
    pub fn new(device_name: Option<String>) -> Self {
        Self { device_name }
    }
}

impl AudioSource for MicrophoneSource {
    fn record(&mut self, window: Duration) -> Result<AudioData> {
        let config = CaptureConfig::new(window).with_device(self.device_name.clone());
        record_audio(&config).map_err(|err| PronunciationError::capture(format!("{err:#}")))
    }
}
