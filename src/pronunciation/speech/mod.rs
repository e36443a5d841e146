//! Devices and services the practice loop talks to.
//!
//! The assessment core never touches these directly; each collaborator is a
//! trait so the loop can run against scripted stand-ins in tests.

mod console;
#[cfg(feature = "live")]
mod live;
mod scripted;
#[cfg(feature = "whisper")]
mod whisper;

use std::time::Duration;

pub use console::ConsolePrompt;
#[cfg(feature = "live")]
pub use live::{MicrophoneSource, StreamElementsVoice};
pub use scripted::{RecordingSynthesizer, ScriptedPrompt, ScriptedRecognizer, ScriptedSource};
#[cfg(feature = "whisper")]
pub use whisper::WhisperRecognizer;

use crate::types::AudioData;

use super::Result;

/// Default listening window for one attempt.
pub const DEFAULT_LISTEN_WINDOW: Duration = Duration::from_secs(5);

/// Speech-to-text. An empty or unintelligible recording is
/// [`PronunciationError::Recognition`](super::PronunciationError::Recognition).
pub trait SpeechRecognizer {
    fn recognize(&self, recording: &AudioData) -> Result<String>;
}

/// Text-to-speech playback of the reference phrase.
pub trait SpeechSynthesizer {
    fn speak(&self, text: &str) -> Result<()>;
}

/// Records one utterance of at most `window`.
pub trait AudioSource {
    fn record(&mut self, window: Duration) -> Result<AudioData>;
}

/// Console side of the practice loop.
pub trait Prompt {
    fn show(&mut self, text: &str) -> Result<()>;

    /// "Do you want to hear again (y/n)". Only `y` means yes.
    fn ask_replay(&mut self) -> Result<bool>;

    /// Blocks until the learner is ready to speak.
    fn wait_for_ready(&mut self) -> Result<()>;

    /// "Do you want to continue? (1 for yes, 0 for no)".
    fn ask_continue(&mut self) -> Result<bool>;
}
