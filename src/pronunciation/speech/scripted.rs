//! Scripted collaborators for driving the practice loop without devices.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

use super::{AudioSource, Prompt, SpeechRecognizer, SpeechSynthesizer};
use crate::pronunciation::{PronunciationError, Result};
use crate::types::AudioData;

/// Returns queued transcripts in order; an exhausted queue is a recognition failure.
#[derive(Debug, Default)]
pub struct ScriptedRecognizer {
    replies: RefCell<VecDeque<Result<String>>>,
}

impl ScriptedRecognizer {
    pub fn new(replies: Vec<Result<String>>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
        }
    }
}

impl SpeechRecognizer for ScriptedRecognizer {
    fn recognize(&self, _recording: &AudioData) -> Result<String> {
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(PronunciationError::Recognition))
    }
}

/// Remembers every phrase it was asked to speak.
#[derive(Debug, Default)]
pub struct RecordingSynthesizer {
    spoken: RefCell<Vec<String>>,
    failure: Option<String>,
}

impl RecordingSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with a playback error carrying `detail`.
    pub fn failing(detail: impl Into<String>) -> Self {
        Self {
            spoken: RefCell::default(),
            failure: Some(detail.into()),
        }
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.borrow().clone()
    }
}

impl SpeechSynthesizer for RecordingSynthesizer {
    fn speak(&self, text: &str) -> Result<()> {
        self.spoken.borrow_mut().push(text.to_string());
        match &self.failure {
            Some(detail) => Err(PronunciationError::playback(detail)),
            None => Ok(()),
        }
    }
}

/// Hands out queued recordings; an exhausted queue is a capture failure.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    clips: VecDeque<Result<AudioData>>,
    windows: Vec<Duration>,
}

impl ScriptedSource {
    pub fn new(clips: Vec<Result<AudioData>>) -> Self {
        Self {
            clips: clips.into(),
            windows: Vec::new(),
        }
    }

    /// Listening windows requested so far.
    pub fn windows(&self) -> &[Duration] {
        &self.windows
    }
}

impl AudioSource for ScriptedSource {
    fn record(&mut self, window: Duration) -> Result<AudioData> {
        self.windows.push(window);
        self.clips
            .pop_front()
            .unwrap_or_else(|| Err(PronunciationError::capture("no scripted recording left")))
    }
}

/// Answers prompts from queues and keeps everything that was shown.
/// Exhausted queues answer "no".
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    replays: VecDeque<bool>,
    continues: VecDeque<bool>,
    shown: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(replays: Vec<bool>, continues: Vec<bool>) -> Self {
        Self {
            replays: replays.into(),
            continues: continues.into(),
            shown: Vec::new(),
        }
    }

    pub fn transcript(&self) -> String {
        self.shown.join("\n")
    }
}

impl Prompt for ScriptedPrompt {
    fn show(&mut self, text: &str) -> Result<()> {
        self.shown.push(text.to_string());
        Ok(())
    }

    fn ask_replay(&mut self) -> Result<bool> {
        Ok(self.replays.pop_front().unwrap_or(false))
    }

    fn wait_for_ready(&mut self) -> Result<()> {
        Ok(())
    }

    fn ask_continue(&mut self) -> Result<bool> {
        Ok(self.continues.pop_front().unwrap_or(false))
    }
}
