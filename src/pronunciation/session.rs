use std::path::PathBuf;
use std::time::Duration;

use rand::RngCore;
use tracing::{debug, error, info, warn};

use crate::audio::encoder::encode_audio;
use crate::dataset::ReferenceDataset;
use crate::types::AudioData;

use super::assessor::Assessor;
use super::features::{PitchEstimator, PitchTracker};
use super::report::ReferencePrompt;
use super::speech::{AudioSource, Prompt, SpeechRecognizer, SpeechSynthesizer, DEFAULT_LISTEN_WINDOW};
use super::{AssessmentResult, PronunciationError, ReferenceItem, Result};

const BANNER: &str = "\t******************Welcome to ClearSpeak******************";

/// Where the practice loop currently is. Only `Scoring` calls into the
/// assessment core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingRecording,
    Scoring,
    ShowingResult,
    AwaitingContinue,
    Finished,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub listen_window: Duration,
    /// Attempts are written here as `attempt-NNN.wav` when set.
    pub keep_recordings: Option<PathBuf>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            listen_window: DEFAULT_LISTEN_WINDOW,
            keep_recordings: None,
        }
    }
}

/// Round counts reported when the learner quits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub rounds: usize,
    pub scored: usize,
    pub failed: usize,
}

/// External devices and services the loop drives.
pub struct Collaborators<'a> {
    pub recognizer: &'a dyn SpeechRecognizer,
    pub synthesizer: &'a dyn SpeechSynthesizer,
    pub source: &'a mut dyn AudioSource,
    pub prompt: &'a mut dyn Prompt,
}

enum Step<'d> {
    AwaitingRecording,
    Scoring {
        item: &'d ReferenceItem,
        recording: AudioData,
    },
    ShowingResult(Box<AssessmentResult>),
    AwaitingContinue,
    Finished,
}

impl Step<'_> {
    fn state(&self) -> SessionState {
        match self {
            Step::AwaitingRecording => SessionState::AwaitingRecording,
            Step::Scoring { .. } => SessionState::Scoring,
            Step::ShowingResult(_) => SessionState::ShowingResult,
            Step::AwaitingContinue => SessionState::AwaitingContinue,
            Step::Finished => SessionState::Finished,
        }
    }
}

/// Interactive record, score and continue loop over a reference dataset.
pub struct PracticeSession<'a, P = PitchTracker> {
    assessor: &'a Assessor<P>,
    dataset: &'a ReferenceDataset,
    io: Collaborators<'a>,
    options: SessionOptions,
    state: SessionState,
    summary: SessionSummary,
}

impl<'a, P: PitchEstimator> PracticeSession<'a, P> {
    pub fn new(
        assessor: &'a Assessor<P>,
        dataset: &'a ReferenceDataset,
        io: Collaborators<'a>,
        options: SessionOptions,
    ) -> Self {
        Self {
            assessor,
            dataset,
            io,
            options,
            state: SessionState::AwaitingRecording,
            summary: SessionSummary::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Runs rounds until the learner declines to continue. Attempt failures
    /// are reported and counted; anything else ends the session with an error.
    pub fn run(&mut self, rng: &mut dyn RngCore) -> Result<SessionSummary> {
        let mut step = Step::AwaitingRecording;
        loop {
            let next = match step {
                Step::AwaitingRecording => self.start_round(rng)?,
                Step::Scoring { item, recording } => self.score(item, &recording)?,
                Step::ShowingResult(result) => {
                    self.io.prompt.show(&result.to_string())?;
                    self.summary.scored += 1;
                    Step::AwaitingContinue
                }
                Step::AwaitingContinue => {
                    if self.io.prompt.ask_continue()? {
                        Step::AwaitingRecording
                    } else {
                        Step::Finished
                    }
                }
                Step::Finished => break,
            };
            debug!(from = ?self.state, to = ?next.state(), "session transition");
            self.state = next.state();
            step = next;
        }
        info!(
            rounds = self.summary.rounds,
            scored = self.summary.scored,
            failed = self.summary.failed,
            "practice session finished"
        );
        Ok(self.summary)
    }

    fn start_round(&mut self, rng: &mut dyn RngCore) -> Result<Step<'a>> {
        let dataset = self.dataset;
        let item = dataset.sample(rng);
        self.summary.rounds += 1;
        let phonemes = self.assessor.dictionary().transcribe(&item.text);
        info!(round = self.summary.rounds, reference = %item.text, "round started");

        self.io.prompt.show("")?;
        self.io.prompt.show(BANNER)?;
        self.io.prompt.show(
            &ReferencePrompt {
                item,
                phonemes: &phonemes,
            }
            .to_string(),
        )?;
        self.io.prompt.show("\tExact pronunciation:")?;
        self.speak(&item.text)?;
        while self.io.prompt.ask_replay()? {
            self.speak(&item.text)?;
        }

        self.io.prompt.wait_for_ready()?;
        match self.io.source.record(self.options.listen_window) {
            Ok(recording) => {
                self.keep(&recording);
                Ok(Step::Scoring { item, recording })
            }
            Err(err) => self.fail_attempt(err),
        }
    }

    fn score(&mut self, item: &ReferenceItem, recording: &AudioData) -> Result<Step<'a>> {
        match self
            .assessor
            .assess_recording(item, self.io.recognizer, recording)
        {
            Ok(result) => Ok(Step::ShowingResult(Box::new(result))),
            Err(err) => self.fail_attempt(err),
        }
    }

    /// Playback problems are shown and the round carries on without audio.
    fn speak(&mut self, text: &str) -> Result<()> {
        if let Err(err) = self.io.synthesizer.speak(text) {
            warn!(error = %err, "reference playback failed");
            self.io.prompt.show(&format!("\t{err}"))?;
        }
        Ok(())
    }

    fn fail_attempt(&mut self, err: PronunciationError) -> Result<Step<'a>> {
        if !err.is_attempt_failure() {
            error!(error = %err, "session aborted");
            return Err(err);
        }
        warn!(error = %err, round = self.summary.rounds, "attempt produced no score");
        self.summary.failed += 1;
        self.io.prompt.show(&format!("\t{err}"))?;
        Ok(Step::AwaitingContinue)
    }

    fn keep(&self, recording: &AudioData) {
        let Some(dir) = &self.options.keep_recordings else {
            return;
        };
        if recording.is_empty() {
            return;
        }
        let path = dir.join(format!("attempt-{:03}.wav", self.summary.rounds));
        match encode_audio(recording, &path) {
            Ok(()) => debug!(path = %path.display(), "attempt saved"),
            Err(err) => warn!(path = %path.display(), error = %err, "failed to save attempt"),
        }
    }
}
