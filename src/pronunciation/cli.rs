use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Result};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "clearspeak",
    version,
    about = "Pronunciation practice: hear a phrase, say it back, get scored"
)]
pub struct Cli {
    /// Optional override for the assets directory.
    #[arg(long = "assets-path", global = true)]
    pub assets_path: Option<PathBuf>,
    /// Full CMU-format pronunciation dictionary replacing the bundled lexicon.
    #[arg(long, global = true)]
    pub lexicon: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the interactive record-and-score loop.
    Practice(PracticeArgs),
    /// Score one recorded file against a reference phrase.
    Assess(AssessArgs),
    /// Print the phoneme transcription of a text.
    Phonemes(PhonemesArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CaptureArgs {
    /// Optional input device name.
    #[arg(long)]
    pub device: Option<String>,
    /// Listening window per attempt, in seconds.
    #[arg(long = "listen-secs", default_value_t = 5.0)]
    pub listen_secs: f64,
}

impl CaptureArgs {
    pub fn listen_window(&self) -> Result<Duration> {
        ensure!(
            self.listen_secs.is_finite() && self.listen_secs > 0.0,
            "listen-secs must be a positive number of seconds"
        );
        Ok(Duration::from_secs_f64(self.listen_secs))
    }
}

#[derive(Args, Debug, Clone)]
pub struct PracticeArgs {
    /// Reference dataset; defaults to `dataset.json` under the assets directory.
    #[arg(long)]
    pub dataset: Option<PathBuf>,
    #[command(flatten)]
    pub capture: CaptureArgs,
    /// Keep each attempt as a WAV file in this directory.
    #[arg(long = "keep-recordings")]
    pub keep_recordings: Option<PathBuf>,
    /// Whisper ggml model used for recognition.
    #[arg(long = "whisper-model")]
    pub whisper_model: Option<PathBuf>,
    /// Seed for phrase selection, for repeatable sessions.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct AssessArgs {
    /// Reference phrase.
    #[arg(long)]
    pub text: String,
    /// Mean pitch of the model pronunciation.
    #[arg(long = "mean-pitch", allow_negative_numbers = true)]
    pub mean_pitch: f64,
    /// Pitch spread of the model pronunciation (display only).
    #[arg(long = "std-pitch", default_value_t = 0.0)]
    pub std_pitch: f64,
    /// What the speaker was recognized as saying.
    #[arg(long)]
    pub recognized: String,
    /// Recorded attempt (any format symphonia can decode).
    #[arg(long)]
    pub audio: PathBuf,
    /// Print the result as JSON instead of the console summary.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PhonemesArgs {
    /// Text to transcribe.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

impl PhonemesArgs {
    pub fn joined(&self) -> String {
        self.text.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn practice_defaults() {
        let cli = Cli::try_parse_from(["clearspeak", "practice"]).unwrap();
        let Command::Practice(args) = cli.command else {
            panic!("expected practice");
        };
        assert_eq!(args.capture.listen_window().unwrap(), Duration::from_secs(5));
        assert!(args.dataset.is_none());
        assert!(args.seed.is_none());
        assert!(cli.assets_path.is_none());
    }

    #[test]
    fn rejects_non_positive_listen_window() {
        let cli = Cli::try_parse_from(["clearspeak", "practice", "--listen-secs", "0"]).unwrap();
        let Command::Practice(args) = cli.command else {
            panic!("expected practice");
        };
        assert!(args.capture.listen_window().is_err());
    }

    #[test]
    fn parses_assess_arguments() {
        let cli = Cli::try_parse_from([
            "clearspeak",
            "assess",
            "--text",
            "good morning",
            "--mean-pitch",
            "55",
            "--recognized",
            "good evening",
            "--audio",
            "attempt.wav",
            "--json",
            "--lexicon",
            "cmudict.dict",
        ])
        .unwrap();
        let Command::Assess(args) = cli.command else {
            panic!("expected assess");
        };
        assert_eq!(args.text, "good morning");
        assert_eq!(args.mean_pitch, 55.0);
        assert_eq!(args.std_pitch, 0.0);
        assert!(args.json);
        assert_eq!(cli.lexicon.unwrap().to_str(), Some("cmudict.dict"));
    }

    #[test]
    fn assess_requires_recognized_text() {
        let parsed = Cli::try_parse_from([
            "clearspeak",
            "assess",
            "--text",
            "hello",
            "--mean-pitch",
            "60",
            "--audio",
            "a.wav",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn phonemes_joins_words() {
        let cli = Cli::try_parse_from(["clearspeak", "phonemes", "hello", "world"]).unwrap();
        let Command::Phonemes(args) = cli.command else {
            panic!("expected phonemes");
        };
        assert_eq!(args.joined(), "hello world");
    }
}
