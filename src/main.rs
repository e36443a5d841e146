use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use clearspeak::audio::decoder::decode_audio;
use clearspeak::config::{AppConfig, AssessmentConfig};
use clearspeak::pronunciation::cli::{AssessArgs, Cli, Command, PhonemesArgs, PracticeArgs};
use clearspeak::pronunciation::{
    Assessor, PronunciationDictionary, PronunciationError, ReferenceItem,
};

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let dictionary = load_dictionary(&cli)?;
    match &cli.command {
        Command::Practice(args) => handle_practice(&cli, args, dictionary),
        Command::Assess(args) => handle_assess(&cli, args, dictionary),
        Command::Phonemes(args) => handle_phonemes(args, &dictionary),
    }
}

/// Logs go to stderr so stdout carries only reports.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_dictionary(cli: &Cli) -> Result<Arc<PronunciationDictionary>> {
    match &cli.lexicon {
        Some(path) => Ok(Arc::new(PronunciationDictionary::from_path(path)?)),
        None => Ok(PronunciationDictionary::shared()),
    }
}

/// Assets are optional for one-shot commands; defaults apply when none are found.
fn assessment_config(cli: &Cli) -> Result<AssessmentConfig> {
    match AppConfig::from_override(cli.assets_path.clone()) {
        Ok(app) => Ok(app.assessment()?),
        Err(err) if cli.assets_path.is_none() => {
            tracing::debug!(error = %err, "no assets directory, using default assessment config");
            Ok(AssessmentConfig::default())
        }
        Err(err) => Err(err),
    }
}

fn handle_assess(
    cli: &Cli,
    args: &AssessArgs,
    dictionary: Arc<PronunciationDictionary>,
) -> Result<()> {
    let config = assessment_config(cli)?;
    let assessor = Assessor::new(dictionary, &config)?;
    let reference = ReferenceItem::new(args.text.clone(), args.mean_pitch, args.std_pitch)?;
    let recording = decode_audio(&args.audio)
        .map_err(|err| PronunciationError::audio_decode(format!("{err:#}")))
        .with_context(|| format!("failed to load {}", args.audio.display()))?;
    let result = assessor.assess(&reference, &args.recognized, &recording)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{result}");
    }
    Ok(())
}

fn handle_phonemes(args: &PhonemesArgs, dictionary: &PronunciationDictionary) -> Result<()> {
    println!("{}", dictionary.transcribe(&args.joined()));
    Ok(())
}

#[cfg(all(feature = "live", feature = "whisper"))]
fn handle_practice(
    cli: &Cli,
    args: &PracticeArgs,
    dictionary: Arc<PronunciationDictionary>,
) -> Result<()> {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use clearspeak::dataset::ReferenceDataset;
    use clearspeak::pronunciation::session::{Collaborators, PracticeSession, SessionOptions};
    use clearspeak::pronunciation::speech::{
        ConsolePrompt, MicrophoneSource, StreamElementsVoice, WhisperRecognizer,
    };

    let app = AppConfig::from_override(cli.assets_path.clone())?;
    let config = app.assessment()?;
    let dataset_path = args.dataset.clone().unwrap_or_else(|| app.dataset_path());
    let dataset = ReferenceDataset::load(&dataset_path)?;
    let listen_window = args.capture.listen_window()?;
    if let Some(dir) = &args.keep_recordings {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create recordings directory {}", dir.display()))?;
    }

    let assessor = Assessor::new(dictionary, &config)?;
    let recognizer = WhisperRecognizer::load(args.whisper_model.as_deref())?;
    let synthesizer = StreamElementsVoice::new()?;
    let mut source = MicrophoneSource::new(args.capture.device.clone());
    let mut prompt = ConsolePrompt::stdio();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let io = Collaborators {
        recognizer: &recognizer,
        synthesizer: &synthesizer,
        source: &mut source,
        prompt: &mut prompt,
    };
    let options = SessionOptions {
        listen_window,
        keep_recordings: args.keep_recordings.clone(),
    };
    let summary = PracticeSession::new(&assessor, &dataset, io, options).run(&mut rng)?;
    println!(
        "\tRounds: {}  scored: {}  without score: {}",
        summary.rounds, summary.scored, summary.failed
    );
    Ok(())
}

#[cfg(not(all(feature = "live", feature = "whisper")))]
fn handle_practice(
    _cli: &Cli,
    _args: &PracticeArgs,
    _dictionary: Arc<PronunciationDictionary>,
) -> Result<()> {
    anyhow::bail!(
        "practice needs microphone and recognizer support; rebuild with `--features live,whisper`"
    )
}
