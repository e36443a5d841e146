//! ClearSpeak - spoken pronunciation practice and assessment.
//!
//! The [`pronunciation`] module holds the assessment engine: phoneme
//! transcription, pitch tracking, lexical similarity, the pitch penalty policy,
//! phoneme diffs and the orchestrator that turns them into a feedback tier.
//! Everything else (audio I/O, datasets, the practice loop) feeds it.

pub mod audio;
pub mod config;
pub mod dataset;
pub mod pronunciation;
pub mod types;
