use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::debug;

use crate::pronunciation::{PronunciationError, Result};

const RAW_LEXICON: &str = include_str!("../../../assets/phonemes/lexicon.txt");

/// Shared dictionary instance backed by the bundled CMU-style lexicon.
static DEFAULT_DICTIONARY: Lazy<Arc<PronunciationDictionary>> = Lazy::new(|| {
    let dictionary = PronunciationDictionary::from_lexicon(RAW_LEXICON)
        .unwrap_or_else(|err| panic!("failed to initialize pronunciation dictionary: {err}"));
    Arc::new(dictionary)
});

/// Collection of pronunciations keyed by normalized transcript tokens.
///
/// Variants keep lexicon order, so the first entry for a word is the one used
/// for transcription.
#[derive(Debug, Clone)]
pub struct PronunciationDictionary {
    entries: HashMap<String, Vec<Box<[String]>>>,
}

impl PronunciationDictionary {
    /// Creates a dictionary instance from raw CMU-style lexicon data.
    pub fn from_lexicon(data: &str) -> Result<Self> {
        let mut entries: HashMap<String, Vec<Box<[String]>>> = HashMap::new();

        for (idx, line) in data.lines().enumerate() {
            let content = line.split_once('#').map_or(line, |(body, _)| body);
            let trimmed = content.trim();
            if trimmed.is_empty() || trimmed.starts_with(';') {
                continue;
            }

            let mut parts = trimmed.split_whitespace();
            let raw_word = parts.next().ok_or_else(|| {
                PronunciationError::dictionary(format!(
                    "lexicon line {idx} missing word column: {trimmed}"
                ))
            })?;

            let normalized_key = normalize_token(trim_variant(raw_word)).ok_or_else(|| {
                PronunciationError::dictionary(format!(
                    "lexicon line {idx} produced empty normalization: {raw_word}"
                ))
            })?;

            let phonemes: Vec<String> = parts.map(str::to_string).collect();
            if phonemes.is_empty() {
                return Err(PronunciationError::dictionary(format!(
                    "lexicon line {idx} missing phoneme sequence for {raw_word}"
                )));
            }

            entries
                .entry(normalized_key)
                .or_default()
                .push(phonemes.into_boxed_slice());
        }

        if entries.is_empty() {
            return Err(PronunciationError::dictionary(
                "pronunciation dictionary contained no entries",
            ));
        }

        Ok(Self { entries })
    }

    /// Loads a full lexicon file such as `cmudict-0.7b`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read(path).map_err(|err| {
            PronunciationError::dictionary(format!("failed to read {}: {err}", path.display()))
        })?;
        let dictionary = Self::from_lexicon(&String::from_utf8_lossy(&raw))?;
        debug!(
            path = %path.display(),
            words = dictionary.len(),
            "loaded pronunciation dictionary"
        );
        Ok(dictionary)
    }

    /// Returns a handle to the globally shared dictionary.
    pub fn shared() -> Arc<Self> {
        Arc::clone(&DEFAULT_DICTIONARY)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All known pronunciations for a token, in lexicon order.
    pub fn variants(&self, token: &str) -> Option<Vec<&[String]>> {
        let normalized = normalize_token(token)?;
        self.entries
            .get(&normalized)
            .map(|variants| variants.iter().map(|seq| seq.as_ref()).collect())
    }

    /// The first pronunciation listed for a token.
    pub fn primary(&self, token: &str) -> Option<&[String]> {
        let normalized = normalize_token(token)?;
        self.entries
            .get(&normalized)
            .and_then(|variants| variants.first())
            .map(|seq| seq.as_ref())
    }

    /// Maps whitespace-separated words to phonemes, one entry per word.
    /// Words missing from the dictionary stand in for themselves.
    pub fn transcribe(&self, text: &str) -> PhonemeSequence {
        let words = text
            .split_whitespace()
            .map(|raw| {
                let word = raw.to_lowercase();
                let phonemes = self.primary(&word).map(<[String]>::to_vec).unwrap_or_default();
                WordPhonemes { word, phonemes }
            })
            .collect();
        PhonemeSequence { words }
    }
}

/// Transcribes `text` with the bundled dictionary.
pub fn transcribe(text: &str) -> PhonemeSequence {
    DEFAULT_DICTIONARY.transcribe(text)
}

/// Pronunciation of a single word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordPhonemes {
    pub word: String,
    /// Empty when the word is not in the dictionary.
    pub phonemes: Vec<String>,
}

impl WordPhonemes {
    pub fn is_known(&self) -> bool {
        !self.phonemes.is_empty()
    }

    /// The token compared by the phoneme diff: the joined phonemes, or the
    /// word itself when it has no entry.
    pub fn token(&self) -> String {
        if self.is_known() {
            self.phonemes.join(" ")
        } else {
            self.word.clone()
        }
    }
}

/// Ordered per-word pronunciations of a phrase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PhonemeSequence {
    words: Vec<WordPhonemes>,
}

impl PhonemeSequence {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[WordPhonemes] {
        &self.words
    }

    pub fn tokens(&self) -> Vec<String> {
        self.words.iter().map(WordPhonemes::token).collect()
    }
}

impl Display for PhonemeSequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.tokens().join(" "))
    }
}

/// Normalizes transcript tokens by removing punctuation and uppercasing.
pub fn normalize_token(token: &str) -> Option<String> {
    let normalized: String = token
        .chars()
        .filter_map(|ch| match ch {
            'A'..='Z' | '\'' => Some(ch),
            'a'..='z' => Some(ch.to_ascii_uppercase()),
            _ => None,
        })
        .collect();
    (!normalized.is_empty()).then_some(normalized)
}

fn trim_variant(raw_word: &str) -> &str {
    raw_word
        .split_once('(')
        .map(|(base, _)| base)
        .unwrap_or(raw_word)
}

#[cfg(test)]
mod tests {
    use super::{normalize_token, PronunciationDictionary};

    const LEXICON: &str = ";;; comment\nREAD  R EH1 D\nREAD(1)  R IY1 D\nCAT  K AE1 T # pet\n";

    #[test]
    fn keeps_variants_in_lexicon_order() {
        let dictionary = PronunciationDictionary::from_lexicon(LEXICON).unwrap();
        let variants = dictionary.variants("read").unwrap();
        assert_eq!(variants.len(), 2);
        assert_eq!(dictionary.primary("Read").unwrap(), &["R", "EH1", "D"]);
        assert_eq!(dictionary.primary("cat").unwrap(), &["K", "AE1", "T"]);
    }

    #[test]
    fn rejects_lines_without_phonemes() {
        let err = PronunciationDictionary::from_lexicon("HELLO\n").unwrap_err();
        assert!(err.to_string().contains("missing phoneme sequence"));
    }

    #[test]
    fn rejects_empty_lexicon() {
        assert!(PronunciationDictionary::from_lexicon(";;; nothing\n").is_err());
    }

    #[test]
    fn unknown_words_fall_back_to_themselves() {
        let dictionary = PronunciationDictionary::from_lexicon(LEXICON).unwrap();
        let sequence = dictionary.transcribe("Read THE cat");
        assert_eq!(sequence.len(), 3);
        assert_eq!(sequence.tokens(), vec!["R EH1 D", "the", "K AE1 T"]);
        assert!(!sequence.words()[1].is_known());
        assert_eq!(sequence.to_string(), "R EH1 D the K AE1 T");
    }

    #[test]
    fn punctuation_only_tokens_are_kept_verbatim() {
        let dictionary = PronunciationDictionary::from_lexicon(LEXICON).unwrap();
        let sequence = dictionary.transcribe("cat ...");
        assert_eq!(sequence.tokens(), vec!["K AE1 T", "..."]);
    }

    #[test]
    fn normalizer_strips_symbols_and_uppercases() {
        assert_eq!(normalize_token("can't!"), Some("CAN'T".to_string()));
        assert_eq!(normalize_token("..."), None);
    }
}
