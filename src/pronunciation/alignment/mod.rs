pub mod dictionary;
pub mod matcher;

use std::fmt::{Display, Formatter};
use std::ops::Range;

use serde::Serialize;

use dictionary::PhonemeSequence;
use matcher::SequenceMatcher;

/// Edit operation kind in a diff trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Equal,
    Replace,
    Insert,
    Delete,
}

impl DiffKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiffKind::Equal => "equal",
            DiffKind::Replace => "replace",
            DiffKind::Insert => "insert",
            DiffKind::Delete => "delete",
        }
    }
}

/// One span of an alignment between reference and recognized tokens.
/// Ranges are half-open token indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffOp {
    pub kind: DiffKind,
    pub reference: Range<usize>,
    pub recognized: Range<usize>,
}

impl DiffOp {
    pub fn new(kind: DiffKind, reference: Range<usize>, recognized: Range<usize>) -> Self {
        Self {
            kind,
            reference,
            recognized,
        }
    }
}

impl Display for DiffOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {}, {})",
            self.kind.as_str(),
            self.reference.start,
            self.reference.end,
            self.recognized.start,
            self.recognized.end
        )
    }
}

/// Aligns recognized phonemes against the reference word by word.
///
/// Diagnostic only; the result never feeds back into scoring.
pub fn diff(reference: &PhonemeSequence, recognized: &PhonemeSequence) -> Vec<DiffOp> {
    let reference_tokens = reference.tokens();
    let recognized_tokens = recognized.tokens();
    SequenceMatcher::new(&reference_tokens, &recognized_tokens).opcodes()
}

#[cfg(test)]
mod tests {
    use super::{diff, DiffKind, DiffOp};
    use crate::pronunciation::PronunciationDictionary;

    #[test]
    fn identical_sequences_produce_single_equal_span() {
        let dictionary = PronunciationDictionary::shared();
        let sequence = dictionary.transcribe("good morning to you");
        let trace = diff(&sequence, &sequence);
        assert_eq!(trace, vec![DiffOp::new(DiffKind::Equal, 0..4, 0..4)]);
    }

    #[test]
    fn substituted_word_is_reported_as_replace() {
        let dictionary = PronunciationDictionary::shared();
        let reference = dictionary.transcribe("good morning");
        let recognized = dictionary.transcribe("good evening");
        let trace = diff(&reference, &recognized);
        assert_eq!(
            trace,
            vec![
                DiffOp::new(DiffKind::Equal, 0..1, 0..1),
                DiffOp::new(DiffKind::Replace, 1..2, 1..2),
            ]
        );
        assert_eq!(trace[1].to_string(), "(replace, 1, 2, 1, 2)");
    }

    #[test]
    fn missing_and_extra_words() {
        let dictionary = PronunciationDictionary::shared();
        let reference = dictionary.transcribe("thank you very much");
        let dropped = dictionary.transcribe("thank you much");
        assert_eq!(
            diff(&reference, &dropped),
            vec![
                DiffOp::new(DiffKind::Equal, 0..2, 0..2),
                DiffOp::new(DiffKind::Delete, 2..3, 2..2),
                DiffOp::new(DiffKind::Equal, 3..4, 2..3),
            ]
        );
        let extra = dictionary.transcribe("thank you very very much");
        let trace = diff(&reference, &extra);
        assert!(trace.iter().any(|op| op.kind == DiffKind::Insert));
    }
}
