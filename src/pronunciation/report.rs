//! Console rendering of reference prompts and assessment results.

use std::fmt::{self, Display, Formatter};

use super::{AssessmentResult, DiffOp, PhonemeSequence, ReferenceItem};

const INDENT: &str = "\t";

/// Header shown before the learner hears the reference phrase.
pub struct ReferencePrompt<'a> {
    pub item: &'a ReferenceItem,
    pub phonemes: &'a PhonemeSequence,
}

impl Display for ReferencePrompt<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{INDENT}Reference Text: {}", self.item.text)?;
        write!(f, "{INDENT}Reference Phonemes: {}", self.phonemes)
    }
}

/// Renders a diff trace as `[(equal, 0, 1, 0, 1), (replace, 1, 2, 1, 2)]`.
pub struct DiffTrace<'a>(pub &'a [DiffOp]);

impl Display for DiffTrace<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, op) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{op}")?;
        }
        f.write_str("]")
    }
}

impl Display for AssessmentResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{INDENT}Similarity Score: {:.2}", self.final_score())?;
        writeln!(
            f,
            "{INDENT}Lexical Similarity: {:.2} (pitch penalty {:.1})",
            self.similarity_score(),
            self.pitch_deviation_penalty()
        )?;
        writeln!(f, "{INDENT}Audio Duration: {:.2} seconds", self.duration())?;
        writeln!(f, "{INDENT}Reference Phonemes: {}", self.reference_phonemes())?;
        writeln!(f, "{INDENT}Recognized Phonemes: {}", self.recognized_phonemes())?;
        writeln!(
            f,
            "{INDENT}Phoneme Differences: {}",
            DiffTrace(self.diff_trace())
        )?;
        if let Some(voiced) = self.voiced_pitch() {
            writeln!(
                f,
                "{INDENT}Voiced Pitch: {:.1} +/- {:.1} MIDI over {} frames",
                voiced.mean_midi, voiced.std_midi, voiced.voiced_frames
            )?;
        }
        write!(f, "{INDENT}{}", self.tier().label())
    }
}

#[cfg(test)]
mod tests {
    use super::{DiffTrace, ReferencePrompt};
    use crate::pronunciation::{
        diff, AssessmentResult, PitchObservation, PronunciationDictionary, ReferenceItem, Scores,
        Tier,
    };

    fn result(reference: &str, recognized: &str, scores: Scores) -> AssessmentResult {
        let dictionary = PronunciationDictionary::shared();
        let reference_phonemes = dictionary.transcribe(reference);
        let recognized_phonemes = dictionary.transcribe(recognized);
        let trace = diff(&reference_phonemes, &recognized_phonemes);
        AssessmentResult::new(
            reference,
            recognized,
            scores,
            PitchObservation {
                mean: 12.0,
                std: 3.0,
                voiced: None,
                duration: 1.23456,
            },
            reference_phonemes,
            recognized_phonemes,
            trace,
        )
    }

    #[test]
    fn summary_lists_every_section() {
        let rendered = result(
            "good morning",
            "good evening",
            Scores {
                similarity: 0.5,
                penalty: 0.3,
                final_score: 0.2,
                tier: Tier::Wrong,
            },
        )
        .to_string();
        assert!(rendered.contains("Similarity Score: 0.20"));
        assert!(rendered.contains("Audio Duration: 1.23 seconds"));
        assert!(rendered.contains("Reference Phonemes: G UH1 D M AO1 R N IH0 NG"));
        assert!(rendered.contains("Recognized Phonemes: G UH1 D IY1 V N IH0 NG"));
        assert!(rendered.contains("Phoneme Differences: [(equal, 0, 1, 0, 1), (replace, 1, 2, 1, 2)]"));
        assert!(rendered.ends_with("Wrong."));
        assert!(!rendered.contains("Voiced Pitch"));
    }

    #[test]
    fn negative_scores_are_printed_as_is() {
        let rendered = result(
            "hello",
            "goodbye",
            Scores {
                similarity: 0.0,
                penalty: 0.3,
                final_score: -0.3,
                tier: Tier::Wrong,
            },
        )
        .to_string();
        assert!(rendered.contains("Similarity Score: -0.30"));
    }

    #[test]
    fn empty_trace_renders_brackets() {
        assert_eq!(DiffTrace(&[]).to_string(), "[]");
    }

    #[test]
    fn prompt_shows_text_and_phonemes() {
        let item = ReferenceItem::new("hello world", 60.0, 2.0).unwrap();
        let phonemes = PronunciationDictionary::shared().transcribe(&item.text);
        let prompt = ReferencePrompt {
            item: &item,
            phonemes: &phonemes,
        }
        .to_string();
        assert_eq!(
            prompt,
            "\tReference Text: hello world\n\tReference Phonemes: HH AH0 L OW1 W ER1 L D"
        );
    }
}
