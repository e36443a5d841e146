use clearspeak::pronunciation::alignment::dictionary::{normalize_token, transcribe};
use clearspeak::pronunciation::alignment::matcher::SequenceMatcher;
use clearspeak::pronunciation::{diff, DiffKind, DiffOp, PronunciationDictionary};

#[test]
fn shared_dictionary_contains_bundled_entries() {
    let dictionary = PronunciationDictionary::shared();
    assert!(!dictionary.is_empty());
    assert_eq!(
        dictionary.primary("Pronunciation").unwrap(),
        &["P", "R", "OW2", "N", "AH0", "N", "S", "IY0", "EY1", "SH", "AH0", "N"]
    );
    assert_eq!(dictionary.primary("voice,").unwrap(), &["V", "OY1", "S"]);
}

#[test]
fn first_variant_is_used_for_transcription() {
    let dictionary = PronunciationDictionary::shared();
    assert_eq!(dictionary.variants("with").unwrap().len(), 2);
    let phonemes = dictionary.transcribe("Compare voice with time");
    assert_eq!(
        phonemes.to_string(),
        "K AH0 M P EH1 R V OY1 S W IH1 DH T AY1 M"
    );
    assert_eq!(phonemes.len(), 4);
}

#[test]
fn transcription_is_per_word_and_deterministic() {
    let first = transcribe("hello   world");
    assert_eq!(first, transcribe("hello world"));
    assert_eq!(first.words()[1].word, "world");
    assert_eq!(first.words()[1].phonemes, vec!["W", "ER1", "L", "D"]);
    assert!(transcribe("").is_empty());
    assert!(!transcribe("qwzx").words()[0].is_known());
}

#[test]
fn normalizer_strips_symbols_and_uppercases() {
    assert_eq!(normalize_token("don't!").as_deref(), Some("DON'T"));
    assert_eq!(normalize_token("123"), None);
}

#[test]
fn diff_of_identical_sequences_is_one_equal_span() {
    let phrase = transcribe("nice to meet you");
    assert_eq!(diff(&phrase, &phrase), vec![DiffOp::new(DiffKind::Equal, 0..4, 0..4)]);
}

#[test]
fn diff_of_empty_sequences_is_empty() {
    let empty = transcribe("");
    assert!(diff(&empty, &empty).is_empty());
}

#[test]
fn diff_covers_both_sequences() {
    let reference = transcribe("excuse me where is the station");
    let recognized = transcribe("excuse where is a station please");
    let ops = diff(&reference, &recognized);

    assert_eq!(ops.first().unwrap().reference.start, 0);
    assert_eq!(ops.last().unwrap().reference.end, reference.len());
    assert_eq!(ops.last().unwrap().recognized.end, recognized.len());
    for pair in ops.windows(2) {
        assert_eq!(pair[0].reference.end, pair[1].reference.start);
        assert_eq!(pair[0].recognized.end, pair[1].recognized.start);
    }
    let reference_tokens = reference.tokens();
    let recognized_tokens = recognized.tokens();
    for op in ops.iter().filter(|op| op.kind == DiffKind::Equal) {
        assert_eq!(
            reference_tokens[op.reference.clone()],
            recognized_tokens[op.recognized.clone()]
        );
    }
}

#[test]
fn insert_and_delete_spans() {
    let ops = diff(&transcribe("good morning"), &transcribe("good good morning"));
    assert_eq!(
        ops,
        vec![
            DiffOp::new(DiffKind::Insert, 0..0, 0..1),
            DiffOp::new(DiffKind::Equal, 0..2, 1..3),
        ]
    );
    let ops = diff(&transcribe("thank you very much"), &transcribe("thank you"));
    assert_eq!(ops.last().unwrap(), &DiffOp::new(DiffKind::Delete, 2..4, 2..2));
}

#[test]
fn matcher_ratio_matches_reference_values() {
    let a: Vec<char> = "abcd".chars().collect();
    let b: Vec<char> = "bcde".chars().collect();
    assert_eq!(SequenceMatcher::new(&a, &b).ratio(), 0.75);
    let empty: [char; 0] = [];
    assert_eq!(SequenceMatcher::new(&empty, &empty).ratio(), 1.0);
}
