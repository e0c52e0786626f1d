// Composition tests: verifying that the stages chain together correctly.
//
// These tests exercise the data flow between modules:
//   Document -> Tokenizer -> SimilarityEngine -> CheckRecord
// plus the async pipeline wrapper, without touching the filesystem.

use std::sync::Arc;
use std::time::Duration;

use copyscan::corpus::{Corpus, Document};
use copyscan::output::truncate_chars;
use copyscan::pipeline::{run_batch, run_check};
use copyscan::report::{CheckRecord, OverlapLevel};
use copyscan::similarity::engine::SimilarityEngine;

const CLIMATE: &str = "Climate change is a pressing global issue that requires immediate action.";

const LONG_WORDS: &[&str] = &[
    "archipelago", "barometer", "cathedral", "dandelion", "eucalyptus", "flamingo",
    "gondola", "harmonica", "iceberg", "jasmine", "kaleidoscope", "labyrinth",
    "marmalade", "nebula", "obsidian", "porcupine", "quartz", "rhubarb",
    "saxophone", "tambourine", "umbrella", "velvet", "watermelon", "xylophone",
    "yogurt", "zeppelin", "avalanche", "blizzard", "canyon", "delta",
];

// ============================================================
// Scenarios: identical, disjoint, long sentence
// ============================================================

#[test]
fn identical_document_is_full_match() {
    let engine = SimilarityEngine::default();
    let corpus = vec![Document::new("doc1", CLIMATE)];

    let report = engine.analyze(CLIMATE, &corpus);

    assert_eq!(report.similarity, 100);
    assert_eq!(report.closest_source.as_deref(), Some("doc1"));
    assert_eq!(report.matches.len(), 1);
    assert!(report.matches[0].similarity >= 75);
    assert_eq!(report.matches[0].source_file, "doc1");
    assert_eq!(
        report.matches[0].sentence,
        "Climate change is a pressing global issue that requires immediate action"
    );
}

#[test]
fn disjoint_documents_have_no_overlap() {
    let engine = SimilarityEngine::default();
    let corpus = vec![
        Document::new("castles", "Medieval castles featured thick stone walls and deep moats."),
        Document::new("cooking", "Slow roasting vegetables brings out their natural sweetness."),
    ];

    let report = engine.analyze(
        "Quantum computers manipulate qubits using superposition.",
        &corpus,
    );

    assert_eq!(report.similarity, 0);
    assert_eq!(report.closest_source, None);
    assert!(report.matches.is_empty());
}

#[test]
fn long_sentence_truncated_but_scored_in_full() {
    let engine = SimilarityEngine::default();
    let sentence = LONG_WORDS.join(" ");
    assert!(sentence.chars().count() > 250, "fixture too short");

    let corpus = vec![Document::new("long", format!("{sentence}."))];
    let report = engine.analyze(&format!("{sentence}."), &corpus);

    assert_eq!(report.matches.len(), 1);
    let matched = &report.matches[0];
    assert_eq!(matched.similarity, 100);
    assert_eq!(matched.sentence.chars().count(), 203);
    assert!(matched.sentence.ends_with("..."));
    assert_eq!(matched.sentence, truncate_chars(&sentence, 200));

    // Scoring only the displayed prefix would have fallen below the threshold.
    let prefix: String = sentence.chars().take(200).collect();
    assert!(engine.sentence_similarity(&prefix, &sentence) < 75);
}

#[test]
fn all_stop_word_document_yields_zero_result() {
    let engine = SimilarityEngine::default();
    let corpus = vec![Document::new("doc1", CLIMATE)];
    let report = engine.analyze("This is what it was. And that is how it will be!", &corpus);

    assert_eq!(report.similarity, 0);
    assert!(report.matches.is_empty());
    assert_eq!(report.word_count, 12);
}

#[test]
fn closest_source_is_first_document_at_maximum() {
    let engine = SimilarityEngine::default();
    let corpus = vec![
        Document::new("unrelated", "Jazz musicians improvise melodies over chord changes."),
        Document::new("copy-a", CLIMATE),
        Document::new("copy-b", CLIMATE),
    ];
    let report = engine.analyze(CLIMATE, &corpus);
    assert_eq!(report.closest_source.as_deref(), Some("copy-a"));
    let sources: Vec<&str> = report.matches.iter().map(|m| m.source_file.as_str()).collect();
    assert_eq!(sources, vec!["copy-a", "copy-b"]);
}

// ============================================================
// Chain: report -> CheckRecord
// ============================================================

#[test]
fn record_reflects_report() {
    let engine = SimilarityEngine::default();
    let corpus = vec![Document::new("doc1", CLIMATE)];
    let report = engine.analyze(CLIMATE, &corpus);
    let record = CheckRecord::new("submission.txt", corpus.len(), report);

    assert_eq!(record.document, "submission.txt");
    assert_eq!(record.similarity, 100);
    assert_eq!(record.level, OverlapLevel::High);
    assert_eq!(record.corpus_size, 1);
    assert_eq!(record.word_count, 11);

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["matches"][0]["source_file"], "doc1");
    assert_eq!(json["level"], "High");
}

// ============================================================
// Pipeline: blocking analysis under a timeout
// ============================================================

#[tokio::test]
async fn run_check_matches_direct_analysis() {
    let engine = Arc::new(SimilarityEngine::default());
    let corpus: Corpus = vec![Document::new("doc1", CLIMATE)].into_iter().collect();
    let submission = Document::new("new", CLIMATE);

    let record = run_check(engine.clone(), &submission, &corpus, Duration::from_secs(10))
        .await
        .unwrap();
    let direct = engine.analyze(CLIMATE, corpus.documents());

    assert_eq!(record.similarity, direct.similarity);
    assert_eq!(record.matches, direct.matches);
    assert_eq!(record.corpus_size, 1);
}

#[tokio::test]
async fn run_batch_checks_against_earlier_submissions_only() {
    let engine = Arc::new(SimilarityEngine::default());
    let docs = vec![
        Document::new("one", CLIMATE),
        Document::new("two", "Jazz musicians improvise melodies over chord changes."),
        Document::new("three", CLIMATE),
    ];
    let report = run_batch(engine, docs, Duration::from_secs(10)).await;
    assert!(report.failures.is_empty());
    let records = report.records;

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].corpus_size, 0);
    assert_eq!(records[1].similarity, 0);
    assert_eq!(records[2].corpus_size, 2);
    assert_eq!(records[2].similarity, 100);
    assert_eq!(records[2].closest_source.as_deref(), Some("one"));
}

/// `sentence` repeated `count` times as one document.
fn repeated(sentence: &str, count: usize) -> String {
    vec![sentence; count].join(" ")
}

#[tokio::test]
async fn run_batch_keeps_going_after_a_timed_out_check() {
    let engine = Arc::new(SimilarityEngine::default());
    // "slow" against "big" is 1500 x 1500 sentence comparisons, far beyond the
    // timeout; "big" against an empty corpus and "short" against both are quick.
    let docs = vec![
        Document::new("big", repeated("Rivers carve canyons through ancient mountains.", 1500)),
        Document::new("slow", repeated("Jazz musicians improvise melodies over chords.", 1500)),
        Document::new("short", CLIMATE),
        Document::new("echo", "Rivers carve canyons through ancient mountains."),
    ];
    let report = run_batch(engine, docs, Duration::from_millis(300)).await;

    let checked: Vec<&str> = report.records.iter().map(|r| r.document.as_str()).collect();
    assert_eq!(checked, vec!["big", "short", "echo"]);

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].document, "slow");
    assert!(
        report.failures[0].reason.contains("300ms"),
        "{}",
        report.failures[0].reason
    );

    // The timed-out document still joined the session corpus.
    assert_eq!(report.records[1].corpus_size, 2);
    assert_eq!(report.records[2].corpus_size, 3);
    assert_eq!(report.records[2].closest_source.as_deref(), Some("big"));
    assert_eq!(report.records[2].matches.len(), 5);
}

#[test]
fn corpus_removal_changes_result() {
    let engine = SimilarityEngine::default();
    let mut corpus = Corpus::new();
    corpus.add(Document::new("doc1", CLIMATE));
    assert_eq!(engine.analyze(CLIMATE, corpus.documents()).similarity, 100);

    corpus.remove("doc1");
    let report = engine.analyze(CLIMATE, corpus.documents());
    assert_eq!(report.similarity, 0);
    assert!(report.matches.is_empty());
}
