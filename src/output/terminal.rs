// Colored terminal output for check records, sentences and word lists.
//
// This module handles all terminal-specific formatting. The main.rs command
// handlers delegate here.

use std::path::PathBuf;

use colored::Colorize;

use crate::ingest::IngestError;
use crate::report::{BatchReport, CheckRecord, OverlapLevel};

/// Display a single check record with its sentence-level evidence.
pub fn display_record(record: &CheckRecord) {
    println!(
        "\n{}",
        format!("=== Overlap check for {} ===", record.document).bold()
    );

    println!(
        "  Similarity: {}  ({})",
        colorize_level(&format!("{}%", record.similarity), record.level),
        colorize_level(record.level.as_str(), record.level),
    );
    match &record.closest_source {
        Some(source) => println!("  Closest document: {source}"),
        None if record.corpus_size == 0 => println!("  Closest document: {}", "(empty corpus)".dimmed()),
        None => println!("  Closest document: {}", "none".dimmed()),
    }
    println!("  Compared against: {} document(s)", record.corpus_size);
    println!("  Word count: {}", record.word_count);
    println!(
        "  Checked at: {}",
        record.checked_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    if record.matches.is_empty() {
        println!("\n  {}", "No overlapping sentences found.".green());
        return;
    }

    println!(
        "\n  {} overlapping sentence(s):",
        record.matches.len()
    );
    for (i, m) in record.matches.iter().enumerate() {
        let score = format!("{:>3}%", m.similarity);
        let score = if m.similarity >= 90 {
            score.red().bold()
        } else {
            score.yellow()
        };
        println!(
            "    {}. [{}] {} {}",
            i + 1,
            score,
            m.source_file.bold(),
            m.sentence.dimmed()
        );
    }
}

/// Summarise a batch as one line per finished record, followed by the
/// documents whose checks failed.
pub fn display_batch_summary(report: &BatchReport) {
    let records = &report.records;
    if records.is_empty() && report.failures.is_empty() {
        println!("No documents checked.");
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Batch Summary ({} documents) ===",
            records.len() + report.failures.len()
        )
        .bold()
    );
    println!();
    println!(
        "  {:>4}  {:<36} {:>6}  {:<9} {:>7}  Closest",
        "#".dimmed(),
        "Document".dimmed(),
        "Sim".dimmed(),
        "Level".dimmed(),
        "Matches".dimmed(),
    );
    println!("  {}", "-".repeat(78).dimmed());

    for (i, record) in records.iter().enumerate() {
        println!(
            "  {:>4}. {:<36} {:>5}%  {:<9} {:>7}  {}",
            i + 1,
            super::truncate_chars(&record.document, 33),
            record.similarity,
            colorize_level(record.level.as_str(), record.level),
            record.matches.len(),
            record.closest_source.as_deref().unwrap_or("-"),
        );
    }

    if !report.failures.is_empty() {
        println!();
        println!(
            "  {} {} document(s) not checked:",
            "Failed:".red().bold(),
            report.failures.len()
        );
        for failure in &report.failures {
            println!("    {} {}", failure.document.bold(), failure.reason.dimmed());
        }
    }
    println!();
}

/// Display the sentences the segmenter extracted from a document.
pub fn display_sentences(name: &str, sentences: &[String]) {
    println!(
        "\n{}",
        format!("=== {} sentence(s) in {} ===", sentences.len(), name).bold()
    );
    for (i, sentence) in sentences.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, sentence);
    }
}

/// Display raw and significant word statistics for a document.
pub fn display_words(name: &str, word_count: usize, significant: &[String]) {
    println!("\n{}", format!("=== Words in {name} ===").bold());
    println!("  Word count: {word_count}");
    println!("  Significant words: {}", significant.len());
    if !significant.is_empty() {
        println!("  {}", significant.join(" ").dimmed());
    }
}

/// Report files that were rejected during ingestion.
pub fn display_skipped(skipped: &[(PathBuf, IngestError)]) {
    for (path, err) in skipped {
        println!(
            "  {} skipped {}: {}",
            "Warning:".yellow(),
            path.display(),
            err
        );
    }
}

/// Colorize text according to an overlap level.
fn colorize_level(text: &str, level: OverlapLevel) -> colored::ColoredString {
    match level {
        OverlapLevel::High => text.red().bold(),
        OverlapLevel::Moderate => text.yellow(),
        OverlapLevel::Low => text.green(),
    }
}
