use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use copyscan::config::Config;
use copyscan::corpus::Document;
use copyscan::ingest::traits::{DocumentReader, FileReader};
use copyscan::output::terminal;
use copyscan::report::BatchReport;

/// copyscan: find overlapping sentences between a submission and prior documents.
///
/// Compares a document against a corpus of earlier submissions, reports a
/// whole-document similarity score and the sentences that closely match.
#[derive(Parser)]
#[command(name = "copyscan", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check one document against a corpus of prior documents
    Check {
        /// The submitted document (.txt, .md, .csv or .pdf)
        file: PathBuf,

        /// Prior documents to compare against
        #[arg(long, required = true, num_args = 1..)]
        corpus: Vec<PathBuf>,

        /// Print the check record as JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Check each document against every document listed before it
    Batch {
        /// Documents in submission order
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        /// Print the check records as JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Compare two documents directly
    Compare {
        /// The newer document
        a: PathBuf,
        /// The prior document
        b: PathBuf,
    },

    /// Show the sentences extracted from a document
    Sentences {
        file: PathBuf,
    },

    /// Show the word count and significant words of a document
    Words {
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("copyscan=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let engine = config.engine();
    let reader = FileReader::new(config.ingest_limits());

    match cli.command {
        Commands::Check { file, corpus, json } => {
            let submission = load(&reader, &file).await?;

            if !json {
                println!("Loading {} corpus document(s)...", corpus.len());
            }
            let (corpus, skipped) =
                copyscan::pipeline::load_corpus(&reader, &corpus, config.concurrency, !json).await;
            if !json {
                terminal::display_skipped(&skipped);
            }

            let record =
                copyscan::pipeline::run_check(engine, &submission, &corpus, config.timeout).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                terminal::display_record(&record);
            }
        }

        Commands::Batch { files, json } => {
            let (corpus, skipped) =
                copyscan::pipeline::load_corpus(&reader, &files, config.concurrency, !json).await;
            if !json {
                terminal::display_skipped(&skipped);
            }

            let documents: Vec<Document> = corpus.documents().to_vec();
            info!(documents = documents.len(), "Starting batch check");

            let report: BatchReport =
                copyscan::pipeline::run_batch(engine, documents, config.timeout).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for record in report.records.iter().filter(|r| !r.matches.is_empty()) {
                    terminal::display_record(record);
                }
                terminal::display_batch_summary(&report);
            }
        }

        Commands::Compare { a, b } => {
            let doc_a = load(&reader, &a).await?;
            let doc_b = load(&reader, &b).await?;

            let similarity = engine.document_similarity(doc_a.text(), doc_b.text());
            let matches = engine.find_detailed_matches(doc_a.text(), std::slice::from_ref(&doc_b));

            println!(
                "\n{}",
                format!("=== {} vs {} ===", doc_a.name(), doc_b.name()).bold()
            );
            println!("  Document similarity: {similarity}%");
            if matches.is_empty() {
                println!("  {}", "No overlapping sentences found.".green());
            }
            for (i, m) in matches.iter().enumerate() {
                println!("    {}. [{:>3}%] {}", i + 1, m.similarity, m.sentence.dimmed());
            }
        }

        Commands::Sentences { file } => {
            let doc = load(&reader, &file).await?;
            let sentences = engine.tokenizer().extract_sentences(doc.text());
            terminal::display_sentences(doc.name(), &sentences);
        }

        Commands::Words { file } => {
            let doc = load(&reader, &file).await?;
            let significant = engine.tokenizer().significant_words(doc.text());
            terminal::display_words(doc.name(), doc.word_count(), &significant);
        }
    }

    Ok(())
}

/// Load a single document, turning an ingestion rejection into a
/// user-facing error that names the file.
async fn load(reader: &FileReader, path: &std::path::Path) -> Result<Document> {
    reader
        .load(path)
        .await
        .with_context(|| format!("Cannot check {}", path.display()))
}
