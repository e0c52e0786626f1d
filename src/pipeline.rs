// Check pipeline: ingest files, then run the engine once.
//
// Ingestion is async and concurrent. The analysis that follows is a bounded,
// CPU-bound computation, so it runs on a blocking thread under a wall-clock
// timeout. The engine itself has no cancellation hook; the timeout only
// stops us waiting for it.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::corpus::{Corpus, Document};
use crate::ingest::traits::DocumentReader;
use crate::ingest::IngestError;
use crate::report::{BatchReport, CheckFailure, CheckRecord};
use crate::similarity::engine::SimilarityEngine;

/// Load corpus files concurrently.
///
/// Returns the corpus in input order plus every file that was rejected,
/// with its reason. A rejected file never aborts the load.
pub async fn load_corpus(
    reader: &dyn DocumentReader,
    paths: &[PathBuf],
    concurrency: usize,
    show_progress: bool,
) -> (Corpus, Vec<(PathBuf, IngestError)>) {
    let pb = if show_progress {
        let pb = ProgressBar::new(paths.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Corpus [{bar:30}] {pos}/{len} ({eta})")
                .unwrap(),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut results: Vec<(usize, Result<Document, IngestError>)> =
        stream::iter(paths.iter().enumerate().map(|(i, path)| {
            let pb = &pb;
            async move {
                let result = reader.load(path).await;
                pb.inc(1);
                (i, result)
            }
        }))
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;
    pb.finish_and_clear();

    // buffer_unordered completes out of order; corpus order must follow input order.
    results.sort_by_key(|(i, _)| *i);

    let mut corpus = Corpus::new();
    let mut skipped = Vec::new();
    for (i, result) in results {
        match result {
            Ok(doc) => corpus.add(doc),
            Err(e) => {
                warn!(path = %paths[i].display(), error = %e, "Skipping corpus file");
                skipped.push((paths[i].clone(), e));
            }
        }
    }

    info!(
        loaded = corpus.len(),
        skipped = skipped.len(),
        "Corpus loaded"
    );

    (corpus, skipped)
}

/// Analyze `document` against `corpus` on a blocking thread, giving up after `timeout`.
pub async fn run_check(
    engine: Arc<SimilarityEngine>,
    document: &Document,
    corpus: &Corpus,
    timeout: Duration,
) -> Result<CheckRecord> {
    let text = document.text().to_string();
    let prior = corpus.documents().to_vec();
    let corpus_size = prior.len();

    let handle = tokio::task::spawn_blocking(move || engine.analyze(&text, &prior));
    let report = tokio::time::timeout(timeout, handle)
        .await
        .map_err(|_| {
            anyhow::anyhow!(
                "Analysis of {} exceeded {:?}; try a smaller corpus or raise COPYSCAN_TIMEOUT_SECS",
                document.name(),
                timeout
            )
        })?
        .context("analysis task panicked")?;

    info!(
        document = document.name(),
        similarity = report.similarity,
        matches = report.matches.len(),
        "Check complete"
    );

    Ok(CheckRecord::new(document.name(), corpus_size, report))
}

/// Check each document against all documents before it, appending each one
/// to the session corpus after it has been checked.
///
/// A check that fails (timeout, panicked task) is recorded in the report's
/// failures and the batch carries on. The document still joins the session
/// corpus, since it was submitted even though its own check did not finish.
pub async fn run_batch(
    engine: Arc<SimilarityEngine>,
    documents: Vec<Document>,
    timeout: Duration,
) -> BatchReport {
    let mut corpus = Corpus::new();
    let mut report = BatchReport::default();
    for document in documents {
        match run_check(engine.clone(), &document, &corpus, timeout).await {
            Ok(record) => report.records.push(record),
            Err(e) => {
                warn!(document = document.name(), error = %e, "Check failed, continuing batch");
                report.failures.push(CheckFailure {
                    document: document.name().to_string(),
                    reason: format!("{e:#}"),
                });
            }
        }
        corpus.add(document);
    }
    report
}
