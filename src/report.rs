// Check records: what the caller attaches to a submission after analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::similarity::engine::SimilarityReport;
use crate::similarity::matches::SentenceMatch;

/// Coarse bucket for a document-level similarity percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlapLevel {
    Low,
    Moderate,
    High,
}

impl OverlapLevel {
    /// Determine the level from a similarity percentage (0-100).
    pub fn from_similarity(similarity: u8) -> Self {
        match similarity {
            s if s >= 70 => OverlapLevel::High,
            s if s >= 30 => OverlapLevel::Moderate,
            _ => OverlapLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OverlapLevel::Low => "Low",
            OverlapLevel::Moderate => "Moderate",
            OverlapLevel::High => "High",
        }
    }
}

impl std::fmt::Display for OverlapLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The result of checking one submission against the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRecord {
    pub document: String,
    pub word_count: usize,
    pub similarity: u8,
    pub level: OverlapLevel,
    pub closest_source: Option<String>,
    pub matches: Vec<SentenceMatch>,
    /// Number of prior documents compared against
    pub corpus_size: usize,
    pub checked_at: DateTime<Utc>,
}

impl CheckRecord {
    pub fn new(document: &str, corpus_size: usize, report: SimilarityReport) -> Self {
        Self {
            document: document.to_string(),
            word_count: report.word_count,
            similarity: report.similarity,
            level: OverlapLevel::from_similarity(report.similarity),
            closest_source: report.closest_source,
            matches: report.matches,
            corpus_size,
            checked_at: Utc::now(),
        }
    }
}

/// A batch document whose check did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckFailure {
    pub document: String,
    pub reason: String,
}

/// Everything a batch run produced: finished records in submission order,
/// plus the documents whose checks failed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub records: Vec<CheckRecord>,
    pub failures: Vec<CheckFailure>,
}


mod tests {
    use super::*;

    #[test]
    fn test_level_boundaries() {
        assert_eq!(OverlapLevel::from_similarity(0), OverlapLevel::Low);
        assert_eq!(OverlapLevel::from_similarity(29), OverlapLevel::Low);
        assert_eq!(OverlapLevel::from_similarity(30), OverlapLevel::Moderate);
        assert_eq!(OverlapLevel::from_similarity(69), OverlapLevel::Moderate);
        assert_eq!(OverlapLevel::from_similarity(70), OverlapLevel::High);
        assert_eq!(OverlapLevel::from_similarity(100), OverlapLevel::High);
    }

    #[test]
    fn test_record_carries_report() {
        let report = SimilarityReport {
            similarity: 42,
            closest_source: Some("prior.txt".to_string()),
            matches: vec![],
            word_count: 120,
        };
        let record = CheckRecord::new("essay.txt", 3, report);
        assert_eq!(record.document, "essay.txt");
        assert_eq!(record.level, OverlapLevel::Moderate);
        assert_eq!(record.corpus_size, 3);
        assert_eq!(record.word_count, 120);
    }
}
