use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::ingest::{IngestLimits, DEFAULT_MAX_FILE_BYTES, DEFAULT_MIN_TEXT_CHARS};
use crate::similarity::engine::SimilarityEngine;
use crate::similarity::MatchConfig;
use crate::text::stop_words::{StopWordSet, StopWordSource};
use crate::text::tokenize::{Tokenizer, TokenizerConfig};

/// Central configuration loaded from environment variables.
///
/// Every value has a default, so an empty environment is a valid
/// configuration. The .env file is loaded at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Largest accepted upload, in bytes (COPYSCAN_MAX_FILE_MB)
    pub max_file_bytes: u64,
    /// Minimum cleaned text length, in characters (COPYSCAN_MIN_TEXT_CHARS)
    pub min_text_chars: usize,
    /// Which stop-word list the tokenizer uses (COPYSCAN_STOP_WORDS)
    pub stop_words: StopWordSource,
    /// When true, tokens with trailing punctuation are discarded rather than
    /// trimmed (COPYSCAN_STRICT_TOKENS)
    pub strict_tokens: bool,
    /// Wall-clock limit for one analysis (COPYSCAN_TIMEOUT_SECS)
    pub timeout: Duration,
    /// How many corpus files are read at once (COPYSCAN_CONCURRENCY)
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
            stop_words: StopWordSource::Builtin,
            strict_tokens: false,
            timeout: Duration::from_secs(30),
            concurrency: 4,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let max_file_mb: u64 = parse_var("COPYSCAN_MAX_FILE_MB")?
            .unwrap_or(defaults.max_file_bytes / (1024 * 1024));
        let min_text_chars = parse_var("COPYSCAN_MIN_TEXT_CHARS")?.unwrap_or(defaults.min_text_chars);
        let timeout_secs: u64 =
            parse_var("COPYSCAN_TIMEOUT_SECS")?.unwrap_or(defaults.timeout.as_secs());
        let concurrency: usize = parse_var("COPYSCAN_CONCURRENCY")?.unwrap_or(defaults.concurrency);

        let stop_words = match env::var("COPYSCAN_STOP_WORDS").as_deref() {
            Ok("iso") => StopWordSource::Iso,
            Ok("builtin") | Err(_) => StopWordSource::Builtin,
            Ok(other) => anyhow::bail!(
                "COPYSCAN_STOP_WORDS must be 'builtin' or 'iso', got '{other}'"
            ),
        };

        let strict_tokens = matches!(
            env::var("COPYSCAN_STRICT_TOKENS").as_deref(),
            Ok("1") | Ok("true") | Ok("yes")
        );

        if concurrency == 0 {
            anyhow::bail!("COPYSCAN_CONCURRENCY must be at least 1");
        }

        Ok(Self {
            max_file_bytes: mb_to_bytes(max_file_mb)?,
            min_text_chars,
            stop_words,
            strict_tokens,
            timeout: Duration::from_secs(timeout_secs),
            concurrency,
        })
    }

    /// Limits handed to the ingestion layer.
    pub fn ingest_limits(&self) -> IngestLimits {
        IngestLimits {
            max_file_bytes: self.max_file_bytes,
            min_text_chars: self.min_text_chars,
        }
    }

    /// Tokenizer settings derived from this configuration.
    pub fn tokenizer_config(&self) -> TokenizerConfig {
        TokenizerConfig {
            trim_edge_punctuation: !self.strict_tokens,
            ..TokenizerConfig::default()
        }
    }

    /// Build the similarity engine this configuration describes.
    pub fn engine(&self) -> Arc<SimilarityEngine> {
        let tokenizer = Tokenizer::new(
            self.tokenizer_config(),
            StopWordSet::for_source(self.stop_words),
        );
        Arc::new(SimilarityEngine::new(tokenizer, MatchConfig::default()))
    }
}

/// Convert the configured megabyte limit to bytes, rejecting values that overflow.
fn mb_to_bytes(mb: u64) -> Result<u64> {
    match mb.checked_mul(1024 * 1024) {
        Some(bytes) => Ok(bytes),
        None => anyhow::bail!("COPYSCAN_MAX_FILE_MB is too large: {mb}"),
    }
}

/// Parse an optional environment variable, failing on malformed values.
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} has an invalid value: '{raw}'")),
        _ => Ok(None),
    }
}
