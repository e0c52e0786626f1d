// Document reader trait: the swap-ready extraction boundary.
//
// The pipeline only sees DocumentReader. FileReader is the default
// implementation (plain text + PDF from the local filesystem); tests and
// other front-ends can supply their own.

use std::path::Path;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tracing::debug;

use super::clean::{char_len, normalize_text};
use super::pdf::read_pdf;
use super::plain::read_plain;
use super::{
    detect_format, display_name, validate_extracted, ExtractedText, Format, IngestError,
    IngestLimits,
};
use crate::corpus::Document;

/// Trait for turning a file into cleaned text. Implementations must be async
/// because extraction may shell out or touch slow storage.
#[async_trait]
pub trait DocumentReader: Send + Sync {
    /// Extract cleaned text from a file, or explain why it was rejected.
    async fn read(&self, path: &Path) -> Result<ExtractedText, IngestError>;

    /// Extract a file and wrap it as a named Document.
    async fn load(&self, path: &Path) -> Result<Document, IngestError> {
        let extracted = self.read(path).await?;
        Ok(Document::new(display_name(path), extracted.text))
    }
}

/// Reads plain-text and PDF files from the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FileReader {
    limits: IngestLimits,
}

impl FileReader {
    pub fn new(limits: IngestLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> IngestLimits {
        self.limits
    }
}

#[async_trait]
impl DocumentReader for FileReader {
    async fn read(&self, path: &Path) -> Result<ExtractedText, IngestError> {
        // Check the size before reading any content.
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| IngestError::unreadable(path, e))?;
        if metadata.len() > self.limits.max_file_bytes {
            return Err(IngestError::FileTooLarge {
                size: metadata.len(),
                limit: self.limits.max_file_bytes,
            });
        }

        let head = read_head(path).await?;
        let format = detect_format(path, &head)?;

        let (raw, page_count) = match format {
            Format::PlainText => (read_plain(path).await?, None),
            Format::Pdf => {
                let (raw, info) = read_pdf(path).await?;
                (raw, info.pages)
            }
        };

        let text = normalize_text(&raw);

        debug!(
            path = %path.display(),
            mime = format.mime(),
            chars = char_len(&text),
            pages = ?page_count,
            "Extracted text"
        );

        validate_extracted(format, text, page_count, &self.limits)
    }
}

/// First few bytes of a file, for format sniffing.
async fn read_head(path: &Path) -> Result<Vec<u8>, IngestError> {
    let mut file = tokio::fs::File::open(path)
        .await
        .map_err(|e| IngestError::unreadable(path, e))?;
    let mut head = vec![0u8; 8];
    let n = file
        .read(&mut head)
        .await
        .map_err(|e| IngestError::unreadable(path, e))?;
    head.truncate(n);
    Ok(head)
}
