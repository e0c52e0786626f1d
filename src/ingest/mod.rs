// Ingestion: turning submitted files into cleaned text.
//
// Everything that can legitimately fail lives here, before the engine is
// ever invoked. Each rejection has its own IngestError variant with a
// message meant to be shown to the person who submitted the file.

pub mod clean;
pub mod pdf;
pub mod plain;
pub mod traits;

use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Default upload limit: 20 MB.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 20 * 1024 * 1024;

/// Default minimum length of cleaned text, in characters.
pub const DEFAULT_MIN_TEXT_CHARS: usize = 50;

/// Size and length limits applied to every submitted file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestLimits {
    pub max_file_bytes: u64,
    pub min_text_chars: usize,
}

impl Default for IngestLimits {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
        }
    }
}

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    PlainText,
    Pdf,
}

impl Format {
    pub fn mime(&self) -> &'static str {
        match self {
            Format::PlainText => "text/plain",
            Format::Pdf => "application/pdf",
        }
    }
}

const PLAIN_EXTENSIONS: &[&str] = &["txt", "text", "md", "csv"];
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Decide the format from the file extension, falling back to the PDF magic
/// bytes at the start of the file.
pub fn detect_format(path: &Path, head: &[u8]) -> Result<Format, IngestError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match extension.as_deref() {
        Some(ext) if PLAIN_EXTENSIONS.contains(&ext) => Ok(Format::PlainText),
        Some("pdf") => Ok(Format::Pdf),
        _ if head.starts_with(PDF_MAGIC) => Ok(Format::Pdf),
        _ => Err(IngestError::UnsupportedFormat { extension }),
    }
}

/// Cleaned text pulled out of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    /// Set for page-oriented formats
    pub page_count: Option<usize>,
}

/// Accept or reject cleaned text. An image-only PDF is reported as such
/// rather than as too short.
pub fn validate_extracted(
    format: Format,
    text: String,
    page_count: Option<usize>,
    limits: &IngestLimits,
) -> Result<ExtractedText, IngestError> {
    let chars = clean::char_len(&text);

    if format == Format::Pdf && pdf::looks_image_only(chars, page_count.unwrap_or(0)) {
        return Err(IngestError::NoExtractableText {
            pages: page_count.unwrap_or(0),
        });
    }

    if chars < limits.min_text_chars {
        return Err(IngestError::TooShort {
            chars,
            min: limits.min_text_chars,
        });
    }

    Ok(ExtractedText { text, page_count })
}

/// Why a submitted file was rejected.
#[derive(Debug)]
pub enum IngestError {
    /// Neither the extension nor the content identify a supported format
    UnsupportedFormat { extension: Option<String> },
    /// The file exceeds the configured size limit
    FileTooLarge { size: u64, limit: u64 },
    /// The cleaned text is below the minimum readable length
    TooShort { chars: usize, min: usize },
    /// A page-oriented document produced no usable text (scanned / image-only)
    NoExtractableText { pages: usize },
    /// The document is password-protected
    Encrypted,
    /// The file could not be opened or read
    Unreadable { path: PathBuf, source: io::Error },
    /// An external extraction tool failed
    Extractor { tool: &'static str, message: String },
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat { extension: Some(ext) } => write!(
                f,
                "unsupported file type '.{ext}' (supported: plain text and PDF)"
            ),
            Self::UnsupportedFormat { extension: None } => write!(
                f,
                "unrecognised file type (supported: plain text and PDF)"
            ),
            Self::FileTooLarge { size, limit } => write!(
                f,
                "file is {}, larger than the {} limit",
                format_bytes(*size),
                format_bytes(*limit)
            ),
            Self::TooShort { chars, min } => write!(
                f,
                "not enough readable text to analyze ({chars} characters, minimum {min})"
            ),
            Self::NoExtractableText { pages } => write!(
                f,
                "no extractable text in {pages} page(s); the document may be scanned or image-only"
            ),
            Self::Encrypted => write!(f, "the document is encrypted or password-protected"),
            Self::Unreadable { path, source } => {
                write!(f, "could not read {}: {}", path.display(), source)
            }
            Self::Extractor { tool, message } => write!(f, "{tool} failed: {message}"),
        }
    }
}

impl Error for IngestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unreadable { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl IngestError {
    pub(crate) fn unreadable(path: &Path, source: io::Error) -> Self {
        Self::Unreadable {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// File name used as the document's display key.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
