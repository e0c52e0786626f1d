// PDF reader backed by poppler's command-line tools.
//
// `pdfinfo` reports the page count and encryption flag, `pdftotext` does the
// extraction. Both must be on PATH; a missing tool surfaces as an
// IngestError::Extractor with an install hint.

use std::io;
use std::path::Path;

use tokio::process::Command;
use tracing::debug;

use super::IngestError;

/// Below this many characters per page a PDF is treated as image-only.
pub const MIN_CHARS_PER_PAGE: usize = 20;

/// The fields of `pdfinfo` output we care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PdfInfo {
    pub pages: Option<usize>,
    pub encrypted: bool,
}

/// Parse `pdfinfo` stdout.
pub fn parse_pdfinfo(stdout: &str) -> PdfInfo {
    let mut info = PdfInfo::default();
    for line in stdout.lines() {
        if let Some(rest) = line.strip_prefix("Pages:") {
            info.pages = rest.trim().parse().ok();
        } else if let Some(rest) = line.strip_prefix("Encrypted:") {
            info.encrypted = rest.trim().starts_with("yes");
        }
    }
    info
}

/// Whether the extracted text is too thin for the number of pages, which
/// is what a scanned document looks like after text extraction.
pub fn looks_image_only(text_chars: usize, pages: usize) -> bool {
    text_chars == 0 || (pages > 0 && text_chars / pages < MIN_CHARS_PER_PAGE)
}

/// Read the page count and raw text of a PDF.
///
/// Returns the uncleaned text; callers normalise it.
pub async fn read_pdf(path: &Path) -> Result<(String, PdfInfo), IngestError> {
    let info_output = Command::new("pdfinfo")
        .arg(path)
        .output()
        .await
        .map_err(|e| tool_error("pdfinfo", e))?;

    let info = if info_output.status.success() {
        parse_pdfinfo(&String::from_utf8_lossy(&info_output.stdout))
    } else {
        let stderr = String::from_utf8_lossy(&info_output.stderr);
        if mentions_password(&stderr) {
            return Err(IngestError::Encrypted);
        }
        return Err(IngestError::Extractor {
            tool: "pdfinfo",
            message: stderr.trim().to_string(),
        });
    };

    debug!(path = %path.display(), pages = ?info.pages, encrypted = info.encrypted, "Read PDF info");

    if info.encrypted {
        return Err(IngestError::Encrypted);
    }

    let text_output = Command::new("pdftotext")
        .args(["-enc", "UTF-8"])
        .arg(path)
        .arg("-")
        .output()
        .await
        .map_err(|e| tool_error("pdftotext", e))?;

    if !text_output.status.success() {
        let stderr = String::from_utf8_lossy(&text_output.stderr);
        if mentions_password(&stderr) {
            return Err(IngestError::Encrypted);
        }
        return Err(IngestError::Extractor {
            tool: "pdftotext",
            message: stderr.trim().to_string(),
        });
    }

    Ok((String::from_utf8_lossy(&text_output.stdout).into_owned(), info))
}

fn mentions_password(stderr: &str) -> bool {
    stderr.to_lowercase().contains("password")
}

fn tool_error(tool: &'static str, err: io::Error) -> IngestError {
    let message = if err.kind() == io::ErrorKind::NotFound {
        format!("{tool} not found on PATH (install poppler-utils)")
    } else {
        err.to_string()
    };
    IngestError::Extractor { tool, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pdfinfo() {
        let stdout = "Title:          Essay\n\
                      Producer:       LaTeX\n\
                      Encrypted:      no\n\
                      Pages:          12\n\
                      Page size:      612 x 792 pts (letter)\n";
        let info = parse_pdfinfo(stdout);
        assert_eq!(info.pages, Some(12));
        assert!(!info.encrypted);
    }

    #[test]
    fn test_parse_pdfinfo_encrypted() {
        let info = parse_pdfinfo("Encrypted:      yes (print:yes copy:no change:no addNotes:no)\nPages: 2\n");
        assert!(info.encrypted);
        assert_eq!(info.pages, Some(2));
    }

    #[test]
    fn test_parse_pdfinfo_missing_fields() {
        assert_eq!(parse_pdfinfo("garbage"), PdfInfo::default());
    }

    #[test]
    fn test_image_only_detection() {
        assert!(looks_image_only(0, 0));
        assert!(looks_image_only(0, 5));
        assert!(looks_image_only(30, 5));
        assert!(!looks_image_only(500, 5));
        // Unknown page count: only an empty extraction counts.
        assert!(!looks_image_only(30, 0));
    }

    #[test]
    fn test_missing_tool_message() {
        let err = tool_error("pdftotext", io::Error::from(io::ErrorKind::NotFound));
        assert!(err.to_string().contains("poppler-utils"));
    }
}
