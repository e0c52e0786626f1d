// Plain-text reader.
//
// Bytes are decoded as UTF-8; invalid sequences become replacement
// characters, which normalisation then removes.

use std::path::Path;

use super::IngestError;

/// Read a plain-text file and decode it.
pub async fn read_plain(path: &Path) -> Result<String, IngestError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| IngestError::unreadable(path, e))?;
    Ok(decode(&bytes))
}

/// Lossy UTF-8 decode.
pub fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
