// Note text extraction - turns a brokerage note PDF into one text blob

use pdf_extract::{extract_text, extract_text_encrypted};
use std::fs;
use std::panic;
use std::path::Path;
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;

use crate::error::{NotaError, Result};

/// Extract the text of every page, decrypting with `password` when given
pub fn extract_note_text<P: AsRef<Path>>(path: P, password: Option<&str>) -> Result<String> {
    let path = path.as_ref();
    info!("Extracting text from note PDF: {:?}", path);

    let unreadable = |reason: String| NotaError::DocumentUnreadable {
        path: path.display().to_string(),
        reason,
    };

    if !path.is_file() {
        return Err(unreadable("file not found".to_string()));
    }

    // pdf-extract panics on some malformed files
    let extracted = panic::catch_unwind(|| match password {
        Some(password) => extract_text_encrypted(path, password),
        None => extract_text(path),
    })
    .map_err(|_| unreadable("malformed PDF".to_string()))?;

    let text = extracted.map_err(|e| {
        unreadable(format!(
            "{} (check whether the PDF is password protected)",
            e
        ))
    })?;

    debug!("Extracted {} characters", text.len());
    Ok(normalize(&text))
}

/// Read text that was already extracted from a note
pub fn read_note_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    info!("Reading note text: {:?}", path);

    let text = fs::read_to_string(path).map_err(|e| NotaError::DocumentUnreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(normalize(&text))
}

/// NFC so accented labels compare equal however the PDF encoded them
fn normalize(text: &str) -> String {
    text.nfc().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_composes_accents() {
        let decomposed = "Nego\u{0301}cios realizados";
        assert_eq!(normalize(decomposed), "Negócios realizados");
    }

    #[test]
    fn test_missing_pdf_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let err = extract_note_text(dir.path().join("nota.pdf"), None).unwrap_err();
        assert_eq!(err.kind(), "DocumentUnreadable");
    }

    #[test]
    fn test_garbage_pdf_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nota.pdf");
        fs::write(&path, b"not a pdf at all").unwrap();
        let err = extract_note_text(&path, Some("123")).unwrap_err();
        assert_eq!(err.kind(), "DocumentUnreadable");
    }

    #[test]
    fn test_read_note_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nota.txt");
        fs::write(&path, "Data Prega\u{0303}o\n05/02/2024\n").unwrap();
        assert_eq!(read_note_text(&path).unwrap(), "Data Pregão\n05/02/2024\n");

        let err = read_note_text(dir.path().join("missing.txt")).unwrap_err();
        assert_eq!(err.kind(), "DocumentUnreadable");
    }
}
