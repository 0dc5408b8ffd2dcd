//! Error handling for note parsing
//!
//! Defines the typed errors a document parse can fail with. Every variant is
//! fatal for the whole document; lines that are not trades never become
//! errors, the line parser just returns `Ok(None)` for them.

use thiserror::Error;

/// Fatal errors for one brokerage note
#[derive(Error, Debug)]
pub enum NotaError {
    #[error("document unreadable: {path}: {reason}")]
    DocumentUnreadable { path: String, reason: String },

    #[error("section not found: {0}")]
    SectionNotFound(String),

    #[error("no symbol found for '{0}' after trying every shorter name")]
    SymbolResolutionExhausted(String),

    #[error("symbol lookup failed for '{query}': {reason}")]
    LookupTransportFailure { query: String, reason: String },
}

impl NotaError {
    /// Name of the error kind, reported as `exception` in the CLI error object
    pub fn kind(&self) -> &'static str {
        match self {
            NotaError::DocumentUnreadable { .. } => "DocumentUnreadable",
            NotaError::SectionNotFound(_) => "SectionNotFound",
            NotaError::SymbolResolutionExhausted(_) => "SymbolResolutionExhausted",
            NotaError::LookupTransportFailure { .. } => "LookupTransportFailure",
        }
    }
}

/// Result type alias for note parsing
pub type Result<T> = std::result::Result<T, NotaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_formatting_is_readable() {
        let err = NotaError::SectionNotFound("auction date ('Data pregão')".to_string());
        assert_eq!(
            err.to_string(),
            "section not found: auction date ('Data pregão')"
        );
    }

    #[test]
    fn test_anyhow_context_keeps_kind() {
        use anyhow::Context;
        let result: anyhow::Result<()> =
            Err(NotaError::SymbolResolutionExhausted("FOO BAR".to_string()))
                .context("failed to parse note");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("failed to parse note"));
        let nota = err.downcast_ref::<NotaError>().expect("typed error in chain");
        assert_eq!(nota.kind(), "SymbolResolutionExhausted");
    }

    #[test]
    fn test_kind_names() {
        let unreadable = NotaError::DocumentUnreadable {
            path: "nota.pdf".to_string(),
            reason: "bad password".to_string(),
        };
        assert_eq!(unreadable.kind(), "DocumentUnreadable");
        assert!(unreadable.to_string().starts_with("document unreadable"));

        let transport = NotaError::LookupTransportFailure {
            query: "PETROBRAS".to_string(),
            reason: "HTTP 503".to_string(),
        };
        assert_eq!(transport.kind(), "LookupTransportFailure");
        assert!(transport.to_string().contains("PETROBRAS"));
    }
}
