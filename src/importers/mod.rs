// Import module - brokerage note PDFs and pre-extracted note text

pub mod pdf_text;

use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::models::{Broker, TradeRecord};
use crate::notes;
use crate::symbols::SymbolLookup;

/// Where the note text comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteSource<'a> {
    /// PDF as issued by the broker, optionally password protected
    Pdf { password: Option<&'a str> },
    /// Text already extracted from the PDF
    Text,
}

/// Read one note and parse it into trade records
pub fn import_note<P: AsRef<Path>>(
    path: P,
    source: NoteSource<'_>,
    broker: Broker,
    lookup: &dyn SymbolLookup,
) -> Result<Vec<TradeRecord>> {
    let path = path.as_ref();
    info!("Importing {} note: {:?}", broker, path);

    let text = match source {
        NoteSource::Pdf { password } => pdf_text::extract_note_text(path, password)?,
        NoteSource::Text => pdf_text::read_note_text(path)?,
    };

    notes::parse_note(&text, broker, lookup)
}
