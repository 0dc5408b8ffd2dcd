use crate::error::{NotaError, Result};

/// Where the trade table sits in a note
#[derive(Debug, Clone, Copy)]
pub struct TableMarkers {
    /// Literal printed on the line that opens the table
    pub start: &'static str,
    /// Literal printed on the line right after the last trade row
    pub end: &'static str,
    /// Column header lines between the start line and the first row
    pub header_lines: usize,
}

/// Lines strictly between the start and end marker lines, minus the header.
///
/// The end marker is searched after the start marker. Both are required: a
/// note without a trade table cannot be parsed.
pub fn table_lines<'t>(text: &'t str, markers: &TableMarkers) -> Result<Vec<&'t str>> {
    let start = text.find(markers.start).ok_or_else(|| {
        NotaError::SectionNotFound(format!("trade table start marker '{}'", markers.start))
    })?;
    let body_start = start + markers.start.len();

    let body_len = text[body_start..].find(markers.end).ok_or_else(|| {
        NotaError::SectionNotFound(format!("trade table end marker '{}'", markers.end))
    })?;
    let body = &text[body_start..body_start + body_len];

    // first piece is the tail of the start line, last is the head of the end line
    let pieces: Vec<&str> = body.split('\n').collect();
    let inner = match pieces.len() {
        0..=2 => &[][..],
        n => &pieces[1..n - 1],
    };

    Ok(inner
        .iter()
        .skip(markers.header_lines)
        .map(|line| line.trim_end_matches('\r'))
        .collect())
}
