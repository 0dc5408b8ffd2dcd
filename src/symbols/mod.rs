//! Symbol resolution
//!
//! Brokerage notes print the security's market name ("PETROBRAS PN N2"), not
//! its trading symbol. [`SymbolResolver`] asks a [`SymbolLookup`] for the name
//! and, when nothing matches, drops the last word and asks again until the
//! name runs out.

pub mod yahoo;

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

use crate::error::{NotaError, Result};

pub use yahoo::YahooSymbolLookup;

/// B3 ticker as printed in a note, with the optional fractional-lot `F`
static TICKER_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{4}\d{1,2}F?$").expect("valid ticker regex"));

/// One candidate returned by a lookup, possibly exchange-suffixed (`PETR4.SA`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolMatch {
    pub symbol: String,
}

impl SymbolMatch {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

/// External search for a security by free-text name.
///
/// An empty list means no match; a transport problem must be returned as
/// [`NotaError::LookupTransportFailure`].
pub trait SymbolLookup {
    fn search(&self, query: &str) -> Result<Vec<SymbolMatch>>;
}

impl<F> SymbolLookup for F
where
    F: Fn(&str) -> Result<Vec<SymbolMatch>>,
{
    fn search(&self, query: &str) -> Result<Vec<SymbolMatch>> {
        self(query)
    }
}

/// Strip the exchange suffix and the fractional-lot marker from a symbol.
///
/// `PETR4F.SA` -> `PETR4`, `ITSA4` -> `ITSA4`
pub fn canonical_symbol(raw: &str) -> String {
    let base = raw.trim().split('.').next().unwrap_or_default();
    match base.strip_suffix('F') {
        Some(rest) if rest.ends_with(|c: char| c.is_ascii_digit()) => rest.to_string(),
        _ => base.to_string(),
    }
}

/// Canonical symbol when `word` already is a B3 ticker (`BBAS3F` -> `BBAS3`)
pub fn ticker_from_word(word: &str) -> Option<String> {
    let cleaned: String = word.chars().filter(|c| c.is_alphanumeric()).collect();
    TICKER_SHAPE
        .is_match(&cleaned)
        .then(|| canonical_symbol(&cleaned))
}

/// Resolves names to symbols for one document, caching by name.
pub struct SymbolResolver<'a> {
    lookup: &'a dyn SymbolLookup,
    cache: HashMap<String, String>,
}

impl<'a> SymbolResolver<'a> {
    pub fn new(lookup: &'a dyn SymbolLookup) -> Self {
        Self {
            lookup,
            cache: HashMap::new(),
        }
    }

    /// Resolve `name` to a canonical symbol.
    ///
    /// Each attempt drops the last word, so at most one lookup per word is
    /// made before failing with [`NotaError::SymbolResolutionExhausted`].
    pub fn resolve(&mut self, name: &str) -> Result<String> {
        let name = name.trim();
        if let Some(symbol) = self.cache.get(name) {
            debug!("Using cached symbol {} for '{}'", symbol, name);
            return Ok(symbol.clone());
        }

        let mut words: Vec<&str> = name.split_whitespace().collect();
        while !words.is_empty() {
            let query = words.join(" ");
            let matches = self.lookup.search(&query)?;

            if let Some(symbol) = matches
                .iter()
                .map(|m| canonical_symbol(&m.symbol))
                .find(|s| !s.is_empty())
            {
                debug!("Resolved '{}' to {} (query '{}')", name, symbol, query);
                self.cache.insert(name.to_string(), symbol.clone());
                return Ok(symbol);
            }

            debug!("No symbol for '{}', retrying with a shorter name", query);
            words.pop();
        }

        Err(NotaError::SymbolResolutionExhausted(name.to_string()))
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}
