//! Notas - Brazilian brokerage note parser
//!
//! Turns the text of a brokerage settlement note (nota de corretagem) into
//! trade records, resolving security names to trading symbols and splitting
//! the note's fees and withheld income tax (IRRF) across its trades.

pub mod config;
pub mod error;
pub mod importers;
pub mod models;
pub mod notes;
pub mod symbols;
pub mod utils;

pub use error::NotaError;
pub use models::{Broker, Operation, TradeRecord};
