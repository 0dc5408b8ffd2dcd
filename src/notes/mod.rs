// Notes module - brokerage note (nota de corretagem) parsing

pub mod apportion;
pub mod fields;
pub mod line_parser;
pub mod nuinvest;
pub mod rico;
pub mod segmenter;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{Broker, DocumentFields, TaxTotals, TradeRecord};
use crate::symbols::{SymbolLookup, SymbolResolver};
use crate::utils::format_decimal_br;

pub use apportion::apportion;
pub use nuinvest::NuInvestLayout;
pub use rico::RicoLayout;

/// Where one broker prints each piece of a note
pub trait NoteLayout: Sync {
    fn broker(&self) -> Broker;

    fn auction_date(&self, text: &str) -> Result<NaiveDate>;

    fn note_id(&self, text: &str) -> Option<String>;

    /// Candidate rows of the trade table
    fn trade_lines<'t>(&self, text: &'t str) -> Result<Vec<&'t str>>;

    fn tax_totals(&self, text: &str) -> TaxTotals;

    /// Whether rows print the ticker as the first word of the security name
    fn tickers_in_names(&self) -> bool {
        false
    }
}

impl Broker {
    pub fn layout(&self) -> &'static dyn NoteLayout {
        match self {
            Broker::Rico => &RicoLayout,
            Broker::NuInvest => &NuInvestLayout,
        }
    }
}

/// Parse the text of one note into trade records with fees and IRRF apportioned.
///
/// Any fatal problem (missing date or table, unresolvable symbol, lookup
/// failure) fails the whole note; no partial list is returned.
pub fn parse_note(
    text: &str,
    broker: Broker,
    lookup: &dyn SymbolLookup,
) -> Result<Vec<TradeRecord>> {
    let layout = broker.layout();

    let fields = DocumentFields {
        date: layout.auction_date(text)?,
        note_id: layout.note_id(text),
        broker: layout.broker(),
    };
    info!(
        "Parsing {} note {} from {}",
        broker,
        fields.note_id.as_deref().unwrap_or("(no number)"),
        fields.date
    );

    let lines = layout.trade_lines(text)?;
    debug!("Trade table has {} candidate rows", lines.len());

    let mut resolver = SymbolResolver::new(lookup);
    let mut records = Vec::new();
    for line in lines {
        if let Some(trade) =
            line_parser::parse_line(line, layout.tickers_in_names(), &mut resolver)?
        {
            records.push(trade.into_record(&fields));
        }
    }

    let totals = layout.tax_totals(text);
    info!(
        "Found {} trades, fees R$ {}, IRRF R$ {}",
        records.len(),
        format_decimal_br(totals.total_fee),
        format_decimal_br(totals.total_ir)
    );

    apportion(&mut records, &totals);
    Ok(records)
}
