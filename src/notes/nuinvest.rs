//! NuInvest note layout
//!
//! Bold section titles come out of the PDF with every glyph doubled
//! (`MMeerrccaaddoo` for "Mercado"), which is what the table markers match.
//! Rows print the ticker as the first word of the security name.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::fields::{
    self, amount_rule, date_rule, label_rule, note_id_rule, WITHHOLDING_LABEL,
};
use super::segmenter::{self, TableMarkers};
use super::NoteLayout;
use crate::error::Result;
use crate::models::{Broker, TaxTotals};

/// `Número da nota Folha Data Pregão\n98765432 1 05/02/2024` -> `05/02/2024`
static AUCTION_DATE: Lazy<Regex> = Lazy::new(|| date_rule("Data Pregão"));

/// `Número da nota Folha Data Pregão\n98765432 1 05/02/2024` -> `98765432`
static NOTE_ID: Lazy<Regex> = Lazy::new(|| note_id_rule("Número da nota"));

const TABLE: TableMarkers = TableMarkers {
    start: "MMeerrccaaddoo",
    end: "RReessuummoo",
    header_lines: 0,
};

/// `Taxa de liquidação 1,42` -> `1,42`
static FEES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        "Taxa de liquidação",
        "Taxa de Registro",
        "Taxa de Termo / Opções",
        r"Taxa A\.N\.A\.?",
        "Emolumentos",
        "Corretagem",
        r"\bISS\b",
        "Outras",
    ]
    .into_iter()
    .map(amount_rule)
    .collect()
});

/// `I.R.R.F. s/ operações 0,10` -> `0,10`
static WITHHOLDING: Lazy<Regex> = Lazy::new(|| label_rule(WITHHOLDING_LABEL));

pub struct NuInvestLayout;

impl NoteLayout for NuInvestLayout {
    fn broker(&self) -> Broker {
        Broker::NuInvest
    }

    fn auction_date(&self, text: &str) -> Result<NaiveDate> {
        fields::auction_date(text, &AUCTION_DATE)
    }

    fn note_id(&self, text: &str) -> Option<String> {
        fields::note_id(text, &NOTE_ID)
    }

    fn trade_lines<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        segmenter::table_lines(text, &TABLE)
    }

    fn tax_totals(&self, text: &str) -> TaxTotals {
        TaxTotals {
            total_fee: fields::total_fee(text, &FEES),
            total_ir: fields::total_withholding(text, &WITHHOLDING),
        }
    }

    fn tickers_in_names(&self) -> bool {
        true
    }
}
