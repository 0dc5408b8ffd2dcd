//! Output formatting for CLI display
//!
//! JSON is the default surface; the table is for reading a note by eye.

use anyhow::Result;
use colored::Colorize;
use itertools::Itertools;
use notas::utils::format_currency;
use notas::{Broker, NotaError, TradeRecord};
use rust_decimal::Decimal;
use serde_json::json;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

/// Trade records as a pretty-printed JSON array
pub fn format_records_json(records: &[TradeRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// `{"error": {"message": ..., "exception": ...}}` for any failure
pub fn format_error_json(err: &anyhow::Error) -> String {
    let exception = err
        .downcast_ref::<NotaError>()
        .map(NotaError::kind)
        .unwrap_or("Error");

    json!({
        "error": {
            "message": format!("{:#}", err),
            "exception": exception,
        }
    })
    .to_string()
}

/// Trades as a table followed by the note totals
pub fn format_records_table(records: &[TradeRecord]) -> String {
    #[derive(Tabled)]
    struct TradeRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Symbol")]
        symbol: String,
        #[tabled(rename = "Op")]
        operation: String,
        #[tabled(rename = "Quantity")]
        quantity: String,
        #[tabled(rename = "Price")]
        price: String,
        #[tabled(rename = "Fee")]
        fee: String,
        #[tabled(rename = "IRRF")]
        ir: String,
    }

    if records.is_empty() {
        return format!("{}", "No trades found in note".yellow());
    }

    let rows: Vec<TradeRow> = records
        .iter()
        .map(|r| TradeRow {
            date: r.date.format("%d/%m/%Y").to_string(),
            symbol: r.symbol.clone(),
            operation: if r.is_sell() {
                r.operation.as_str().red().to_string()
            } else {
                r.operation.as_str().green().to_string()
            },
            quantity: r.quantity.to_string(),
            price: format_currency(r.price),
            fee: format_currency(r.fee),
            ir: format_currency(r.ir),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..)).with(Alignment::right()))
        .to_string();

    let total_fee: Decimal = records.iter().map(|r| r.fee).sum();
    let total_ir: Decimal = records.iter().map(|r| r.ir).sum();
    let note = records[0]
        .note_id
        .as_deref()
        .map(|id| format!(" {}", id))
        .unwrap_or_default();

    format!(
        "{}\n{}\n\n{} {}  {} {}",
        format!("{} note{}", records[0].broker, note).bold(),
        table,
        "Fees:".bold(),
        format_currency(total_fee),
        "IRRF:".bold(),
        format_currency(total_ir)
    )
}

/// One supported broker per line
pub fn format_brokers() -> String {
    Broker::ALL.iter().map(Broker::as_str).join("\n")
}
