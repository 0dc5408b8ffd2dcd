//! Domain types for brokerage notes and the trade records parsed from them

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Brokerage firms whose notes can be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Broker {
    Rico,
    #[value(name = "nuinvest")]
    NuInvest,
}

impl Broker {
    pub const ALL: [Broker; 2] = [Broker::Rico, Broker::NuInvest];

    pub fn as_str(&self) -> &'static str {
        match self {
            Broker::Rico => "rico",
            Broker::NuInvest => "nuinvest",
        }
    }
}

impl fmt::Display for Broker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trade direction (buy or sell)
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Buy,
    Sell,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Buy => "buy",
            Operation::Sell => "sell",
        }
    }

    /// Map a deal-type marker ("C" compra / "V" venda)
    pub fn from_deal_type(marker: &str) -> Option<Self> {
        match marker {
            "C" => Some(Operation::Buy),
            "V" => Some(Operation::Sell),
            _ => None,
        }
    }

    /// Apply the direction to a lot size: sells are negative
    pub fn signed(&self, lots: i64) -> i64 {
        match self {
            Operation::Buy => lots,
            Operation::Sell => -lots,
        }
    }
}

/// Trade fields read from one row of the trade table.
///
/// Document-scoped fields are attached afterwards with [`TradeLine::into_record`].
#[derive(Debug, Clone, PartialEq)]
pub struct TradeLine {
    pub symbol: String,
    pub quantity: i64, // signed, negative for sells
    pub price: Decimal,
    pub operation: Operation,
}

impl TradeLine {
    /// Absolute traded value, `|price × quantity|`; `None` on overflow
    pub fn notional(&self) -> Option<Decimal> {
        checked_notional(self.price, self.quantity)
    }

    pub fn into_record(self, fields: &DocumentFields) -> TradeRecord {
        TradeRecord {
            date: fields.date,
            symbol: self.symbol,
            quantity: self.quantity,
            price: self.price,
            operation: self.operation,
            fee: Decimal::ZERO,
            ir: Decimal::ZERO,
            broker: fields.broker,
            note_id: fields.note_id.clone(),
        }
    }
}

/// Fields printed once per note and shared by every trade in it
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFields {
    pub date: NaiveDate,
    pub note_id: Option<String>,
    pub broker: Broker,
}

/// Aggregate costs printed in the note summary
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TaxTotals {
    pub total_fee: Decimal,
    pub total_ir: Decimal,
}

/// One trade from a brokerage note, with its share of fees and withheld tax
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TradeRecord {
    pub date: NaiveDate,
    pub symbol: String,
    pub quantity: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub operation: Operation,
    #[serde(with = "rust_decimal::serde::float")]
    pub fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub ir: Decimal,
    pub broker: Broker,
    pub note_id: Option<String>,
}

impl TradeRecord {
    pub fn notional(&self) -> Option<Decimal> {
        checked_notional(self.price, self.quantity)
    }

    pub fn is_sell(&self) -> bool {
        self.quantity < 0
    }
}

fn checked_notional(price: Decimal, quantity: i64) -> Option<Decimal> {
    price.checked_mul(Decimal::from(quantity)).map(|v| v.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fields() -> DocumentFields {
        DocumentFields {
            date: NaiveDate::from_ymd_opt(2024, 3, 27).unwrap(),
            note_id: Some("12345678".to_string()),
            broker: Broker::Rico,
        }
    }

    #[test]
    fn test_operation_sign() {
        assert_eq!(Operation::Sell.signed(100), -100);
        assert_eq!(Operation::Buy.signed(100), 100);
        assert_eq!(Operation::from_deal_type("V"), Some(Operation::Sell));
        assert_eq!(Operation::from_deal_type("D"), None);
    }

    #[test]
    fn test_notional_overflow_is_none() {
        let line = TradeLine {
            symbol: "PETR4".to_string(),
            quantity: 1_000_000,
            price: Decimal::MAX,
            operation: Operation::Buy,
        };
        assert_eq!(line.notional(), None);
        assert_eq!(line.into_record(&fields()).notional(), None);
    }

    #[test]
    fn test_into_record_attaches_document_fields() {
        let line = TradeLine {
            symbol: "PETR4".to_string(),
            quantity: -100,
            price: dec!(28.50),
            operation: Operation::Sell,
        };
        assert_eq!(line.notional(), Some(dec!(2850)));

        let record = line.into_record(&fields());
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 27).unwrap());
        assert_eq!(record.note_id.as_deref(), Some("12345678"));
        assert_eq!(record.broker, Broker::Rico);
        assert_eq!(record.fee, Decimal::ZERO);
        assert_eq!(record.ir, Decimal::ZERO);
        assert!(record.is_sell());
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = TradeLine {
            symbol: "PETR4".to_string(),
            quantity: 100,
            price: dec!(28.50),
            operation: Operation::Buy,
        }
        .into_record(&fields());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["date"], "2024-03-27");
        assert_eq!(value["symbol"], "PETR4");
        assert_eq!(value["quantity"], 100);
        assert_eq!(value["price"], 28.5);
        assert_eq!(value["operation"], "buy");
        assert_eq!(value["fee"], 0.0);
        assert_eq!(value["ir"], 0.0);
        assert_eq!(value["broker"], "rico");
        assert_eq!(value["note_id"], "12345678");
    }

    #[test]
    fn test_date_round_trip() {
        let date = NaiveDate::parse_from_str("27/03/2024", "%d/%m/%Y").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 27).unwrap());
        assert_eq!(serde_json::to_value(date).unwrap(), "2024-03-27");
    }
}
