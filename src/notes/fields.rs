//! Document-scoped fields
//!
//! Each broker layout supplies its own label rules; the functions here run
//! them against the full note text.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{NotaError, Result};
use crate::utils::parse_brazilian_decimal;

/// Money amount as printed in notes: `0,31`, `6.500,00`, `1234,56`
const AMOUNT_PATTERN: &str = r"(?:\d{1,3}(?:\.\d{3})+|\d+),\d+";

/// Swing-trade withholding label, `I.R.R.F.`; the dots keep day-trade
/// `IRRF` lines out
pub const WITHHOLDING_LABEL: &str = r"I\.R\.R\.F\.?";

static AMOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(AMOUNT_PATTERN).expect("valid amount regex"));

/// Rule capturing the first amount after `label` on the same line.
///
/// Matching is case-insensitive; `label` is a regex fragment.
pub fn amount_rule(label: &str) -> Regex {
    Regex::new(&format!(r"(?i){}[^\n]*?({})", label, AMOUNT_PATTERN)).expect("valid amount rule")
}

/// Rule capturing the first `dd/mm/yyyy` date after `label`, across lines
pub fn date_rule(label: &str) -> Regex {
    Regex::new(&format!(r"(?s){}.*?(\d{{2}}/\d{{2}}/\d{{4}})", label)).expect("valid date rule")
}

/// Rule capturing the first run of 5+ digits after `label`, across lines
pub fn note_id_rule(label: &str) -> Regex {
    Regex::new(&format!(r"(?s){}.*?(\d{{5,}})", label)).expect("valid note id rule")
}

/// Rule matching a bare label, case-insensitive
pub fn label_rule(label: &str) -> Regex {
    Regex::new(&format!("(?i){}", label)).expect("valid label rule")
}

/// Auction date. Missing or impossible dates are fatal.
pub fn auction_date(text: &str, rule: &Regex) -> Result<NaiveDate> {
    let raw = rule
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| NotaError::SectionNotFound("auction date".to_string()))?;

    NaiveDate::parse_from_str(raw, "%d/%m/%Y").map_err(|_| {
        NotaError::SectionNotFound(format!("auction date ('{}' is not a valid date)", raw))
    })
}

pub fn note_id(text: &str, rule: &Regex) -> Option<String> {
    rule.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Sum of the amounts after every fee label; labels not found add nothing
pub fn total_fee(text: &str, rules: &[Regex]) -> Decimal {
    rules
        .iter()
        .filter_map(|rule| {
            let amount = rule
                .captures(text)
                .and_then(|c| c.get(1))
                .and_then(|m| parse_brazilian_decimal(m.as_str()))?;
            debug!("Fee {} -> {}", rule.as_str(), amount);
            Some(amount)
        })
        .sum()
}

/// Withheld tax: the last amount on the line of the last `label` occurrence.
///
/// Notes may print interim withholding lines before the final one; a label
/// line without any amount falls back to the previous occurrence.
pub fn total_withholding(text: &str, label: &Regex) -> Decimal {
    let occurrences: Vec<_> = label.find_iter(text).collect();
    occurrences
        .iter()
        .rev()
        .find_map(|m| {
            let line = text[m.end()..].split('\n').next().unwrap_or_default();
            AMOUNT
                .find_iter(line)
                .last()
                .and_then(|a| parse_brazilian_decimal(a.as_str()))
        })
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_auction_date() {
        let rule = date_rule("Data pregão");
        let text = "Nr. nota Folha Data pregão\n4567890 1 27/03/2024\n";
        assert_eq!(
            auction_date(text, &rule).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 27).unwrap()
        );
    }

    #[test]
    fn test_auction_date_missing_is_fatal() {
        let rule = date_rule("Data pregão");
        let err = auction_date("Nr. nota 4567890\n27/03/2024", &rule).unwrap_err();
        assert_eq!(err.kind(), "SectionNotFound");

        let err = auction_date("Data pregão\n31/02/2024", &rule).unwrap_err();
        assert!(err.to_string().contains("31/02/2024"));
    }

    #[test]
    fn test_note_id_needs_five_digits() {
        let rule = note_id_rule(r"Nr\. nota");
        assert_eq!(
            note_id("Nr. nota Folha\n4567890 1", &rule),
            Some("4567890".to_string())
        );
        assert_eq!(note_id("Nr. nota 12 34", &rule), None);
        assert_eq!(note_id("no label here 1234567", &rule), None);
    }

    #[test]
    fn test_amount_rule_reads_thousands() {
        let rule = amount_rule("Vendas à vista");
        let caps = rule.captures("Vendas à vista 6.500,00 Valor líquido").unwrap();
        assert_eq!(&caps[1], "6.500,00");
    }

    #[test]
    fn test_total_fee_sums_found_labels() {
        let rules = vec![
            amount_rule("Taxa de liquidação"),
            amount_rule("Emolumentos"),
            amount_rule("Corretagem"),
        ];
        let text = "Compras à vista 350,00 TAXA DE LIQUIDAÇÃO 1,73 D\nEmolumentos 0,34 D\n";
        assert_eq!(total_fee(text, &rules), dec!(2.07));
        assert_eq!(total_fee("nothing", &rules), Decimal::ZERO);
    }

    #[test]
    fn test_fee_label_does_not_cross_lines() {
        let rules = vec![amount_rule("Corretagem")];
        assert_eq!(total_fee("Corretagem\n9,99", &rules), Decimal::ZERO);
    }

    #[test]
    fn test_withholding_takes_last_occurrence() {
        let label = label_rule(WITHHOLDING_LABEL);
        let text = "I.R.R.F. s/ operações, base R$ 6.500,00 0,00\n\
                    Outros 0,00\n\
                    I.R.R.F. s/ operações, base R$ 6.500,00 0,32\n";
        assert_eq!(total_withholding(text, &label), dec!(0.32));
    }

    #[test]
    fn test_withholding_skips_label_without_amount() {
        let label = label_rule(WITHHOLDING_LABEL);
        let text = "I.R.R.F. s/ operações, base R$ 1.000,00 1,50\nI.R.R.F. s/ operações\n";
        assert_eq!(total_withholding(text, &label), dec!(1.50));
        assert_eq!(total_withholding("no tax", &label), Decimal::ZERO);
    }

    #[test]
    fn test_withholding_ignores_day_trade_irrf() {
        let label = label_rule(WITHHOLDING_LABEL);
        let text = "I.R.R.F. s/ operações, base R$ 1.000,00 0,05\n\
                    IRRF Day Trade: Base R$ 0,00 Projeção R$ 9,99\n";
        assert_eq!(total_withholding(text, &label), dec!(0.05));
        assert_eq!(total_withholding("IRRF Projeção 1,50\n", &label), Decimal::ZERO);
    }
}
