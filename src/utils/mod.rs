//! Utility functions for Brazilian number handling
//!
//! Brokerage notes print amounts in the Brazilian locale (`1.234,56`). This
//! module parses those amounts into `Decimal` and formats them back for
//! display.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Currency symbol options for formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencySymbol {
    /// Include "R$ " prefix (Brazilian Real)
    BRL,
    /// No currency symbol
    None,
}

/// Parse decimal format - handles both Brazilian (1.234,56) and international (1,234.56) formats
///
/// Returns `None` when the text is not a number.
///
/// # Examples
/// ```
/// use notas::utils::parse_brazilian_decimal;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_brazilian_decimal("1.234,56"), Some(dec!(1234.56)));
/// assert_eq!(parse_brazilian_decimal("28,50"), Some(dec!(28.50)));
/// assert_eq!(parse_brazilian_decimal("abc"), None);
/// ```
pub fn parse_brazilian_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    // Determine format based on which separator appears last
    let last_comma = s.rfind(',');
    let last_dot = s.rfind('.');

    let normalized = match (last_comma, last_dot) {
        (Some(comma_pos), Some(dot_pos)) => {
            if comma_pos > dot_pos {
                // Brazilian format: "1.234,56" - dot is thousands, comma is decimal
                s.replace('.', "").replace(',', ".")
            } else {
                // International format: "1,234.56" - comma is thousands, dot is decimal
                s.replace(',', "")
            }
        }
        // Only comma: Brazilian decimal "1234,56"
        (Some(_), None) => s.replace(',', "."),
        _ => s.to_string(),
    };

    Decimal::from_str(&normalized).ok()
}

/// Parse a lot size such as `100` or `1.000` (dot as thousands separator)
pub fn parse_quantity(s: &str) -> Option<i64> {
    let digits = s.trim().replace('.', "");
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Core formatting function.
///
/// Formats a Decimal value using Brazilian locale conventions:
/// - Thousands separator: `.` (period)
/// - Decimal separator: `,` (comma)
pub fn format_currency_with_symbol(value: Decimal, symbol: CurrencySymbol) -> String {
    let is_negative = value < Decimal::ZERO;
    let abs_value = value.abs();

    let formatted = format!("{:.2}", abs_value);
    let (integer_part, decimal_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    // Add thousands separators (.) to integer part
    let with_separators: String = integer_part
        .chars()
        .rev()
        .enumerate()
        .flat_map(|(i, c)| {
            if i > 0 && i % 3 == 0 {
                vec!['.', c]
            } else {
                vec![c]
            }
        })
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    let sign = if is_negative { "-" } else { "" };
    let prefix = match symbol {
        CurrencySymbol::BRL => "R$ ",
        CurrencySymbol::None => "",
    };

    format!("{}{}{},{}", prefix, sign, with_separators, decimal_part)
}

/// Format as Brazilian Real with symbol: "R$ 1.234,56"
///
/// # Examples
/// ```
/// use notas::utils::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(1234.56)), "R$ 1.234,56");
/// assert_eq!(format_currency(dec!(-500)), "R$ -500,00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    format_currency_with_symbol(value, CurrencySymbol::BRL)
}

/// Format number only (no symbol): "1.234,56"
pub fn format_decimal_br(value: Decimal) -> String {
    format_currency_with_symbol(value, CurrencySymbol::None)
}
