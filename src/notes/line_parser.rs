//! Trade table rows
//!
//! A row looks like
//!
//! ```text
//! 1-BOVESPA C FRACIONARIO PETROBRAS PN # 10 35,00 350,00 D
//!           ^ deal type   ^ security name   ^qty ^price ^value ^D/C
//! ```
//!
//! Anything that does not look like that (headers, wrapped names, page
//! footers) is skipped without error.

use once_cell::sync::Lazy;
use regex::{Match, Regex};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{Operation, TradeLine};
use crate::symbols::{ticker_from_word, SymbolResolver};
use crate::utils::{parse_brazilian_decimal, parse_quantity};

/// Market segment, delimits the start of the security name.
/// `1-BOVESPA C VISTA VALE ON NM 100 ...` -> `VISTA`
static TRANSACTION_KIND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:FRACION[AÁ]RIO|VISTA)\b").expect("valid transaction kind regex")
});

/// Deal type, first standalone `C` (compra) or `V` (venda).
/// `1-BOVESPA V VISTA VALE ON NM 100 65,00 6.500,00 C` -> `V`
static DEAL_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[CV]\b").expect("valid deal type regex"));

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("valid token regex"));

/// Marker one broker prints after fractional-lot names
const LAYOUT_ARTIFACT: char = '#';

/// Parse one table row into a trade, or `Ok(None)` when the row is not a trade.
///
/// Quantity and price are the 4th and 3rd tokens from the end. When
/// `tickers_in_names` is set and the name starts with a ticker, that ticker
/// is used as is; otherwise the name goes through `resolver`, whose failures
/// are fatal.
pub fn parse_line(
    line: &str,
    tickers_in_names: bool,
    resolver: &mut SymbolResolver<'_>,
) -> Result<Option<TradeLine>> {
    let tokens: Vec<Match<'_>> = TOKEN.find_iter(line).collect();
    if tokens.len() < 4 {
        return Ok(None);
    }

    let Some(kind) = TRANSACTION_KIND.find(line) else {
        return Ok(None);
    };

    let quantity_token = tokens[tokens.len() - 4];
    let price_token = tokens[tokens.len() - 3];

    let Some(lots) = parse_quantity(quantity_token.as_str()).filter(|q| *q != 0) else {
        debug!("Skipping row with invalid quantity: {}", line);
        return Ok(None);
    };
    let Some(price) = parse_brazilian_decimal(price_token.as_str()).filter(|p| *p > Decimal::ZERO)
    else {
        debug!("Skipping row with invalid price: {}", line);
        return Ok(None);
    };
    if price.checked_mul(Decimal::from(lots)).is_none() {
        debug!("Skipping row whose traded value overflows: {}", line);
        return Ok(None);
    }

    if kind.end() > quantity_token.start() {
        return Ok(None);
    }
    let name = line[kind.end()..quantity_token.start()]
        .replace(LAYOUT_ARTIFACT, "")
        .trim()
        .to_string();
    if name.is_empty() {
        return Ok(None);
    }

    let operation = match DEAL_TYPE
        .find(line)
        .and_then(|m| Operation::from_deal_type(m.as_str()))
    {
        Some(op) => op,
        None => {
            warn!("No deal type (C/V) in trade row, assuming buy: {}", line);
            Operation::Buy
        }
    };

    let direct = tickers_in_names
        .then(|| name.split_whitespace().next().and_then(ticker_from_word))
        .flatten();
    let symbol = match direct {
        Some(ticker) => ticker,
        None => resolver.resolve(&name)?,
    };

    debug!(
        "Trade row: {} {} {} @ {}",
        operation.as_str(),
        lots,
        symbol,
        price
    );

    Ok(Some(TradeLine {
        symbol,
        quantity: operation.signed(lots),
        price,
        operation,
    }))
}
