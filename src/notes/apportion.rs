use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{TaxTotals, TradeRecord};

/// Split the note's fee and withheld tax across its trades by traded value.
///
/// Every trade gets `total_fee × notional / total_notional`; only sells share
/// `total_ir`, by their share of the sold value. Each share is rounded to
/// cents, so the parts add up to the totals within a cent per trade.
pub fn apportion(records: &mut [TradeRecord], totals: &TaxTotals) {
    let total_notional = sum_notional(records.iter());
    let sold_notional = sum_notional(records.iter().filter(|r| r.is_sell()));

    for record in records.iter_mut() {
        let notional = record.notional();
        record.fee = share(totals.total_fee, notional, total_notional);
        record.ir = if record.is_sell() {
            share(totals.total_ir, notional, sold_notional)
        } else {
            Decimal::ZERO
        };
    }
}

/// `None` when any notional, or their sum, overflows
fn sum_notional<'r>(mut records: impl Iterator<Item = &'r TradeRecord>) -> Option<Decimal> {
    records.try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.notional()?))
}

fn share(total: Decimal, part: Option<Decimal>, whole: Option<Decimal>) -> Decimal {
    let (Some(part), Some(whole)) = (part, whole) else {
        warn!("Traded value out of range, leaving share at zero");
        return Decimal::ZERO;
    };
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    total
        .checked_mul(part)
        .and_then(|v| v.checked_div(whole))
        .or_else(|| part.checked_div(whole).and_then(|ratio| ratio.checked_mul(total)))
        .map(|v| v.round_dp(2))
        .unwrap_or(Decimal::ZERO)
}
