use serde_json::Value;

use crate::birdeye::dto::{ApiResponse, TradeLeg, TradeList, TransactionList};
use crate::helpers::format::{format_iso_timestamp, format_unix_timestamp, normalize_amount};

/// Adds display times and decimals-adjusted balance changes. Raw fields are left alone.
pub fn enrich_transactions(result: &mut ApiResponse<TransactionList>) {
    let Some(list) = result.payload_mut() else {
        return;
    };

    for tx in list.solana.iter_mut() {
        tx.formatted_block_time = Some(format_iso_timestamp(
            tx.block_time.as_deref().unwrap_or_default(),
        ));

        for change in tx.balance_change.iter_mut() {
            let raw = change.amount.as_ref().unwrap_or(&Value::Null);
            change.ui_amount_computed = Some(normalize_amount(raw, change.decimals));
        }
    }
}

pub fn enrich_trades(result: &mut ApiResponse<TradeList>) {
    let Some(list) = result.payload_mut() else {
        return;
    };

    for trade in list.items.iter_mut() {
        trade.formatted_time = Some(format_unix_timestamp(trade.block_unix_time.unwrap_or(0)));

        if let Some(base) = trade.base.as_mut() {
            enrich_leg(base);
        }
        if let Some(quote) = trade.quote.as_mut() {
            enrich_leg(quote);
        }
    }
}

// Legs without both fields already carry normalized amounts elsewhere.
fn enrich_leg(leg: &mut TradeLeg) {
    if leg.amount.is_some() && leg.decimals.is_some() {
        leg.ui_amount_computed = Some(leg.normalized_amount());
    }
}
