use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::birdeye::dto::{ApiResponse, PortfolioData, TradeLeg, TradeList, TradeRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PnlResult {
    pub overall_pnl: f64,
    pub pnl_by_token: BTreeMap<String, f64>,
    pub pnl_percentage: f64,
}

/// Rough realized PNL over the fetched swaps.
///
/// Each trade is valued as `base amount * base nearest price` minus
/// `|quote amount| * quote price`, and attributed to the base symbol. There
/// are no cost-basis lots, no netting across multi-hop routes and no fee
/// accounting, so the figure is an estimate for flavour text only.
pub fn estimate_pnl(
    trades: &ApiResponse<TradeList>,
    portfolio: &ApiResponse<PortfolioData>,
) -> PnlResult {
    let mut result = PnlResult::default();

    if let Some(list) = trades.payload() {
        for trade in &list.items {
            let trade_pnl = trade_pnl(trade);
            let symbol = trade
                .base
                .as_ref()
                .map(TradeLeg::symbol_or_unknown)
                .unwrap_or("Unknown");

            result.overall_pnl += trade_pnl;
            *result.pnl_by_token.entry(symbol.to_string()).or_insert(0.0) += trade_pnl;
        }
    }

    let current_value = portfolio.payload().map(|data| data.total_usd).unwrap_or(0.0);
    result.pnl_percentage = if current_value != 0.0 {
        result.overall_pnl / current_value * 100.0
    } else {
        0.0
    };

    result
}

pub fn trade_pnl(trade: &TradeRecord) -> f64 {
    let empty = TradeLeg::default();
    let base = trade.base.as_ref().unwrap_or(&empty);
    let quote = trade.quote.as_ref().unwrap_or(&empty);

    base_amount(base) * base.nearest_price.unwrap_or(0.0)
        - quote_amount(quote) * quote.price.unwrap_or(0.0)
}

// Reported amount first, then the raw one rescaled.
fn base_amount(leg: &TradeLeg) -> f64 {
    match leg.ui_amount {
        Some(amount) if amount != 0.0 => amount,
        _ => leg.normalized_amount(),
    }
}

fn quote_amount(leg: &TradeLeg) -> f64 {
    match leg.ui_change_amount.map(f64::abs) {
        Some(amount) if amount != 0.0 => amount,
        _ => leg.normalized_amount().abs(),
    }
}
