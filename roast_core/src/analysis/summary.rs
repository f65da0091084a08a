use std::fmt::Write;

use serde_json::Value;

use crate::analysis::pnl::PnlResult;
use crate::birdeye::dto::{
    ApiResponse, PortfolioData, TradeLeg, TradeList, TransactionList, TransactionRecord,
    WalletData,
};
use crate::helpers::format::format_usd;

const TOP_TOKENS: usize = 3;

pub fn short_address(wallet: &str) -> &str {
    match wallet.char_indices().rev().nth(3) {
        Some((index, _)) => &wallet[index..],
        None => wallet,
    }
}

/// Plain-text report of everything fetched for the wallet, in the order the
/// analyst prompt expects: greeting, holdings, transactions, swaps, PNL.
pub fn compose_report(wallet: &str, data: &WalletData, pnl: &PnlResult) -> String {
    let mut report = format!(
        "Hello! I've completed an in-depth analysis of your Solana wallet ending in {}.\n\n",
        short_address(wallet)
    );

    report.push_str(&portfolio_section(&data.portfolio));
    report.push_str(&transactions_section(&data.transactions));
    report.push_str(&trades_section(&data.trades));
    report.push_str(&pnl_section(pnl));

    report
}

fn portfolio_section(portfolio: &ApiResponse<PortfolioData>) -> String {
    let Some(data) = portfolio.payload() else {
        return "Portfolio Overview:\n\nUnable to retrieve portfolio data.\n\n".to_string();
    };

    let mut section = format!(
        "Portfolio Overview:\n\n- Total Portfolio Value (in USD): {}\n- Number of Tokens Held: {}\n",
        format_usd(data.total_usd),
        data.items.len()
    );

    if !data.items.is_empty() {
        let mut ranked: Vec<_> = data.items.iter().collect();
        ranked.sort_by(|a, b| {
            b.value_usd
                .unwrap_or(0.0)
                .total_cmp(&a.value_usd.unwrap_or(0.0))
        });

        section.push_str("- Top 3 Tokens Held:\n");
        for token in ranked.into_iter().take(TOP_TOKENS) {
            let market_cap = token
                .market_cap_usd
                .map(format_usd)
                .unwrap_or_else(|| "N/A".to_string());
            let _ = writeln!(
                section,
                "   - {}: Current Value Held: {}, Market Cap: {}",
                token.symbol.as_deref().unwrap_or("Unknown"),
                format_usd(token.value_usd.unwrap_or(0.0)),
                market_cap
            );
        }
    }

    section.push('\n');
    section
}

fn transactions_section(transactions: &ApiResponse<TransactionList>) -> String {
    let Some(list) = transactions.payload() else {
        return "Recent Transactions:\n\nUnable to retrieve transaction data.\n\n".to_string();
    };

    if list.solana.is_empty() {
        return "Recent Transactions:\n\nNo recent transactions found.\n\n".to_string();
    }

    let mut section = "Recent Transactions:\n\n".to_string();
    for tx in &list.solana {
        section.push_str(&transaction_line(tx));
    }
    section.push('\n');
    section
}

fn transaction_line(tx: &TransactionRecord) -> String {
    let time = tx
        .formatted_block_time
        .as_deref()
        .or(tx.block_time.as_deref())
        .unwrap_or("unknown time");
    let status = match tx.status {
        Some(Value::Bool(true)) => "succeeded",
        Some(Value::Bool(false)) => "failed",
        _ => "status unknown",
    };
    let hash = tx
        .tx_hash
        .as_deref()
        .map(|hash| hash.chars().take(8).collect::<String>())
        .unwrap_or_else(|| "unknown".to_string());

    let mut line = format!(
        "- {}: {} ({}), tx {}...\n",
        time,
        tx.main_action.as_deref().unwrap_or("transaction"),
        status,
        hash
    );

    for change in &tx.balance_change {
        let _ = writeln!(
            line,
            "   - {}: {:+.4}",
            change.symbol.as_deref().unwrap_or("Unknown"),
            change.ui_amount_computed.unwrap_or(0.0)
        );
    }

    line
}

fn trades_section(trades: &ApiResponse<TradeList>) -> String {
    let Some(list) = trades.payload() else {
        return "Recent Swaps:\n\nUnable to retrieve swap data.\n\n".to_string();
    };

    if list.items.is_empty() {
        return "Recent Swaps:\n\nNo recent swaps found.\n\n".to_string();
    }

    let empty = TradeLeg::default();
    let mut section = "Recent Swaps:\n\n".to_string();
    for trade in &list.items {
        let base = trade.base.as_ref().unwrap_or(&empty);
        let quote = trade.quote.as_ref().unwrap_or(&empty);
        // The leg Birdeye tags "from" is the one given up.
        let (sold, bought) = if base.type_swap.as_deref() == Some("from") {
            (base, quote)
        } else {
            (quote, base)
        };

        let _ = writeln!(
            section,
            "- {}: swapped {:.4} {} for {:.4} {} on {}",
            trade.formatted_time.as_deref().unwrap_or("unknown time"),
            sold.display_amount().abs(),
            sold.symbol_or_unknown(),
            bought.display_amount().abs(),
            bought.symbol_or_unknown(),
            trade.source.as_deref().unwrap_or("an unknown DEX")
        );
    }
    section.push('\n');
    section
}

fn pnl_section(pnl: &PnlResult) -> String {
    let mut section = "Profit & Loss (approximate, recent swaps only):\n\n".to_string();

    if pnl.pnl_by_token.is_empty() {
        section.push_str("- No swap trades available to estimate PNL.\n\n");
        return section;
    }

    let _ = writeln!(section, "- Overall PNL: {}", format_usd(pnl.overall_pnl));
    let _ = writeln!(
        section,
        "- PNL vs. Current Portfolio Value: {:.2}%",
        pnl.pnl_percentage
    );
    section.push_str("- PNL by Token:\n");
    for (symbol, value) in &pnl.pnl_by_token {
        let _ = writeln!(section, "   - {}: {}", symbol, format_usd(*value));
    }
    section.push_str(
        "- Note: estimated from swap leg prices; ignores cost basis, routing and fees.\n\n",
    );

    section
}

/// Wraps the report in the analyst persona instructions.
pub fn build_prompt(report: &str) -> String {
    format!(
        "You are a slightly sarcastic, mildly passive-aggressive AI analyst specializing in Solana wallets.\n\
         All the following data reflects the user's recent wallet activity. Here's the report:\n\n\
         {}\n\
         Your job: Provide a very short, witty, borderline sassy summary of this wallet's recent performance.\n\
         Please:\n\n\
         1. Give a quick snapshot of the portfolio (any big tokens, total USD value).\n\
         2. Mention notable transactions or swaps (especially degenerate ones).\n\
         3. Highlight the user's overall profit or loss, lightly mocking big gains or painful losses.\n\
         4. Remind them about security (cold storage, not losing seed phrases, etc.) in a passive-aggressive way.\n\
         5. End with a quick disclaimer that you're not a financial advisor, and if they're not rich, tell them to do better.\n\n\
         Make it entertaining, but also let them walk away with the key points. Keep it fairly short and direct.",
        report
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::enrich::{enrich_trades, enrich_transactions};
    use crate::analysis::pnl::estimate_pnl;
    use serde_json::json;

    const WALLET: &str = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";

    fn wallet_data() -> WalletData {
        let mut data = WalletData {
            portfolio: serde_json::from_value(json!({
                "success": true,
                "data": {
                    "totalUsd": 12345.678,
                    "items": [
                        {"symbol": "USDC", "valueUsd": 500.0, "marketCapUsd": "lots"},
                        {"symbol": "SOL", "valueUsd": 10000.0, "marketCapUsd": 91000000000.0},
                        {"symbol": "DUST", "valueUsd": 0.01},
                        {"symbol": "JUP", "valueUsd": 1845.0, "marketCapUsd": 1200000000}
                    ]
                }
            }))
            .unwrap(),
            transactions: serde_json::from_value(json!({
                "success": true,
                "data": {"solana": [{
                    "txHash": "5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnb",
                    "blockTime": "2025-02-01T22:08:53+00:00",
                    "status": true,
                    "mainAction": "send",
                    "balanceChange": [{"amount": -1500000, "decimals": 6, "symbol": "USDC"}]
                }]}
            }))
            .unwrap(),
            trades: serde_json::from_value(json!({
                "success": true,
                "data": {"items": [{
                    "block_unix_time": 1738447733,
                    "source": "jupiter",
                    "base": {"symbol": "JUP", "amount": "1000000", "decimals": 6, "nearest_price": 2.0, "type_swap": "to"},
                    "quote": {"symbol": "USDC", "amount": "500000", "decimals": 6, "price": 1.0, "type_swap": "from"}
                }]}
            }))
            .unwrap(),
        };
        enrich_transactions(&mut data.transactions);
        enrich_trades(&mut data.trades);
        data
    }

    #[test]
    fn test_short_address() {
        assert_eq!(short_address(WALLET), "VFin");
        assert_eq!(short_address("abc"), "abc");
        assert_eq!(short_address(""), "");
    }

    #[test]
    fn test_compose_report_sections() {
        let data = wallet_data();
        let pnl = estimate_pnl(&data.trades, &data.portfolio);
        let report = compose_report(WALLET, &data, &pnl);

        assert!(report.starts_with(
            "Hello! I've completed an in-depth analysis of your Solana wallet ending in VFin.\n\n"
        ));
        assert!(report.contains("- Total Portfolio Value (in USD): $12,345.68\n"));
        assert!(report.contains("- Number of Tokens Held: 4\n"));
        assert!(report.contains(
            "- Top 3 Tokens Held:\n   - SOL: Current Value Held: $10,000.00, Market Cap: $91,000,000,000.00\n   - JUP: Current Value Held: $1,845.00, Market Cap: $1,200,000,000.00\n   - USDC: Current Value Held: $500.00, Market Cap: N/A\n"
        ));
        assert!(!report.contains("DUST"));
        assert!(report.contains("- 02/01/2025 22:08:53: send (succeeded), tx 5VERv8NM...\n"));
        assert!(report.contains("   - USDC: -1.5000\n"));
        assert!(report.contains("- 02/01/2025 22:08:53: swapped 0.5000 USDC for 1.0000 JUP on jupiter\n"));
        assert!(report.contains("- Overall PNL: $1.50\n"));
        assert!(report.contains("   - JUP: $1.50\n"));
    }

    #[test]
    fn test_compose_report_with_failed_fetches() {
        let data = WalletData {
            portfolio: ApiResponse::failed("Error parsing portfolio response", "x"),
            transactions: ApiResponse::failed("Error parsing transaction response", "x"),
            trades: ApiResponse::failed("Error parsing trades response", "x"),
        };
        let report = compose_report("ab", &data, &PnlResult::default());

        assert!(report.contains("ending in ab."));
        assert!(report.contains("Unable to retrieve portfolio data."));
        assert!(report.contains("Unable to retrieve transaction data."));
        assert!(report.contains("Unable to retrieve swap data."));
        assert!(report.contains("No swap trades available to estimate PNL."));
    }

    #[test]
    fn test_compose_report_with_empty_lists() {
        let data = WalletData {
            portfolio: serde_json::from_value(json!({"success": true, "data": {"totalUsd": 0, "items": []}})).unwrap(),
            transactions: serde_json::from_value(json!({"success": true, "data": {"solana": []}})).unwrap(),
            trades: serde_json::from_value(json!({"success": true, "data": {"items": []}})).unwrap(),
        };
        let report = compose_report(WALLET, &data, &PnlResult::default());

        assert!(report.contains("- Number of Tokens Held: 0\n\n"));
        assert!(!report.contains("Top 3 Tokens"));
        assert!(report.contains("No recent transactions found."));
        assert!(report.contains("No recent swaps found."));
    }

    #[test]
    fn test_build_prompt_embeds_report() {
        let prompt = build_prompt("REPORT BODY");

        assert!(prompt.starts_with("You are a slightly sarcastic"));
        assert!(prompt.contains("Here's the report:\n\nREPORT BODY\n"));
        assert!(prompt.contains("not a financial advisor"));
    }
}
