pub mod enrich;
pub mod pnl;
pub mod summary;

use crate::ai::TextGenerator;
use crate::birdeye::BirdeyeClient;

use enrich::{enrich_trades, enrich_transactions};
use pnl::{estimate_pnl, PnlResult};
use summary::{build_prompt, compose_report};

pub const AI_NOT_CONFIGURED: &str = "AI analyst is not configured properly. No API key found.";

#[derive(Debug, Clone, PartialEq)]
pub struct WalletAnalysis {
    pub summary: String,
    pub analysis: String,
    pub pnl: PnlResult,
}

/// Fetch, enrich, estimate, compose, generate. Never fails: every stage
/// degrades to a placeholder instead.
pub async fn analyze_wallet(
    birdeye: &BirdeyeClient,
    generator: Option<&dyn TextGenerator>,
    wallet: &str,
) -> WalletAnalysis {
    log::info!("Analyzing wallet {}", wallet);

    let mut data = birdeye.fetch_wallet_data(wallet).await;
    enrich_transactions(&mut data.transactions);
    enrich_trades(&mut data.trades);

    let pnl = estimate_pnl(&data.trades, &data.portfolio);
    let summary = compose_report(wallet, &data, &pnl);
    let analysis = generate_analysis(generator, &build_prompt(&summary)).await;

    WalletAnalysis {
        summary,
        analysis,
        pnl,
    }
}

pub async fn generate_analysis(generator: Option<&dyn TextGenerator>, prompt: &str) -> String {
    let Some(generator) = generator else {
        return AI_NOT_CONFIGURED.to_string();
    };

    match generator.generate(prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            log::error!("Text generation failed: {}", e);
            format!("Error calling AI: {}", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::config::BirdeyeConfig;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct EchoGenerator {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, anyhow::Error> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("You bought the top. Again.".to_string())
        }
    }

    struct BrokenGenerator;

    #[async_trait]
    impl TextGenerator for BrokenGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, anyhow::Error> {
            Err(anyhow::anyhow!("model overloaded"))
        }
    }

    async fn birdeye_with_trades() -> (MockServer, BirdeyeClient) {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/wallet/token_list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"totalUsd": 300.0, "items": [{"symbol": "SOL", "valueUsd": 300.0}]}
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/trader/txs/seek_by_time"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"items": [{
                    "block_unix_time": 0,
                    "base": {"symbol": "JUP", "amount": "1000000", "decimals": 6, "nearest_price": 2.0},
                    "quote": {"symbol": "USDC", "amount": "500000", "decimals": 6, "price": 1.0}
                }]}
            })))
            .mount(&server)
            .await;

        // tx_list is left unmocked, so it answers 404 with an empty body.
        let client = BirdeyeClient::new(
            reqwest::Client::new(),
            &BirdeyeConfig {
                api_key: Some("key".to_string()),
                base_url: server.uri(),
                chain: "solana".to_string(),
            },
        );

        (server, client)
    }

    #[tokio::test]
    async fn test_analyze_wallet_end_to_end() {
        let (_server, client) = birdeye_with_trades().await;
        let generator = EchoGenerator {
            prompts: Mutex::new(Vec::new()),
        };

        let result = analyze_wallet(&client, Some(&generator), "WalletAbcd").await;

        assert_eq!(result.analysis, "You bought the top. Again.");
        assert_eq!(result.pnl.overall_pnl, 1.5);
        assert_eq!(result.pnl.pnl_percentage, 0.5);
        assert!(result.summary.contains("ending in Abcd."));
        assert!(result.summary.contains("Unable to retrieve transaction data."));

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(&result.summary));
    }

    #[tokio::test]
    async fn test_analyze_wallet_without_generator() {
        let (_server, client) = birdeye_with_trades().await;

        let result = analyze_wallet(&client, None, "WalletAbcd").await;

        assert_eq!(result.analysis, AI_NOT_CONFIGURED);
        assert_eq!(result.pnl.overall_pnl, 1.5);
    }

    #[tokio::test]
    async fn test_generation_error_becomes_text() {
        let analysis = generate_analysis(Some(&BrokenGenerator), "prompt").await;
        assert_eq!(analysis, "Error calling AI: model overloaded");
    }
}
