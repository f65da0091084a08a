use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::birdeye::dto::{ApiResponse, PortfolioData, TradeList, TransactionList, WalletData};
use crate::helpers::config::BirdeyeConfig;

const RECENT_LIMIT: &str = "5";

#[derive(Debug, thiserror::Error)]
pub enum BirdeyeError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Read-only client for the Birdeye wallet endpoints.
#[derive(Clone)]
pub struct BirdeyeClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    chain: String,
}

impl BirdeyeClient {
    pub fn new(http: Client, config: &BirdeyeConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            chain: config.chain.clone(),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse<T>, BirdeyeError> {
        let mut request = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .header("accept", "application/json")
            .header("x-chain", &self.chain)
            .query(query);

        if let Some(api_key) = &self.api_key {
            request = request.header("X-API-KEY", api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        // Birdeye reports failures through `success`, so the body is decoded whatever the status.
        if !status.is_success() {
            log::warn!("Birdeye {} answered with status {}", path, status);
        }

        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn fetch_portfolio(&self, wallet: &str) -> ApiResponse<PortfolioData> {
        self.get("/v1/wallet/token_list", &[("wallet", wallet)])
            .await
            .unwrap_or_else(|e| {
                log::warn!("Portfolio fetch failed for {}: {}", wallet, e);
                ApiResponse::failed("Error parsing portfolio response", e)
            })
    }

    pub async fn fetch_transactions(&self, wallet: &str) -> ApiResponse<TransactionList> {
        self.get(
            "/v1/wallet/tx_list",
            &[("wallet", wallet), ("limit", RECENT_LIMIT)],
        )
        .await
        .unwrap_or_else(|e| {
            log::warn!("Transaction fetch failed for {}: {}", wallet, e);
            ApiResponse::failed("Error parsing transaction response", e)
        })
    }

    pub async fn fetch_trades(&self, wallet: &str) -> ApiResponse<TradeList> {
        self.get(
            "/trader/txs/seek_by_time",
            &[
                ("address", wallet),
                ("offset", "0"),
                ("limit", RECENT_LIMIT),
                ("tx_type", "swap"),
                ("before_time", "0"),
                ("after_time", "0"),
            ],
        )
        .await
        .unwrap_or_else(|e| {
            log::warn!("Trades fetch failed for {}: {}", wallet, e);
            ApiResponse::failed("Error parsing trades response", e)
        })
    }

    /// Runs the three wallet reads one after another. Each failure stays local to its own result.
    pub async fn fetch_wallet_data(&self, wallet: &str) -> WalletData {
        let portfolio = self.fetch_portfolio(wallet).await;
        let transactions = self.fetch_transactions(wallet).await;
        let trades = self.fetch_trades(wallet).await;

        log::debug!(
            "Fetched wallet data for {}: portfolio={}, transactions={}, trades={}",
            wallet,
            portfolio.is_success(),
            transactions.is_success(),
            trades.is_success()
        );

        WalletData {
            portfolio,
            transactions,
            trades,
        }
    }
}
