use roast_core::analysis::{WalletAnalysis, pnl::PnlResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct AnalyzeRequest {
    pub wallet_address: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct AnalyzeResponse {
    pub wallet_address: String,
    pub analysis: String,
    pub summary: String,
    pub pnl: PnlResult,
}

impl From<(String, WalletAnalysis)> for AnalyzeResponse {
    fn from(value: (String, WalletAnalysis)) -> Self {
        let (wallet_address, result) = value;
        Self {
            wallet_address,
            analysis: result.analysis,
            summary: result.summary,
            pnl: result.pnl,
        }
    }
}
