use std::sync::Arc;

use axum::extract::{Json, State, rejection::JsonRejection};
use roast_core::analysis::analyze_wallet;

use super::dto::{AnalyzeRequest, AnalyzeResponse};
use crate::{error::ErrorServer, state::ServerState};

const MISSING_WALLET: &str = "Please provide a wallet_address in the JSON payload.";
const EMPTY_WALLET: &str = "Wallet address cannot be empty.";

#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalyzeRequest,
    description = "Fetch a Solana wallet's holdings, transactions and swaps and return a sarcastic AI summary",
    responses(
        (status = 200, description = "Success", body = AnalyzeResponse),
        (status = 400, description = "Bad Request"),
    )
)]
#[axum::debug_handler]
pub async fn analyze(
    State(server_state): State<Arc<ServerState>>,
    request: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ErrorServer> {
    let wallet_address = match request {
        Ok(Json(AnalyzeRequest {
            wallet_address: Some(wallet_address),
        })) => wallet_address,
        Ok(_) => return Err(ErrorServer::bad_request(MISSING_WALLET)),
        Err(rejection) => {
            log::warn!("Rejected analyze payload: {}", rejection);
            return Err(ErrorServer::bad_request(MISSING_WALLET));
        }
    };

    let wallet_address = wallet_address.trim();
    if wallet_address.is_empty() {
        return Err(ErrorServer::bad_request(EMPTY_WALLET));
    }

    let result = analyze_wallet(
        server_state.birdeye(),
        server_state.generator(),
        wallet_address,
    )
    .await;

    Ok(Json(AnalyzeResponse::from((wallet_address.to_string(), result))))
}
