use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use roast_core::{
    ai::{AI, TextGenerator},
    birdeye::BirdeyeClient,
    helpers::config::AppConfig,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use crate::{
    analyze::handler::analyze,
    docs::{dto::ApiDoc, handler::api_docs},
    info::handler::info,
    state::ServerState,
};

pub fn router(config: &AppConfig) -> Router {
    let birdeye = BirdeyeClient::new(reqwest::Client::new(), &config.birdeye);

    let max_output_tokens = config.openai.max_output_tokens;
    let generator = config
        .openai
        .api_key
        .as_deref()
        .and_then(|api_key| match AI::new(api_key, max_output_tokens) {
            Ok(ai) => Some(Arc::new(ai) as Arc<dyn TextGenerator>),
            Err(e) => {
                log::warn!("Failed to create OpenAI client: {}", e);
                None
            }
        });

    let state = Arc::new(ServerState::from((birdeye, generator)));

    routes(state)
}

pub fn routes(state: Arc<ServerState>) -> Router {
    let doc = ApiDoc::openapi();

    Router::new()
        .merge(Redoc::with_url("/redoc", doc))
        .route("/", get(info))
        .route("/docs", get(api_docs))
        .route("/analyze", post(analyze))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
