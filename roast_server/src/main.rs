mod analyze;
mod docs;
mod error;
mod info;
mod router;
mod state;

use dotenvy::dotenv;
use roast_core::helpers::config::AppConfig;
use router::router;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    let server_domain = config.server_domain.clone();

    let app = router(&config);

    let listener = tokio::net::TcpListener::bind(&server_domain)
        .await
        .expect("Failed to bind SERVER_DOMAIN");

    log::info!("Listening on {}", server_domain);

    axum::serve(listener, app).await.expect("Server error");
}
