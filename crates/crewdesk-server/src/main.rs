mod api;
mod config;
mod static_assets;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use api::{catalog::get_catalog, runs::submit_run, AppCore};
use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use config::ServerConfig;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[derive(serde::Serialize)]
struct Health {
    status: String,
}

async fn health() -> axum::Json<Health> {
    axum::Json(Health {
        status: "crewdesk is working!".to_string(),
    })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,crewdesk_server=debug".into()),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting crewdesk server");

    let config = ServerConfig::from_env();

    // Log key presence only; a missing Cerebras key is reported per run.
    tracing::info!(
        cerebras_key = config.cerebras_api_key.is_some(),
        serper_key = config.serper_api_key.is_some(),
        "Credentials resolved"
    );

    let shared_state = Arc::new(AppCore::new(&config));

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/catalog", get(get_catalog))
        .route("/api/runs", post(submit_run))
        .fallback(static_assets::static_handler)
        .layer(cors)
        .with_state(shared_state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {addr}: {e}"));

    tracing::info!("crewdesk running on http://{addr}");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
