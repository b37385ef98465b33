use std::env;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

mod error;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let bucket = env::var("VITAL_BUCKET").unwrap_or_else(|_| "vital".to_string());
    let region = env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());
    let model_id = env::var("VITAL_MODEL_ID")
        .unwrap_or_else(|_| "us.anthropic.claude-sonnet-4-20250514-v1:0".to_string());
    let addr = env::var("VITAL_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let state = AppState {
        store: vital_store::client::build_client_with_region(&region).await,
        bedrock: vital_bedrock::client::build_client_with_region(&region).await,
        bucket,
        model_id,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/patients", get(routes::patients::list_patients))
        .route("/updates", get(routes::updates::list_updates))
        .route("/ai/match", post(routes::matching::match_patients))
        .route("/ai/analyze", post(routes::grouping::analyze))
        .route("/ai/find-matches", post(routes::find_matches::find_matches))
        .route(
            "/ai/medication-suggestions",
            post(routes::medications::medication_suggestions),
        )
        .layer(cors)
        .with_state(state);

    tracing::info!(%addr, "vital-api listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
