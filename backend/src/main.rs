use std::sync::Arc;

use axum::http::{header, Method};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::handlers::{get_wheels, health_check, put_wheels};
use crate::store::RecordStore;

mod config;
mod error;
mod handlers;
mod logging;
mod store;

#[derive(Clone)]
pub struct AppState {
    store: RecordStore,
    record_key: Arc<str>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            store: RecordStore::new(),
            record_key: Arc::from(config.record_key.as_str()),
        }
    }
}

pub fn app(state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(config.allowed_origins.clone())
        .allow_methods(vec![Method::GET, Method::PUT, Method::OPTIONS])
        .allow_headers(vec![header::CONTENT_TYPE]);

    Router::new()
        .route("/api/health_check", get(health_check))
        .route("/api/wheels", get(get_wheels).put(put_wheels))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::from_path(".env").ok();
    logging::setup();

    let config = ServerConfig::from_env()?;
    let state = AppState::new(&config);
    let app = app(state, &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
