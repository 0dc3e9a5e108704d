mod api;
mod clients;
mod config;
mod error;
mod manifest;
mod models;
mod normalize;
mod sse;
mod tools;
mod upstream;

use std::sync::{atomic::AtomicUsize, Arc};

use anyhow::Result;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use config::Config;
use manifest::Manifest;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use upstream::{Base44Client, ClientStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn ClientStore>,
    pub manifest: Arc<Manifest>,
    pub open_streams: Arc<AtomicUsize>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn ClientStore>) -> Self {
        Self {
            config,
            store,
            manifest: Arc::new(Manifest::build()),
            open_streams: Arc::new(AtomicUsize::new(0)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::root))
        .route("/health", get(api::health))
        .route("/manifest", get(api::manifest))
        .route("/sse", get(sse::sse))
        .route("/clients", get(api::list_clients))
        .route(
            "/clients/{id}",
            get(api::get_client).put(api::update_client),
        )
        .route("/mcp/call", get(api::mcp_call_help).post(api::mcp_call))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "base44_mcp_gateway=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    if config.api_key.is_none() {
        warn!("API_KEY not set; upstream calls will fail until it is configured");
    }

    let store: Arc<dyn ClientStore> = Arc::new(Base44Client::new(&config)?);
    let state = AppState::new(config.clone(), store);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        upstream = %config.upstream_url,
        "base44-mcp-gateway listening on {}",
        config.bind_addr
    );
    axum::serve(listener, app).await?;
    Ok(())
}
