use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub const KEYWORDS_PATH: &str = "/api/ai/generate-keywords";
pub const SEARCH_PATH: &str = "/api/youtube/search";
pub const SCORE_PATH: &str = "/api/ai/score-videos";

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/health", get(handlers::health))
        .route(KEYWORDS_PATH, post(handlers::generate_keywords))
        .route(SEARCH_PATH, post(handlers::search_videos))
        .route(SCORE_PATH, post(handlers::score_videos))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Binds `addr` and serves the router until the process is stopped.
pub async fn serve(state: AppState, addr: &str) -> rv_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| rv_core::Error::Config(format!("cannot bind {}: {}", addr, e)))?;
    tracing::info!("🌐 Listening on http://{}", addr);
    axum::serve(listener, create_app(state))
        .await
        .map_err(|e| rv_core::Error::External(e.into()))
}

pub mod prelude {
    pub use crate::handlers::{KeywordResponse, ScoreRequest, ScoreResponse, SearchRequest, SearchResponse};
    pub use crate::AppState;
    pub use rv_core::{Error, Result, ScoredVideo, UserIntent, Video};
}
