use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/news_trend", post(handlers::news_trend))
        .route("/news_trend/", post(handlers::news_trend))
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}

/// Serves the app on `addr` until the process is stopped.
pub async fn serve(state: AppState, addr: &str) -> nt_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "🌐 Listening");
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use nt_core::{TrendDigest, Result, Error};
    pub use crate::AppState;
}
