mod error;
mod routes;

use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;

/// Per-server settings shared by the handlers. Uploads are never kept here.
#[derive(Debug, Clone)]
pub struct AppState {
    preview_rows: usize,
}

pub fn router(config: &ServerConfig) -> Router {
    let state = Arc::new(AppState {
        preview_rows: config.preview_rows,
    });

    Router::new()
        .route("/", get(routes::index))
        .route("/healthz", get(routes::healthz))
        .route("/api/preview", post(routes::preview))
        .route("/api/export", post(routes::export))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .with_state(state)
}

pub async fn serve(config: ServerConfig) -> Result<()> {
    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router(&config)).await?;
    Ok(())
}

#[cfg(test)]
mod tests;
