//! Axum-based HTTP channel.
//!
//! `run()` drives the axum event loop; the shared [`CancellationToken`] is
//! wired to axum's graceful shutdown.
//!
//! ```text
//! GET  /api/health
//! POST /api/chat
//! GET  /favicon.ico   → 204
//! ```

mod api;

use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::state::CommsState;
use crate::error::AppError;
use crate::subsystems::runtime::{Component, ComponentFuture};

/// Handler state. Cheap to clone.
#[derive(Clone)]
pub(crate) struct AxumState {
    /// Channel identifier used in log fields.
    pub channel_id: Arc<str>,
    pub comms: Arc<CommsState>,
}

pub struct AxumChannel {
    channel_id: String,
    bind_addr: String,
    state: Arc<CommsState>,
}

impl AxumChannel {
    pub fn new(channel_id: impl Into<String>, bind_addr: impl Into<String>, state: Arc<CommsState>) -> Self {
        Self { channel_id: channel_id.into(), bind_addr: bind_addr.into(), state }
    }
}

impl Component for AxumChannel {
    fn id(&self) -> &str {
        &self.channel_id
    }

    fn run(self: Box<Self>, shutdown: CancellationToken) -> ComponentFuture {
        Box::pin(run_axum(self.channel_id, self.bind_addr, self.state, shutdown))
    }
}

async fn run_axum(
    channel_id: String,
    bind_addr: String,
    comms: Arc<CommsState>,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    let router = build_router(AxumState { channel_id: Arc::from(channel_id.as_str()), comms });

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| AppError::Comms(format!("axum bind failed on {bind_addr}: {e}")))?;

    info!(%channel_id, %bind_addr, "axum channel listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Comms(format!("axum server error: {e}")))?;

    info!(%channel_id, "axum channel shut down");
    Ok(())
}

pub(crate) fn build_router(state: AxumState) -> Router {
    Router::new()
        .route("/api/health", get(api::health))
        .route("/api/chat", post(api::chat))
        .route("/favicon.ico", get(|| async { StatusCode::NO_CONTENT }))
        .with_state(state)
}
