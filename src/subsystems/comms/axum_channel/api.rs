//! Axum handlers for `/api/*` routes.

use std::time::Duration;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::AxumState;
use crate::chat::History;
use crate::subsystems::comms::state::SubmitError;

/// Upper bound on one chat request, queueing included.
const CHAT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Deserialize)]
pub(super) struct ChatRequest {
    message: String,
    /// `[[user, assistant], …]`, oldest first.
    #[serde(default)]
    history: History,
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatResponse {
    history: History,
    reply: String,
}

fn json_error(code: &str, msg: impl std::fmt::Display) -> Json<serde_json::Value> {
    Json(json!({ "error": code, "message": format!("{msg}") }))
}

/// GET /api/health
pub(super) async fn health(State(state): State<AxumState>) -> Response {
    let body = json!({
        "status": "ok",
        "bot_name": state.comms.bot_name(),
        "provider": state.comms.provider_name(),
    });
    (StatusCode::OK, Json(body)).into_response()
}

/// POST /api/chat
///
/// Returns the history with the new turn appended, plus the reply on its
/// own. An empty message returns the history as sent and an empty reply.
pub(super) async fn chat(State(state): State<AxumState>, Json(req): Json<ChatRequest>) -> Response {
    let ChatRequest { message, mut history, max_tokens } = req;

    let result = tokio::time::timeout(
        CHAT_TIMEOUT,
        state.comms.chat(&state.channel_id, &message, &mut history, max_tokens),
    )
    .await;

    match result {
        Ok(Ok(reply)) => {
            let body = ChatResponse { history, reply: reply.unwrap_or_default() };
            (StatusCode::OK, Json(body)).into_response()
        }
        Ok(Err(SubmitError::QueueFull)) => (
            StatusCode::SERVICE_UNAVAILABLE,
            json_error("queue_full", "too many requests waiting, try again shortly"),
        )
            .into_response(),
        Ok(Err(e)) => {
            warn!(channel_id = %state.channel_id, "chat request failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, json_error("internal", e)).into_response()
        }
        Err(_) => {
            warn!(channel_id = %state.channel_id, "chat request timed out");
            (StatusCode::GATEWAY_TIMEOUT, json_error("timeout", "reply took too long")).into_response()
        }
    }
}
