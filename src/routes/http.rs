//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.

use std::sync::Arc;

use axum::{
  body::Body,
  extract::State,
  http::{header::CONTENT_TYPE, StatusCode},
  response::{IntoResponse, Response},
  Json,
};
use futures_util::StreamExt;
use tracing::{error, info, instrument};

use crate::logic::relay_chat;
use crate::protocol::{ChatIn, ErrorOut, HealthOut};
use crate::state::AppState;

pub const RELAY_FAILURE: &str = "Failed to process request";

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

/// Relay the transcript and stream the reply back as plain text chunks.
#[instrument(level = "info", skip(state, body), fields(messages = body.messages.len()))]
pub async fn http_post_chat(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ChatIn>,
) -> Response {
  match relay_chat(&state, &body.messages).await {
    Ok(stream) => {
      info!(target: "jimmy_backend", "Streaming reply");
      let logged = stream.inspect(|item| {
        if let Err(e) = item {
          error!(target: "jimmy_backend", error = %e, "Upstream stream failed mid-transfer");
        }
      });
      (
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(logged),
      )
        .into_response()
    }
    Err(e) => {
      error!(target: "jimmy_backend", error = %e, "Chat relay failed");
      (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorOut { error: RELAY_FAILURE.into() }),
      )
        .into_response()
    }
  }
}
