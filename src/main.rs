//! Jimmy AI · Completion Gateway
//!
//! - `POST /api/chat` relays a transcript to the hosted model and streams text back
//! - Canned follow-ups when no upstream key is configured
//!
//! Important env variables:
//!   PORT              : u16 (default 3000)
//!   GROQ_API_KEY      : enables the hosted model if present
//!   GROQ_BASE_URL     : default "https://api.groq.com/openai/v1"
//!   GROQ_MODEL        : default "llama-3.3-70b-versatile"
//!   JIMMY_CONFIG_PATH : path to TOML config (persona prompt)
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};

use jimmy_backend::{config::port_from_env, routes::build_router, state::AppState, telemetry};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing(telemetry::SERVER_FILTER);

  let state = Arc::new(AppState::new());
  let app = build_router(state);

  let addr = SocketAddr::from(([0, 0, 0, 0], port_from_env()));
  let listener = TcpListener::bind(addr).await?;
  info!(target: "jimmy_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "jimmy_backend", "HTTP server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "jimmy_backend", error = %e, "Failed to listen for Ctrl-C");
    std::future::pending::<()>().await;
  }
}
