//! Error types for the chat client and the upstream relay.

use thiserror::Error;

/// Failures talking to the Completion Gateway from the client side.
#[derive(Debug, Error)]
pub enum GatewayError {
  /// Network unreachable, connection reset, timeout.
  #[error("gateway transport error: {0}")]
  Transport(#[from] reqwest::Error),

  /// Non-success status; body kept as text for logging only.
  #[error("gateway HTTP {status}: {body}")]
  Status { status: u16, body: String },

  /// The response body failed while it was being read.
  #[error("gateway stream error: {0}")]
  Stream(String),
}

/// Failures talking to the hosted model from the gateway.
#[derive(Debug, Error)]
pub enum UpstreamError {
  #[error("upstream transport error: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("upstream HTTP {status}: {message}")]
  Status { status: u16, message: String },
}
