//! Client side of the Completion Gateway: sends the transcript and hands back
//! the raw streamed body.

use std::{pin::Pin, time::Duration};

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use tracing::{error, info, instrument};

use crate::domain::ChatTurn;
use crate::error::GatewayError;
use crate::protocol::ChatIn;
use crate::util::trunc_for_log;

/// Raw body chunks as they arrive.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<Bytes, GatewayError>> + Send>>;

#[async_trait]
pub trait CompletionGateway: Send + Sync {
  /// Issue one request with the whole transcript. Resolves once the response
  /// is accepted (2xx); the body is then read chunk by chunk.
  async fn open(&self, turns: &[ChatTurn]) -> Result<ChunkStream, GatewayError>;
}

/// `POST {url}` with `{ "messages": [...] }`, expecting a plain streamed text body.
#[derive(Clone)]
pub struct HttpGateway {
  client: reqwest::Client,
  url: String,
}

impl HttpGateway {
  pub fn new(url: impl Into<String>) -> Result<Self, GatewayError> {
    let client = reqwest::Client::builder()
      .connect_timeout(Duration::from_secs(10))
      .build()?;
    Ok(Self { client, url: url.into() })
  }

  pub fn url(&self) -> &str {
    &self.url
  }
}

#[async_trait]
impl CompletionGateway for HttpGateway {
  #[instrument(level = "info", skip(self, turns), fields(url = %self.url, turns = turns.len()))]
  async fn open(&self, turns: &[ChatTurn]) -> Result<ChunkStream, GatewayError> {
    let body = ChatIn { messages: turns.to_vec() };
    let res = self.client.post(&self.url)
      .header(USER_AGENT, "jimmy-chat/0.1")
      .header(CONTENT_TYPE, "application/json")
      .json(&body)
      .send()
      .await?;

    let status = res.status();
    info!(target: "jimmy_chat", status = status.as_u16(), "Gateway response status");
    if !status.is_success() {
      let body = res.text().await.unwrap_or_default();
      error!(target: "jimmy_chat", status = status.as_u16(), body = %trunc_for_log(&body, 200), "Gateway error response");
      return Err(GatewayError::Status { status: status.as_u16(), body });
    }

    let stream = res
      .bytes_stream()
      .map(|item| item.map_err(|e| GatewayError::Stream(e.to_string())));
    Ok(Box::pin(stream))
  }
}
