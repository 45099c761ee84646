//! Minimal client for an OpenAI-compatible hosted model (Groq by default).
//!
//! We only call chat.completions with `stream: true` and forward the text
//! deltas. Calls are instrumented and log model names, latencies and sizes
//! (not contents).
//!
//! NOTE: We never log the API key.

use std::{pin::Pin, time::{Duration, Instant}};

use futures_util::{stream, Stream, StreamExt};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::domain::{ChatTurn, Role};
use crate::error::UpstreamError;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Text deltas from the model, in order.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, UpstreamError>> + Send>>;

#[derive(Clone)]
pub struct Upstream {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl Upstream {
  /// Construct the client if we find GROQ_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("GROQ_API_KEY").ok().filter(|k| !k.trim().is_empty())?;
    let base_url = std::env::var("GROQ_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
    let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
    Self::new(api_key, base_url, model).ok()
  }

  pub fn new(api_key: String, base_url: String, model: String) -> Result<Self, UpstreamError> {
    let client = reqwest::Client::builder()
      .connect_timeout(Duration::from_secs(10))
      .build()?;
    Ok(Self { client, api_key, base_url, model })
  }

  /// Streamed chat completion: system instruction first, then the transcript.
  /// Resolves once the upstream has accepted the request.
  #[instrument(level = "info", skip(self, system, turns), fields(model = %self.model, turns = turns.len()))]
  pub async fn stream_chat(&self, system: &str, turns: &[ChatTurn]) -> Result<TextStream, UpstreamError> {
    let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
    let mut messages = Vec::with_capacity(turns.len() + 1);
    messages.push(ChatMessageReq { role: "system", content: system });
    messages.extend(turns.iter().map(|t| ChatMessageReq { role: role_str(t.role), content: &t.content }));
    let req = ChatCompletionRequest { model: &self.model, messages, stream: true };

    let start = Instant::now();
    let res = self.client.post(&url)
      .header(USER_AGENT, "jimmy-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await?;

    if !res.status().is_success() {
      let status = res.status().as_u16();
      let body = res.text().await.unwrap_or_default();
      let message = extract_openai_error(&body).unwrap_or(body);
      error!(status, elapsed = ?start.elapsed(), "Upstream rejected chat request");
      return Err(UpstreamError::Status { status, message });
    }
    info!(elapsed = ?start.elapsed(), "Upstream stream opened");

    let body = Box::pin(res.bytes_stream());
    let deltas = stream::unfold(Some((body, SseDecoder::default())), |state| async move {
      let (mut body, mut decoder) = state?;
      let batch: Vec<Result<String, UpstreamError>> = match body.next().await {
        Some(Ok(bytes)) => decoder.push(&bytes).into_iter().map(Ok).collect(),
        Some(Err(e)) => vec![Err(UpstreamError::from(e))],
        // Body ended: flush a final event that had no trailing newline.
        None => return Some((decoder.finish().into_iter().map(Ok).collect::<Vec<_>>(), None)),
      };
      Some((batch, Some((body, decoder))))
    })
    .flat_map(stream::iter);
    Ok(Box::pin(deltas))
  }
}

fn role_str(role: Role) -> &'static str {
  match role {
    Role::User => "user",
    Role::Assistant => "assistant",
  }
}

/// Incremental decoder for `text/event-stream` chat completion chunks.
///
/// Lines are buffered until complete; each `data: {json}` line yields its
/// `choices[0].delta.content` when non-empty. `data: [DONE]` ends the stream
/// and everything after it is ignored.
#[derive(Debug, Default)]
pub struct SseDecoder {
  buf: Vec<u8>,
  done: bool,
}

impl SseDecoder {
  pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
    let mut out = Vec::new();
    if self.done {
      return out;
    }
    self.buf.extend_from_slice(bytes);
    while let Some(pos) = self.buf.iter().position(|b| *b == b'\n') {
      let line: Vec<u8> = self.buf.drain(..=pos).collect();
      self.take_line(&line, &mut out);
      if self.done {
        self.buf.clear();
        break;
      }
    }
    out
  }

  /// End of body: decode whatever unterminated line is still buffered.
  pub fn finish(&mut self) -> Vec<String> {
    let mut out = Vec::new();
    if !self.done && !self.buf.is_empty() {
      let line = std::mem::take(&mut self.buf);
      self.take_line(&line, &mut out);
    }
    self.done = true;
    out
  }

  fn take_line(&mut self, line: &[u8], out: &mut Vec<String>) {
    let line = String::from_utf8_lossy(line);
    let Some(data) = line.trim().strip_prefix("data:") else { return };
    let data = data.trim_start();
    if data == "[DONE]" {
      self.done = true;
    } else if let Some(text) = parse_delta(data) {
      out.push(text);
    }
  }

  pub fn is_done(&self) -> bool {
    self.done
  }
}

fn parse_delta(data: &str) -> Option<String> {
  let chunk: ChatCompletionChunk = serde_json::from_str(data).ok()?;
  chunk
    .choices
    .into_iter()
    .next()
    .and_then(|c| c.delta.content)
    .filter(|s| !s.is_empty())
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
  model: &'a str,
  messages: Vec<ChatMessageReq<'a>>,
  stream: bool,
}
#[derive(Serialize)]
struct ChatMessageReq<'a> { role: &'a str, content: &'a str }

#[derive(Deserialize)]
struct ChatCompletionChunk { #[serde(default)] choices: Vec<ChunkChoice> }
#[derive(Deserialize)]
struct ChunkChoice { #[serde(default)] delta: Delta }
#[derive(Deserialize, Default)]
struct Delta { #[serde(default)] content: Option<String> }

/// Try to extract a clean error message from an OpenAI-style error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}

#[cfg(test)]
mod tests {
  use super::*;

  const CHUNK_A: &str = "data: {\"id\":\"x\",\"choices\":[{\"index\":0,\"delta\":{\"role\":\"assistant\",\"content\":\"\"}}]}\n\n";
  const CHUNK_B: &str = "data: {\"id\":\"x\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"Hello\"}}]}\n\n";
  const CHUNK_C: &str = "data: {\"id\":\"x\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\" there\"},\"finish_reason\":null}]}\n\n";

  #[test]
  fn decodes_deltas_and_skips_empty_content() {
    let mut d = SseDecoder::default();
    let mut out = d.push(CHUNK_A.as_bytes());
    out.extend(d.push(CHUNK_B.as_bytes()));
    out.extend(d.push(CHUNK_C.as_bytes()));
    assert_eq!(out, vec!["Hello", " there"]);
  }

  #[test]
  fn lines_split_across_pushes_are_joined() {
    let all = format!("{CHUNK_B}{CHUNK_C}");
    let (left, right) = all.as_bytes().split_at(30);
    let mut d = SseDecoder::default();
    assert!(d.push(left).is_empty());
    assert_eq!(d.push(right), vec!["Hello", " there"]);
  }

  #[test]
  fn done_marker_stops_decoding() {
    let mut d = SseDecoder::default();
    let input = format!("{CHUNK_B}data: [DONE]\n\n{CHUNK_C}");
    assert_eq!(d.push(input.as_bytes()), vec!["Hello"]);
    assert!(d.is_done());
    assert!(d.push(CHUNK_C.as_bytes()).is_empty());
  }

  #[test]
  fn finish_flushes_unterminated_last_event() {
    let mut d = SseDecoder::default();
    let last = CHUNK_B.trim_end();
    assert!(d.push(last.as_bytes()).is_empty());
    assert_eq!(d.finish(), vec!["Hello"]);
    assert!(d.is_done());
    assert!(d.finish().is_empty());
  }

  #[test]
  fn finish_after_done_marker_yields_nothing() {
    let mut d = SseDecoder::default();
    let input = format!("data: [DONE]\n\n{}", CHUNK_C.trim_end());
    assert!(d.push(input.as_bytes()).is_empty());
    assert!(d.finish().is_empty());
  }

  #[test]
  fn comments_and_garbage_are_ignored() {
    let mut d = SseDecoder::default();
    let input = ": keep-alive\n\nevent: ping\ndata: not json\n\r\n";
    assert!(d.push(input.as_bytes()).is_empty());
  }

  #[test]
  fn extracts_error_message() {
    let body = r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error"}}"#;
    assert_eq!(extract_openai_error(body).as_deref(), Some("Invalid API Key"));
    assert_eq!(extract_openai_error("plain"), None);
  }
}
