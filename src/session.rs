//! Streaming chat client: one request/stream cycle at a time over a session
//! owned by the hosting UI.
//!
//! Idle -> Sending (user message appended, assessed, proficiency updated)
//!      -> Streaming (empty assistant message appended, chunks folded in)
//!      -> Idle
//! Any gateway failure returns to Idle with the fixed fallback reply appended.
//! Partial streamed text is kept.

use futures_util::StreamExt;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::assessor::assess;
use crate::domain::{Assessment, ChatTurn, Message, Proficiency};
use crate::error::GatewayError;
use crate::gateway::CompletionGateway;
use crate::seeds::{FALLBACK_REPLY, GREETING};
use crate::transcript::Transcript;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
  Idle,
  Sending,
  Streaming,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
  /// Empty input or a request already in progress.
  Ignored,
  /// The streamed reply was received in full.
  Completed,
  /// The gateway failed and the fallback reply was appended.
  FellBack,
}

/// Incremental UTF-8 decoding across chunk boundaries.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
  pending: Vec<u8>,
}

impl Utf8Decoder {
  /// Decode as much as possible; an incomplete trailing sequence is kept for
  /// the next call and invalid bytes become U+FFFD.
  pub fn decode(&mut self, bytes: &[u8]) -> String {
    self.pending.extend_from_slice(bytes);
    let mut out = String::new();
    loop {
      match std::str::from_utf8(&self.pending) {
        Ok(s) => {
          out.push_str(s);
          self.pending.clear();
          break;
        }
        Err(e) => {
          let valid = e.valid_up_to();
          out.push_str(std::str::from_utf8(&self.pending[..valid]).unwrap_or_default());
          match e.error_len() {
            Some(bad) => {
              out.push(char::REPLACEMENT_CHARACTER);
              self.pending.drain(..valid + bad);
            }
            None => {
              self.pending.drain(..valid);
              break;
            }
          }
        }
      }
    }
    out
  }

  /// Flush whatever is left at end of stream.
  pub fn finish(&mut self) -> String {
    if self.pending.is_empty() {
      return String::new();
    }
    let rest = String::from_utf8_lossy(&self.pending).into_owned();
    self.pending.clear();
    rest
  }
}

/// Conversation state for one UI session: transcript, proficiency, input
/// buffer and the loading phase. Created at session start, dropped at the end.
#[derive(Debug)]
pub struct ChatSession {
  transcript: Transcript,
  proficiency: Proficiency,
  input: String,
  phase: Phase,
  decoder: Utf8Decoder,
}

impl Default for ChatSession {
  fn default() -> Self {
    Self::new()
  }
}

impl ChatSession {
  /// Fresh session opened by the assistant greeting, all scores at zero.
  pub fn new() -> Self {
    Self::with_transcript(Transcript::with_greeting(GREETING))
  }

  pub fn with_transcript(transcript: Transcript) -> Self {
    Self {
      transcript,
      proficiency: Proficiency::default(),
      input: String::new(),
      phase: Phase::Idle,
      decoder: Utf8Decoder::default(),
    }
  }

  pub fn transcript(&self) -> &Transcript { &self.transcript }
  pub fn proficiency(&self) -> &Proficiency { &self.proficiency }
  pub fn phase(&self) -> Phase { self.phase }
  pub fn input(&self) -> &str { &self.input }

  pub fn is_loading(&self) -> bool {
    self.phase != Phase::Idle
  }

  pub fn set_input(&mut self, text: impl Into<String>) {
    self.input = text.into();
  }

  /// Idle -> Sending. Appends the user message, assesses it, updates the
  /// proficiency and clears the input buffer, all before any network I/O.
  /// Returns the request payload, or `None` when the input is blank or a
  /// request is already running.
  #[instrument(level = "debug", skip(self), fields(input_len = self.input.len(), phase = ?self.phase))]
  pub fn submit(&mut self) -> Option<Vec<ChatTurn>> {
    if self.is_loading() || self.input.trim().is_empty() {
      debug!(target: "jimmy_chat", "Submission ignored");
      return None;
    }

    let text = std::mem::take(&mut self.input);
    let turn_index = self.transcript.len();
    let assessment = assess(&text, turn_index);
    if let Some(a) = &assessment {
      self.record_assessment(a);
    }
    self.transcript.push_user(&text, assessment);
    self.phase = Phase::Sending;
    Some(self.transcript.to_turns())
  }

  fn record_assessment(&mut self, a: &Assessment) {
    self.proficiency = self.proficiency.apply(a);
    info!(
      target: "jimmy_chat",
      category = %a.category,
      score = a.score,
      overall = self.proficiency.overall,
      "Assessment recorded"
    );
  }

  /// Sending -> Streaming: append the empty in-flight assistant message.
  pub fn accept_stream(&mut self) -> Option<Uuid> {
    if self.phase != Phase::Sending {
      return None;
    }
    self.phase = Phase::Streaming;
    self.decoder = Utf8Decoder::default();
    Some(self.transcript.begin_in_flight())
  }

  /// Fold one body chunk into the in-flight message and return it.
  pub fn receive_chunk(&mut self, bytes: &[u8]) -> Option<&Message> {
    if self.phase != Phase::Streaming {
      return None;
    }
    let text = self.decoder.decode(bytes);
    self.transcript.append_chunk(&text);
    self.transcript.in_flight()
  }

  /// Streaming -> Idle; the in-flight message becomes a normal message.
  pub fn finish_stream(&mut self) {
    if self.phase != Phase::Streaming {
      return;
    }
    let rest = self.decoder.finish();
    if !rest.is_empty() {
      self.transcript.append_chunk(&rest);
    }
    self.transcript.complete_in_flight();
    self.phase = Phase::Idle;
  }

  /// Any failure while Sending or Streaming: keep partial text, append the
  /// fixed fallback reply, go back to Idle. No retry.
  pub fn fail(&mut self, err: &GatewayError) {
    if self.phase == Phase::Idle {
      return;
    }
    warn!(target: "jimmy_chat", error = %err, phase = ?self.phase, "Chat request failed; using fallback reply");
    if self.phase == Phase::Streaming {
      let rest = self.decoder.finish();
      if !rest.is_empty() {
        self.transcript.append_chunk(&rest);
      }
      self.transcript.complete_in_flight();
    }
    self.transcript.push_assistant(FALLBACK_REPLY);
    self.phase = Phase::Idle;
  }

  /// Run one full cycle for the current input. `on_update` sees the assistant
  /// message after every change (each chunk, or the fallback reply).
  pub async fn run_turn<G, F>(&mut self, gateway: &G, mut on_update: F) -> TurnOutcome
  where
    G: CompletionGateway + ?Sized,
    F: FnMut(&Message),
  {
    let Some(turns) = self.submit() else { return TurnOutcome::Ignored };

    let mut stream = match gateway.open(&turns).await {
      Ok(s) => s,
      Err(e) => {
        self.fail(&e);
        if let Some(m) = self.transcript.last() { on_update(m); }
        return TurnOutcome::FellBack;
      }
    };

    self.accept_stream();
    if let Some(m) = self.transcript.in_flight() { on_update(m); }

    while let Some(item) = stream.next().await {
      match item {
        Ok(bytes) => {
          if let Some(m) = self.receive_chunk(&bytes) { on_update(m); }
        }
        Err(e) => {
          self.fail(&e);
          if let Some(m) = self.transcript.last() { on_update(m); }
          return TurnOutcome::FellBack;
        }
      }
    }

    self.finish_stream();
    if let Some(m) = self.transcript.last() {
      debug!(target: "jimmy_chat", reply_len = m.content.len(), "Stream complete");
    }
    TurnOutcome::Completed
  }
}
