//! Relay behavior behind `POST /api/chat`.
//!
//! With an upstream configured, the transcript goes to the hosted model and
//! its deltas are streamed back. Without one we answer with the canned
//! follow-up generator so the conversation can still continue.

use futures_util::stream;
use rand::Rng;
use tracing::{debug, instrument};

use crate::assessor::assess;
use crate::domain::{ChatTurn, Role};
use crate::error::UpstreamError;
use crate::generator::next_prompt;
use crate::state::AppState;
use crate::upstream::TextStream;

#[instrument(level = "info", skip(state, turns), fields(turns = turns.len(), upstream = state.upstream.is_some()))]
pub async fn relay_chat(state: &AppState, turns: &[ChatTurn]) -> Result<TextStream, UpstreamError> {
  if let Some(up) = &state.upstream {
    return up.stream_chat(&state.prompts.system, turns).await;
  }
  let reply = canned_reply(turns, &mut rand::thread_rng());
  debug!(target: "jimmy_backend", reply_len = reply.len(), "Serving canned follow-up");
  Ok(Box::pin(stream::iter([Ok::<_, UpstreamError>(reply)])))
}

/// Canned follow-up for a transcript: the turn index is the position of the
/// last user message, and that message is assessed to pick the encouragement.
pub fn canned_reply<R: Rng>(turns: &[ChatTurn], rng: &mut R) -> String {
  match turns.iter().rposition(|t| t.role == Role::User) {
    Some(idx) => {
      let assessment = assess(&turns[idx].content, idx);
      next_prompt(idx, assessment.as_ref(), rng)
    }
    None => next_prompt(turns.len(), None, rng),
  }
}
