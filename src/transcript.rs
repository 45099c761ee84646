//! Ordered conversation history with at most one in-flight assistant message.
//!
//! All mutations of the in-flight tail go through [`apply_chunk`], a plain
//! reducer usable without any UI.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Assessment, ChatTurn, Message, Role};

#[derive(Clone, Debug, Default, Serialize)]
pub struct Transcript {
  messages: Vec<Message>,
  #[serde(skip)]
  in_flight: Option<Uuid>,
}

impl Transcript {
  pub fn new() -> Self {
    Self::default()
  }

  /// Transcript opened by an assistant greeting.
  pub fn with_greeting(greeting: &str) -> Self {
    let mut t = Self::new();
    t.push_assistant(greeting);
    t
  }

  pub fn messages(&self) -> &[Message] {
    &self.messages
  }

  pub fn len(&self) -> usize {
    self.messages.len()
  }

  pub fn is_empty(&self) -> bool {
    self.messages.is_empty()
  }

  pub fn last(&self) -> Option<&Message> {
    self.messages.last()
  }

  /// The message currently receiving streamed text, if any.
  pub fn in_flight(&self) -> Option<&Message> {
    let id = self.in_flight?;
    self.messages.iter().rev().find(|m| m.id == id)
  }

  /// Wire form: `{role, content}` pairs only.
  pub fn to_turns(&self) -> Vec<ChatTurn> {
    self.messages.iter().map(Message::to_turn).collect()
  }

  /// Append a complete user message.
  pub fn push_user(&mut self, content: &str, assessment: Option<Assessment>) -> Uuid {
    let mut m = Message::new(Role::User, content);
    m.assessment = assessment;
    let id = m.id;
    self.messages.push(m);
    id
  }

  /// Append a complete assistant message.
  pub fn push_assistant(&mut self, content: &str) -> Uuid {
    let m = Message::new(Role::Assistant, content);
    let id = m.id;
    self.messages.push(m);
    id
  }

  /// Append an empty assistant message that will receive streamed chunks.
  /// A previous in-flight message, if any, is completed first.
  pub fn begin_in_flight(&mut self) -> Uuid {
    self.complete_in_flight();
    let id = self.push_assistant("");
    self.in_flight = Some(id);
    id
  }

  /// Mark the in-flight message as complete. Returns its id.
  pub fn complete_in_flight(&mut self) -> Option<Uuid> {
    self.in_flight.take()
  }

  /// Append `chunk` to the in-flight message. Returns false when nothing is in flight.
  pub fn append_chunk(&mut self, chunk: &str) -> bool {
    let Some(id) = self.in_flight else { return false };
    match self.messages.iter_mut().rev().find(|m| m.id == id) {
      Some(m) => {
        m.content.push_str(chunk);
        true
      }
      None => false,
    }
  }
}

/// `(transcript, chunk) -> transcript`: the in-flight message's content becomes
/// its previous content followed by `chunk`. Without an in-flight message the
/// transcript is returned unchanged.
pub fn apply_chunk(mut transcript: Transcript, chunk: &str) -> Transcript {
  transcript.append_chunk(chunk);
  transcript
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn chunks_accumulate_in_order() {
    let mut t = Transcript::with_greeting("hello");
    t.push_user("hi", None);
    t.begin_in_flight();

    let mut seen = vec![];
    for chunk in ["Hel", "lo ", "there"] {
      t = apply_chunk(t, chunk);
      seen.push(t.in_flight().unwrap().content.clone());
    }
    assert_eq!(seen, vec!["Hel", "Hello ", "Hello there"]);
    assert_eq!(t.len(), 3);
  }

  #[test]
  fn completed_message_no_longer_receives_chunks() {
    let mut t = Transcript::new();
    let id = t.begin_in_flight();
    t = apply_chunk(t, "done");
    assert_eq!(t.complete_in_flight(), Some(id));
    t = apply_chunk(t, " extra");
    assert!(t.in_flight().is_none());
    assert_eq!(t.last().unwrap().content, "done");
  }

  #[test]
  fn at_most_one_message_in_flight() {
    let mut t = Transcript::new();
    let first = t.begin_in_flight();
    t.append_chunk("a");
    let second = t.begin_in_flight();
    assert_ne!(first, second);
    assert_eq!(t.in_flight().unwrap().id, second);
    t.append_chunk("b");
    assert_eq!(t.messages()[0].content, "a");
    assert_eq!(t.messages()[1].content, "b");
  }

  #[test]
  fn wire_turns_drop_ids_and_assessments() {
    let mut t = Transcript::with_greeting("hey");
    t.push_user("what is ai", Some(Assessment {
      category: crate::domain::Category::AiUnderstanding,
      score: 5,
      feedback: "ok".into(),
    }));
    let turns = t.to_turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].role, Role::Assistant);
    assert_eq!(turns[1], ChatTurn { role: Role::User, content: "what is ai".into() });
  }
}
