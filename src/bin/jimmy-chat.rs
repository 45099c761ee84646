//! Jimmy AI · terminal chat
//!
//! Owns one chat session for the lifetime of the process: reads a line from
//! stdin per turn, streams the reply to stdout as it arrives, then shows the
//! assessment and the proficiency summary. At end of input it prints the
//! strengths and study recommendations. Nothing is persisted.
//!
//! Env: JIMMY_GATEWAY_URL (default http://127.0.0.1:3000/api/chat),
//!      JIMMY_CONFIG_PATH, LOG_LEVEL, LOG_FORMAT.

use std::io::Write;

use jimmy_backend::{
  config::AppConfig,
  domain::{Category, Message, Priority, Proficiency, Role},
  gateway::HttpGateway,
  session::{ChatSession, TurnOutcome},
  telemetry,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use uuid::Uuid;

/// Prints only the newly streamed suffix of the assistant message.
#[derive(Default)]
struct Renderer {
  current: Option<Uuid>,
  printed: usize,
}

impl Renderer {
  fn render(&mut self, m: &Message) {
    let mut out = std::io::stdout().lock();
    if self.current != Some(m.id) {
      if self.current.is_some() {
        let _ = writeln!(out);
      }
      let _ = write!(out, "Jimmy: ");
      self.current = Some(m.id);
      self.printed = 0;
    }
    if let Some(fresh) = m.content.get(self.printed..) {
      let _ = write!(out, "{fresh}");
      self.printed = m.content.len();
    }
    let _ = out.flush();
  }
}

fn summary(p: &Proficiency) -> String {
  let parts: Vec<String> = Category::ALL
    .iter()
    .map(|c| format!("{} {}", c.display_name(), p.get(*c)))
    .collect();
  format!("Proficiency: overall {} ({}) | {}", p.overall, p.level(), parts.join(" | "))
}

fn report(p: &Proficiency) {
  let strengths = p.strengths();
  if !strengths.is_empty() {
    println!("Strengths:");
    for (c, score) in strengths {
      println!("  {} {score}", c.title());
    }
  }
  for r in p.recommendations() {
    let priority = match r.priority {
      Priority::High => "High",
      Priority::Medium => "Medium",
    };
    println!("[{priority}] {}: {}", r.category.title(), r.title);
    println!("  {}", r.description);
    for action in r.actions {
      println!("  - {action}");
    }
  }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing(telemetry::CLIENT_FILTER);

  let cfg = AppConfig::load();
  let gateway = HttpGateway::new(cfg.client.gateway_url.clone())?;
  tracing::info!(target: "jimmy_chat", url = %gateway.url(), "Using gateway");

  let mut session = ChatSession::new();
  for m in session.transcript().messages() {
    println!("Jimmy: {}\n", m.content);
  }

  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  loop {
    print!("You: ");
    std::io::stdout().flush()?;
    let Some(line) = lines.next_line().await? else { break };

    session.set_input(line);
    let mut renderer = Renderer::default();
    if session.run_turn(&gateway, |m| renderer.render(m)).await == TurnOutcome::Ignored {
      continue;
    }
    println!("\n");

    let assessed = session
      .transcript()
      .messages()
      .iter()
      .rev()
      .find(|m| m.role == Role::User)
      .and_then(|m| m.assessment.as_ref());
    if let Some(a) = assessed {
      println!("  [{} +{}] {}", a.category, a.score, a.feedback);
    }
    println!("  {}\n", summary(session.proficiency()));
  }

  println!();
  report(session.proficiency());
  Ok(())
}
