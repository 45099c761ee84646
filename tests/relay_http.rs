//! End-to-end checks of the gateway router and the HTTP chat client.
//!
//! A fake OpenAI-compatible upstream and the real gateway router are bound to
//! local ephemeral ports; the client talks to them over real sockets.

use std::sync::{Arc, Mutex};

use axum::{
  body::{to_bytes, Body},
  extract::State,
  http::{header::CONTENT_TYPE, Request, StatusCode},
  response::{IntoResponse, Response},
  routing::post,
  Json, Router,
};
use futures_util::stream;
use jimmy_backend::{
  config::Prompts,
  domain::{Category, Role},
  gateway::HttpGateway,
  routes::build_router,
  seeds::{FALLBACK_REPLY, PROMPT_TIERS},
  session::{ChatSession, TurnOutcome},
  state::AppState,
  upstream::Upstream,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

type Captured = Arc<Mutex<Vec<Value>>>;

async fn spawn(app: Router) -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move { axum::serve(listener, app).await });
  format!("http://{addr}")
}

fn sse(content: &str) -> String {
  format!("data: {}\n\n", json!({ "choices": [{ "index": 0, "delta": { "content": content } }] }))
}

async fn fake_completions(State(seen): State<Captured>, Json(body): Json<Value>) -> Response {
  seen.lock().unwrap().push(body);
  let events: Vec<Result<String, std::io::Error>> =
    vec![Ok(sse("Hello")), Ok(sse(" there")), Ok("data: [DONE]\n\n".to_string())];
  ([(CONTENT_TYPE, "text/event-stream")], Body::from_stream(stream::iter(events))).into_response()
}

async fn fake_broken_mid_stream() -> Response {
  let events: Vec<Result<String, std::io::Error>> =
    vec![Ok(sse("Partial")), Err(std::io::Error::other("connection dropped"))];
  ([(CONTENT_TYPE, "text/event-stream")], Body::from_stream(stream::iter(events))).into_response()
}

async fn fake_unterminated_last_event() -> Response {
  let last = sse(" end");
  let events: Vec<Result<String, std::io::Error>> =
    vec![Ok(sse("The")), Ok(last.trim_end().to_string())];
  ([(CONTENT_TYPE, "text/event-stream")], Body::from_stream(stream::iter(events))).into_response()
}

async fn fake_unauthorized() -> Response {
  (StatusCode::UNAUTHORIZED, Json(json!({ "error": { "message": "Invalid API Key" } }))).into_response()
}

async fn spawn_fake_upstream() -> (String, Captured) {
  let seen: Captured = Arc::default();
  let app = Router::new()
    .route("/chat/completions", post(fake_completions))
    .with_state(seen.clone());
  (spawn(app).await, seen)
}

fn gateway_state(upstream_url: Option<&str>) -> Arc<AppState> {
  let upstream = upstream_url
    .map(|url| Upstream::new("test-key".into(), url.into(), "test-model".into()).unwrap());
  Arc::new(AppState::with_parts(Prompts { system: "Be Jimmy.".into() }, upstream))
}

fn chat_request(body: Value) -> Request<Body> {
  Request::builder()
    .method("POST")
    .uri("/api/chat")
    .header(CONTENT_TYPE, "application/json")
    .body(Body::from(body.to_string()))
    .unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
  let app = build_router(gateway_state(None));
  let res = app
    .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
    .await
    .unwrap();
  assert_eq!(res.status(), StatusCode::OK);
  let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
  assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!({ "ok": true }));
}

#[tokio::test]
async fn without_upstream_gateway_streams_canned_follow_up() {
  let app = build_router(gateway_state(None));
  let res = app
    .oneshot(chat_request(json!({ "messages": [
      { "role": "assistant", "content": "Hello!" },
      { "role": "user", "content": "hi" }
    ]})))
    .await
    .unwrap();
  assert_eq!(res.status(), StatusCode::OK);
  assert!(res.headers()[CONTENT_TYPE].to_str().unwrap().starts_with("text/plain"));
  let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
  assert_eq!(std::str::from_utf8(&body).unwrap(), PROMPT_TIERS[0][1]);
}

#[tokio::test]
async fn unreachable_upstream_yields_500_json() {
  let app = build_router(gateway_state(Some("http://127.0.0.1:1")));
  let res = app
    .oneshot(chat_request(json!({ "messages": [{ "role": "user", "content": "hi" }] })))
    .await
    .unwrap();
  assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
  let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
  assert_eq!(
    serde_json::from_slice::<Value>(&body).unwrap(),
    json!({ "error": "Failed to process request" })
  );
}

#[tokio::test]
async fn rejected_upstream_yields_500_json() {
  let upstream = spawn(Router::new().route("/chat/completions", post(fake_unauthorized))).await;
  let app = build_router(gateway_state(Some(&upstream)));
  let res = app
    .oneshot(chat_request(json!({ "messages": [{ "role": "user", "content": "hi" }] })))
    .await
    .unwrap();
  assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn malformed_body_is_a_client_error() {
  let app = build_router(gateway_state(None));
  let res = app.oneshot(chat_request(json!({ "msgs": [] }))).await.unwrap();
  assert!(res.status().is_client_error());
}

#[tokio::test]
async fn gateway_forwards_system_prompt_and_transcript_upstream() {
  let (upstream, seen) = spawn_fake_upstream().await;
  let app = build_router(gateway_state(Some(&upstream)));
  let res = app
    .oneshot(chat_request(json!({ "messages": [
      { "role": "assistant", "content": "Hello!" },
      { "role": "user", "content": "hi" }
    ]})))
    .await
    .unwrap();
  assert_eq!(res.status(), StatusCode::OK);
  let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
  assert_eq!(std::str::from_utf8(&body).unwrap(), "Hello there");

  let seen = seen.lock().unwrap();
  assert_eq!(seen.len(), 1);
  assert_eq!(seen[0]["model"], "test-model");
  assert_eq!(seen[0]["stream"], true);
  assert_eq!(
    seen[0]["messages"],
    json!([
      { "role": "system", "content": "Be Jimmy." },
      { "role": "assistant", "content": "Hello!" },
      { "role": "user", "content": "hi" }
    ])
  );
}

#[tokio::test]
async fn chat_session_streams_through_gateway() {
  let (upstream, _seen) = spawn_fake_upstream().await;
  let gateway_url = spawn(build_router(gateway_state(Some(&upstream)))).await;
  let client = HttpGateway::new(format!("{gateway_url}/api/chat")).unwrap();

  let mut session = ChatSession::new();
  session.set_input("What is AI? I think it is a computer program that learns from data, for example recognizing images.");
  let mut updates: Vec<String> = vec![];
  let outcome = session.run_turn(&client, |m| updates.push(m.content.clone())).await;

  assert_eq!(outcome, TurnOutcome::Completed);
  assert_eq!(updates.first().map(String::as_str), Some(""));
  assert_eq!(updates.last().map(String::as_str), Some("Hello there"));
  for pair in updates.windows(2) {
    assert!(pair[1].starts_with(pair[0].as_str()));
  }

  let msgs = session.transcript().messages();
  assert_eq!(msgs.len(), 3);
  assert_eq!(msgs[2].role, Role::Assistant);
  assert_eq!(msgs[2].content, "Hello there");
  assert_eq!(msgs[1].assessment.as_ref().unwrap().category, Category::AiUnderstanding);
  assert_eq!(session.proficiency().ai_understanding, 15);
  assert_eq!(session.proficiency().overall, 4);
}

#[tokio::test]
async fn chat_session_falls_back_when_gateway_fails() {
  let gateway_url = spawn(build_router(gateway_state(Some("http://127.0.0.1:1")))).await;
  let client = HttpGateway::new(format!("{gateway_url}/api/chat")).unwrap();

  let mut session = ChatSession::new();
  session.set_input("hi");
  let outcome = session.run_turn(&client, |_| {}).await;

  assert_eq!(outcome, TurnOutcome::FellBack);
  assert!(!session.is_loading());
  assert_eq!(session.transcript().last().unwrap().content, FALLBACK_REPLY);
}

#[tokio::test]
async fn upstream_failure_mid_stream_keeps_partial_text_and_falls_back() {
  let upstream = spawn(Router::new().route("/chat/completions", post(fake_broken_mid_stream))).await;
  let gateway_url = spawn(build_router(gateway_state(Some(&upstream)))).await;
  let client = HttpGateway::new(format!("{gateway_url}/api/chat")).unwrap();

  let mut session = ChatSession::new();
  session.set_input("hi");
  let outcome = session.run_turn(&client, |_| {}).await;

  assert_eq!(outcome, TurnOutcome::FellBack);
  assert!(!session.is_loading());
  assert!(session.transcript().in_flight().is_none());
  let tail: Vec<(Role, &str)> = session
    .transcript()
    .messages()
    .iter()
    .skip(1)
    .map(|m| (m.role, m.content.as_str()))
    .collect();
  assert_eq!(
    tail,
    vec![
      (Role::User, "hi"),
      (Role::Assistant, "Partial"),
      (Role::Assistant, FALLBACK_REPLY),
    ]
  );
}

#[tokio::test]
async fn last_event_without_trailing_newline_is_relayed() {
  let upstream = spawn(Router::new().route("/chat/completions", post(fake_unterminated_last_event))).await;
  let app = build_router(gateway_state(Some(&upstream)));
  let res = app
    .oneshot(chat_request(json!({ "messages": [{ "role": "user", "content": "hi" }] })))
    .await
    .unwrap();
  assert_eq!(res.status(), StatusCode::OK);
  let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
  assert_eq!(std::str::from_utf8(&body).unwrap(), "The end");
}
