//! Tracing setup shared by both binaries.
//!
//! - LOG_LEVEL controls the filter (e.g. "debug" or directives like
//!   "info,assessor=debug,jimmy_backend=debug,tower_http=info").
//! - LOG_FORMAT selects "pretty" (default) or "json" structured logs.
//! - Output goes to stderr so the chat client can own stdout.

use tracing_subscriber::EnvFilter;

/// Default directives for the gateway service.
pub const SERVER_FILTER: &str = "info,jimmy_backend=debug,tower_http=info,axum=info";
/// Default directives for the terminal client; quiet unless something fails.
pub const CLIENT_FILTER: &str = "warn";

pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}
