//! Gateway state: the persona prompt and the optional upstream client.
//!
//! Nothing conversation-specific lives here; every request carries its own
//! transcript.

use tracing::{info, instrument};

use crate::config::{AppConfig, Prompts};
use crate::upstream::Upstream;

#[derive(Clone)]
pub struct AppState {
    pub upstream: Option<Upstream>,
    pub prompts: Prompts,
}

impl AppState {
    /// Build state from env: load config, init the upstream client.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = AppConfig::load();
        let upstream = Upstream::from_env();
        if let Some(up) = &upstream {
            info!(target: "jimmy_backend", base_url = %up.base_url, model = %up.model, "Upstream model enabled.");
        } else {
            info!(target: "jimmy_backend", "Upstream disabled (no GROQ_API_KEY). Using canned follow-ups.");
        }
        Self::with_parts(cfg.prompts, upstream)
    }

    pub fn with_parts(prompts: Prompts, upstream: Option<Upstream>) -> Self {
        Self { upstream, prompts }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
