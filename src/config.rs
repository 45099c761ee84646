//! Loading configuration (persona prompt + client endpoint) from TOML and env.
//!
//! See `AppConfig` for the expected schema:
//!
//! ```toml
//! [prompts]
//! system = "You are Jimmy AI ..."
//!
//! [client]
//! gateway_url = "http://127.0.0.1:3000/api/chat"
//! ```

use serde::Deserialize;
use tracing::{error, info};

use crate::seeds::DEFAULT_SYSTEM_PROMPT;

pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:3000/api/chat";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub client: ClientConfig,
}

/// Prompt sent upstream ahead of every transcript.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  pub system: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self { system: DEFAULT_SYSTEM_PROMPT.into() }
  }
}

/// Settings for the terminal chat client.
#[derive(Clone, Debug, Deserialize)]
pub struct ClientConfig {
  pub gateway_url: String,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self { gateway_url: DEFAULT_GATEWAY_URL.into() }
  }
}

impl AppConfig {
  pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(s)
  }

  /// TOML from JIMMY_CONFIG_PATH (if set and readable), then env overrides.
  /// Read or parse errors are logged and defaults are used instead.
  pub fn load() -> Self {
    let mut cfg = load_config_from_env().unwrap_or_default();
    if let Ok(url) = std::env::var("JIMMY_GATEWAY_URL") {
      if !url.trim().is_empty() {
        cfg.client.gateway_url = url;
      }
    }
    cfg
  }
}

/// Listen port from PORT, default 3000.
pub fn port_from_env() -> u16 {
  std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .unwrap_or(DEFAULT_PORT)
}

/// Attempt to load `AppConfig` from JIMMY_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("JIMMY_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match AppConfig::from_toml_str(&s) {
      Ok(cfg) => {
        info!(target: "jimmy_backend", %path, "Loaded config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "jimmy_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "jimmy_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
