//! Engine configuration: TOML file plus `VIGIL_*` environment overrides.

pub mod defaults;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration for one engine instance.
///
/// Absence of `api_token` is the one unrecoverable cycle error; absence of
/// `db_path` selects memory-only persistence for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VigilConfig {
    /// Fleet-management API base URL.
    pub api_base_url: String,
    /// API credential. Checked at the start of every cycle.
    pub api_token: Option<String>,
    /// Projects whose services are monitored.
    pub project_ids: Vec<String>,
    /// Durable store location. None ⇒ memory-only mode.
    pub db_path: Option<PathBuf>,
    /// Seconds between poll cycles.
    pub poll_interval_secs: u64,
    /// Per-request timeout for API calls (seconds).
    pub request_timeout_secs: u64,
}

impl Default for VigilConfig {
    fn default() -> Self {
        Self {
            api_base_url: defaults::DEFAULT_API_BASE_URL.to_string(),
            api_token: None,
            project_ids: Vec::new(),
            db_path: None,
            poll_interval_secs: defaults::DEFAULT_POLL_INTERVAL_SECS,
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl VigilConfig {
    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load from a TOML file, falling back to defaults when it is absent.
    pub fn load(path: Option<&std::path::Path>) -> Self {
        let mut config = match path {
            Some(p) => match std::fs::read_to_string(p) {
                Ok(text) => Self::from_toml(&text).unwrap_or_default(),
                Err(_) => Self::default(),
            },
            None => Self::default(),
        };
        config.apply_env();
        config
    }

    /// Overlay `VIGIL_*` environment variables on top of file values.
    pub fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("VIGIL_API_BASE_URL") {
            self.api_base_url = v;
        }
        if let Ok(v) = std::env::var("VIGIL_API_TOKEN") {
            self.api_token = Some(v);
        }
        if let Ok(v) = std::env::var("VIGIL_PROJECTS") {
            self.project_ids = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(v) = std::env::var("VIGIL_DB_PATH") {
            self.db_path = Some(PathBuf::from(v));
        }
        if let Ok(v) = std::env::var("VIGIL_POLL_INTERVAL_SECS") {
            if let Ok(secs) = v.parse() {
                self.poll_interval_secs = secs;
            }
        }
    }
}
