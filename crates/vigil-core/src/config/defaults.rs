//! Default values shared between [`super::VigilConfig`] and its serde defaults.

pub const DEFAULT_API_BASE_URL: &str = "https://backboard.fleet-api.dev/v1";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
