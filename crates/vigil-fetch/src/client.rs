//! Fleet-management API client: bearer auth, linear-backoff retry, and the
//! shared circuit breaker in front of every call.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use vigil_core::constants::{FETCH_BACKOFF_UNIT_SECS, FETCH_MAX_ATTEMPTS};
use vigil_core::errors::{FetchError, VigilResult};

use crate::breaker::CircuitBreaker;

/// Connection settings for the API client.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub token: String,
    /// Per-request timeout (seconds).
    pub timeout_secs: u64,
}

/// Envelope every fleet API endpoint wraps its payload in.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    message: String,
}

/// HTTP client for the fleet-management API. All calls go through the shared
/// breaker; transient failures retry up to 3 times with linear backoff.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiClientConfig,
    breaker: Arc<CircuitBreaker>,
}

impl ApiClient {
    pub fn new(config: ApiClientConfig, breaker: Arc<CircuitBreaker>) -> VigilResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()
            .map_err(|e| FetchError::Unavailable {
                reason: format!("client init: {e}"),
            })?;
        Ok(Self {
            http,
            config,
            breaker,
        })
    }

    /// The breaker guarding this client, shared with the probe path.
    pub fn breaker(&self) -> &Arc<CircuitBreaker> {
        &self.breaker
    }

    /// Underlying reqwest client, reused for health probes.
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// GET `{base_url}{path}` and unwrap the response envelope.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> VigilResult<T> {
        match self.get_json_opt(path).await? {
            Some(value) => Ok(value),
            None => Err(FetchError::InvalidResponse {
                reason: format!("{path}: empty data"),
            }
            .into()),
        }
    }

    /// Like [`Self::get_json`], but a 404 or an empty envelope yields `None`.
    pub async fn get_json_opt<T: DeserializeOwned>(&self, path: &str) -> VigilResult<Option<T>> {
        self.breaker.check(Utc::now())?;

        let url = format!("{}{}", self.config.base_url, path);
        let mut last_err = FetchError::Unavailable {
            reason: "no attempt made".to_string(),
        };

        for attempt in 1..=FETCH_MAX_ATTEMPTS {
            match self.try_get::<T>(&url).await {
                Ok(value) => {
                    self.breaker.record_success();
                    return Ok(value);
                }
                Err(err) => {
                    let retryable = matches!(err, FetchError::Unavailable { .. });
                    tracing::debug!(%url, attempt, error = %err, "fetch attempt failed");
                    last_err = err;
                    if !retryable {
                        break;
                    }
                    if attempt < FETCH_MAX_ATTEMPTS {
                        tokio::time::sleep(Duration::from_secs(
                            FETCH_BACKOFF_UNIT_SECS * u64::from(attempt),
                        ))
                        .await;
                    }
                }
            }
        }

        self.breaker.record_failure(Utc::now());
        Err(last_err.into())
    }

    /// One attempt: network and 5xx failures are retryable (`Unavailable`),
    /// 4xx and malformed bodies are not (`InvalidResponse`), 404 is `None`.
    async fn try_get<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>, FetchError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.config.token)
            .send()
            .await
            .map_err(|e| FetchError::Unavailable {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if status.is_server_error() {
            return Err(FetchError::Unavailable {
                reason: format!("status {status}"),
            });
        }
        if !status.is_success() {
            return Err(FetchError::InvalidResponse {
                reason: format!("status {status}"),
            });
        }

        let envelope: ApiEnvelope<T> =
            response.json().await.map_err(|e| FetchError::InvalidResponse {
                reason: e.to_string(),
            })?;

        if !envelope.success {
            let reason = envelope
                .error
                .map(|e| format!("{}: {}", e.code, e.message))
                .unwrap_or_else(|| "unspecified API error".to_string());
            return Err(FetchError::InvalidResponse { reason });
        }
        Ok(envelope.data)
    }
}
