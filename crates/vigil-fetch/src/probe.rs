//! Health probes: `GET {url}/health` with a hard timeout. This path must
//! never raise — every failure mode folds into `ok = false`.

use std::time::{Duration, Instant};

use serde::Deserialize;

use vigil_core::constants::PROBE_TIMEOUT_SECS;
use vigil_core::models::HealthProbe;

/// Optional self-reported fields a service's health endpoint may include.
#[derive(Debug, Default, Deserialize)]
struct ProbeBody {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    uptime_seconds: Option<f64>,
    #[serde(default)]
    memory_mb: Option<f64>,
    #[serde(default)]
    request_count: Option<u64>,
    #[serde(default)]
    error_rate: Option<f64>,
}

/// Probe a service's health endpoint. A failing request, a non-2xx status,
/// or a non-JSON body still yields a probe result with the measured latency.
pub async fn probe_health(http: &reqwest::Client, base_url: &str) -> HealthProbe {
    let url = format!("{}/health", base_url.trim_end_matches('/'));
    let started = Instant::now();

    let response = http
        .get(&url)
        .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
        .send()
        .await;

    let latency_ms = started.elapsed().as_millis() as u64;

    match response {
        Ok(resp) => {
            let status_code = resp.status().as_u16();
            let ok = resp.status().is_success();
            // Body parse is best-effort; a plain-text or empty body is fine.
            let body: ProbeBody = resp.json().await.unwrap_or_default();
            HealthProbe {
                ok,
                status_code: Some(status_code),
                latency_ms,
                version: body.version,
                uptime_seconds: body.uptime_seconds,
                memory_mb: body.memory_mb,
                request_count: body.request_count,
                error_rate: body.error_rate,
            }
        }
        Err(err) => {
            tracing::debug!(%url, error = %err, "health probe failed");
            HealthProbe {
                ok: false,
                status_code: None,
                latency_ms,
                ..HealthProbe::default()
            }
        }
    }
}
