//! [`FleetCatalog`] — the production [`ServiceCatalog`] over the fleet API.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use vigil_core::errors::VigilResult;
use vigil_core::models::{
    CostEntry, Deployment, HealthProbe, MetricSample, Service, ServiceStatus,
};
use vigil_core::traits::ServiceCatalog;

use crate::client::ApiClient;
use crate::probe;

/// Wire shape of a service in the catalog listing.
#[derive(Debug, Deserialize)]
struct ApiService {
    id: String,
    name: String,
    status: String,
    #[serde(default)]
    last_deploy: Option<DateTime<Utc>>,
    #[serde(default)]
    url: Option<String>,
}

/// Wire shape of the latest-metrics endpoint.
#[derive(Debug, Deserialize)]
struct ApiMetricSample {
    timestamp: DateTime<Utc>,
    #[serde(default)]
    cpu_percent: f64,
    #[serde(default)]
    memory_mb: f64,
    #[serde(default)]
    network_rx_kb: f64,
    #[serde(default)]
    network_tx_kb: f64,
}

#[derive(Debug, Deserialize)]
struct ApiCostEntry {
    date: String,
    #[serde(default)]
    service_id: Option<String>,
    amount_usd: f64,
}

#[derive(Debug, Deserialize)]
struct ApiDeployment {
    id: String,
    status: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    finished_at: Option<DateTime<Utc>>,
}

/// Production catalog implementation over [`ApiClient`].
#[derive(Debug, Clone)]
pub struct FleetCatalog {
    client: ApiClient,
}

impl FleetCatalog {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn into_service(api: ApiService, project_id: &str, now: DateTime<Utc>) -> Service {
        // Upstream statuses we don't map become Unknown rather than an error.
        let status = api.status.parse().unwrap_or(ServiceStatus::Unknown);
        Service {
            id: api.id,
            name: api.name,
            project_id: project_id.to_string(),
            status,
            last_deploy: api.last_deploy,
            health_url: api.url,
            cpu_percent: 0.0,
            memory_mb: 0.0,
            uptime_percent: 100.0,
            updated_at: now,
        }
    }
}

impl ServiceCatalog for FleetCatalog {
    async fn list_services(&self, project_id: &str) -> VigilResult<Vec<Service>> {
        let services: Vec<ApiService> = self
            .client
            .get_json(&format!("/projects/{project_id}/services"))
            .await?;
        let now = Utc::now();
        Ok(services
            .into_iter()
            .map(|s| Self::into_service(s, project_id, now))
            .collect())
    }

    async fn fetch_metrics(&self, service: &Service) -> VigilResult<Option<MetricSample>> {
        let sample: Option<ApiMetricSample> = self
            .client
            .get_json_opt(&format!("/services/{}/metrics/latest", service.id))
            .await?;
        Ok(sample.map(|s| MetricSample {
            timestamp: s.timestamp,
            service_id: service.id.clone(),
            project_id: service.project_id.clone(),
            cpu_percent: s.cpu_percent,
            memory_mb: s.memory_mb,
            network_rx_kb: s.network_rx_kb,
            network_tx_kb: s.network_tx_kb,
        }))
    }

    async fn fetch_usage(&self, project_id: &str) -> VigilResult<Vec<CostEntry>> {
        let entries: Vec<ApiCostEntry> = self
            .client
            .get_json(&format!("/projects/{project_id}/usage/daily"))
            .await?;
        Ok(entries
            .into_iter()
            .map(|e| CostEntry {
                date: e.date,
                project_id: project_id.to_string(),
                service_id: e.service_id,
                amount_usd: e.amount_usd,
            })
            .collect())
    }

    async fn fetch_deployments(
        &self,
        service_id: &str,
        limit: usize,
    ) -> VigilResult<Vec<Deployment>> {
        let deployments: Vec<ApiDeployment> = self
            .client
            .get_json(&format!("/services/{service_id}/deployments?limit={limit}"))
            .await?;
        Ok(deployments
            .into_iter()
            .map(|d| Deployment {
                id: d.id,
                service_id: service_id.to_string(),
                status: d.status,
                created_at: d.created_at,
                finished_at: d.finished_at,
            })
            .collect())
    }

    async fn probe_health(&self, url: &str) -> HealthProbe {
        probe::probe_health(self.client.http(), url).await
    }
}
