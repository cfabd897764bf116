use std::future::Future;

use crate::errors::VigilResult;
use crate::models::{CostEntry, Deployment, HealthProbe, MetricSample, Service};

/// Upstream fleet-management API surface consumed by the poll cycle.
///
/// The production implementation lives in `vigil-fetch`; tests supply
/// in-process doubles. Methods return `Send` futures so the engine can run
/// on a spawned task.
pub trait ServiceCatalog: Send + Sync {
    /// All monitored services in a project.
    fn list_services(
        &self,
        project_id: &str,
    ) -> impl Future<Output = VigilResult<Vec<Service>>> + Send;

    /// Latest metric sample for a service, or None when the upstream has no
    /// fresh data.
    fn fetch_metrics(
        &self,
        service: &Service,
    ) -> impl Future<Output = VigilResult<Option<MetricSample>>> + Send;

    /// Daily cost entries for a project.
    fn fetch_usage(
        &self,
        project_id: &str,
    ) -> impl Future<Output = VigilResult<Vec<CostEntry>>> + Send;

    /// Most recent deployments for a service.
    fn fetch_deployments(
        &self,
        service_id: &str,
        limit: usize,
    ) -> impl Future<Output = VigilResult<Vec<Deployment>>> + Send;

    /// Probe `{url}/health`. Must never fail: all errors fold into
    /// `HealthProbe { ok: false, .. }`.
    fn probe_health(&self, url: &str) -> impl Future<Output = HealthProbe> + Send;
}
