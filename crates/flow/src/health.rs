use std::sync::Arc;

use authnlens_client::DetectionApi;
use authnlens_core::{HealthStatus, Notification};
use tracing::{info, warn};

use crate::notify::Notifier;

/// Probes the service's liveness endpoint.
///
/// Each call issues exactly one request; nothing is polled or retried.
#[derive(Debug, Clone)]
pub struct HealthMonitor {
    api: Arc<dyn DetectionApi>,
    notifier: Notifier,
}

impl HealthMonitor {
    pub fn new(api: Arc<dyn DetectionApi>, notifier: Notifier) -> Self {
        Self { api, notifier }
    }

    /// Probe once. A failed probe raises one connection notification.
    pub async fn probe(&self) -> HealthStatus {
        let status = match self.api.health().await {
            Ok(healthy) => HealthStatus::from_probe(healthy),
            Err(e) => {
                warn!(error = %e, "health probe failed");
                HealthStatus::Offline
            }
        };

        info!(status = %status, "health probe settled");
        if status == HealthStatus::Offline {
            self.notifier.notify(Notification::connection_issue());
        }
        status
    }
}
