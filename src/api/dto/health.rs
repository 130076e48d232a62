//! Body of `GET /health`.

use serde::Serialize;

/// Overall service health with per-dependency results.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: ServiceStatus,
    pub version: &'static str,
    pub checks: HealthChecks,
}

impl HealthResponse {
    /// Derives the service status from the dependency checks.
    pub fn from_checks(checks: HealthChecks) -> Self {
        let status = if checks.store.status == ComponentStatus::Ok {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Degraded
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == ServiceStatus::Healthy
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub store: CheckStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Ok,
    Error,
}

/// Result of probing one dependency.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: ComponentStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl CheckStatus {
    pub fn ok(message: &'static str) -> Self {
        Self {
            status: ComponentStatus::Ok,
            message: Some(message),
        }
    }

    pub fn error(message: &'static str) -> Self {
        Self {
            status: ComponentStatus::Error,
            message: Some(message),
        }
    }
}
