use crate::services::{probe, DatabaseProbe};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use std::sync::Arc;
use std::time::Duration;

/// State for the health endpoint: the shared connection and the per-probe bound.
#[derive(Clone)]
pub struct HealthState {
    db: Arc<dyn DatabaseProbe>,
    probe_timeout: Duration,
}

impl HealthState {
    pub fn new(db: Arc<dyn DatabaseProbe>, probe_timeout: Duration) -> Self {
        Self { db, probe_timeout }
    }

    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            error: None,
        }
    }
}

/// Liveness/readiness probe. One bounded ping per request, no retries and no
/// memory of earlier results. Failures render as 500 through [`AppError`].
pub async fn health_check(
    State(state): State<HealthState>,
) -> Result<Json<HealthResponse>, AppError> {
    probe(state.db.as_ref(), state.probe_timeout)
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e.detail(),
                timeout_ms = state.probe_timeout.as_millis() as u64,
                "MongoDB is not healthy"
            );
            e
        })?;

    Ok(Json(HealthResponse::ok()))
}
