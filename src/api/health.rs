//! Health check endpoints for shoreguide
//!
//! Liveness never touches the catalog. Readiness checks the attraction store
//! on every call and reports it next to whatever the background monitor last
//! recorded.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::api::{
    AppState, ComponentHealth, HealthResponse, HealthStatus, ReadyResponse, BUILD_INFO,
    CATALOG_COMPONENT,
};
use crate::catalog::AttractionRepository;

/// Component health tracking shared between handlers and the monitor
#[derive(Clone)]
pub struct HealthState {
    pub components: Arc<tokio::sync::RwLock<HashMap<String, ComponentHealth>>>,
}

impl HealthState {
    /// Create a new health state
    pub fn new() -> Self {
        Self {
            components: Arc::new(tokio::sync::RwLock::new(HashMap::new())),
        }
    }

    /// Record the latest result for one component
    pub async fn update_component(&self, name: &str, health: ComponentHealth) {
        let mut components = self.components.write().await;
        components.insert(name.to_string(), health);
    }

    /// Worst status across all components; healthy when nothing is tracked
    pub async fn get_status(&self) -> HealthStatus {
        let components = self.components.read().await;

        if components.values().any(|c| c.status == HealthStatus::Unhealthy) {
            return HealthStatus::Unhealthy;
        }

        if components.values().any(|c| c.status == HealthStatus::Degraded) {
            return HealthStatus::Degraded;
        }

        HealthStatus::Healthy
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

/// Basic liveness check endpoint
///
/// ```text
/// GET /healthz
/// ```
pub async fn health_check() -> Response {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        message: Some("Service is running".to_string()),
        timestamp: Utc::now(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Readiness check endpoint
///
/// Answers 503 while the data directory is unavailable.
///
/// ```text
/// GET /readyz
/// ```
pub async fn ready_check(State(state): State<AppState>) -> Response {
    let catalog = check_catalog_health(state.repository.as_ref()).await;
    state.health.update_component(CATALOG_COMPONENT, catalog).await;

    let components = state.health.components.read().await.clone();
    let overall_status = state.health.get_status().await;

    let response = ReadyResponse {
        status: overall_status,
        checks: components,
        timestamp: Utc::now(),
    };

    (overall_status.to_status_code(), Json(response)).into_response()
}

/// Build information endpoint
///
/// ```text
/// GET /build
/// ```
pub async fn build_info() -> Response {
    (StatusCode::OK, Json(&BUILD_INFO)).into_response()
}

/// Probe the attraction store
pub async fn check_catalog_health(repository: &dyn AttractionRepository) -> ComponentHealth {
    match repository.health_check().await {
        Ok(()) => ComponentHealth {
            status: HealthStatus::Healthy,
            message: Some("Attraction data directory is readable".to_string()),
            last_check: Utc::now(),
        },
        Err(e) => ComponentHealth {
            status: HealthStatus::Unhealthy,
            message: Some(e.to_string()),
            last_check: Utc::now(),
        },
    }
}

/// Background task to periodically update component health
pub async fn health_monitor(
    state: Arc<HealthState>,
    repository: Arc<dyn AttractionRepository>,
    every: Duration,
) {
    let mut interval = tokio::time::interval(every);

    loop {
        interval.tick().await;

        let catalog = check_catalog_health(repository.as_ref()).await;
        if !catalog.status.is_healthy() {
            tracing::warn!(
                component = CATALOG_COMPONENT,
                message = ?catalog.message,
                "Component unhealthy"
            );
        }
        state.update_component(CATALOG_COMPONENT, catalog).await;

        tracing::debug!("Health check completed");
    }
}
