//! API module for shoreguide
//!
//! This module contains the read-only HTTP API over the attraction catalog,
//! the health endpoints and the server setup with its middleware stack.

use std::sync::Arc;

pub mod handlers;
pub mod health;
pub mod server;

pub use health::{build_info, health_check, ready_check, HealthState};
pub use server::{create_router, create_server, shutdown_signal};

use crate::catalog::AttractionRepository;
use crate::config::Config;

/// Health component name of the attraction store
pub const CATALOG_COMPONENT: &str = "catalog";

/// Build information populated at compile time
pub const BUILD_INFO: BuildInfo = BuildInfo {
    version: env!("CARGO_PKG_VERSION"),
    commit: match option_env!("GIT_COMMIT") {
        Some(commit) => commit,
        None => "unknown",
    },
    build_time: match option_env!("BUILD_TIME") {
        Some(time) => time,
        None => "unknown",
    },
    rust_version: match option_env!("RUSTC_VERSION") {
        Some(version) => version,
        None => "unknown",
    },
};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Attraction store
    pub repository: Arc<dyn AttractionRepository>,
    /// Loaded configuration
    pub config: Arc<Config>,
    /// Component health tracking
    pub health: Arc<HealthState>,
}

impl AppState {
    pub fn new(repository: Arc<dyn AttractionRepository>, config: Arc<Config>) -> Self {
        Self {
            repository,
            config,
            health: Arc::new(HealthState::new()),
        }
    }
}

/// Build information structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct BuildInfo {
    /// Application version from Cargo.toml
    pub version: &'static str,
    /// Git commit hash
    pub commit: &'static str,
    /// Build timestamp
    pub build_time: &'static str,
    /// Rust version used for compilation
    pub rust_version: &'static str,
}

/// Health check response
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: HealthStatus,
    /// Optional message
    pub message: Option<String>,
    /// Current timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Ready check response
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ReadyResponse {
    /// Overall readiness status
    pub status: HealthStatus,
    /// Individual component checks
    pub checks: std::collections::HashMap<String, ComponentHealth>,
    /// Current timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Component health status
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ComponentHealth {
    /// Component status
    pub status: HealthStatus,
    /// Optional error message
    pub message: Option<String>,
    /// Last check timestamp
    pub last_check: chrono::DateTime<chrono::Utc>,
}

/// Health status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Service is healthy
    Healthy,
    /// Service is degraded but operational
    Degraded,
    /// Service is unhealthy
    Unhealthy,
}

impl HealthStatus {
    /// Check if the status is healthy
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }

    /// Convert to HTTP status code
    pub fn to_status_code(&self) -> axum::http::StatusCode {
        match self {
            HealthStatus::Healthy | HealthStatus::Degraded => axum::http::StatusCode::OK,
            HealthStatus::Unhealthy => axum::http::StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}
