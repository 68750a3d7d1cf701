//! shoreguide library
//!
//! Read-only attraction catalog for a cruise-port city guide: the record
//! model, the JSON directory repository and its queries, SEO and sitemap
//! generation, and the HTTP API that serves them.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod map;
pub mod models;
pub mod seo;
pub mod sitemap;
pub mod test_utils;

// Re-export commonly used types at the crate root
pub use config::{Config, SiteConfig};
pub use error::{Error, Result};

pub use catalog::{
    AttractionRepository, CatalogStats, JsonDirectoryRepository, RepositoryError,
    RepositoryResult,
};
pub use models::{Attraction, ValidationError, ValidationErrorKind};

// Re-export API server functions
pub use api::server::{create_router, create_server, shutdown_signal};

// Re-export health check types
pub use api::{
    AppState, BuildInfo, ComponentHealth, HealthResponse, HealthState, HealthStatus,
    ReadyResponse,
};
