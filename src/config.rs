//! Configuration for shoreguide
//!
//! Loads and validates configuration from environment variables, with
//! strongly-typed sections for the HTTP server, the catalog store and the
//! site profile used in generated SEO text and sitemaps.

use envconfig::Envconfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Envconfig)]
pub struct Config {
    /// Server configuration
    #[serde(flatten)]
    #[envconfig(nested = true)]
    pub server: ServerConfig,

    /// Catalog configuration
    #[serde(flatten)]
    #[envconfig(nested = true)]
    pub catalog: CatalogConfig,

    /// Site profile
    #[serde(flatten)]
    #[envconfig(nested = true)]
    pub site: SiteConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize, Envconfig)]
pub struct ServerConfig {
    /// Host to bind to
    #[envconfig(from = "HOST", default = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[envconfig(from = "PORT", default = "8080")]
    pub port: u16,

    /// Log level
    #[envconfig(from = "LOG_LEVEL", default = "info")]
    pub log_level: String,

    /// Environment (development, staging, production)
    #[envconfig(from = "ENVIRONMENT", default = "development")]
    pub environment: String,

    /// Request timeout in seconds
    #[envconfig(from = "REQUEST_TIMEOUT_SECS", default = "30")]
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Get the server address as a string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Catalog store configuration
#[derive(Debug, Clone, Deserialize, Serialize, Envconfig)]
pub struct CatalogConfig {
    /// Directory holding one `<id>.json` document per attraction
    #[envconfig(from = "DATA_DIR", default = "./public/data")]
    pub data_dir: String,

    /// Featured attractions returned when no limit is given
    #[envconfig(from = "FEATURED_LIMIT", default = "6")]
    pub featured_limit: usize,

    /// Nearby attractions returned when no limit is given
    #[envconfig(from = "NEARBY_LIMIT", default = "4")]
    pub nearby_limit: usize,

    /// Upper bound applied to any requested limit
    #[envconfig(from = "MAX_QUERY_LIMIT", default = "50")]
    pub max_query_limit: usize,

    /// Interval between background catalog health checks
    #[envconfig(from = "HEALTH_CHECK_INTERVAL_SECS", default = "30")]
    pub health_check_interval_secs: u64,
}

impl CatalogConfig {
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    /// Get health check interval as Duration
    pub fn health_check_interval(&self) -> Duration {
        Duration::from_secs(self.health_check_interval_secs)
    }

    /// Resolve a requested limit against the default and the cap
    pub fn clamp_limit(&self, requested: Option<usize>, default: usize) -> usize {
        requested.unwrap_or(default).min(self.max_query_limit)
    }
}

/// Site profile used by SEO text, structured data and sitemaps
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Envconfig)]
pub struct SiteConfig {
    /// Site name appended to page titles
    #[envconfig(from = "SITE_NAME", default = "Lisbon Cruise Guide")]
    pub site_name: String,

    /// City every attraction belongs to
    #[envconfig(from = "SITE_CITY", default = "Lisbon")]
    pub city: String,

    /// ISO country code for structured-data addresses
    #[envconfig(from = "SITE_COUNTRY_CODE", default = "PT")]
    pub country_code: String,

    /// Public base URL, without trailing slash
    #[envconfig(from = "SITE_BASE_URL", default = "https://lisbonshore.com")]
    pub base_url: String,

    /// Symbol prefixed to prices in descriptions
    #[envconfig(from = "CURRENCY_SYMBOL", default = "€")]
    pub currency_symbol: String,
}

impl SiteConfig {
    /// Absolute URL for a site path such as `/attractions`
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.is_empty() || path == "/" {
            base.to_string()
        } else {
            format!("{}/{}", base, path.trim_start_matches('/'))
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "Lisbon Cruise Guide".to_string(),
            city: "Lisbon".to_string(),
            country_code: "PT".to_string(),
            base_url: "https://lisbonshore.com".to_string(),
            currency_symbol: "€".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenv::dotenv().ok();

        Config::init_from_env().map_err(Error::from)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::config("Server port cannot be 0"));
        }

        if self.catalog.data_dir.trim().is_empty() {
            return Err(Error::config("Data directory cannot be empty"));
        }

        if self.catalog.max_query_limit == 0 {
            return Err(Error::config("Max query limit must be at least 1"));
        }

        if self.catalog.featured_limit == 0 || self.catalog.nearby_limit == 0 {
            return Err(Error::config("Featured and nearby limits must be at least 1"));
        }

        if self.catalog.featured_limit > self.catalog.max_query_limit
            || self.catalog.nearby_limit > self.catalog.max_query_limit
        {
            return Err(Error::config(format!(
                "Default limits cannot exceed max query limit {}",
                self.catalog.max_query_limit
            )));
        }

        if !(self.site.base_url.starts_with("http://") || self.site.base_url.starts_with("https://"))
        {
            return Err(Error::config(format!(
                "Site base URL must be http(s): {}",
                self.site.base_url
            )));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!(
            server_address = %self.server.address(),
            environment = %self.server.environment,
            log_level = %self.server.log_level,
            "Server configuration"
        );

        tracing::info!(
            data_dir = %self.catalog.data_dir,
            featured_limit = self.catalog.featured_limit,
            nearby_limit = self.catalog.nearby_limit,
            max_query_limit = self.catalog.max_query_limit,
            "Catalog configuration"
        );

        tracing::info!(
            site_name = %self.site.site_name,
            city = %self.site.city,
            base_url = %self.site.base_url,
            "Site configuration"
        );
    }
}

#[cfg(test)]
pub(crate) fn test_config(data_dir: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            environment: "test".to_string(),
            request_timeout_secs: 30,
        },
        catalog: CatalogConfig {
            data_dir: data_dir.to_string(),
            featured_limit: 6,
            nearby_limit: 4,
            max_query_limit: 50,
            health_check_interval_secs: 30,
        },
        site: SiteConfig::default(),
    }
}
