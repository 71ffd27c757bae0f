//! Centralized configuration (environment variables + defaults).

use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";
const DEFAULT_CATALOG_BASE_URL: &str = "https://boardgamegeek.com/xmlapi2";
const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 10;

/// Database URL must be provided (no default) for safety.
pub fn database_url() -> anyhow::Result<String> {
    std::env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))
}

/// Socket address the API server listens on.
pub fn bind_addr() -> String {
    non_empty_var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
}

/// Allowed CORS origin. `None` means any origin is accepted.
pub fn cors_origin() -> Option<String> {
    non_empty_var("CORS_ORIGIN")
}

/// Settings for the external catalog provider.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the XML API, without a trailing slash.
    pub base_url: String,
    /// Upper bound for each individual upstream request.
    pub timeout: Duration,
    /// Optional bearer token sent with every request.
    pub api_token: Option<String>,
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        let base_url = non_empty_var("BGG_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_CATALOG_BASE_URL.to_string());

        let timeout_secs = match non_empty_var("CATALOG_TIMEOUT_SECS") {
            Some(v) => match v.parse::<u64>() {
                Ok(secs) => secs.max(1),
                Err(_) => {
                    log::warn!(
                        "CATALOG_TIMEOUT_SECS={} is not a valid number, using {}s",
                        v,
                        DEFAULT_CATALOG_TIMEOUT_SECS
                    );
                    DEFAULT_CATALOG_TIMEOUT_SECS
                }
            },
            None => DEFAULT_CATALOG_TIMEOUT_SECS,
        };

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
            api_token: non_empty_var("BGG_API_TOKEN"),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
