// HTTP access to the BoardGameGeek XML API v2.

use crate::domain::catalog::{CatalogError, CatalogTransport};
use crate::infra::config::CatalogConfig;
use async_trait::async_trait;

/// Item kinds the marketplace deals in.
const SEARCH_TYPES: &str = "boardgame,boardgameexpansion";

/// reqwest-backed catalog transport, shared by all requests.
pub struct BggClient {
    http: reqwest::Client,
    config: CatalogConfig,
}

impl BggClient {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("boardgame-swap/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    async fn get_xml(
        &self,
        endpoint: &'static str,
        params: &[(&str, &str)],
    ) -> Result<String, CatalogError> {
        let mut request = self
            .http
            .get(format!("{}/{}", self.config.base_url, endpoint))
            .query(params);
        if let Some(token) = self.config.api_token.as_deref() {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await.map_err(|e| {
            log::error!("Catalog {} request failed: {}", endpoint, e);
            CatalogError::Transport(e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            log::error!("Catalog {} endpoint returned HTTP {}", endpoint, status);
            return Err(CatalogError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        Ok(resp.text().await?)
    }
}

#[async_trait]
impl CatalogTransport for BggClient {
    async fn search(&self, query: &str) -> Result<String, CatalogError> {
        self.get_xml("search", &[("type", SEARCH_TYPES), ("query", query)])
            .await
    }

    async fn thing(&self, ids: &[String]) -> Result<String, CatalogError> {
        let ids = ids.join(",");
        self.get_xml("thing", &[("id", ids.as_str()), ("stats", "1")])
            .await
    }
}
