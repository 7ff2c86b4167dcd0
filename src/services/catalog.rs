use async_trait::async_trait;
use thiserror::Error;

use crate::models::ModRecord;

/// Errors that can occur while querying the mod catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Game version must not be empty")]
    EmptyVersion,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Catalog responded with HTTP {0}")]
    Status(u16),

    #[error("Malformed catalog response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source of mods compatible with a game version.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModCatalog: Send + Sync {
    /// Fetch every mod with `status` that supports `version`.
    ///
    /// An empty list means the catalog has nothing for that version; it is
    /// not an error.
    async fn fetch_mods(&self, version: &str, status: &str) -> Result<Vec<ModRecord>, CatalogError>;
}

/// Client for the BeatMods HTTP index.
#[derive(Debug, Clone)]
pub struct BeatModsClient {
    client: reqwest::Client,
    base_url: String,
}

impl BeatModsClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// URL of the mod listing endpoint.
    pub fn mods_endpoint(&self) -> String {
        format!("{}/api/v1/mod", self.base_url)
    }
}

#[async_trait]
impl ModCatalog for BeatModsClient {
    async fn fetch_mods(&self, version: &str, status: &str) -> Result<Vec<ModRecord>, CatalogError> {
        let version = version.trim();
        if version.is_empty() {
            return Err(CatalogError::EmptyVersion);
        }

        let endpoint = self.mods_endpoint();
        tracing::info!(
            "Querying {} (status={}, gameVersion={})",
            endpoint,
            status,
            version
        );

        let response = self
            .client
            .get(&endpoint)
            .query(&[("status", status), ("gameVersion", version)])
            .send()
            .await?;

        let http_status = response.status();
        if !http_status.is_success() {
            tracing::warn!("Catalog query failed with HTTP {}", http_status);
            return Err(CatalogError::Status(http_status.as_u16()));
        }

        let body = response.bytes().await?;
        let mods = parse_catalog(&body)?;

        tracing::info!("Catalog returned {} mods for {}", mods.len(), version);
        Ok(mods)
    }
}

/// Decode a catalog response body.
pub fn parse_catalog(body: &[u8]) -> Result<Vec<ModRecord>, CatalogError> {
    Ok(serde_json::from_slice(body)?)
}
