//! Per-country route data sources
//!
//! A [`DataSource`] yields the raw route records of one country. The loader
//! issues one fetch per country concurrently and treats every error as a
//! failure of that country alone.

use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app::models::{Country, RawRouteRecord};
use crate::constants::COUNTRY_FILE_EXTENSION;
use crate::{Error, Result};

/// Source of raw route records, one country at a time
pub trait DataSource: Send + Sync {
    /// Human readable description for logs
    fn describe(&self) -> String;

    /// Fetch every raw record of a country, in source order
    fn fetch_country(
        &self,
        country: &Country,
    ) -> impl Future<Output = Result<Vec<RawRouteRecord>>> + Send;
}

/// Parse a country payload: a JSON array of route records
pub fn parse_country_payload(country: &Country, bytes: &[u8]) -> Result<Vec<RawRouteRecord>> {
    serde_json::from_slice(bytes)
        .map_err(|e| Error::json(format!("Malformed route data for {}", country.name), e))
}

// =============================================================================
// Directory source
// =============================================================================

/// Reads `<root>/<Country Name>.json` files
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding a country's records
    pub fn country_file(&self, country: &Country) -> PathBuf {
        self.root
            .join(format!("{}.{}", country.name, COUNTRY_FILE_EXTENSION))
    }
}

impl DataSource for DirectorySource {
    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }

    async fn fetch_country(&self, country: &Country) -> Result<Vec<RawRouteRecord>> {
        let path = self.country_file(country);
        debug!("Reading {}", path.display());

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;

        parse_country_payload(country, &bytes)
    }
}

// =============================================================================
// HTTP source
// =============================================================================

/// Fetches `<base_url><country code>` over HTTP
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Download URL for a country
    pub fn country_url(&self, country: &Country) -> String {
        format!("{}{}", self.base_url, country.code)
    }

    /// Download a country's payload without parsing it
    ///
    /// # Errors
    /// * `Error::Http` on transport failure
    /// * `Error::DataSource` on a non-success status
    pub async fn download_raw(&self, country: &Country) -> Result<Vec<u8>> {
        let url = self.country_url(country);
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::http(format!("Request for {} failed", country.name), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::data_source(
                &country.name,
                format!("bad status {} from {}", status, url),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::http(format!("Reading body for {} failed", country.name), e))?;

        Ok(bytes.to_vec())
    }
}

impl DataSource for HttpSource {
    fn describe(&self) -> String {
        format!("remote {}", self.base_url)
    }

    async fn fetch_country(&self, country: &Country) -> Result<Vec<RawRouteRecord>> {
        let bytes = self.download_raw(country).await?;
        parse_country_payload(country, &bytes)
    }
}
