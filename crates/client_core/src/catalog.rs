//! Read-only access to the remote product catalog.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::Product,
    error::{CatalogError, ErrorCode},
    protocol::products_for_grid,
};
use url::Url;

pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches the catalog and returns at most one grid's worth of products.
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError>;
    async fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>, CatalogError>;
}

pub struct HttpCatalog {
    http: Client,
    catalog_url: Url,
}

impl HttpCatalog {
    pub fn new(catalog_url: Url, timeout: Duration) -> Result<Self, CatalogError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| CatalogError::new(ErrorCode::Transport, err.to_string()))?;
        Ok(Self { http, catalog_url })
    }

    pub fn catalog_url(&self) -> &Url {
        &self.catalog_url
    }

    /// Image references may be relative to the catalog endpoint.
    fn resolve_image_url(&self, image_url: &str) -> Result<Url, CatalogError> {
        self.catalog_url.join(image_url).map_err(|err| {
            CatalogError::new(
                ErrorCode::Decode,
                format!("invalid image reference {image_url:?}: {err}"),
            )
        })
    }

    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, CatalogError> {
        let res = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|err| CatalogError::new(ErrorCode::Transport, err.to_string()))?
            .error_for_status()
            .map_err(|err| CatalogError::new(ErrorCode::Status, err.to_string()))?;
        let body = res
            .bytes()
            .await
            .map_err(|err| CatalogError::new(ErrorCode::Transport, err.to_string()))?;
        tracing::debug!(%url, bytes = body.len(), "catalog: fetched");
        Ok(body.to_vec())
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let body = self.get_bytes(self.catalog_url.clone()).await?;
        let entries: Vec<serde_json::Value> = serde_json::from_slice(&body).map_err(|err| {
            CatalogError::new(ErrorCode::Decode, format!("malformed catalog response: {err}"))
        })?;
        let catalog = products_for_grid(entries);
        for skipped in &catalog.skipped {
            tracing::warn!(
                position = skipped.position,
                "catalog: skipping unreadable product entry: {}",
                skipped.reason
            );
        }
        tracing::info!(
            received = catalog.received,
            kept = catalog.products.len(),
            "catalog: products fetched"
        );
        Ok(catalog.products)
    }

    async fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>, CatalogError> {
        let url = self.resolve_image_url(image_url)?;
        self.get_bytes(url).await
    }
}
