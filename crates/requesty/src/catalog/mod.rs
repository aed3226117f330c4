//! Model catalog: available models and their per-million-token prices.
//!
//! The catalog is fetched once per [`ModelCatalog`] and cached for its
//! lifetime. Listing exposes only models priced on both axes; lookups also
//! see the unpriced entries kept in the cache.

mod cache;
mod decode;
mod entry;
mod error;

use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::credentials::{CredentialProvider, StaticCredentials, mask_key};
use decode::decode_catalog;

pub use cache::CatalogCache;
pub use entry::{ModelEntry, Pricing, compare_entries, last_segment, sort_entries};
pub use error::{CatalogError, MalformedCatalog};

/// Fetches, normalizes and caches the router's model catalog.
pub struct ModelCatalog {
    client: Client,
    models_url: String,
    credentials: Arc<dyn CredentialProvider>,
    cache: CatalogCache,
}

impl ModelCatalog {
    #[must_use]
    pub fn new(
        client: Client,
        models_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self::with_cache(client, models_url, credentials, CatalogCache::new())
    }

    /// Build a catalog around an existing cache.
    #[must_use]
    pub fn with_cache(
        client: Client,
        models_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
        cache: CatalogCache,
    ) -> Self {
        Self {
            client,
            models_url: models_url.into(),
            credentials,
            cache,
        }
    }

    /// An offline catalog pre-seeded with `entries`. It never fetches.
    #[must_use]
    pub fn with_entries(entries: Vec<ModelEntry>) -> Self {
        Self::with_cache(
            Client::new(),
            String::new(),
            Arc::new(StaticCredentials::new(None)),
            CatalogCache::seeded(entries),
        )
    }

    /// Identifiers of every purchasable model, in listing order.
    ///
    /// The first successful call fetches the catalog; later calls are served
    /// from the cache.
    pub async fn list_models(&self) -> Result<Vec<String>, CatalogError> {
        let entries = self.cache.get_or_try_populate(|| self.fetch()).await?;
        Ok(entries
            .iter()
            .filter(|e| e.is_purchasable())
            .map(ModelEntry::identifier)
            .collect())
    }

    /// Prices for `identifier`, or `None` if the cache is unset or nothing matches.
    ///
    /// Matches on provider, then on the last path segment of the model name, so
    /// both `together/Llama-3-70b` and `together/meta-llama/Llama-3-70b` resolve.
    /// A purchasable match wins over an unpriced one.
    pub fn get_pricing(&self, identifier: &str) -> Option<Pricing> {
        let entries = self.cache.get()?;
        let (provider, display_model) = identifier.split_once('/')?;
        let wanted = last_segment(display_model);

        let matches: Vec<&ModelEntry> = entries
            .iter()
            .filter(|e| e.provider == provider)
            .filter(|e| last_segment(&e.model) == wanted)
            .collect();

        matches
            .iter()
            .find(|e| e.is_purchasable())
            .or_else(|| matches.first())
            .map(|e| e.pricing())
    }

    /// Cached entries, including unpriced ones. `None` until the first fetch.
    pub fn entries(&self) -> Option<&[ModelEntry]> {
        self.cache.get()
    }

    async fn fetch(&self) -> Result<Vec<ModelEntry>, CatalogError> {
        let api_key = self.credentials.api_key().await?;
        debug!(url = %self.models_url, key = %mask_key(&api_key), "Fetching model catalog");

        let response = self
            .client
            .get(&self.models_url)
            .bearer_auth(&api_key)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Catalog request failed");
                CatalogError::Unavailable {
                    status: None,
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Unavailable {
                status: Some(status.as_u16()),
                message: format!("failed to read body: {e}"),
            })?;
        debug!(status = status.as_u16(), body = %body, "Raw catalog response");

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                "Catalog endpoint returned an error"
            );
            return Err(CatalogError::Unavailable {
                status: Some(status.as_u16()),
                message: format!("status {}: {}", status.as_u16(), body),
            });
        }

        let entries = decode_catalog(&body)?;
        info!(entries = entries.len(), "Model catalog loaded");
        Ok(entries)
    }
}
