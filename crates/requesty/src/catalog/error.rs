//! Catalog error types.

use thiserror::Error;

use crate::credentials::CredentialError;

/// Errors that can occur while loading the model catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog body could not be decoded into a JSON array.
    #[error("malformed catalog: {0}")]
    Malformed(#[from] MalformedCatalog),

    /// An element of the catalog failed validation. The whole batch is rejected.
    #[error("invalid catalog entry at index {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    /// Network failure or non-success status from the catalog endpoint.
    #[error("catalog endpoint unavailable: {message}")]
    Unavailable {
        status: Option<u16>,
        message: String,
    },

    /// No API key to authorize the fetch.
    #[error(transparent)]
    MissingCredential(#[from] CredentialError),
}

/// Why a catalog body was rejected before entry validation.
#[derive(Debug, Error)]
pub enum MalformedCatalog {
    /// The response body is not JSON.
    #[error("body is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The body decoded to a string whose contents are not JSON.
    #[error("double-encoded body is not valid JSON: {0}")]
    InvalidInnerJson(#[source] serde_json::Error),

    /// The decoded document is not an array.
    #[error("expected an array of models, found {0}")]
    NotAnArray(&'static str),
}
