//! API key resolution for the router.

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while resolving an API key.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// No key is configured at the named source.
    #[error("no API key configured ({source_name})")]
    Missing { source_name: String },
}

/// Source of the router API key.
///
/// Callers resolve the key on every request and never cache it. Keys are
/// returned trimmed of surrounding whitespace.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn api_key(&self) -> Result<String, CredentialError>;
}

/// Reads the key from an environment variable at call time.
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentials {
    async fn api_key(&self) -> Result<String, CredentialError> {
        match std::env::var(&self.var) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(CredentialError::Missing {
                source_name: format!("environment variable {}", self.var),
            }),
        }
    }
}

/// A fixed key, or none at all.
pub struct StaticCredentials {
    key: Option<String>,
}

impl StaticCredentials {
    pub fn new(key: Option<String>) -> Self {
        Self { key }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn api_key(&self) -> Result<String, CredentialError> {
        match &self.key {
            Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(CredentialError::Missing {
                source_name: "static key".to_string(),
            }),
        }
    }
}

/// Render a key for logs: first and last four characters only.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
