use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use tokio::fs;

use serde::Deserialize;
use thiserror::Error;

use crate::credentials::{CredentialProvider, EnvCredentials, StaticCredentials};

// ============================================================================
// Config (root)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

impl Config {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ConfigError::Io(e)),
        };
        Ok(serde_saphyr::from_str(&contents)?)
    }

    /// Build the credential collaborator described by this config.
    ///
    /// A literal `api_key` wins over the environment variable. The key itself
    /// is resolved lazily on every request.
    pub fn credentials(&self) -> Arc<dyn CredentialProvider> {
        match &self.credentials.api_key {
            Some(key) => Arc::new(StaticCredentials::new(Some(key.clone()))),
            None => Arc::new(EnvCredentials::new(self.credentials.api_key_env.clone())),
        }
    }
}

// ============================================================================
// RouterConfig
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RouterConfig {
    #[serde(default = "default_completions_url")]
    pub completions_url: String,
    #[serde(default = "default_models_url")]
    pub models_url: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            completions_url: default_completions_url(),
            models_url: default_models_url(),
        }
    }
}

fn default_completions_url() -> String {
    "https://router.requesty.ai/v1/chat/completions".to_string()
}

fn default_models_url() -> String {
    "https://router.requesty.ai/v1/models".to_string()
}

// ============================================================================
// CredentialsConfig
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CredentialsConfig {
    /// Literal API key. Prefer `api_key_env` outside of local experiments.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: default_api_key_env(),
        }
    }
}

fn default_api_key_env() -> String {
    "REQUESTY_API_KEY".to_string()
}

// ============================================================================
// ConfigError
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_saphyr::Error),
}

// ============================================================================
// Tests
// ============================================================================
