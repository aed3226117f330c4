//! Requesty - client for the Requesty LLM router.
//!
//! Discovers priced models, runs single-shot chat completions and estimates
//! what an exchange costs.

pub mod catalog;
pub mod config;
pub mod cost;
pub mod credentials;
pub mod llm;

#[cfg(test)]
mod testing;

pub use catalog::{CatalogError, ModelCatalog, ModelEntry, Pricing};
pub use config::Config;
pub use cost::{CostBreakdown, CostEstimator, estimate_tokens};
pub use credentials::{CredentialError, CredentialProvider};
pub use llm::{CompletionClient, CompletionError, Message, Role};
