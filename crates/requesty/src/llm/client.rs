//! Single-shot chat completion client.

use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, warn};

use super::error::{CompletionError, CompletionErrorKind};
use super::types::{ChatRequest, ChatResponse, Message};
use crate::credentials::{CredentialProvider, mask_key};

/// Sampling temperature sent with every request.
pub const TEMPERATURE: f32 = 0.7;

/// Issues chat completions against the router's OpenAI-compatible endpoint.
pub struct CompletionClient {
    client: Client,
    completions_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl CompletionClient {
    #[must_use]
    pub fn new(
        client: Client,
        completions_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            client,
            completions_url: completions_url.into(),
            credentials,
        }
    }

    /// Send `messages` to `model` and return the first choice's content verbatim.
    pub async fn complete(
        &self,
        model: &str,
        messages: &[Message],
    ) -> Result<String, CompletionError> {
        self.send(model, messages).await.map_err(|kind| {
            warn!(model = %model, error = %kind, "Completion request failed");
            CompletionError {
                model: model.to_string(),
                kind,
            }
        })
    }

    async fn send(&self, model: &str, messages: &[Message]) -> Result<String, CompletionErrorKind> {
        let api_key = self.credentials.api_key().await?;

        let request = ChatRequest {
            model,
            messages,
            temperature: TEMPERATURE,
        };
        debug!(
            url = %self.completions_url,
            key = %mask_key(&api_key),
            body = %serde_json::to_string(&request).unwrap_or_default(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(&self.completions_url)
            .header("Content-Type", "application/json")
            .bearer_auth(&api_key)
            .json(&request)
            .send()
            .await?;

        // Keep the raw payload whatever the outcome.
        let status = response.status().as_u16();
        let success = response.status().is_success();
        let raw = match response.text().await {
            Ok(raw) => raw,
            Err(e) if !success => {
                return Err(CompletionErrorKind::RequestFailed {
                    status,
                    reason: format!("failed to read body: {e}"),
                    body: String::new(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        debug!(status, body = %raw, "Raw completion response");

        if !success {
            return Err(CompletionErrorKind::RequestFailed {
                status,
                reason: "non-success status".to_string(),
                body: raw,
            });
        }

        let parsed: ChatResponse = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                return Err(CompletionErrorKind::RequestFailed {
                    status,
                    reason: format!("invalid response body: {e}"),
                    body: raw,
                });
            }
        };

        if let Some(usage) = &parsed.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Completion usage"
            );
        }

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(CompletionErrorKind::EmptyCompletion)
    }
}
