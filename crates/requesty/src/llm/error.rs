//! Completion error types.

use thiserror::Error;

use crate::credentials::CredentialError;

/// A failed completion call, tagged with the model it targeted.
#[derive(Debug, Error)]
#[error("failed to get response from {model}: {kind}")]
pub struct CompletionError {
    pub model: String,
    pub kind: CompletionErrorKind,
}

impl CompletionError {
    /// Raw upstream body, when the router answered at all.
    pub fn raw_body(&self) -> Option<&str> {
        match &self.kind {
            CompletionErrorKind::RequestFailed { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Errors that can occur when making a completion call.
#[derive(Debug, Error)]
pub enum CompletionErrorKind {
    /// No API key configured
    #[error(transparent)]
    MissingCredential(#[from] CredentialError),

    /// HTTP request failed, or a success body could not be read
    #[error("http request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status or an unparsable body. `body` is the raw payload,
    /// empty if it could not be read.
    #[error("API request failed (status {status}, {reason}): {body}")]
    RequestFailed {
        status: u16,
        reason: String,
        body: String,
    },

    /// Valid response with no choices
    #[error("response contained no completion choices")]
    EmptyCompletion,
}
