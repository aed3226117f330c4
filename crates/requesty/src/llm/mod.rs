//! Chat completions against the router.

mod client;
mod error;
mod types;

pub use client::{CompletionClient, TEMPERATURE};
pub use error::{CompletionError, CompletionErrorKind};
pub use types::{ChatRequest, ChatResponse, Choice, ChoiceMessage, Message, Role, Usage};
