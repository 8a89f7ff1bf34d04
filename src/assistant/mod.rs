//! Chat assistant backed by an external language model endpoint.
//!
//! The platform only needs "send a prompt, get the completion text". Calls are
//! awaited inline with no timeout and no retry.

pub mod ollama;

pub use ollama::OllamaAssistant;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected http status: {status}")]
    Http { status: u16 },
    #[error("parse error: {0}")]
    Parse(String),
}

#[async_trait]
pub trait Assistant: Send + Sync {
    async fn ask(&self, prompt: &str) -> Result<String, AssistantError>;
}
