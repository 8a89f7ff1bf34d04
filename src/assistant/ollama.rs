//! Client for an Ollama-style `/api/generate` endpoint.

use super::{Assistant, AssistantError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OllamaAssistant {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaAssistant {
    pub fn new(base_url: String, model: String) -> Self {
        Self::with_client(Client::new(), base_url, model)
    }

    /// Use a preconfigured HTTP client, e.g. one with proxies or TLS settings changed.
    pub fn with_client(client: Client, base_url: String, model: String) -> Self {
        Self {
            client,
            base_url,
            model,
        }
    }

    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }

    /// Concatenate the `response` pieces of a newline-delimited JSON reply.
    ///
    /// Lines without a `response` field (such as the final `done` line) add nothing.
    pub fn parse_generate_stream(body: &str) -> Result<String, AssistantError> {
        let mut reply = String::new();
        for line in body.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let chunk: GenerateChunk =
                serde_json::from_str(line).map_err(|e| AssistantError::Parse(e.to_string()))?;
            if let Some(piece) = chunk.response {
                reply.push_str(&piece);
            }
        }
        Ok(reply)
    }
}

#[async_trait]
impl Assistant for OllamaAssistant {
    async fn ask(&self, prompt: &str) -> Result<String, AssistantError> {
        let url = self.generate_url();
        debug!(url = %url, model = %self.model, "Sending prompt to assistant");

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
            })
            .send()
            .await
            .map_err(|e| AssistantError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssistantError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AssistantError::Network(e.to_string()))?;
        Self::parse_generate_stream(&body)
    }
}
