//! Generation client — the single point of entry for all text-generation
//! backend calls in the enricher.
//!
//! ARCHITECTURAL RULE: no other module may call the backend directly.
//! All generation goes through the `TextGenerator` trait.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors from a single generation call. There is no retry: a failed call
/// fails the listing currently being processed.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("transport error calling generation backend: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("generation backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode generation backend reply: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Seam over the generation backend so the pipeline can run against a
/// scripted fake in tests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateReply {
    #[serde(default)]
    response: String,
}

/// Client for an Ollama-compatible `/api/generate` endpoint.
///
/// Endpoint and model name are explicit configuration passed in at
/// construction — no process-wide state, stateless across calls. No timeout
/// and no retry: each prompt is one blocking call whose failure surfaces on
/// the current listing only.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request_body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request_body)
            .send()
            .await
            .map_err(GenerationError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let reply: GenerateReply = response.json().await.map_err(GenerationError::Decode)?;

        debug!("generation call returned {} chars", reply.response.len());

        Ok(reply.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn client_for(server: &Server) -> OllamaClient {
        OllamaClient::new(server.url(), "llama3.2".to_string())
    }

    #[tokio::test]
    async fn test_generate_success() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/generate")
            .match_body(Matcher::Json(serde_json::json!({
                "model": "llama3.2",
                "prompt": "test prompt",
                "stream": false,
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"response": "TITLE: A\nDESCRIPTION: B", "done": true}"#)
            .create_async()
            .await;

        let result = client_for(&server).generate("test prompt").await;
        assert_eq!(result.unwrap(), "TITLE: A\nDESCRIPTION: B");
    }

    #[tokio::test]
    async fn test_generate_missing_response_field_yields_empty_string() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/generate")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"done": true}"#)
            .create_async()
            .await;

        let result = client_for(&server).generate("test prompt").await;
        assert_eq!(result.unwrap(), "");
    }

    #[tokio::test]
    async fn test_generate_http_error_is_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/generate")
            .with_status(503)
            .with_body("backend overloaded")
            .create_async()
            .await;

        let result = client_for(&server).generate("test prompt").await;
        match result.unwrap_err() {
            GenerationError::Status { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "backend overloaded");
            }
            other => panic!("expected Status error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_invalid_json_is_decode() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/generate")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json at all")
            .create_async()
            .await;

        let result = client_for(&server).generate("test prompt").await;
        assert!(matches!(result.unwrap_err(), GenerationError::Decode(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = OllamaClient::new("http://ollama:11434/".to_string(), "llama3.2".to_string());
        assert_eq!(client.base_url, "http://ollama:11434");
    }
}
