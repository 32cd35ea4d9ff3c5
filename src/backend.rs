//! HTTP access to the chat backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatReply {
    pub response: String,
    pub timestamp: Option<String>,
}

/// The remote collaborator as the session sees it. The session never
/// distinguishes failure causes, so both operations collapse bad statuses
/// and transport errors into a single error string.
#[async_trait]
pub trait ChatBackend {
    /// One idempotent reachability check against the health endpoint.
    async fn health(&self) -> Result<(), String>;

    /// One chat turn. `message` is sent exactly as typed, untrimmed.
    async fn chat(&self, message: &str) -> Result<ChatReply, String>;
}

/// Production backend speaking JSON over HTTP to the Flask server.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn health(&self) -> Result<(), String> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        debug!(status = %response.status(), "health check response");
        if response.status().is_success() {
            Ok(())
        } else {
            Err(format!("health endpoint returned {}", response.status()))
        }
    }

    async fn chat(&self, message: &str) -> Result<ChatReply, String> {
        let url = format!("{}/chat", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("chat endpoint returned {}", response.status()));
        }

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| e.to_string())
    }
}
