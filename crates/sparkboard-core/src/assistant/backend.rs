//! Chat proxy client.
//!
//! The proxy takes `{"messages": [{role, content}, ...]}` and answers
//! `{"message": "..."}`. Provider keys live on the proxy, never here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ConfigError, CoreError, UpstreamError};
use crate::records::ChatMessage;
use crate::storage::ChatConfig;

const SERVICE: &str = "chat";

/// Anything that can turn a conversation into one reply.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Returns `Ok(None)` when the service answered successfully but
    /// without a reply text.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, UpstreamError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the chat proxy.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    endpoint: Url,
}

impl ChatClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, CoreError> {
        let endpoint = Url::parse(endpoint).map_err(|e| ConfigError::InvalidValue {
            key: "chat.endpoint".to_string(),
            message: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Transport {
                service: SERVICE,
                message: e.to_string(),
            })?;
        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &ChatConfig) -> Result<Self, CoreError> {
        Self::new(&config.endpoint, Duration::from_secs(config.timeout_secs))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for ChatClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, UpstreamError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&ChatRequest { messages })
            .send()
            .await
            .map_err(|e| UpstreamError::Transport {
                service: SERVICE,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| UpstreamError::Transport {
            service: SERVICE,
            message: e.to_string(),
        })?;
        let reply: ChatReply =
            serde_json::from_str(&body).map_err(|e| UpstreamError::Malformed {
                service: SERVICE,
                message: e.to_string(),
            })?;
        Ok(reply.message)
    }
}
