//! HTTP transport for chat messages.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use relay_common::config::WebhookConfig;
use relay_common::error::RelayError;

use crate::message::OutgoingMessage;

/// Anything that can deliver an [`OutgoingMessage`].
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), RelayError>;
}

/// Incoming-webhook client.
///
/// No request timeout is configured: a hung endpoint blocks the caller until
/// the connection fails.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    config: WebhookConfig,
}

impl WebhookClient {
    pub fn new(config: WebhookConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn with_client(config: WebhookConfig, client: reqwest::Client) -> Self {
        Self { client, config }
    }

    pub fn endpoint(&self) -> &str {
        self.config.endpoint_url.as_str()
    }
}

#[async_trait]
impl MessageSender for WebhookClient {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), RelayError> {
        let body = message.encode()?;

        let response = self
            .client
            .post(self.config.endpoint_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                endpoint = %self.config.endpoint_url,
                status = %status,
                "Webhook rejected message"
            );
            return Err(RelayError::Webhook {
                status: status.as_u16(),
            });
        }

        tracing::debug!(
            channel = message.channel.as_deref().unwrap_or("default"),
            "Webhook message delivered"
        );

        Ok(())
    }
}
