use reqwest::Url;

use crate::error::RelayError;

/// Outbound webhook settings. Set once at activation, read by every job.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// Incoming-webhook URL provided by the chat service
    pub endpoint_url: Url,
}

impl WebhookConfig {
    /// Parse and validate the webhook endpoint. A missing or blank URL is fatal.
    pub fn new(endpoint_url: &str) -> Result<Self, RelayError> {
        let trimmed = endpoint_url.trim();
        if trimmed.is_empty() {
            return Err(RelayError::Config("Webhook URL is not defined".to_string()));
        }

        let endpoint_url = Url::parse(trimmed)
            .map_err(|e| RelayError::Config(format!("Invalid webhook URL '{}': {}", trimmed, e)))?;

        match endpoint_url.scheme() {
            "http" | "https" => Ok(Self { endpoint_url }),
            other => Err(RelayError::Config(format!(
                "Webhook URL must use http or https, got '{}'",
                other
            ))),
        }
    }
}

/// Relay configuration supplied by the host.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub webhook: WebhookConfig,

    /// Raw `platformUser=messagingUser` entries
    pub username_mappings: Vec<String>,
}

impl RelayConfig {
    pub fn new(webhook_url: &str, username_mappings: Vec<String>) -> Result<Self, RelayError> {
        Ok(Self {
            webhook: WebhookConfig::new(webhook_url)?,
            username_mappings,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// - `RELAY_WEBHOOK_URL` (required)
    /// - `RELAY_USERNAME_MAPPING`: comma separated `platformUser=messagingUser` entries
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let webhook_url = std::env::var("RELAY_WEBHOOK_URL")
            .map_err(|_| anyhow::anyhow!("RELAY_WEBHOOK_URL environment variable is required"))?;
        let username_mappings = std::env::var("RELAY_USERNAME_MAPPING")
            .map(|raw| split_mapping_list(&raw))
            .unwrap_or_default();

        Ok(Self::new(&webhook_url, username_mappings)?)
    }
}

fn split_mapping_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
