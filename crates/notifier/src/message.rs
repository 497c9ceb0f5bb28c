//! Wire payload for incoming-webhook chat messages.

use serde::Serialize;

use relay_common::error::RelayError;

/// A chat message ready to be posted to the webhook.
///
/// When `channel` is `None` the webhook's default channel receives the
/// message. A value such as `@jane.doe` addresses a direct message instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl OutgoingMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            channel: None,
        }
    }

    /// Address the message directly to a chat user (`@username`).
    pub fn direct_to(mut self, username: &str) -> Self {
        self.channel = Some(format!("@{}", username));
        self
    }

    /// Serialize to the JSON body expected by the webhook.
    pub fn encode(&self) -> Result<Vec<u8>, RelayError> {
        if self.text.is_empty() {
            return Err(RelayError::Validation(
                "Message text must not be empty".to_string(),
            ));
        }
        Ok(serde_json::to_vec(self)?)
    }
}
