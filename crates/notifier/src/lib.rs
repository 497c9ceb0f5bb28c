//! Chat notification delivery.
//!
//! Encodes outgoing messages into the incoming-webhook JSON payload and POSTs
//! them to the configured endpoint. Delivery is best-effort: there is no retry,
//! backoff or persistence of failed messages.

pub mod message;
pub mod webhook;

pub use message::OutgoingMessage;
pub use webhook::{MessageSender, WebhookClient};
