//! Relays content-platform events to a chat webhook.
//!
//! Pipeline: platform event → [`subscription`] filter → [`worker`] queue →
//! [`processor`] (collaborator lookups + [`formatter`]) → webhook.

pub mod bus;
pub mod collaborators;
pub mod formatter;
pub mod identity;
pub mod processor;
pub mod relay;
pub mod subscription;
pub mod worker;

pub use bus::EventBus;
pub use identity::IdentityMap;
pub use processor::{NotificationProcessor, Outcome};
pub use relay::Relay;
pub use worker::DeliveryWorker;
