//! Relay lifecycle: activation wires configuration, worker and listeners
//! together; deactivation tears them down.

use std::sync::Arc;

use relay_common::config::RelayConfig;
use relay_common::error::RelayError;
use relay_notifier::{MessageSender, WebhookClient};

use crate::collaborators::{ContentRepository, EventSource, SubscriptionHandle};
use crate::identity::IdentityMap;
use crate::processor::NotificationProcessor;
use crate::subscription;
use crate::worker::DeliveryWorker;

/// A running relay. Listeners stay registered until [`Relay::deactivate`]
/// is called or the relay is dropped.
pub struct Relay {
    source: Arc<dyn EventSource>,
    subscriptions: Vec<SubscriptionHandle>,
    worker: Arc<DeliveryWorker>,
}

impl Relay {
    /// Activate with the webhook transport from `config`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn activate(
        config: RelayConfig,
        repository: Arc<dyn ContentRepository>,
        source: Arc<dyn EventSource>,
    ) -> Result<Self, RelayError> {
        let sender = Arc::new(WebhookClient::new(config.webhook.clone()));
        Self::activate_with_sender(config, repository, sender, source)
    }

    /// Activate with a caller-supplied message sender.
    pub fn activate_with_sender(
        config: RelayConfig,
        repository: Arc<dyn ContentRepository>,
        sender: Arc<dyn MessageSender>,
        source: Arc<dyn EventSource>,
    ) -> Result<Self, RelayError> {
        let identities = Arc::new(IdentityMap::from_entries(&config.username_mappings));
        if identities.is_empty() {
            tracing::warn!("No username mappings configured; task notifications will be dropped");
        }

        let processor = Arc::new(NotificationProcessor::new(repository, identities.clone(), sender));
        let worker = Arc::new(DeliveryWorker::start());
        let subscriptions = subscription::register(source.as_ref(), worker.clone(), processor);

        tracing::info!(
            webhook_host = config.webhook.endpoint_url.host_str().unwrap_or("unknown"),
            mappings = identities.len(),
            "Relay activated"
        );

        Ok(Self {
            source,
            subscriptions,
            worker,
        })
    }

    /// Wait until every notification queued so far has been processed.
    pub async fn flush(&self) -> Result<(), RelayError> {
        self.worker.flush().await
    }

    /// Unregister listeners and stop the worker. Queued notifications that
    /// have not started are abandoned.
    pub fn deactivate(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if self.subscriptions.is_empty() {
            return;
        }

        for handle in self.subscriptions.drain(..) {
            self.source.unsubscribe(handle);
        }
        self.worker.shutdown();

        tracing::info!("Relay deactivated");
    }
}

impl Drop for Relay {
    fn drop(&mut self) {
        self.teardown();
    }
}
