//! In-process [`EventSource`] for hosts without their own event bus.

use std::sync::{PoisonError, RwLock};

use relay_common::types::PlatformEvent;

use crate::collaborators::{EventHandler, EventSource, SubscriptionHandle};

struct Registration {
    handle: SubscriptionHandle,
    topic: String,
    handler: EventHandler,
}

/// Synchronous topic-based event bus. Handlers run on the publishing thread.
#[derive(Default)]
pub struct EventBus {
    registrations: RwLock<Vec<Registration>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every handler subscribed to its exact topic.
    /// Returns the number of handlers invoked.
    pub fn publish(&self, event: &PlatformEvent) -> usize {
        let handlers: Vec<EventHandler> = self
            .registrations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.topic == event.topic)
            .map(|r| r.handler.clone())
            .collect();

        for handler in &handlers {
            handler(event);
        }

        handlers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.registrations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl EventSource for EventBus {
    fn subscribe(&self, topic: &str, handler: EventHandler) -> SubscriptionHandle {
        let handle = SubscriptionHandle::new();
        self.registrations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Registration {
                handle,
                topic: topic.to_string(),
                handler,
            });

        tracing::debug!(topic, handle = %handle, "Subscribed");
        handle
    }

    fn unsubscribe(&self, handle: SubscriptionHandle) {
        self.registrations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|r| r.handle != handle);

        tracing::debug!(handle = %handle, "Unsubscribed");
    }
}
