//! Interfaces to the content platform.
//!
//! The relay never talks to the platform directly. Hosts supply an
//! [`EventSource`] for subscriptions and a [`ContentRepository`] that opens a
//! short-lived [`ContentSession`] per notification job.

use std::ops::Deref;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use relay_common::error::RelayError;
use relay_common::types::{Comment, PlatformEvent, Task};

/// Callback invoked by an event source for every event on a subscribed topic.
///
/// Runs on the event source's thread and must not block.
pub type EventHandler = Arc<dyn Fn(&PlatformEvent) + Send + Sync>;

/// Opaque registration token returned by [`EventSource::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(Uuid);

impl SubscriptionHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubscriptionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Platform event bus.
pub trait EventSource: Send + Sync {
    /// Register `handler` for every event published on `topic`.
    fn subscribe(&self, topic: &str, handler: EventHandler) -> SubscriptionHandle;

    /// Remove a registration. Unknown handles are ignored.
    fn unsubscribe(&self, handle: SubscriptionHandle);
}

/// Per-job view of the content platform.
#[async_trait]
pub trait ContentSession: Send + Sync {
    /// Fetch a workflow task. `None` if it no longer exists.
    async fn task(&self, task_id: &str) -> Result<Option<Task>, RelayError>;

    /// Fetch a comment by its storage path. `None` if it no longer exists.
    async fn comment(&self, comment_path: &str) -> Result<Option<Comment>, RelayError>;

    /// Absolute author-instance link for a path, e.g. the notifications inbox.
    fn author_link(&self, path: &str) -> String;

    /// Editor link for an asset folder, if the session may view it.
    async fn asset_edit_link(&self, asset_path: &str) -> Result<Option<String>, RelayError>;

    /// Release the underlying platform handle.
    fn close(&mut self);
}

/// Source of content sessions.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn open_session(&self) -> Result<Box<dyn ContentSession>, RelayError>;
}

/// Scope guard that closes a [`ContentSession`] when dropped, including when
/// the owning job returns early, fails or panics.
pub struct SessionGuard {
    session: Box<dyn ContentSession>,
}

impl SessionGuard {
    pub async fn open(repository: &dyn ContentRepository) -> Result<Self, RelayError> {
        let session = repository.open_session().await?;
        tracing::trace!("Content session opened");
        Ok(Self { session })
    }
}

impl Deref for SessionGuard {
    type Target = dyn ContentSession;

    fn deref(&self) -> &Self::Target {
        self.session.as_ref()
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.session.close();
        tracing::trace!("Content session released");
    }
}
