//! Notification job body.
//!
//! For each accepted event:
//! 1. Open a content session (closed when the job ends, however it ends)
//! 2. Fetch the task or comment and generate the relevant link
//! 3. Build the message via the formatter, or decide to drop the event
//! 4. Send the message through the configured sender

use std::sync::Arc;

use relay_common::error::RelayError;
use relay_common::types::NotificationEvent;
use relay_notifier::{MessageSender, OutgoingMessage};

use crate::collaborators::{ContentRepository, SessionGuard};
use crate::formatter::{self, DropReason, NOTIFICATIONS_PAGE};
use crate::identity::IdentityMap;

/// Result of a job that ran without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Sent,
    Dropped(DropReason),
}

/// Turns notification events into delivered chat messages.
pub struct NotificationProcessor {
    repository: Arc<dyn ContentRepository>,
    identities: Arc<IdentityMap>,
    sender: Arc<dyn MessageSender>,
}

impl NotificationProcessor {
    pub fn new(
        repository: Arc<dyn ContentRepository>,
        identities: Arc<IdentityMap>,
        sender: Arc<dyn MessageSender>,
    ) -> Self {
        Self {
            repository,
            identities,
            sender,
        }
    }

    /// Process one event: at most one message is sent.
    pub async fn process(&self, event: &NotificationEvent) -> Result<Outcome, RelayError> {
        let session = SessionGuard::open(self.repository.as_ref()).await?;

        let decision = match event {
            NotificationEvent::TaskCreated { task_id } => {
                self.task_message(&session, task_id).await?
            }
            NotificationEvent::CommentCreated { comment_path } => {
                self.comment_message(&session, comment_path).await?
            }
        };

        let message = match decision {
            Ok(message) => message,
            Err(reason) => {
                tracing::debug!(event = %event, reason = %reason, "Notification dropped");
                return Ok(Outcome::Dropped(reason));
            }
        };

        self.sender.send(&message).await?;

        tracing::info!(
            event = %event,
            channel = message.channel.as_deref().unwrap_or("default"),
            "Notification sent"
        );

        Ok(Outcome::Sent)
    }

    async fn task_message(
        &self,
        session: &SessionGuard,
        task_id: &str,
    ) -> Result<Result<OutgoingMessage, DropReason>, RelayError> {
        let Some(task) = session.task(task_id).await? else {
            return Ok(Err(DropReason::TaskNotFound));
        };

        let inbox_link = session.author_link(NOTIFICATIONS_PAGE);
        Ok(formatter::task_message(&task, &self.identities, &inbox_link))
    }

    async fn comment_message(
        &self,
        session: &SessionGuard,
        comment_path: &str,
    ) -> Result<Result<OutgoingMessage, DropReason>, RelayError> {
        let Some(comment) = session.comment(comment_path).await? else {
            return Ok(Err(DropReason::CommentNotFound));
        };

        if !formatter::is_asset_path(&comment.target_path) {
            return Ok(Err(DropReason::TargetNotAsset));
        }

        let Some(viewer_link) = session.asset_edit_link(&comment.target_parent_path).await? else {
            return Ok(Err(DropReason::NoViewerLink));
        };

        Ok(Ok(formatter::comment_message(
            &comment,
            &self.identities,
            &viewer_link,
        )))
    }
}
