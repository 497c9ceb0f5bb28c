//! Message construction for task and comment notifications.
//!
//! Pure functions: collaborator lookups happen in the processor, which passes
//! the fetched task/comment and generated links in here.

use relay_common::types::{Comment, Task};
use relay_notifier::OutgoingMessage;

use crate::identity::IdentityMap;

/// Root of the DAM asset tree. Only comments on assets are relayed.
pub const ASSET_ROOT: &str = "/content/dam";

/// Inbox page linked from task notifications.
pub const NOTIFICATIONS_PAGE: &str = "/notifications.html";

/// Why a notification job ended without sending anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    TaskNotFound,
    AssigneeUnmapped,
    CommentNotFound,
    TargetNotAsset,
    NoViewerLink,
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropReason::TaskNotFound => write!(f, "task_not_found"),
            DropReason::AssigneeUnmapped => write!(f, "assignee_unmapped"),
            DropReason::CommentNotFound => write!(f, "comment_not_found"),
            DropReason::TargetNotAsset => write!(f, "target_not_asset"),
            DropReason::NoViewerLink => write!(f, "no_viewer_link"),
        }
    }
}

/// Whether `path` is the asset root or lies beneath it.
pub fn is_asset_path(path: &str) -> bool {
    match path.strip_prefix(ASSET_ROOT) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Direct message to the task's assignee, or nothing if they have no chat identity.
pub fn task_message(
    task: &Task,
    identities: &IdentityMap,
    inbox_link: &str,
) -> Result<OutgoingMessage, DropReason> {
    let chat_user = identities
        .resolve(&task.current_assignee)
        .ok_or(DropReason::AssigneeUnmapped)?;

    let text = format!(
        "New task received. {} Click <{}|here> to view your task list.",
        task.description, inbox_link
    );

    Ok(OutgoingMessage::new(text).direct_to(chat_user))
}

/// Default-channel message announcing a comment on an asset.
///
/// Mapped authors are mentioned (`<@user>`); unmapped authors appear by their
/// platform username.
pub fn comment_message(
    comment: &Comment,
    identities: &IdentityMap,
    viewer_link: &str,
) -> OutgoingMessage {
    let author = match identities.resolve(&comment.author) {
        Some(chat_user) => format!("<@{}>", chat_user),
        None => comment.author.clone(),
    };

    OutgoingMessage::new(format!(
        "User {} created comment '{}'. Click <{}|here> to view the asset.",
        author, comment.message, viewer_link
    ))
}
