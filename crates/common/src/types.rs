use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Raw event as delivered by the content platform's event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformEvent {
    pub topic: String,
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl PlatformEvent {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

/// A platform event the relay has decided to act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationEvent {
    TaskCreated { task_id: String },
    CommentCreated { comment_path: String },
}

impl std::fmt::Display for NotificationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationEvent::TaskCreated { task_id } => write!(f, "task_created({})", task_id),
            NotificationEvent::CommentCreated { comment_path } => {
                write!(f, "comment_created({})", comment_path)
            }
        }
    }
}

/// Workflow task as returned by the platform's task manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub description: String,
    pub current_assignee: String,
}

/// Comment as returned by the platform's comment store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub path: String,
    pub author: String,
    pub message: String,
    /// Path of the content the comment was posted on
    pub target_path: String,
    /// Parent of `target_path`, used for viewer links
    pub target_parent_path: String,
}
