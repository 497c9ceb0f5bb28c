//! In-memory collaborators shared by the engine integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use relay_common::error::RelayError;
use relay_common::types::{Comment, Task};
use relay_engine::collaborators::{ContentRepository, ContentSession};
use relay_notifier::{MessageSender, OutgoingMessage};

pub const AUTHOR_HOST: &str = "http://author.example.com";

/// Content the fake platform knows about.
#[derive(Debug, Default)]
pub struct Fixture {
    pub tasks: HashMap<String, Task>,
    pub comments: HashMap<String, Comment>,
    /// Asset folder path → editor link
    pub asset_links: HashMap<String, String>,
    pub fail_lookups: bool,
    pub fail_open: bool,
}

impl Fixture {
    pub fn with_task(mut self, id: &str, description: &str, assignee: &str) -> Self {
        self.tasks.insert(
            id.to_string(),
            Task {
                id: id.to_string(),
                description: description.to_string(),
                current_assignee: assignee.to_string(),
            },
        );
        self
    }

    /// Register a comment on `target_path`; its parent gets an editor link.
    pub fn with_comment(mut self, path: &str, author: &str, message: &str, target_path: &str) -> Self {
        let parent = parent_of(target_path);
        self.asset_links
            .insert(parent.clone(), format!("{}/assets.html{}", AUTHOR_HOST, parent));
        self.comments.insert(
            path.to_string(),
            Comment {
                path: path.to_string(),
                author: author.to_string(),
                message: message.to_string(),
                target_path: target_path.to_string(),
                target_parent_path: parent,
            },
        );
        self
    }

    pub fn without_asset_links(mut self) -> Self {
        self.asset_links.clear();
        self
    }
}

fn parent_of(path: &str) -> String {
    match path.rsplit_once('/') {
        Some(("", _)) | None => "/".to_string(),
        Some((parent, _)) => parent.to_string(),
    }
}

pub struct FakeRepository {
    fixture: Arc<Fixture>,
    pub opened: Arc<AtomicUsize>,
    pub closed: Arc<AtomicUsize>,
}

impl FakeRepository {
    pub fn new(fixture: Fixture) -> Self {
        Self {
            fixture: Arc::new(fixture),
            opened: Arc::new(AtomicUsize::new(0)),
            closed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

struct FakeSession {
    fixture: Arc<Fixture>,
    closed: Arc<AtomicUsize>,
}

#[async_trait]
impl ContentSession for FakeSession {
    async fn task(&self, task_id: &str) -> Result<Option<Task>, RelayError> {
        if self.fixture.fail_lookups {
            return Err(RelayError::Collaborator("task manager unavailable".to_string()));
        }
        Ok(self.fixture.tasks.get(task_id).cloned())
    }

    async fn comment(&self, comment_path: &str) -> Result<Option<Comment>, RelayError> {
        if self.fixture.fail_lookups {
            return Err(RelayError::Collaborator("repository unavailable".to_string()));
        }
        Ok(self.fixture.comments.get(comment_path).cloned())
    }

    fn author_link(&self, path: &str) -> String {
        format!("{}{}", AUTHOR_HOST, path)
    }

    async fn asset_edit_link(&self, asset_path: &str) -> Result<Option<String>, RelayError> {
        Ok(self.fixture.asset_links.get(asset_path).cloned())
    }

    fn close(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ContentRepository for FakeRepository {
    async fn open_session(&self) -> Result<Box<dyn ContentSession>, RelayError> {
        if self.fixture.fail_open {
            return Err(RelayError::Collaborator("login failed".to_string()));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            fixture: self.fixture.clone(),
            closed: self.closed.clone(),
        }))
    }
}

/// Sender that records messages instead of posting them.
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<OutgoingMessage>>,
    failures_left: AtomicUsize,
}

impl RecordingSender {
    /// Fail the next `count` sends with a 500 before recording again.
    pub fn failing(count: usize) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failures_left: AtomicUsize::new(count),
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), RelayError> {
        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(RelayError::Webhook { status: 500 });
        }

        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

pub fn init_tracing() {
    let _ = relay_common::telemetry::init_tracing(false);
}
