//! Event subscriptions — turn raw platform events into queued notification jobs.
//!
//! Two independent, stateless listeners:
//! - task events with type `TASK_CREATED` → [`NotificationEvent::TaskCreated`]
//! - comment-posted events → [`NotificationEvent::CommentCreated`]
//!
//! Listeners only filter and enqueue. All platform I/O happens later on the
//! delivery worker.

use std::sync::Arc;

use relay_common::types::{NotificationEvent, PlatformEvent};

use crate::collaborators::{EventHandler, EventSource, SubscriptionHandle};
use crate::processor::NotificationProcessor;
use crate::worker::DeliveryWorker;

/// Topic carrying all task-management events.
pub const TASK_TOPIC: &str = "com/adobe/granite/taskmanagement/event";
pub const TASK_ID_PROPERTY: &str = "TaskId";
pub const TASK_EVENT_TYPE_PROPERTY: &str = "TaskEventType";
pub const TASK_CREATED: &str = "TASK_CREATED";

/// Topic for newly posted comments.
pub const COMMENT_TOPIC: &str = "com/adobe/granite/comments/commented";
pub const COMMENT_PATH_PROPERTY: &str = "commentPath";

/// Accept task events of type `TASK_CREATED` that carry a task id.
pub fn task_created(event: &PlatformEvent) -> Option<NotificationEvent> {
    if event.topic != TASK_TOPIC || event.property(TASK_EVENT_TYPE_PROPERTY) != Some(TASK_CREATED) {
        return None;
    }

    let task_id = event.property(TASK_ID_PROPERTY)?;
    Some(NotificationEvent::TaskCreated {
        task_id: task_id.to_string(),
    })
}

/// Accept comment-posted events that carry the comment's storage path.
pub fn comment_created(event: &PlatformEvent) -> Option<NotificationEvent> {
    if event.topic != COMMENT_TOPIC {
        return None;
    }

    let comment_path = event.property(COMMENT_PATH_PROPERTY)?;
    Some(NotificationEvent::CommentCreated {
        comment_path: comment_path.to_string(),
    })
}

/// Queue a processing job for an accepted event.
pub fn enqueue(worker: &DeliveryWorker, processor: Arc<NotificationProcessor>, event: NotificationEvent) {
    let label = event.to_string();
    let result = worker.submit(label.clone(), async move {
        processor.process(&event).await.map(|_| ())
    });

    if let Err(e) = result {
        tracing::warn!(event = %label, error = %e, "Notification not queued");
    }
}

/// Build a handler that filters with `accept` and enqueues matches.
fn listener(
    accept: fn(&PlatformEvent) -> Option<NotificationEvent>,
    worker: Arc<DeliveryWorker>,
    processor: Arc<NotificationProcessor>,
) -> EventHandler {
    Arc::new(move |event: &PlatformEvent| {
        if let Some(notification) = accept(event) {
            enqueue(&worker, processor.clone(), notification);
        }
    })
}

/// Register both listeners on `source`. Returns the handles in
/// registration order (comments, then tasks).
pub fn register(
    source: &dyn EventSource,
    worker: Arc<DeliveryWorker>,
    processor: Arc<NotificationProcessor>,
) -> Vec<SubscriptionHandle> {
    let comments = source.subscribe(
        COMMENT_TOPIC,
        listener(comment_created, worker.clone(), processor.clone()),
    );
    let tasks = source.subscribe(TASK_TOPIC, listener(task_created, worker, processor));

    tracing::info!(
        comment_topic = COMMENT_TOPIC,
        task_topic = TASK_TOPIC,
        "Event listeners registered"
    );

    vec![comments, tasks]
}
