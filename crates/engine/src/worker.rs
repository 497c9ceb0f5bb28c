//! Single-task delivery queue.
//!
//! Jobs run strictly one at a time in submission order. A failing or
//! panicking job is logged and the queue moves on. The queue is unbounded:
//! `submit` never blocks and never applies backpressure to the event source.
//!
//! Shutdown stops intake and abandons jobs that have not started yet. A job
//! already running is left to finish on its own.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use relay_common::error::RelayError;

type JobFuture = Pin<Box<dyn Future<Output = Result<(), RelayError>> + Send + 'static>>;

struct Job {
    label: String,
    future: JobFuture,
}

/// Background worker executing notification jobs in FIFO order.
pub struct DeliveryWorker {
    jobs: mpsc::UnboundedSender<Job>,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl DeliveryWorker {
    /// Spawn the worker on the current Tokio runtime.
    pub fn start() -> Self {
        let (jobs, receiver) = mpsc::unbounded_channel();
        let (shutdown, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(run(receiver, shutdown_rx));

        tracing::info!("Delivery worker started");

        Self {
            jobs,
            shutdown,
            task,
        }
    }

    /// Queue a job. Safe to call from any thread; never blocks.
    pub fn submit<F>(&self, label: impl Into<String>, job: F) -> Result<(), RelayError>
    where
        F: Future<Output = Result<(), RelayError>> + Send + 'static,
    {
        if self.is_shut_down() {
            return Err(RelayError::WorkerClosed);
        }

        self.jobs
            .send(Job {
                label: label.into(),
                future: Box::pin(job),
            })
            .map_err(|_| RelayError::WorkerClosed)
    }

    /// Resolve once every job submitted before this call has finished.
    pub async fn flush(&self) -> Result<(), RelayError> {
        let (done, wait) = oneshot::channel();
        self.submit("flush", async move {
            let _ = done.send(());
            Ok(())
        })?;
        wait.await.map_err(|_| RelayError::WorkerClosed)
    }

    /// Stop accepting jobs and drop everything not yet started.
    pub fn shutdown(&self) {
        if !self.shutdown.send_replace(true) {
            tracing::info!("Delivery worker shutting down");
        }
    }

    pub fn is_shut_down(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Wait for the worker loop to exit. Call after [`shutdown`](Self::shutdown).
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Delivery worker terminated abnormally");
        }
    }
}

async fn run(mut jobs: mpsc::UnboundedReceiver<Job>, mut shutdown: watch::Receiver<bool>) {
    loop {
        let job = tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            job = jobs.recv() => match job {
                Some(job) => job,
                None => break,
            },
        };

        let label = job.label;

        // Each job runs in its own task so a panic surfaces as a JoinError
        // instead of taking the worker down.
        match tokio::spawn(job.future).await {
            Ok(Ok(())) => {
                tracing::debug!(job = %label, "Notification job finished");
            }
            Ok(Err(e)) => {
                tracing::error!(job = %label, error = %e, "Unable to deliver notification");
            }
            Err(e) if e.is_panic() => {
                tracing::error!(job = %label, "Notification job panicked");
            }
            Err(e) => {
                tracing::warn!(job = %label, error = %e, "Notification job cancelled");
            }
        }
    }

    jobs.close();
    let mut abandoned = 0usize;
    while jobs.try_recv().is_ok() {
        abandoned += 1;
    }

    tracing::info!(abandoned, "Delivery worker stopped");
}
