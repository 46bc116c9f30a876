//! Bridge between request threads and the context that owns the views.
//!
//! Only the owning (UI) context may read the view registry. A request thread
//! posts a [`DirectoryTask`] to the owner's queue and blocks on a single-use
//! reply channel until the snapshot arrives, or until the configured timeout
//! elapses.
//!
//! ## Owner side
//! The owner drains the queue in whichever way suits its loop:
//! - [`DirectoryQueue::serve_pending`] from an existing event loop tick
//! - [`DirectoryQueue::run_blocking`] on a dedicated thread
//! - [`DirectoryQueue::run`] as a task on a tokio runtime
//!
//! With no timeout configured a stalled owner blocks the request forever.

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::RecvTimeoutError;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use crate::error::{HooksError, Result};
use crate::view::ViewRecord;

// ============================================================================
// Owner-side view registry
// ============================================================================

/// View registry as seen from its owning context.
///
/// `platform_views` is only ever invoked on the owning context, and one call
/// produces one consistent snapshot.
pub trait ViewDirectory {
    fn platform_views(&self) -> Vec<ViewRecord>;
}

impl<F> ViewDirectory for F
where
    F: Fn() -> Vec<ViewRecord>,
{
    fn platform_views(&self) -> Vec<ViewRecord> {
        self()
    }
}

/// Work posted to the owning context
#[derive(Debug)]
pub enum DirectoryTask {
    Snapshot {
        respond: crossbeam_channel::Sender<Vec<ViewRecord>>,
    },
}

/// Create a connected bridge/queue pair.
///
/// `timeout` bounds how long [`ViewDirectoryBridge::snapshot`] waits; `None`
/// waits indefinitely.
pub fn directory_channel(timeout: Option<Duration>) -> (ViewDirectoryBridge, DirectoryQueue) {
    let (task_tx, task_rx) = mpsc::unbounded_channel();
    (
        ViewDirectoryBridge { task_tx, timeout },
        DirectoryQueue { task_rx },
    )
}

// ============================================================================
// Request side
// ============================================================================

/// Cloneable handle used by extension handlers to query the owning context
#[derive(Debug, Clone)]
pub struct ViewDirectoryBridge {
    task_tx: mpsc::UnboundedSender<DirectoryTask>,
    timeout: Option<Duration>,
}

impl ViewDirectoryBridge {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Ask the owning context for the current views and wait for the answer.
    pub fn snapshot(&self) -> Result<Vec<ViewRecord>> {
        let (respond, reply) = crossbeam_channel::bounded(1);
        self.task_tx
            .send(DirectoryTask::Snapshot { respond })
            .map_err(|_| HooksError::owner_unavailable("view directory queue is closed"))?;

        let started = Instant::now();
        let views = match self.timeout {
            Some(timeout) => reply.recv_timeout(timeout).map_err(|e| match e {
                RecvTimeoutError::Timeout => {
                    warn!(
                        timeout_ms = timeout.as_millis() as u64,
                        "View directory did not answer in time"
                    );
                    HooksError::SnapshotTimeout {
                        timeout_ms: timeout.as_millis() as u64,
                    }
                }
                RecvTimeoutError::Disconnected => dropped_request(),
            })?,
            None => reply.recv().map_err(|_| dropped_request())?,
        };

        trace!(
            count = views.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Received view snapshot"
        );
        Ok(views)
    }
}

fn dropped_request() -> HooksError {
    HooksError::owner_unavailable("owning context dropped the snapshot request")
}

// ============================================================================
// Owner side
// ============================================================================

/// Receiving end of the task queue, held by the owning context
#[derive(Debug)]
pub struct DirectoryQueue {
    task_rx: mpsc::UnboundedReceiver<DirectoryTask>,
}

impl DirectoryQueue {
    /// Answer every task already queued without blocking. Returns the number served.
    pub fn serve_pending(&mut self, directory: &dyn ViewDirectory) -> usize {
        let mut served = 0;
        while let Ok(task) = self.task_rx.try_recv() {
            handle_task(task, directory);
            served += 1;
        }
        served
    }

    /// Serve tasks on the current thread until every bridge has been dropped.
    ///
    /// Must not be called from within an async runtime.
    pub fn run_blocking(mut self, directory: &dyn ViewDirectory) {
        while let Some(task) = self.task_rx.blocking_recv() {
            handle_task(task, directory);
        }
        debug!("View directory queue closed");
    }

    /// Serve tasks as an async task until every bridge has been dropped.
    pub async fn run<D: ViewDirectory>(mut self, directory: D) {
        while let Some(task) = self.task_rx.recv().await {
            handle_task(task, &directory);
        }
        debug!("View directory queue closed");
    }
}

fn handle_task(task: DirectoryTask, directory: &dyn ViewDirectory) {
    match task {
        DirectoryTask::Snapshot { respond } => {
            let views = directory.platform_views();
            trace!(count = views.len(), "Produced view snapshot");
            if respond.send(views).is_err() {
                debug!("Snapshot requester went away before the reply");
            }
        }
    }
}

/// Run `queue` on a dedicated thread that owns `directory`.
pub fn spawn_owner_thread<D>(queue: DirectoryQueue, directory: D) -> std::io::Result<JoinHandle<()>>
where
    D: ViewDirectory + Send + 'static,
{
    thread::Builder::new()
        .name("view-directory".to_string())
        .spawn(move || queue.run_blocking(&directory))
}
