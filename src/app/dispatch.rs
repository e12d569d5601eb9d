use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::app::error::{DarkroomError, Result};

type DispatchJob = Box<dyn FnOnce() + Send>;

/// Message type for the presentation queue
enum DispatchMessage {
    Run(DispatchJob),
    Shutdown,
}

/// Handle to the serial presentation queue.
///
/// Loads finish on arbitrary runtime workers; anything user-facing goes
/// through here so it runs one job at a time, in submission order.
#[derive(Clone)]
pub struct SerialDispatcher {
    tx: mpsc::UnboundedSender<DispatchMessage>,
}

impl SerialDispatcher {
    pub fn new() -> (Self, DispatchWorker) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, DispatchWorker { rx })
    }

    /// Create the queue and run its worker as a tokio task.
    pub fn spawn() -> (Self, JoinHandle<()>) {
        let (dispatcher, worker) = Self::new();
        let task = tokio::spawn(worker.run());
        (dispatcher, task)
    }

    /// Queue a job. Jobs run strictly after every job queued before them.
    pub fn dispatch(&self, job: impl FnOnce() + Send + 'static) {
        if self
            .tx
            .send(DispatchMessage::Run(Box::new(job)))
            .is_err()
        {
            warn!("presentation queue is gone, dropping update");
        }
    }

    /// Queue `job` and wait until it has run, returning its value.
    pub async fn run<R>(&self, job: impl FnOnce() -> R + Send + 'static) -> Result<R>
    where
        R: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.dispatch(move || {
            let _ = tx.send(job());
        });
        rx.await
            .map_err(|_| DarkroomError::Other("presentation queue stopped".into()))
    }

    /// Stop the worker once every previously queued job has run.
    pub fn shutdown(&self) {
        let _ = self.tx.send(DispatchMessage::Shutdown);
    }
}

/// Consumer side of the presentation queue.
pub struct DispatchWorker {
    rx: mpsc::UnboundedReceiver<DispatchMessage>,
}

impl DispatchWorker {
    /// Run jobs until shutdown, or until every handle is dropped.
    pub async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                DispatchMessage::Run(job) => job(),
                DispatchMessage::Shutdown => break,
            }
        }
    }
}
