use std::future::Future;

use tokio::task::JoinHandle;

use crate::app::{DarkroomError, Result};

/// Handle to a load running in the background.
///
/// Dropping the handle aborts the load, so a result is never produced for an
/// owner that already let go. Aborting after completion is a no-op; the
/// finished value is still delivered.
pub struct LoadTask<T> {
    handle: Option<JoinHandle<Result<T>>>,
}

impl<T: Send + 'static> LoadTask<T> {
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        Self {
            handle: Some(tokio::spawn(future)),
        }
    }

    /// Stops the load. A task cancelled before finishing reports
    /// [`DarkroomError::Cancelled`] from [`LoadTask::result`].
    pub fn cancel(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }

    /// Waits for the outcome.
    pub async fn result(mut self) -> Result<T> {
        let Some(handle) = self.handle.take() else {
            return Err(DarkroomError::Cancelled);
        };

        match handle.await {
            Ok(result) => result,
            Err(err) if err.is_cancelled() => Err(DarkroomError::Cancelled),
            Err(err) => Err(DarkroomError::Other(format!("load task failed: {err}"))),
        }
    }
}

impl<T> Drop for LoadTask<T> {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}
