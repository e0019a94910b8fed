//! Cancellable delayed tasks on the tokio runtime.
//!
//! Used for the debounce after list changes and for closing the status overlay.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// A task that runs once after a delay, unless cancelled or replaced first.
///
/// Scheduling again aborts the pending task. Dropping the `DelayedTask` aborts it too.
#[derive(Debug, Default)]
pub struct DelayedTask {
    handle: Option<JoinHandle<()>>,
}

impl DelayedTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after `delay`, replacing whatever was pending.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    /// Abort the pending task. Returns true if one was still running.
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let pending = !handle.is_finished();
                handle.abort();
                pending
            }
            None => false,
        }
    }

    /// Forget the task without aborting it.
    ///
    /// Called from inside the task itself once it has started its work.
    pub fn detach(&mut self) {
        self.handle = None;
    }

    pub fn is_pending(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for DelayedTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
