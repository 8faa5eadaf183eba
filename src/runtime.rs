//! Runtime abstraction layer for async operations
//!
//! The feed fetch and tile downloads run on Tokio. Callers that live outside
//! an async context (the egui frame loop) spawn through this module and poll
//! the returned handles once per frame instead of blocking.

use crate::{MapError, Result};
use futures::future::FutureExt;
use std::future::Future;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Handle to a spawned async task
pub trait AsyncHandle: Send + Sync {
    /// Check if the task is finished
    fn is_finished(&self) -> bool;
}

struct TokioHandle(JoinHandle<()>);

impl AsyncHandle for TokioHandle {
    fn is_finished(&self) -> bool {
        self.0.is_finished()
    }
}

/// Handle to a spawned task that produces a value
pub struct TaskHandle<T> {
    inner: Option<JoinHandle<T>>,
}

impl<T: Send + 'static> TaskHandle<T> {
    /// Check if the task is finished (or its result was already taken)
    pub fn is_finished(&self) -> bool {
        self.inner.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Takes the result if the task has completed; never blocks
    pub fn try_result(&mut self) -> Option<Result<T>> {
        let handle = self.inner.take()?;
        if !handle.is_finished() {
            self.inner = Some(handle);
            return None;
        }

        handle.now_or_never().map(|joined| {
            joined.map_err(|e| MapError::Runtime(format!("task did not complete: {}", e)))
        })
    }
}

fn current_handle() -> Result<Handle> {
    Handle::try_current().map_err(|e| MapError::Runtime(e.to_string()))
}

/// Spawns a detached task on the current Tokio runtime
pub fn spawn<F>(future: F) -> Result<Box<dyn AsyncHandle>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let handle = current_handle()?.spawn(future);
    Ok(Box::new(TokioHandle(handle)))
}

/// Spawns a task whose output can be collected later with
/// [`TaskHandle::try_result`]
pub fn spawn_with_result<F, T>(future: F) -> Result<TaskHandle<T>>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let handle = current_handle()?.spawn(future);
    Ok(TaskHandle {
        inner: Some(handle),
    })
}
