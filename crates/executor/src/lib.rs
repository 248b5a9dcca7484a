//! Concurrency capabilities for the scanflow pipeline.
//!
//! The pipeline only needs a handful of primitives: spawn a named task,
//! join it, and a lock with a condition variable attached. This crate keeps
//! them behind small interfaces so the pipeline logic does not depend on a
//! particular runtime.
//!
//! ## Available Executors
//!
//! - [`ThreadExecutor`]: one native OS thread per spawned task
//! - [`SyncExecutor`]: no threading; forces the caller onto its sequential path
//!
//! ## Usage
//!
//! ```ignore
//! use scanflow_executor::{Executor, ExecutorImpl};
//!
//! let executor = ExecutorImpl::default();
//! let handle = executor.spawn("worker-0", || 2 + 2)?;
//! assert_eq!(handle.join()?, 4);
//! ```

mod sync;
mod thread_executor;

pub use sync::Monitor;
pub use thread_executor::ThreadExecutor;

use std::thread;
use thiserror::Error;

/// Error type for executor operations.
#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("Executor '{0}' cannot spawn threads")]
    Unsupported(&'static str),

    #[error("Failed to spawn thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Task panicked: {0}")]
    Panicked(String),
}

/// Handle to a spawned task. Joining consumes it.
#[derive(Debug)]
pub struct TaskHandle<T> {
    name: String,
    inner: thread::JoinHandle<T>,
}

impl<T> TaskHandle<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Waits for the task and returns its value.
    ///
    /// A panic inside the task is reported as [`ExecutorError::Panicked`]
    /// carrying the panic message when it is a string.
    pub fn join(self) -> Result<T, ExecutorError> {
        self.inner.join().map_err(|payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());
            ExecutorError::Panicked(message)
        })
    }
}

/// Something that can run closures concurrently.
pub trait Executor {
    /// Runs `task` concurrently with the caller.
    fn spawn<F, T>(&self, name: &str, task: F) -> Result<TaskHandle<T>, ExecutorError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static;

    /// How many tasks can usefully run at once.
    fn parallelism(&self) -> usize;

    /// Whether [`Executor::spawn`] can succeed at all.
    fn supports_threads(&self) -> bool;

    fn name(&self) -> &'static str;
}

/// Sequential "executor" for platforms without threads.
///
/// It reports a parallelism of one and refuses to spawn, which makes callers
/// take their in-process path.
#[derive(Clone, Copy, Debug, Default)]
pub struct SyncExecutor;

impl SyncExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for SyncExecutor {
    fn spawn<F, T>(&self, _name: &str, _task: F) -> Result<TaskHandle<T>, ExecutorError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        Err(ExecutorError::Unsupported(self.name()))
    }

    fn parallelism(&self) -> usize {
        1
    }

    fn supports_threads(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "SyncExecutor"
    }
}

/// A concrete executor chosen at runtime.
///
/// `Executor` has generic methods and cannot be a trait object; this enum
/// lets configuration hold either implementation without being generic.
#[derive(Clone, Debug)]
pub enum ExecutorImpl {
    /// No parallelism
    Sync(SyncExecutor),

    /// Native OS threads
    Threads(ThreadExecutor),
}

impl Executor for ExecutorImpl {
    fn spawn<F, T>(&self, name: &str, task: F) -> Result<TaskHandle<T>, ExecutorError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        match self {
            ExecutorImpl::Sync(exec) => exec.spawn(name, task),
            ExecutorImpl::Threads(exec) => exec.spawn(name, task),
        }
    }

    fn parallelism(&self) -> usize {
        match self {
            ExecutorImpl::Sync(exec) => exec.parallelism(),
            ExecutorImpl::Threads(exec) => exec.parallelism(),
        }
    }

    fn supports_threads(&self) -> bool {
        match self {
            ExecutorImpl::Sync(exec) => exec.supports_threads(),
            ExecutorImpl::Threads(exec) => exec.supports_threads(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ExecutorImpl::Sync(exec) => exec.name(),
            ExecutorImpl::Threads(exec) => exec.name(),
        }
    }
}

impl Default for ExecutorImpl {
    fn default() -> Self {
        ExecutorImpl::Threads(ThreadExecutor::new())
    }
}
