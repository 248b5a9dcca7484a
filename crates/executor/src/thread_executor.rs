//! Native thread executor.

use crate::{Executor, ExecutorError, TaskHandle};
use std::thread;

/// Spawns every task on its own named OS thread. Threads are not reused.
#[derive(Debug, Clone)]
pub struct ThreadExecutor {
    num_threads: usize,
    stack_size: Option<usize>,
}

impl ThreadExecutor {
    /// Creates an executor that reports the number of logical CPUs as its
    /// parallelism.
    pub fn new() -> Self {
        Self {
            num_threads: num_cpus::get().max(1),
            stack_size: None,
        }
    }

    /// Overrides the reported parallelism (at least one).
    pub fn with_parallelism(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads.max(1);
        self
    }

    /// Overrides the stack size of spawned threads.
    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }
}

impl Default for ThreadExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for ThreadExecutor {
    fn spawn<F, T>(&self, name: &str, task: F) -> Result<TaskHandle<T>, ExecutorError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let mut builder = thread::Builder::new().name(name.to_string());
        if let Some(bytes) = self.stack_size {
            builder = builder.stack_size(bytes);
        }
        let inner = builder.spawn(task)?;
        log::trace!("[EXECUTOR] Spawned thread '{}'", name);
        Ok(TaskHandle {
            name: name.to_string(),
            inner,
        })
    }

    fn parallelism(&self) -> usize {
        self.num_threads
    }

    fn supports_threads(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "ThreadExecutor"
    }
}
