//! Blocking FIFO handoff between the manager and the workers.

use scanflow_executor::Monitor;
use std::collections::VecDeque;

#[derive(Debug)]
struct QueueState<T> {
    items: VecDeque<T>,
    shutdown: bool,
}

/// A multi-producer, multi-consumer FIFO with shutdown.
///
/// Once [`WorkQueue::shutdown`] has been called, pops never block: they
/// drain what is left and then return `None`. Pushing after shutdown is
/// still allowed so that in-flight work can be handed back.
#[derive(Debug)]
pub struct WorkQueue<T> {
    monitor: Monitor<QueueState<T>>,
}

impl<T> WorkQueue<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitor: Monitor::new(QueueState {
                items: VecDeque::with_capacity(capacity),
                shutdown: false,
            }),
        }
    }

    /// Appends `item` and wakes one blocked popper.
    pub fn push(&self, item: T) {
        self.monitor.lock().items.push_back(item);
        self.monitor.notify_one();
    }

    /// Waits for an item. Returns `None` only when the queue has been shut
    /// down and is empty.
    pub fn pop_blocking(&self) -> Option<T> {
        let guard = self.monitor.lock();
        let mut guard = self
            .monitor
            .wait_while(guard, |state| state.items.is_empty() && !state.shutdown);
        guard.items.pop_front()
    }

    /// Takes the front item without waiting.
    ///
    /// Only meaningful when the caller knows nobody else is pushing, e.g.
    /// after every worker has been joined.
    pub fn pop_nonblocking(&self) -> Option<T> {
        self.monitor.lock().items.pop_front()
    }

    /// Marks the queue as shut down and wakes every waiter. Idempotent.
    pub fn shutdown(&self) {
        self.monitor.lock().shutdown = true;
        self.monitor.notify_all();
    }

    pub fn is_shutdown(&self) -> bool {
        self.monitor.lock().shutdown
    }

    pub fn len(&self) -> usize {
        self.monitor.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
