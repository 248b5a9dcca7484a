// src/pipeline/worker.rs
//! Worker threads: pop a packet, render it, hand it back.

use super::metrics::WorkerMetrics;
use super::queue::WorkQueue;
use super::slot::PacketSlot;
use log::{debug, info, warn};
use scanflow_executor::{Executor, ExecutorError, TaskHandle};
use scanflow_traits::{PacketRenderer, RenderError};
use std::sync::Arc;
use std::time::Instant;

pub(crate) type PacketQueue = WorkQueue<PacketSlot>;

/// What a worker hands back when it is joined.
#[derive(Debug)]
pub(crate) struct WorkerOutput<S> {
    pub stats: S,
    pub metrics: WorkerMetrics,
}

pub(crate) type WorkerResult<S> = Result<WorkerOutput<S>, RenderError>;

/// Handle to a running worker, tagged with its id.
pub(crate) struct WorkerHandle<S> {
    pub worker_id: usize,
    pub handle: TaskHandle<WorkerResult<S>>,
}

/// RAII guard that shuts down both queues if a worker leaves its loop
/// abnormally.
///
/// Covers both a renderer error and a panic. Shutting down the done queue
/// is what wakes a manager blocked on it.
struct AbortGuard {
    worker_id: usize,
    pending: Arc<PacketQueue>,
    done: Arc<PacketQueue>,
    armed: bool,
}

impl AbortGuard {
    fn new(worker_id: usize, pending: Arc<PacketQueue>, done: Arc<PacketQueue>) -> Self {
        Self {
            worker_id,
            pending,
            done,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for AbortGuard {
    fn drop(&mut self) {
        if self.armed {
            warn!(
                "[WORKER-{}] Exiting abnormally, shutting down packet queues.",
                self.worker_id
            );
            self.pending.shutdown();
            self.done.shutdown();
        }
    }
}

/// The worker loop.
///
/// Returns when the pending queue is shut down and drained, or with the
/// first error the renderer raises. The packet being rendered when the
/// error happens is dropped.
pub(crate) fn run_worker<R: PacketRenderer>(
    worker_id: usize,
    mut renderer: R,
    pending: Arc<PacketQueue>,
    done: Arc<PacketQueue>,
) -> WorkerResult<R::Stats> {
    let guard = AbortGuard::new(worker_id, Arc::clone(&pending), Arc::clone(&done));
    let mut metrics = WorkerMetrics::new(worker_id);
    info!("[WORKER-{}] Started.", worker_id);

    while let Some(mut slot) = pending.pop_blocking() {
        let started = Instant::now();
        if let Err(e) = renderer.render_packet(&mut slot.packet) {
            warn!(
                "[WORKER-{}] Renderer failed on packet slot {}: {}",
                worker_id,
                slot.index(),
                e
            );
            return Err(e);
        }
        metrics.record_packet(
            slot.packet.pixels().len(),
            slot.packet.results().len(),
            started.elapsed(),
        );
        done.push(slot);
    }

    guard.disarm();
    info!(
        "[WORKER-{}] Shutting down after {} packets.",
        worker_id, metrics.packets
    );
    Ok(WorkerOutput {
        stats: renderer.stats(),
        metrics,
    })
}

/// Spawns one worker per renderer, all bound to the same queue pair.
///
/// If a spawn fails, the queues are shut down and the workers already
/// started are joined before the error is returned.
pub(crate) fn spawn_workers<E, R>(
    executor: &E,
    renderers: Vec<R>,
    pending: &Arc<PacketQueue>,
    done: &Arc<PacketQueue>,
) -> Result<Vec<WorkerHandle<R::Stats>>, ExecutorError>
where
    E: Executor,
    R: PacketRenderer + Send + 'static,
{
    let mut handles = Vec::with_capacity(renderers.len());

    for (worker_id, renderer) in renderers.into_iter().enumerate() {
        let pending_clone = Arc::clone(pending);
        let done_clone = Arc::clone(done);
        let spawned = executor.spawn(&format!("scanflow-worker-{}", worker_id), move || {
            run_worker(worker_id, renderer, pending_clone, done_clone)
        });

        match spawned {
            Ok(handle) => handles.push(WorkerHandle { worker_id, handle }),
            Err(e) => {
                warn!("[MANAGER] Failed to spawn worker {}: {}", worker_id, e);
                pending.shutdown();
                done.shutdown();
                for started in handles {
                    let thread_name = started.handle.name().to_string();
                    if let Err(join_err) = started.handle.join() {
                        debug!(
                            "[MANAGER] Worker {} ('{}') ended badly during spawn cleanup: {}",
                            started.worker_id, thread_name, join_err
                        );
                    }
                }
                return Err(e);
            }
        }
    }

    Ok(handles)
}
