// src/pipeline/orchestrator.rs
//! The pipeline manager.
//!
//! ```text
//!             pending queue               done queue
//! Manager ──> [ slot, slot, … ] ──> Workers (N) ──> [ slot, … ] ──> Manager
//!   ^  refill from pattern                            emit results   │
//!   └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! A fixed pool of packets circulates between the two queues. Workers finish
//! in any order, so the manager tracks the lowest row each packet may still
//! touch and only lets the sink finalize rows below the minimum of those.

use super::config::PipelineConfig;
use super::flush::FlushTracker;
use super::metrics::{PipelineMetrics, RenderSummary, WorkerMetrics};
use super::pattern::ScanPattern;
use super::queue::WorkQueue;
use super::slot::allocate_pool;
use super::worker::{PacketQueue, WorkerHandle, WorkerOutput, spawn_workers};
use crate::error::PipelineError;
use log::{debug, info, trace, warn};
use scanflow_executor::{Executor, ExecutorError, ExecutorImpl};
use scanflow_traits::{OutputSink, PacketRenderer, ProgressReporter, RendererFactory};
use scanflow_types::WorkPacket;
use std::ops::AddAssign;
use std::sync::Arc;
use std::time::Instant;

type StatsOf<F> = <<F as RendererFactory>::Renderer as PacketRenderer>::Stats;

/// Runs renders with a fixed configuration.
///
/// Build one with [`crate::PipelineBuilder`].
#[derive(Debug, Clone)]
pub struct RenderPipeline {
    config: PipelineConfig,
    executor: ExecutorImpl,
}

impl RenderPipeline {
    pub fn new(config: PipelineConfig, executor: ExecutorImpl) -> Self {
        Self { config, executor }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Number of worker threads a render will use. One means the
    /// single-threaded path.
    pub fn worker_count(&self) -> usize {
        let requested = self
            .config
            .resolved_worker_count(self.executor.parallelism());
        if requested > 1 && !self.executor.supports_threads() {
            warn!(
                "[MANAGER] {} workers requested but {} cannot spawn threads; rendering on the calling thread.",
                requested,
                self.executor.name()
            );
            return 1;
        }
        requested
    }

    /// Renders every pixel of `pattern` and streams the results into `sink`.
    ///
    /// `sink` and `progress` are only touched from the calling thread.
    /// On error, rows below the last boundary reported to the sink are
    /// complete; nothing beyond them is.
    pub fn render<F, O, P>(
        &self,
        pattern: &ScanPattern,
        factory: &F,
        sink: &mut O,
        progress: &mut P,
    ) -> Result<RenderSummary<StatsOf<F>>, PipelineError>
    where
        F: RendererFactory,
        O: OutputSink,
        P: ProgressReporter,
    {
        let rect = pattern.rect();
        if !rect.is_addressable() {
            return Err(PipelineError::Config(format!(
                "pixel rectangle {}x{} at ({}, {}) does not fit in i32 coordinates",
                rect.width, rect.height, rect.x, rect.y
            )));
        }

        let started = Instant::now();
        progress.set_start(pattern.position(&pattern.begin()));
        progress.set_size(pattern.size());
        progress.start();

        let workers = self.worker_count();
        info!(
            "[MANAGER] Rendering {}x{} pixels at ({}, {}) with {} worker(s), {} pixels per packet.",
            pattern.rect().width,
            pattern.rect().height,
            pattern.rect().x,
            pattern.rect().y,
            workers,
            self.config.pixels_per_packet()
        );

        let result = if workers <= 1 || pattern.size() == 0 {
            debug!("[MANAGER] Using the single-threaded path.");
            self.render_single_threaded(pattern, factory, sink, progress)
        } else {
            self.render_multi_threaded(workers, pattern, factory, sink, progress)
        };
        progress.end();

        let mut summary = result?;
        summary.metrics.elapsed = started.elapsed();
        info!(
            "[MANAGER] Finished: {} packets, {} results in {:.2?} ({:.0} results/s).",
            summary.metrics.packets_dispatched,
            summary.metrics.results_emitted,
            summary.metrics.elapsed,
            summary.metrics.throughput()
        );
        Ok(summary)
    }

    fn render_single_threaded<F, O, P>(
        &self,
        pattern: &ScanPattern,
        factory: &F,
        sink: &mut O,
        progress: &mut P,
    ) -> Result<RenderSummary<StatsOf<F>>, PipelineError>
    where
        F: RendererFactory,
        O: OutputSink,
        P: ProgressReporter,
    {
        let mut renderer = factory.create_renderer(0)?;
        let pixels_per_packet = self.config.pixels_per_packet();
        let mut packet = WorkPacket::with_capacity(
            pixels_per_packet,
            pixels_per_packet * self.config.samples_per_pixel as usize,
        );
        let mut metrics = PipelineMetrics::default();
        let mut worker = WorkerMetrics::new(0);
        let mut boundary = BoundaryReporter::default();
        let mut cursor = pattern.begin();

        while !pattern.is_end(&cursor) {
            packet.clear();
            let taken = pattern.take_into(&mut cursor, pixels_per_packet, |p| {
                progress.update(pattern.position_of(p));
                packet.add_pixel(p);
            });

            let render_start = Instant::now();
            renderer.render_packet(&mut packet)?;
            worker.record_packet(taken, packet.results().len(), render_start.elapsed());

            metrics.packets_dispatched += 1;
            metrics.pixels_dispatched += taken as u64;
            metrics.results_emitted += emit_results(&packet, sink);

            // Everything before the cursor has been emitted.
            boundary.advance(sink, pattern.min_y(&cursor));
        }
        boundary.advance(sink, pattern.min_y(&pattern.end()));

        metrics.workers.push(worker);
        Ok(RenderSummary {
            stats: renderer.stats(),
            metrics,
            worker_count: 1,
            pool_size: 1,
        })
    }

    fn render_multi_threaded<F, O, P>(
        &self,
        workers: usize,
        pattern: &ScanPattern,
        factory: &F,
        sink: &mut O,
        progress: &mut P,
    ) -> Result<RenderSummary<StatsOf<F>>, PipelineError>
    where
        F: RendererFactory,
        O: OutputSink,
        P: ProgressReporter,
    {
        let pixels_per_packet = self.config.pixels_per_packet();
        let pool_size = self.config.pool_size(workers);

        // Renderers are built here so a setup failure aborts before any thread exists.
        let renderers = (0..workers)
            .map(|worker_id| factory.create_renderer(worker_id))
            .collect::<Result<Vec<_>, _>>()?;

        let pending: Arc<PacketQueue> = Arc::new(WorkQueue::with_capacity(pool_size));
        let done: Arc<PacketQueue> = Arc::new(WorkQueue::with_capacity(pool_size));
        for slot in allocate_pool(
            pool_size,
            pixels_per_packet,
            self.config.samples_per_pixel as usize,
        ) {
            done.push(slot);
        }

        let handles = spawn_workers(&self.executor, renderers, &pending, &done)?;
        info!(
            "[MANAGER] Started {} workers with a pool of {} packets.",
            handles.len(),
            pool_size
        );

        let mut tracker = FlushTracker::new(pool_size, pattern.min_y(&pattern.begin()));
        let mut boundary = BoundaryReporter::default();
        let mut metrics = PipelineMetrics::default();
        let mut cursor = pattern.begin();
        let mut aborted = false;

        while !pattern.is_end(&cursor) {
            let wait_start = Instant::now();
            let popped = done.pop_blocking();
            metrics.manager_wait += wait_start.elapsed();

            // Only a failing worker shuts the done queue down while the pattern is still running.
            let Some(mut slot) = popped.filter(|_| !done.is_shutdown()) else {
                aborted = true;
                break;
            };

            let index = slot.index();
            tracker.checkout(index);
            debug_assert_eq!(
                tracker.outstanding() + 1,
                pool_size,
                "manager holds more than one packet"
            );
            metrics.results_emitted += emit_results(&slot.packet, sink);

            let floor = pattern.min_y(&cursor);
            slot.packet.clear();
            let taken = pattern.take_into(&mut cursor, pixels_per_packet, |p| slot.packet.add_pixel(p));
            trace!(
                "[MANAGER] Refilled slot {} with {} pixels from row {}.",
                index,
                taken,
                floor
            );

            tracker.release(index, floor);
            boundary.advance(sink, tracker.boundary());

            metrics.packets_dispatched += 1;
            metrics.pixels_dispatched += taken as u64;
            pending.push(slot);
            progress.update(pattern.position(&cursor));
        }

        if !aborted {
            pending.shutdown();
            aborted = !self.drain(pattern, &done, &mut tracker, &mut boundary, &mut metrics, sink);
        }

        pending.shutdown();
        done.shutdown();
        let outputs = join_workers(handles)?;

        // Every worker finished cleanly, so nothing should have closed the done queue early.
        assert!(
            !aborted,
            "done queue shut down while no worker reported a failure"
        );
        assert_eq!(tracker.outstanding(), 0, "packets still in flight after drain");
        assert!(
            pending.is_empty() && done.is_empty(),
            "queues not empty after all packets were retired"
        );

        let mut stats = <StatsOf<F> as Default>::default();
        for output in outputs {
            stats.add_assign(output.stats);
            metrics.workers.push(output.metrics);
        }

        Ok(RenderSummary {
            stats,
            metrics,
            worker_count: workers,
            pool_size,
        })
    }

    /// Collects every outstanding packet once the pattern is exhausted.
    ///
    /// Returns `false` if a worker failure closed the done queue first.
    fn drain<O: OutputSink>(
        &self,
        pattern: &ScanPattern,
        done: &PacketQueue,
        tracker: &mut FlushTracker,
        boundary: &mut BoundaryReporter,
        metrics: &mut PipelineMetrics,
        sink: &mut O,
    ) -> bool {
        let end_row = pattern.min_y(&pattern.end());
        debug!(
            "[MANAGER] Pattern exhausted, draining {} outstanding packets.",
            tracker.outstanding()
        );

        while tracker.outstanding() > 0 {
            let wait_start = Instant::now();
            let popped = done.pop_blocking();
            metrics.manager_wait += wait_start.elapsed();

            let Some(slot) = popped.filter(|_| !done.is_shutdown()) else {
                return false;
            };

            tracker.checkout(slot.index());
            metrics.results_emitted += emit_results(&slot.packet, sink);
            tracker.retire(slot.index(), end_row);
            boundary.advance(sink, tracker.boundary());
        }
        true
    }
}

/// Forwards every result of `packet` to the sink and returns how many there were.
fn emit_results<O: OutputSink>(packet: &WorkPacket, sink: &mut O) -> u64 {
    for result in packet.results() {
        sink.add_sample(result.point, result.color);
    }
    packet.results().len() as u64
}

/// Passes the flush boundary to the sink whenever it rises.
#[derive(Debug, Default)]
struct BoundaryReporter {
    last: Option<i32>,
}

impl BoundaryReporter {
    fn advance<O: OutputSink>(&mut self, sink: &mut O, boundary: i32) {
        if self.last.is_none_or(|previous| boundary > previous) {
            debug!("[MANAGER] Rows below {} are final.", boundary);
            sink.set_min_flushable_y(boundary);
            self.last = Some(boundary);
        }
    }
}

/// Joins every worker, then reports the first failure in worker order.
fn join_workers<S>(handles: Vec<WorkerHandle<S>>) -> Result<Vec<WorkerOutput<S>>, PipelineError> {
    let mut outputs = Vec::with_capacity(handles.len());
    let mut first_error = None;

    for WorkerHandle { worker_id, handle } in handles {
        let error = match handle.join() {
            Ok(Ok(output)) => {
                outputs.push(output);
                continue;
            }
            Ok(Err(source)) => PipelineError::WorkerFailed { worker_id, source },
            Err(ExecutorError::Panicked(message)) => PipelineError::WorkerPanicked { worker_id, message },
            Err(other) => PipelineError::Executor(other),
        };
        warn!("[MANAGER] {}", error);
        first_error.get_or_insert(error);
    }

    match first_error {
        Some(error) => Err(error),
        None => Ok(outputs),
    }
}
