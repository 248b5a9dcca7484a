//! Throughput metrics for a render.
//!
//! Workers keep their own [`WorkerMetrics`] and hand them back when they
//! are joined, so nothing here is shared between threads while rendering.

use std::time::Duration;

/// What one worker did over a render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkerMetrics {
    /// Worker index
    pub worker_id: usize,
    /// Packets rendered
    pub packets: usize,
    /// Input pixels rendered
    pub pixels: usize,
    /// Results produced
    pub results: usize,
    /// Time spent inside the renderer
    pub busy: Duration,
}

impl WorkerMetrics {
    pub fn new(worker_id: usize) -> Self {
        Self {
            worker_id,
            ..Default::default()
        }
    }

    pub fn record_packet(&mut self, pixels: usize, results: usize, duration: Duration) {
        self.packets += 1;
        self.pixels += pixels;
        self.results += results;
        self.busy += duration;
    }

    /// Average time per packet.
    pub fn avg_packet_time(&self) -> Option<Duration> {
        if self.packets == 0 {
            return None;
        }
        Some(self.busy / self.packets as u32)
    }
}

/// Snapshot of a finished render.
#[derive(Debug, Clone, Default)]
pub struct PipelineMetrics {
    /// Per-worker metrics, ordered by worker id. A single-threaded render
    /// reports one entry.
    pub workers: Vec<WorkerMetrics>,
    /// Packets filled and handed to a renderer
    pub packets_dispatched: usize,
    /// Pixels placed into packets
    pub pixels_dispatched: u64,
    /// Results forwarded to the output sink
    pub results_emitted: u64,
    /// Time the manager spent blocked on the done queue
    pub manager_wait: Duration,
    /// Wall-clock duration of the render
    pub elapsed: Duration,
}

impl PipelineMetrics {
    /// Results emitted per second.
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.results_emitted as f64 / secs
        } else {
            0.0
        }
    }

    /// Fraction of worker wall time spent rendering (0.0 to 1.0).
    pub fn worker_utilization(&self) -> f64 {
        if self.workers.is_empty() || self.elapsed.is_zero() {
            return 0.0;
        }
        let busy: f64 = self.workers.iter().map(|w| w.busy.as_secs_f64()).sum();
        let available = self.elapsed.as_secs_f64() * self.workers.len() as f64;
        (busy / available).min(1.0)
    }

    /// Results produced by all workers, as they reported it.
    pub fn results_rendered(&self) -> u64 {
        self.workers.iter().map(|w| w.results as u64).sum()
    }
}

/// Outcome of a successful render.
#[derive(Debug, Clone)]
pub struct RenderSummary<S> {
    /// Renderer statistics, merged over all renderers
    pub stats: S,
    pub metrics: PipelineMetrics,
    /// Threads that rendered; 1 for the single-threaded path
    pub worker_count: usize,
    /// Packets in the pool; 1 for the single-threaded path
    pub pool_size: usize,
}
