//! Render work distribution.
//!
//! - [`PipelineBuilder`]: fluent builder for a [`RenderPipeline`]
//! - [`ScanPattern`]: the order pixels are handed out in
//! - [`WorkQueue`]: blocking FIFO shared by the manager and its workers
//! - [`FlushTracker`]: computes how far the output may be finalized
//!
//! # Example
//!
//! ```ignore
//! use scanflow::{PipelineBuilder, ScanPattern, PixelRect, NullProgress};
//!
//! let pipeline = PipelineBuilder::new()
//!     .with_worker_count(4)
//!     .with_samples_per_pixel(16)
//!     .build()?;
//!
//! let pattern = ScanPattern::new(PixelRect::with_size(640, 480));
//! let summary = pipeline.render(&pattern, &factory, &mut framebuffer, &mut NullProgress)?;
//! ```

mod builder;
pub mod config;
pub mod flush;
pub mod metrics;
mod orchestrator;
pub mod pattern;
pub mod queue;
pub mod slot;
pub(crate) mod worker;

pub use builder::PipelineBuilder;
pub use config::PipelineConfig;
pub use flush::FlushTracker;
pub use metrics::{PipelineMetrics, RenderSummary, WorkerMetrics};
pub use orchestrator::RenderPipeline;
pub use pattern::{Cursor, ScanPattern};
pub use queue::WorkQueue;
pub use slot::{PacketSlot, allocate_pool};
