//! Concurrent work distribution for an offline renderer.
//!
//! A [`RenderPipeline`] walks a [`ScanPattern`] row by row, hands batches of
//! pixels to worker threads, and streams the rendered samples back into an
//! [`OutputSink`] on the calling thread. Alongside the samples the sink
//! learns the flush boundary: the row below which no further samples will
//! arrive.

pub mod error;
pub mod output;
pub mod pipeline;

pub use error::PipelineError;
pub use output::{Framebuffer, LogProgress};
pub use pipeline::{
    PipelineBuilder, PipelineConfig, PipelineMetrics, RenderPipeline, RenderSummary, ScanPattern,
    WorkerMetrics,
};

pub use scanflow_executor::{
    Executor, ExecutorError, ExecutorImpl, SyncExecutor, ThreadExecutor,
};
pub use scanflow_traits::{
    NullProgress, OutputSink, PacketRenderer, ProgressReporter, RenderError, RendererFactory,
};
pub use scanflow_types::{
    Color, PixelCoord, PixelRect, RenderStats, SampleResult, SamplePoint, WorkPacket,
};
