//! The renderer seam.
//!
//! The pipeline never computes a colour itself. It hands packets to a
//! [`PacketRenderer`] and retires whatever results come back.

use scanflow_types::WorkPacket;
use std::ops::AddAssign;
use thiserror::Error;

/// Error type for rendering operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Renderer setup failed: {0}")]
    Setup(String),

    #[error("Sample evaluation failed at ({x}, {y}): {message}")]
    Sample { x: i32, y: i32, message: String },

    #[error("Rendering error: {0}")]
    Other(String),
}

/// Per-thread renderer state.
///
/// One instance is created for each worker thread (and one for the
/// single-threaded path) and is never shared.
pub trait PacketRenderer {
    /// Accumulator returned by [`PacketRenderer::stats`]. Values from
    /// different workers are merged with `+=`.
    type Stats: Default + AddAssign + Send + 'static;

    /// Reads `packet.pixels()` and appends to `packet.results()`.
    ///
    /// A single pixel may produce any number of results, one per sample.
    fn render_packet(&mut self, packet: &mut WorkPacket) -> Result<(), RenderError>;

    /// Statistics accumulated so far.
    fn stats(&self) -> Self::Stats;
}

/// Builds the per-thread renderers.
///
/// The factory holds the render-global state (scene, camera, output
/// dimensions) and is only ever called from the manager thread.
pub trait RendererFactory {
    type Renderer: PacketRenderer + Send + 'static;

    /// Creates the renderer for worker `worker_id`.
    fn create_renderer(&self, worker_id: usize) -> Result<Self::Renderer, RenderError>;
}

impl<F, R> RendererFactory for F
where
    F: Fn(usize) -> Result<R, RenderError>,
    R: PacketRenderer + Send + 'static,
{
    type Renderer = R;

    fn create_renderer(&self, worker_id: usize) -> Result<R, RenderError> {
        self(worker_id)
    }
}
