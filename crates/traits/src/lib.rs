pub mod progress;
pub mod renderer;
pub mod sink;

pub use progress::{NullProgress, ProgressReporter};
pub use renderer::{PacketRenderer, RenderError, RendererFactory};
pub use sink::OutputSink;
