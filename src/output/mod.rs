//! Ready-made collaborators for the render pipeline.

pub mod framebuffer;
pub mod progress;

pub use framebuffer::Framebuffer;
pub use progress::LogProgress;
