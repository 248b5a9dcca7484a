pub mod color;
pub mod geometry;
pub mod packet;
pub mod stats;

pub use color::Color;
pub use geometry::{PixelCoord, PixelRect, SamplePoint};
pub use packet::{SampleResult, WorkPacket};
pub use stats::RenderStats;
