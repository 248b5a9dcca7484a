//! An accumulating image sink.

use scanflow_traits::OutputSink;
use scanflow_types::{Color, PixelCoord, PixelRect, SamplePoint};

/// Sums samples per pixel over a fixed rectangle.
///
/// Samples are averaged on read. Rows below the flush boundary are
/// considered final; [`Framebuffer::take_flushable_rows`] hands them out
/// once, in order, the way a scanline writer would consume them.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    rect: PixelRect,
    sum: Vec<Color>,
    counts: Vec<u32>,
    boundary: i32,
    next_row: i32,
    history: Vec<i32>,
    dropped_samples: u64,
    late_samples: u64,
}

impl Framebuffer {
    pub fn new(rect: PixelRect) -> Self {
        let area = rect.area() as usize;
        Self {
            rect,
            sum: vec![Color::BLACK; area],
            counts: vec![0; area],
            boundary: rect.y,
            next_row: rect.y,
            history: Vec::new(),
            dropped_samples: 0,
            late_samples: 0,
        }
    }

    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    /// Every boundary reported so far, in call order.
    pub fn flush_history(&self) -> &[i32] {
        &self.history
    }

    /// Rows strictly below this are final.
    pub fn flushed_rows(&self) -> i32 {
        self.boundary
    }

    /// Samples that fell outside the rectangle.
    pub fn dropped_samples(&self) -> u64 {
        self.dropped_samples
    }

    /// Samples that arrived for a row that had already been flushed.
    pub fn late_samples(&self) -> u64 {
        self.late_samples
    }

    pub fn sample_count(&self, x: i32, y: i32) -> u32 {
        self.rect
            .linear_index(PixelCoord::new(x, y))
            .map_or(0, |idx| self.counts[idx])
    }

    /// Total number of samples accumulated.
    pub fn total_samples(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Averaged colour of a pixel, or `None` outside the rectangle or before
    /// the first sample.
    pub fn resolve(&self, x: i32, y: i32) -> Option<Color> {
        let idx = self.rect.linear_index(PixelCoord::new(x, y))?;
        match self.counts[idx] {
            0 => None,
            n => Some(self.sum[idx] * (1.0 / n as f32)),
        }
    }

    /// Rows that became final since the last call, lowest first.
    pub fn take_flushable_rows(&mut self) -> Vec<i32> {
        let end = self.boundary.min(self.rect.y_end());
        let rows: Vec<i32> = (self.next_row..end).collect();
        self.next_row = self.next_row.max(end);
        rows
    }
}

impl OutputSink for Framebuffer {
    fn add_sample(&mut self, point: SamplePoint, color: Color) {
        let pixel = point.pixel();
        let Some(idx) = self.rect.linear_index(pixel) else {
            self.dropped_samples += 1;
            return;
        };
        if pixel.y < self.boundary {
            self.late_samples += 1;
        }
        self.sum[idx] += color;
        self.counts[idx] += 1;
    }

    fn set_min_flushable_y(&mut self, y: i32) {
        self.history.push(y);
        if y < self.boundary {
            log::warn!(
                "Flush boundary moved backwards from {} to {}.",
                self.boundary,
                y
            );
        }
        self.boundary = self.boundary.max(y);
    }
}
