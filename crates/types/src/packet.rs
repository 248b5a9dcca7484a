//! The unit of work that travels between the pipeline manager and its workers.

use crate::color::Color;
use crate::geometry::{PixelCoord, SamplePoint};

/// One rendered sample: where it landed and what it measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleResult {
    pub point: SamplePoint,
    pub color: Color,
}

/// A reusable batch of input pixels and the samples rendered from them.
///
/// Both sequences keep their capacity across [`WorkPacket::clear`], so a
/// packet that has been through one cycle does not allocate again for a
/// batch of the same size.
#[derive(Debug, Default)]
pub struct WorkPacket {
    pixels: Vec<PixelCoord>,
    results: Vec<SampleResult>,
}

impl WorkPacket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(pixels: usize, results: usize) -> Self {
        Self {
            pixels: Vec::with_capacity(pixels),
            results: Vec::with_capacity(results),
        }
    }

    /// Empties both the input and the output sequence.
    pub fn clear(&mut self) {
        self.pixels.clear();
        self.results.clear();
    }

    pub fn add_pixel(&mut self, pixel: PixelCoord) {
        self.pixels.push(pixel);
    }

    pub fn add_result(&mut self, point: SamplePoint, color: Color) {
        self.results.push(SampleResult { point, color });
    }

    pub fn pixels(&self) -> &[PixelCoord] {
        &self.pixels
    }

    pub fn results(&self) -> &[SampleResult] {
        &self.results
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty() && self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_empties_both_sequences_and_keeps_capacity() {
        let mut packet = WorkPacket::with_capacity(4, 16);
        packet.add_pixel(PixelCoord::new(1, 2));
        packet.add_result(SamplePoint::new(1.5, 2.5), Color::gray(1.0));
        assert!(!packet.is_empty());

        let pixel_capacity = packet.pixels.capacity();
        let result_capacity = packet.results.capacity();
        packet.clear();

        assert!(packet.is_empty());
        assert_eq!(packet.pixels.capacity(), pixel_capacity);
        assert_eq!(packet.results.capacity(), result_capacity);
    }
}
