use serde::{Deserialize, Serialize};

/// An integer pixel coordinate in output-image space.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PixelCoord {
    pub x: i32,
    pub y: i32,
}

impl PixelCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A continuous sample position. The integer part names the pixel,
/// the fractional part is the offset inside it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct SamplePoint {
    pub u: f32,
    pub v: f32,
}

impl SamplePoint {
    pub fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }

    /// The centre of the given pixel.
    pub fn pixel_center(pixel: PixelCoord) -> Self {
        Self {
            u: pixel.x as f32 + 0.5,
            v: pixel.y as f32 + 0.5,
        }
    }

    /// The pixel this sample falls into.
    pub fn pixel(self) -> PixelCoord {
        PixelCoord {
            x: self.u.floor() as i32,
            y: self.v.floor() as i32,
        }
    }
}

/// A rectangular region of the output image.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// A rectangle anchored at the origin.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// One past the last column, saturating at `i32::MAX`.
    pub fn x_end(self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }

    /// One past the last row, saturating at `i32::MAX`.
    pub fn y_end(self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }

    /// Whether both ends are representable, i.e. `x_end` and `y_end` are exact.
    pub fn is_addressable(self) -> bool {
        self.x.checked_add_unsigned(self.width).is_some()
            && self.y.checked_add_unsigned(self.height).is_some()
    }

    pub fn contains(self, pixel: PixelCoord) -> bool {
        pixel.x >= self.x && pixel.x < self.x_end() && pixel.y >= self.y && pixel.y < self.y_end()
    }

    /// Row-major index of `pixel` relative to the rectangle origin.
    pub fn linear_index(self, pixel: PixelCoord) -> Option<usize> {
        if !self.contains(pixel) {
            return None;
        }
        let dx = (pixel.x - self.x) as usize;
        let dy = (pixel.y - self.y) as usize;
        Some(dy * self.width as usize + dx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_point_maps_to_containing_pixel() {
        assert_eq!(SamplePoint::new(3.99, 7.0).pixel(), PixelCoord::new(3, 7));
        assert_eq!(SamplePoint::new(-0.25, 0.5).pixel(), PixelCoord::new(-1, 0));
        assert_eq!(
            SamplePoint::pixel_center(PixelCoord::new(2, 5)).pixel(),
            PixelCoord::new(2, 5)
        );
    }

    #[test]
    fn test_rect_bounds_and_index() {
        let rect = PixelRect::new(10, 20, 4, 3);
        assert_eq!(rect.x_end(), 14);
        assert_eq!(rect.y_end(), 23);
        assert_eq!(rect.area(), 12);
        assert!(rect.contains(PixelCoord::new(13, 22)));
        assert!(!rect.contains(PixelCoord::new(14, 22)));
        assert_eq!(rect.linear_index(PixelCoord::new(11, 21)), Some(5));
        assert_eq!(rect.linear_index(PixelCoord::new(9, 21)), None);
    }

    #[test]
    fn test_rect_ends_saturate_instead_of_wrapping() {
        let wide = PixelRect::new(0, 0, u32::MAX, 1);
        assert_eq!(wide.x_end(), i32::MAX);
        assert!(!wide.is_addressable());

        let near_edge = PixelRect::new(0, i32::MAX - 2, 4, 4);
        assert_eq!(near_edge.y_end(), i32::MAX);
        assert!(!near_edge.is_addressable());

        let negative = PixelRect::new(i32::MIN, -10, u32::MAX, 10);
        assert_eq!(negative.x_end(), i32::MAX);
        assert_eq!(negative.y_end(), 0);
        assert!(negative.is_addressable());
        assert!(PixelRect::new(i32::MAX - 4, 0, 4, 1).is_addressable());
    }

    #[test]
    fn test_empty_rect() {
        assert!(PixelRect::with_size(0, 10).is_empty());
        assert!(PixelRect::with_size(10, 0).is_empty());
        assert!(!PixelRect::with_size(1, 1).is_empty());
    }
}
