//! Row-major traversal of the output rectangle.

use scanflow_types::{PixelCoord, PixelRect};

/// Position of a traversal in a [`ScanPattern`].
///
/// Cursors are plain values; the pattern that produced them interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    x: i32,
    y: i32,
}

impl Cursor {
    /// The pixel the cursor currently points at.
    pub fn pixel(self) -> PixelCoord {
        PixelCoord::new(self.x, self.y)
    }
}

/// Visits every pixel of a rectangle, left to right then top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanPattern {
    rect: PixelRect,
}

impl ScanPattern {
    pub fn new(rect: PixelRect) -> Self {
        Self { rect }
    }

    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    /// Number of pixels the traversal produces.
    pub fn size(&self) -> u64 {
        self.rect.area()
    }

    pub fn begin(&self) -> Cursor {
        if self.rect.is_empty() {
            return self.end();
        }
        Cursor {
            x: self.rect.x,
            y: self.rect.y,
        }
    }

    /// One past the last pixel: the first column of the row below the rectangle.
    pub fn end(&self) -> Cursor {
        Cursor {
            x: self.rect.x,
            y: self.rect.y_end(),
        }
    }

    pub fn is_end(&self, cursor: &Cursor) -> bool {
        cursor.y >= self.rect.y_end()
    }

    /// Moves to the next pixel, wrapping at the right edge. Advancing the
    /// end cursor is a no-op.
    pub fn advance(&self, cursor: &mut Cursor) {
        if self.is_end(cursor) {
            return;
        }
        cursor.x += 1;
        if cursor.x >= self.rect.x_end() {
            cursor.x = self.rect.x;
            cursor.y += 1;
        }
    }

    /// Linear index of the cursor: `(y - y0) * width + (x - x0)`.
    pub fn position(&self, cursor: &Cursor) -> u64 {
        self.position_of(cursor.pixel())
    }

    /// Linear index of a pixel the traversal produces.
    pub fn position_of(&self, pixel: PixelCoord) -> u64 {
        let dy = (i64::from(pixel.y) - i64::from(self.rect.y)) as u64;
        let dx = (i64::from(pixel.x) - i64::from(self.rect.x)) as u64;
        dy * u64::from(self.rect.width) + dx
    }

    /// Smallest row anything from `cursor` onwards can touch.
    ///
    /// In row-major order that is simply the cursor's row.
    pub fn min_y(&self, cursor: &Cursor) -> i32 {
        cursor.y
    }

    /// Appends up to `count` pixels starting at `cursor` and advances it.
    /// Returns how many pixels were produced.
    pub fn take_into<F>(&self, cursor: &mut Cursor, count: usize, mut sink: F) -> usize
    where
        F: FnMut(PixelCoord),
    {
        let mut taken = 0;
        while taken < count && !self.is_end(cursor) {
            sink(cursor.pixel());
            self.advance(cursor);
            taken += 1;
        }
        taken
    }

    /// All pixels in traversal order.
    pub fn pixels(&self) -> impl Iterator<Item = PixelCoord> + '_ {
        let mut cursor = self.begin();
        std::iter::from_fn(move || {
            if self.is_end(&cursor) {
                return None;
            }
            let pixel = cursor.pixel();
            self.advance(&mut cursor);
            Some(pixel)
        })
    }
}
