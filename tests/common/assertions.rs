use super::RecordingSink;
use scanflow::PixelRect;

/// Boundaries only ever rise and no sample arrives for a flushed row.
pub fn assert_flush_contract(sink: &RecordingSink) {
    assert!(
        sink.boundaries.windows(2).all(|w| w[0] <= w[1]),
        "flush boundary moved backwards: {:?}",
        sink.boundaries
    );
    assert_eq!(
        sink.late_samples, 0,
        "{} samples arrived below the flush boundary",
        sink.late_samples
    );
}

/// Every pixel of `rect` received exactly `samples_per_pixel` samples.
pub fn assert_each_pixel_sampled(sink: &RecordingSink, rect: PixelRect, samples_per_pixel: u32) {
    let counts = sink.counts(rect);
    for (idx, &count) in counts.iter().enumerate() {
        let x = rect.x + (idx % rect.width as usize) as i32;
        let y = rect.y + (idx / rect.width as usize) as i32;
        assert_eq!(
            count, samples_per_pixel,
            "pixel ({}, {}) received {} samples",
            x, y, count
        );
    }
    assert_eq!(
        sink.samples.len() as u64,
        rect.area() * u64::from(samples_per_pixel),
        "samples outside the rectangle"
    );
}

/// Every pixel in a row below the last boundary has all its samples.
pub fn assert_flushed_rows_complete(sink: &RecordingSink, rect: PixelRect, samples_per_pixel: u32) {
    let Some(boundary) = sink.last_boundary() else {
        return;
    };
    let counts = sink.counts(rect);
    for y in rect.y..boundary.min(rect.y_end()) {
        for x in rect.x..rect.x_end() {
            let idx = ((y - rect.y) as usize) * rect.width as usize + (x - rect.x) as usize;
            assert_eq!(
                counts[idx], samples_per_pixel,
                "flushed pixel ({}, {}) is incomplete",
                x, y
            );
        }
    }
}
