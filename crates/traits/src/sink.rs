use scanflow_types::{Color, SamplePoint};

/// Destination for rendered samples.
///
/// Samples arrive in arbitrary row order. The pipeline guarantees that no
/// sample will land in a row below the last value passed to
/// [`OutputSink::set_min_flushable_y`], so a sink may finalize those rows.
pub trait OutputSink {
    fn add_sample(&mut self, point: SamplePoint, color: Color);

    /// Every row `< y` is complete. Values are non-decreasing over a render.
    fn set_min_flushable_y(&mut self, y: i32);
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn add_sample(&mut self, point: SamplePoint, color: Color) {
        (**self).add_sample(point, color);
    }

    fn set_min_flushable_y(&mut self, y: i32) {
        (**self).set_min_flushable_y(y);
    }
}
