/// Receives coarse progress notifications from the manager thread.
///
/// `start` and `end` are called once per render, `update` any number of
/// times with non-decreasing positions. Implementations must not block.
pub trait ProgressReporter {
    fn set_start(&mut self, position: u64);
    fn set_size(&mut self, extent: u64);
    fn start(&mut self);
    fn update(&mut self, position: u64);
    fn end(&mut self);
}

/// A reporter that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressReporter for NullProgress {
    fn set_start(&mut self, _position: u64) {}
    fn set_size(&mut self, _extent: u64) {}
    fn start(&mut self) {}
    fn update(&mut self, _position: u64) {}
    fn end(&mut self) {}
}

impl<P: ProgressReporter + ?Sized> ProgressReporter for &mut P {
    fn set_start(&mut self, position: u64) {
        (**self).set_start(position);
    }

    fn set_size(&mut self, extent: u64) {
        (**self).set_size(extent);
    }

    fn start(&mut self) {
        (**self).start();
    }

    fn update(&mut self, position: u64) {
        (**self).update(position);
    }

    fn end(&mut self) {
        (**self).end();
    }
}
