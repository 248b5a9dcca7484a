use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Counters a renderer accumulates while it works.
///
/// Each worker owns one and they are summed once the worker has been joined.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub packets: u64,
    pub pixels: u64,
    pub samples: u64,
}

impl RenderStats {
    pub fn record_packet(&mut self, pixels: usize, samples: usize) {
        self.packets += 1;
        self.pixels += pixels as u64;
        self.samples += samples as u64;
    }
}

impl Add for RenderStats {
    type Output = RenderStats;

    fn add(mut self, rhs: RenderStats) -> RenderStats {
        self += rhs;
        self
    }
}

impl AddAssign for RenderStats {
    fn add_assign(&mut self, rhs: RenderStats) {
        self.packets += rhs.packets;
        self.pixels += rhs.pixels;
        self.samples += rhs.samples;
    }
}

impl Sum for RenderStats {
    fn sum<I: Iterator<Item = RenderStats>>(iter: I) -> Self {
        iter.fold(RenderStats::default(), Add::add)
    }
}
