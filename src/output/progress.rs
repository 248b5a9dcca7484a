//! A progress reporter that writes milestones to the log.

use log::info;
use scanflow_traits::ProgressReporter;

/// Logs every `step_percent` of progress at `info` level.
#[derive(Debug, Clone)]
pub struct LogProgress {
    label: String,
    step_percent: u32,
    start: u64,
    size: u64,
    next_milestone: u32,
    last_position: u64,
}

impl LogProgress {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            step_percent: 10,
            start: 0,
            size: 0,
            next_milestone: 0,
            last_position: 0,
        }
    }

    /// Sets the milestone spacing, clamped to 1..=100.
    pub fn with_step(mut self, step_percent: u32) -> Self {
        self.step_percent = step_percent.clamp(1, 100);
        self
    }

    /// Percentage of the pattern covered by the last update.
    pub fn percent(&self) -> u32 {
        if self.size == 0 {
            return 100;
        }
        let done = self.last_position.saturating_sub(self.start).min(self.size);
        (done * 100 / self.size) as u32
    }

    /// The next percentage that will be logged.
    pub fn next_milestone(&self) -> u32 {
        self.next_milestone
    }
}

impl ProgressReporter for LogProgress {
    fn set_start(&mut self, position: u64) {
        self.start = position;
        self.last_position = position;
    }

    fn set_size(&mut self, extent: u64) {
        self.size = extent;
    }

    fn start(&mut self) {
        info!("[{}] Started ({} pixels).", self.label, self.size);
        self.next_milestone = self.step_percent;
    }

    fn update(&mut self, position: u64) {
        self.last_position = position;
        let percent = self.percent();
        if percent >= self.next_milestone && self.next_milestone < 100 {
            info!("[{}] {}% done.", self.label, percent);
            // Skip milestones a large batch jumped over.
            self.next_milestone = (percent / self.step_percent + 1) * self.step_percent;
        }
    }

    fn end(&mut self) {
        self.last_position = self.start + self.size;
        info!("[{}] Finished.", self.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestones_advance_by_step() {
        let mut progress = LogProgress::new("test").with_step(25);
        progress.set_start(0);
        progress.set_size(100);
        progress.start();
        assert_eq!(progress.next_milestone(), 25);

        progress.update(10);
        assert_eq!(progress.next_milestone(), 25);

        progress.update(30);
        assert_eq!(progress.percent(), 30);
        assert_eq!(progress.next_milestone(), 50);

        progress.update(80);
        assert_eq!(progress.next_milestone(), 100);

        progress.end();
        assert_eq!(progress.percent(), 100);
    }

    #[test]
    fn test_offset_start_and_empty_size() {
        let mut progress = LogProgress::new("offset");
        progress.set_start(40);
        progress.set_size(20);
        progress.start();
        progress.update(50);
        assert_eq!(progress.percent(), 50);

        let mut empty = LogProgress::new("empty");
        empty.set_size(0);
        assert_eq!(empty.percent(), 100);
    }

    #[test]
    fn test_step_is_clamped() {
        let progress = LogProgress::new("clamp").with_step(0);
        assert_eq!(progress.step_percent, 1);
    }
}
