pub mod assertions;
pub mod fixtures;

use scanflow::{
    OutputSink, PipelineBuilder, PipelineError, PixelRect, ProgressReporter, RenderStats,
    RenderSummary, RendererFactory, SampleResult, SamplePoint, ScanPattern, Color,
};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Keeps every sample and every boundary the pipeline reports.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub samples: Vec<SampleResult>,
    pub boundaries: Vec<i32>,
    /// Samples whose row was already below the last reported boundary
    pub late_samples: usize,
}

impl RecordingSink {
    pub fn last_boundary(&self) -> Option<i32> {
        self.boundaries.last().copied()
    }

    /// Samples per pixel, row-major over `rect`. Samples outside are ignored.
    pub fn counts(&self, rect: PixelRect) -> Vec<u32> {
        let mut counts = vec![0; rect.area() as usize];
        for sample in &self.samples {
            if let Some(idx) = rect.linear_index(sample.point.pixel()) {
                counts[idx] += 1;
            }
        }
        counts
    }
}

impl OutputSink for RecordingSink {
    fn add_sample(&mut self, point: SamplePoint, color: Color) {
        if let Some(boundary) = self.last_boundary()
            && point.pixel().y < boundary
        {
            self.late_samples += 1;
        }
        self.samples.push(SampleResult { point, color });
    }

    fn set_min_flushable_y(&mut self, y: i32) {
        self.boundaries.push(y);
    }
}

/// Records every call a progress reporter receives.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub start_position: Option<u64>,
    pub size: Option<u64>,
    pub starts: usize,
    pub updates: Vec<u64>,
    pub ends: usize,
}

impl ProgressReporter for RecordingProgress {
    fn set_start(&mut self, position: u64) {
        self.start_position = Some(position);
    }

    fn set_size(&mut self, extent: u64) {
        self.size = Some(extent);
    }

    fn start(&mut self) {
        self.starts += 1;
    }

    fn update(&mut self, position: u64) {
        self.updates.push(position);
    }

    fn end(&mut self) {
        self.ends += 1;
    }
}

/// Everything a render left behind.
pub struct Recorded {
    pub sink: RecordingSink,
    pub progress: RecordingProgress,
    pub result: Result<RenderSummary<RenderStats>, PipelineError>,
}

/// Renders `rect` with the given settings into fresh recorders.
pub fn render_rect<F>(
    rect: PixelRect,
    workers: usize,
    samples_per_pixel: u32,
    batch: usize,
    factory: &F,
) -> Recorded
where
    F: RendererFactory,
    F::Renderer: scanflow::PacketRenderer<Stats = RenderStats>,
{
    let pipeline = PipelineBuilder::new()
        .with_worker_count(workers)
        .with_samples_per_pixel(samples_per_pixel)
        .with_target_batch_size(batch)
        .build()
        .expect("valid pipeline settings");

    let mut sink = RecordingSink::default();
    let mut progress = RecordingProgress::default();
    let result = pipeline.render(&ScanPattern::new(rect), factory, &mut sink, &mut progress);
    Recorded {
        sink,
        progress,
        result,
    }
}
