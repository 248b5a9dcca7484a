use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scanflow::{Color, PacketRenderer, RenderError, RenderStats, SamplePoint, WorkPacket};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Takes `samples_per_pixel` jittered samples inside every pixel.
///
/// The colour depends only on the pixel, so output is deterministic no
/// matter which worker rendered it.
pub struct JitterRenderer {
    samples_per_pixel: u32,
    rng: StdRng,
    stats: RenderStats,
}

impl JitterRenderer {
    pub fn new(worker_id: usize, samples_per_pixel: u32) -> Self {
        Self {
            samples_per_pixel,
            rng: StdRng::seed_from_u64(0x5eed ^ worker_id as u64),
            stats: RenderStats::default(),
        }
    }
}

impl PacketRenderer for JitterRenderer {
    type Stats = RenderStats;

    fn render_packet(&mut self, packet: &mut WorkPacket) -> Result<(), RenderError> {
        let pixels = packet.pixels().to_vec();
        for pixel in &pixels {
            let color = pixel_color(pixel.x, pixel.y);
            for _ in 0..self.samples_per_pixel {
                // Stay clear of the next pixel once the offset is added in f32.
                let du = self.rng.random_range(0.0..0.99);
                let dv = self.rng.random_range(0.0..0.99);
                packet.add_result(
                    SamplePoint::new(pixel.x as f32 + du, pixel.y as f32 + dv),
                    color,
                );
            }
        }
        self.stats
            .record_packet(pixels.len(), pixels.len() * self.samples_per_pixel as usize);
        Ok(())
    }

    fn stats(&self) -> RenderStats {
        self.stats
    }
}

pub fn pixel_color(x: i32, y: i32) -> Color {
    Color::new((x & 0xff) as f32 / 255.0, (y & 0xff) as f32 / 255.0, 0.25)
}

pub fn jitter_factory(samples_per_pixel: u32) -> impl Fn(usize) -> Result<JitterRenderer, RenderError> {
    move |worker_id| Ok(JitterRenderer::new(worker_id, samples_per_pixel))
}

/// Renders normally until the shared packet counter reaches `fail_at`,
/// then fails that one packet.
pub struct FailingRenderer {
    inner: JitterRenderer,
    counter: Arc<AtomicUsize>,
    fail_at: usize,
    panic_instead: bool,
}

impl PacketRenderer for FailingRenderer {
    type Stats = RenderStats;

    fn render_packet(&mut self, packet: &mut WorkPacket) -> Result<(), RenderError> {
        let nth = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        if nth == self.fail_at {
            let first = packet.pixels().first().copied().unwrap_or_default();
            if self.panic_instead {
                panic!("boom at packet {}", nth);
            }
            return Err(RenderError::Sample {
                x: first.x,
                y: first.y,
                message: format!("injected failure on packet {}", nth),
            });
        }
        self.inner.render_packet(packet)
    }

    fn stats(&self) -> RenderStats {
        self.inner.stats()
    }
}

/// A factory whose renderers fail on the `fail_at`-th packet rendered
/// across all workers (1-based).
pub fn failing_factory(
    fail_at: usize,
    panic_instead: bool,
) -> impl Fn(usize) -> Result<FailingRenderer, RenderError> {
    let counter = Arc::new(AtomicUsize::new(0));
    move |worker_id| {
        Ok(FailingRenderer {
            inner: JitterRenderer::new(worker_id, 1),
            counter: Arc::clone(&counter),
            fail_at,
            panic_instead,
        })
    }
}
