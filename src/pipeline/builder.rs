// src/pipeline/builder.rs
use super::config::PipelineConfig;
use super::orchestrator::RenderPipeline;
use crate::error::PipelineError;
use scanflow_executor::ExecutorImpl;
use std::path::Path;

/// A builder for creating a `RenderPipeline`.
#[derive(Debug, Clone, Default)]
pub struct PipelineBuilder {
    config: PipelineConfig,
    executor: ExecutorImpl,
}

impl PipelineBuilder {
    /// Creates a new `PipelineBuilder` with default settings on OS threads.
    pub fn new() -> Self { Default::default() }

    /// Replaces every tuning parameter at once.
    pub fn with_config(mut self, config: PipelineConfig) -> Self { self.config = config; self }

    /// Loads the tuning parameters from a JSON file.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PipelineError> {
        self.config = PipelineConfig::from_file(path)?;
        Ok(self)
    }

    /// Number of worker threads. One selects the single-threaded path.
    pub fn with_worker_count(mut self, count: usize) -> Self { self.config.worker_count = Some(count); self }

    pub fn with_samples_per_pixel(mut self, spp: u32) -> Self { self.config.samples_per_pixel = spp; self }

    /// Desired number of results per packet.
    pub fn with_target_batch_size(mut self, size: usize) -> Self { self.config.target_batch_size = size; self }

    pub fn with_packets_per_worker(mut self, count: usize) -> Self { self.config.packets_per_worker = count; self }

    /// Selects how worker threads are started.
    /// [`ExecutorImpl::Sync`] forces the single-threaded path.
    pub fn with_executor(mut self, executor: ExecutorImpl) -> Self { self.executor = executor; self }

    pub fn build(self) -> Result<RenderPipeline, PipelineError> {
        self.config.validate()?;
        log::debug!(
            "Building render pipeline on {:?} with {:?}.",
            self.executor,
            self.config
        );
        Ok(RenderPipeline::new(self.config, self.executor))
    }
}
