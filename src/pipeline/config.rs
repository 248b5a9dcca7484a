//! Pipeline tuning parameters.

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Configuration for a render pipeline.
///
/// Every field has a default, so a partial JSON document such as
/// `{"samples_per_pixel": 16}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of worker threads (default: the executor's parallelism).
    /// A value of 1 selects the single-threaded path.
    pub worker_count: Option<usize>,
    /// Samples the renderer takes per pixel (default: 1).
    /// Only used to size packets; the renderer decides how it samples.
    pub samples_per_pixel: u32,
    /// Desired number of results per packet (default: 256).
    pub target_batch_size: usize,
    /// Packets allocated per worker (default: 2).
    pub packets_per_worker: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            worker_count: None,
            samples_per_pixel: 1,
            target_batch_size: 256,
            packets_per_worker: 2,
        }
    }
}

impl PipelineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, PipelineError> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path_ref = path.as_ref();
        let source = fs::read_to_string(path_ref).map_err(|e| {
            PipelineError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read pipeline config from '{}': {}", path_ref.display(), e),
            ))
        })?;
        Self::from_json_str(&source)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.worker_count == Some(0) {
            return Err(PipelineError::Config("worker_count must be at least 1".into()));
        }
        if self.samples_per_pixel == 0 {
            return Err(PipelineError::Config("samples_per_pixel must be at least 1".into()));
        }
        if self.target_batch_size == 0 {
            return Err(PipelineError::Config("target_batch_size must be at least 1".into()));
        }
        if self.packets_per_worker == 0 {
            return Err(PipelineError::Config("packets_per_worker must be at least 1".into()));
        }
        Ok(())
    }

    /// Pixels per packet, chosen so each packet yields roughly
    /// `target_batch_size` results: `ceil(target / spp)`, at least one.
    pub fn pixels_per_packet(&self) -> usize {
        let spp = self.samples_per_pixel.max(1) as usize;
        self.target_batch_size.div_ceil(spp).max(1)
    }

    /// The configured worker count, or `parallelism` when none is set.
    pub fn resolved_worker_count(&self, parallelism: usize) -> usize {
        self.worker_count.unwrap_or(parallelism).max(1)
    }

    pub fn pool_size(&self, workers: usize) -> usize {
        workers.saturating_mul(self.packets_per_worker.max(1))
    }
}
