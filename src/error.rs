// src/error.rs
use scanflow_executor::ExecutorError;
use scanflow_traits::RenderError;
use thiserror::Error;

/// Errors a render can end with.
///
/// Broken internal invariants are not represented here; they panic.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Worker {worker_id} failed: {source}")]
    WorkerFailed {
        worker_id: usize,
        #[source]
        source: RenderError,
    },

    #[error("Worker {worker_id} panicked: {message}")]
    WorkerPanicked { worker_id: usize, message: String },

    #[error("Executor error: {0}")]
    Executor(#[from] ExecutorError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// The renderer error behind this failure, if there is one.
    pub fn render_error(&self) -> Option<&RenderError> {
        match self {
            PipelineError::Render(e) | PipelineError::WorkerFailed { source: e, .. } => Some(e),
            _ => None,
        }
    }
}
