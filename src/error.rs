use std::io;
use thiserror::Error;

/// Errors surfaced to callers of the tree generator
#[derive(Debug, Error)]
pub enum BonsaiError {
    #[error("invalid viewport {rows}x{cols}: rows and columns must be positive")]
    InvalidViewport { rows: usize, cols: usize },
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode tree: {0}")]
    Export(#[from] serde_json::Error),
}
