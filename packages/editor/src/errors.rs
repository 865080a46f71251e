//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Buffer is fragmented into {nodes} text nodes")]
    Fragmented { nodes: usize },

    #[error("Range error: {0}")]
    Range(#[from] RangeError),
}

/// Why a single highlight range could not be built
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Empty range at offset {start}")]
    Empty { start: usize },

    #[error("Range {start}..{end} exceeds node length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },
}
