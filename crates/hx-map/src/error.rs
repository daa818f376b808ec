//! Map-subsystem error type.

use thiserror::Error;

use hx_core::CoreError;

/// Errors produced by `hx-map`.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("invalid tile: {0}")]
    Tile(#[from] CoreError),

    #[error("tile row {row}: {source}")]
    Row {
        row:    usize,
        #[source]
        source: CoreError,
    },

    #[error("tile parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MapResult<T> = Result<T, MapError>;
