use std::result;

/// Error types for packing and decoding wire buffers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("buffer ends after {len} floats, expected at least {expected}")]
    Truncated { len: usize, expected: usize },

    #[error("header command count {0} is not a non-negative integer")]
    InvalidCommandCount(f32),

    #[error("header units per em {0} is out of range")]
    InvalidUnitsPerEm(f32),

    #[error("record {index} has unknown command type {code}")]
    UnknownCommand { index: usize, code: f32 },

    #[error("destination holds {available} floats, {needed} needed")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("byte buffer is not a whole, aligned run of f32 values")]
    Misaligned,
}

pub type Result<T> = result::Result<T, Error>;
