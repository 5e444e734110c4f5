use std::result;

use read_fonts::ReadError;

/// Error types for subsetting.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read font: {0}")]
    InvalidFont(#[from] ReadError),

    #[error("no codepoints to retain")]
    NoCodepoints,

    #[error("invalid axis configuration '{0}'")]
    InvalidAxis(String),

    #[error("subsetting failed: {0}")]
    SubsetFailed(String),
}

pub type Result<T> = result::Result<T, Error>;
