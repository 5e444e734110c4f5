use std::{collections::TryReserveError, result};

/// Error types for glyph extraction.
///
/// A codepoint without a glyph is not an error; it produces an empty
/// [`GlyphPath`](glyphkit_font_path::GlyphPath).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid font: {0}")]
    InvalidFont(String),

    #[error("invalid or closed session handle: {0}")]
    InvalidHandle(u64),

    #[error("failed to grow path command storage: {0}")]
    AllocationFailure(#[from] TryReserveError),
}

pub type Result<T> = result::Result<T, Error>;
