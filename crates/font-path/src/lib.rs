//! Glyph outline data model.
//!
//! [`PathCommand`] is one outline step, [`PathCommandBuffer`] stores a glyph's
//! commands without touching the heap for typical glyphs, and [`GlyphPath`]
//! bundles the commands with the advance, units-per-em and control-point
//! bounds of one extracted glyph.

mod buffer;
mod command;
mod glyph;

pub use buffer::{INLINE_CAPACITY, PathCommandBuffer};
pub use command::{CommandKind, PathCommand};
pub use glyph::{BoundingBox, GlyphPath};
