//! Flat `f32` wire format for [`GlyphPath`](glyphkit_font_path::GlyphPath).
//!
//! A packed buffer is a seven-float header followed by one fixed-width record
//! per command:
//!
//! ```text
//! header:  [count, advance_width, units_per_em, min_x, min_y, max_x, max_y]
//! compact: [type, x1, y1, x2, y2, x3, y3]
//! padded:  [type, 0, 0, 0, f1, f2, f3, f4, f5, f6]
//! ```
//!
//! Type codes are MoveTo=0, LineTo=1, QuadTo=2, CubicTo=3, Close=4, and are
//! stable. Every record has the same width, so a consumer walks the buffer
//! using only the header count and the agreed layout.

mod error;
mod layout;
mod pack;
mod sink;
mod unpack;

pub use error::{Error, Result};
pub use layout::{HEADER_LEN, RecordLayout};
pub use pack::{DIRECT_WRITE_LIMIT, pack, pack_into, write_to};
pub use sink::WireSink;
pub use unpack::unpack;

/// Views a packed buffer as native-endian bytes without copying.
pub fn as_bytes(buf: &[f32]) -> &[u8] {
    bytemuck::cast_slice(buf)
}

/// Views native-endian bytes as a packed buffer without copying.
///
/// # Errors
///
/// `Error::Misaligned` if `bytes` is not 4-byte aligned or its length is not
/// a multiple of four.
pub fn floats_from_bytes(bytes: &[u8]) -> Result<&[f32]> {
    bytemuck::try_cast_slice(bytes).map_err(|_| Error::Misaligned)
}
