use glyphkit_font_path::GlyphPath;
use log::debug;

use crate::{
    HEADER_LEN, RecordLayout, WireSink,
    error::{Error, Result},
};

/// Largest buffer, in floats, written straight into a sink's memory.
///
/// Bigger outputs are packed into a temporary buffer first and handed over
/// with one copy, so direct access is never held for long.
pub const DIRECT_WRITE_LIMIT: usize = 256;

/// Packs `path` into a new buffer.
pub fn pack(path: &GlyphPath, layout: RecordLayout) -> Vec<f32> {
    let mut out = vec![0.0; layout.packed_len(path.commands.len())];
    write_records(path, layout, &mut out);
    out
}

/// Packs `path` into the front of `out` and returns the number of floats
/// written.
///
/// # Errors
///
/// `Error::BufferTooSmall` if `out` cannot hold the packed buffer; `out` is
/// left untouched.
pub fn pack_into(path: &GlyphPath, layout: RecordLayout, out: &mut [f32]) -> Result<usize> {
    let len = layout.packed_len(path.commands.len());
    let available = out.len();
    let out = out.get_mut(..len).ok_or(Error::BufferTooSmall {
        needed: len,
        available,
    })?;
    write_records(path, layout, out);
    Ok(len)
}

/// Packs `path` into `sink`, writing in place for small outputs when the sink
/// allows it and staging through a temporary buffer otherwise.
///
/// Both routes produce the same floats.
pub fn write_to<S>(path: &GlyphPath, layout: RecordLayout, sink: &mut S) -> Result<usize>
where
    S: WireSink + ?Sized,
{
    let len = layout.packed_len(path.commands.len());
    if len < DIRECT_WRITE_LIMIT
        && let Some(out) = sink.direct(len)
    {
        write_records(path, layout, out);
        return Ok(len);
    }

    debug!("Staging {len} floats before copying to sink");
    let staged = pack(path, layout);
    sink.copy_from(&staged)?;
    Ok(len)
}

/// Fills `out`, which must be exactly the packed length.
fn write_records(path: &GlyphPath, layout: RecordLayout, out: &mut [f32]) {
    let (header, records) = out.split_at_mut(HEADER_LEN);
    let b = path.bounds;
    header.copy_from_slice(&[
        path.commands.len() as f32,
        path.advance_width,
        f32::from(path.units_per_em),
        b.min_x,
        b.min_y,
        b.max_x,
        b.max_y,
    ]);

    let offset = layout.coords_offset();
    for (record, command) in records
        .chunks_exact_mut(layout.record_len())
        .zip(path.commands.iter())
    {
        record.fill(0.0);
        record[0] = f32::from(command.kind().code());
        let coords = command.coords();
        record[offset..offset + 6].copy_from_slice(&coords);
    }
}
