use glyphkit_font_path::{BoundingBox, CommandKind, GlyphPath, PathCommand};

use crate::{
    HEADER_LEN, RecordLayout,
    error::{Error, Result},
};

/// Decodes a buffer produced by [`pack`](crate::pack) with the same layout.
///
/// Header values are taken as written; the bounds are not recomputed.
/// Floats past the last record are ignored.
pub fn unpack(buf: &[f32], layout: RecordLayout) -> Result<GlyphPath> {
    let header = buf.get(..HEADER_LEN).ok_or(Error::Truncated {
        len: buf.len(),
        expected: HEADER_LEN,
    })?;

    let count = header[0];
    if !(count >= 0.0 && count.fract() == 0.0 && count <= u32::MAX as f32) {
        return Err(Error::InvalidCommandCount(count));
    }
    let count = count as usize;

    let units_per_em = header[2];
    if !(0.0..=f32::from(u16::MAX)).contains(&units_per_em) || units_per_em.fract() != 0.0 {
        return Err(Error::InvalidUnitsPerEm(units_per_em));
    }

    let expected = layout.packed_len(count);
    let records = buf.get(HEADER_LEN..expected).ok_or(Error::Truncated {
        len: buf.len(),
        expected,
    })?;

    let mut path = GlyphPath::new();
    path.advance_width = header[1];
    path.units_per_em = units_per_em as u16;
    path.bounds = BoundingBox {
        min_x: header[3],
        min_y: header[4],
        max_x: header[5],
        max_y: header[6],
    };

    let offset = layout.coords_offset();
    for (index, record) in records.chunks_exact(layout.record_len()).enumerate() {
        let code = record[0];
        let kind = (code.fract() == 0.0 && (0.0..=255.0).contains(&code))
            .then(|| CommandKind::from_code(code as u8))
            .flatten()
            .ok_or(Error::UnknownCommand { index, code })?;

        let mut coords = [0.0; 6];
        coords.copy_from_slice(&record[offset..offset + 6]);
        // Wire buffers are bounded by the caller, so growth failure here is
        // reported as a short buffer rather than an allocation error.
        path.commands
            .push(PathCommand::from_coords(kind, coords))
            .map_err(|_| Error::Truncated {
                len: buf.len(),
                expected,
            })?;
    }

    Ok(path)
}
