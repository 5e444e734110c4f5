//! Per-font sessions and the extraction operation.

use glyphkit_font_path::{GlyphPath, PathCommandBuffer};
use log::{debug, warn};

use crate::{
    GlyphEngine, MAX_VARIATIONS, ShapedFont, Variation,
    error::Result,
    pen::CommandCollector,
};

/// One parsed font reused across many glyph extractions.
///
/// Every extraction installs its own variation settings on the engine, so a
/// session must never serve two extractions at once. `&mut self` on
/// [`extract`](Self::extract) enforces that for direct callers; concurrent
/// callers either wrap each session in a lock (see
/// [`SessionRegistry`](crate::SessionRegistry)) or open one session per
/// thread.
pub struct FontSession<E = ShapedFont> {
    engine: E,
}

impl FontSession<ShapedFont> {
    /// Parses `data` and builds the shaping and outline state for it.
    ///
    /// # Errors
    ///
    /// `Error::InvalidFont` if the bytes are empty or unparsable.
    pub fn new(data: impl Into<Vec<u8>>) -> Result<Self> {
        let engine = ShapedFont::new(data)?;
        debug!("Opened font session ({} upem)", engine.units_per_em());
        Ok(Self { engine })
    }
}

impl<E: GlyphEngine> FontSession<E> {
    /// Wraps an already constructed engine.
    pub fn with_engine(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn units_per_em(&self) -> u16 {
        self.engine.units_per_em()
    }

    /// Extracts the outline of `codepoint` at the given axis settings into a
    /// new [`GlyphPath`].
    ///
    /// A codepoint without a glyph, or a glyph without an outline, yields an
    /// empty path rather than an error.
    ///
    /// # Errors
    ///
    /// `Error::AllocationFailure` if command storage cannot grow.
    pub fn extract(&mut self, codepoint: u32, variations: &[Variation]) -> Result<GlyphPath> {
        let mut path = GlyphPath::new();
        self.extract_into(codepoint, variations, &mut path)?;
        Ok(path)
    }

    /// Like [`extract`](Self::extract), but reuses `path`'s command storage.
    ///
    /// `path` is cleared first. On error it is left empty.
    pub fn extract_into(
        &mut self,
        codepoint: u32,
        variations: &[Variation],
        path: &mut GlyphPath,
    ) -> Result<()> {
        self.extract_with(codepoint, variations, path, |buffer| CommandCollector::new(buffer))
    }

    fn extract_with<F>(
        &mut self,
        codepoint: u32,
        variations: &[Variation],
        path: &mut GlyphPath,
        collector: F,
    ) -> Result<()>
    where
        F: for<'a> FnOnce(&'a mut PathCommandBuffer) -> CommandCollector<'a>,
    {
        path.clear();

        let variations = if variations.len() > MAX_VARIATIONS {
            warn!(
                "{} variation settings requested, only the first {MAX_VARIATIONS} are applied",
                variations.len()
            );
            &variations[..MAX_VARIATIONS]
        } else {
            variations
        };
        self.engine.apply_variations(variations);

        let Some(glyph_id) = self.engine.shape(codepoint) else {
            debug!("No glyph for U+{codepoint:04X}");
            return Ok(());
        };

        let units_per_em = self.engine.units_per_em();
        if units_per_em == 0 {
            warn!("Font reports zero units per em, skipping U+{codepoint:04X}");
            return Ok(());
        }

        let mut pen = collector(&mut path.commands);
        let drawn = self.engine.draw(glyph_id, &mut pen);
        if let Err(e) = pen.finish() {
            path.clear();
            return Err(e.into());
        }
        if !drawn || path.commands.is_empty() {
            debug!("Glyph {glyph_id} for U+{codepoint:04X} has no outline");
            path.clear();
            return Ok(());
        }

        let scale = 1.0 / f32::from(units_per_em);
        path.normalize(scale);
        path.units_per_em = units_per_em;
        path.advance_width = self.engine.advance_width(glyph_id).unwrap_or_default() * scale;
        Ok(())
    }
}
