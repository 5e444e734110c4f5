//! The shaping/outline engine seam.

use skrifa::outline::OutlinePen;

use crate::Variation;

/// Per-font shaping and outline state driven by a
/// [`FontSession`](crate::FontSession).
///
/// Implementations hold mutable state (the active variation settings and any
/// reusable shaping buffers), which is why shaping takes `&mut self`.
pub trait GlyphEngine {
    /// The font's design units per em. Zero marks a broken font.
    fn units_per_em(&self) -> u16;

    /// Installs `variations` as the active axis settings.
    ///
    /// Axes not listed revert to their defaults; an empty slice resets every
    /// axis. Tags the font does not define are ignored.
    fn apply_variations(&mut self, variations: &[Variation]);

    /// Shapes a single codepoint left-to-right with the common script and
    /// returns the resulting glyph id.
    ///
    /// Shaping, rather than a plain cmap lookup, is what applies required
    /// variation substitutions (`rvrn`). Returns `None` if the codepoint does
    /// not map to a real glyph.
    fn shape(&mut self, codepoint: u32) -> Option<u32>;

    /// Horizontal advance of `glyph_id` in font units at the active
    /// variation settings.
    fn advance_width(&self, glyph_id: u32) -> Option<f32>;

    /// Walks the outline of `glyph_id` in font units at the active variation
    /// settings. Returns `false` if the glyph could not be drawn.
    fn draw(&self, glyph_id: u32, pen: &mut impl OutlinePen) -> bool;
}
