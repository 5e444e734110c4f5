//! Production engine backed by rustybuzz shaping and skrifa outlines.

use log::debug;
use rustybuzz::{Direction, UnicodeBuffer, ttf_parser};
use self_cell::self_cell;
use skrifa::{
    FontRef, GlyphId, MetadataProvider,
    instance::{Location, Size},
    outline::{DrawSettings, OutlineGlyphCollection, OutlinePen},
    raw::{TableProvider, types::Tag},
};

use crate::{
    GlyphEngine, Variation,
    error::{Error, Result},
};

/// Variation axis description as reported by the font's `fvar` table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisInfo {
    pub tag: Tag,
    pub min: f32,
    pub default: f32,
    pub max: f32,
}

self_cell!(
    /// The font bytes and the engine state borrowed from them.
    ///
    /// The dependent is dropped before the owner.
    struct FontCell {
        owner: Box<[u8]>,

        #[not_covariant]
        dependent: EngineState,
    }
);

/// Engine objects derived from the font bytes.
///
/// Fields are declared newest-first so the implicit drop releases them in
/// reverse order of creation.
struct EngineState<'a> {
    buffer: Option<UnicodeBuffer>,
    location: Location,
    outlines: OutlineGlyphCollection<'a>,
    axes: Vec<AxisInfo>,
    font: FontRef<'a>,
    face: rustybuzz::Face<'a>,
    units_per_em: u16,
}

impl<'a> EngineState<'a> {
    fn new(data: &'a [u8]) -> Result<Self> {
        let face = rustybuzz::Face::from_slice(data, 0)
            .ok_or_else(|| Error::InvalidFont("shaping engine could not parse a face".into()))?;
        let font = FontRef::new(data).map_err(|e| Error::InvalidFont(e.to_string()))?;
        let units_per_em = font
            .head()
            .map_err(|e| Error::InvalidFont(e.to_string()))?
            .units_per_em();

        let axes = font
            .axes()
            .iter()
            .map(|axis| AxisInfo {
                tag: axis.tag(),
                min: axis.min_value(),
                default: axis.default_value(),
                max: axis.max_value(),
            })
            .collect();

        let outlines = font.outline_glyphs();

        Ok(Self {
            buffer: Some(UnicodeBuffer::new()),
            location: Location::default(),
            outlines,
            axes,
            font,
            face,
            units_per_em,
        })
    }

    /// Every axis at its default, overlaid with `requested`. The last
    /// setting for a tag wins.
    fn shaping_variations(&self, requested: &[Variation]) -> Vec<rustybuzz::Variation> {
        self.axes
            .iter()
            .map(|axis| {
                let value = requested
                    .iter()
                    .rev()
                    .find(|v| v.tag == axis.tag)
                    .map_or(axis.default, |v| v.value);
                rustybuzz::Variation {
                    tag: ttf_parser::Tag::from_bytes(&axis.tag.to_be_bytes()),
                    value,
                }
            })
            .collect()
    }
}

/// A parsed font ready for repeated shaping and outline extraction.
///
/// Owns the raw font bytes together with everything derived from them: the
/// shaping face, a reusable shaping buffer, the outline walker, and the
/// active variation location. Dropping it releases the derived state first
/// and the bytes last.
pub struct ShapedFont {
    cell: FontCell,
}

impl ShapedFont {
    /// Takes ownership of `data` and parses it.
    ///
    /// # Errors
    ///
    /// `Error::InvalidFont` if `data` is empty or either engine rejects it.
    /// Nothing is leaked on failure.
    pub fn new(data: impl Into<Vec<u8>>) -> Result<Self> {
        let data = data.into();
        if data.is_empty() {
            return Err(Error::InvalidFont("empty font data".into()));
        }

        let cell = FontCell::try_new(data.into_boxed_slice(), |bytes| EngineState::new(bytes))?;
        cell.with_dependent(|bytes, state| {
            debug!(
                "Parsed font: {} bytes, {} upem, {} axes",
                bytes.len(),
                state.units_per_em,
                state.axes.len()
            );
        });

        Ok(Self { cell })
    }

    /// The font's variation axes; empty for static fonts.
    pub fn axes(&self) -> &[AxisInfo] {
        self.cell.with_dependent(|_, state| state.axes.as_slice())
    }

    /// The raw font bytes.
    pub fn data(&self) -> &[u8] {
        self.cell.borrow_owner()
    }
}

impl GlyphEngine for ShapedFont {
    fn units_per_em(&self) -> u16 {
        self.cell.with_dependent(|_, state| state.units_per_em)
    }

    fn apply_variations(&mut self, variations: &[Variation]) {
        self.cell.with_dependent_mut(|_, state| {
            if state.axes.is_empty() {
                return;
            }

            let settings = state.shaping_variations(variations);
            state.face.set_variations(&settings);
            state.location = state
                .font
                .axes()
                .location(variations.iter().map(|v| (v.tag, v.value)));
        });
    }

    fn shape(&mut self, codepoint: u32) -> Option<u32> {
        let ch = char::from_u32(codepoint)?;

        self.cell.with_dependent_mut(|_, state| {
            let mut buffer = state.buffer.take().unwrap_or_else(UnicodeBuffer::new);
            buffer.add(ch, 0);
            buffer.set_direction(Direction::LeftToRight);
            buffer.set_script(rustybuzz::script::COMMON);

            let glyphs = rustybuzz::shape(&state.face, &[], buffer);
            let glyph_id = glyphs.glyph_infos().first().map(|info| info.glyph_id);
            state.buffer = Some(glyphs.clear());

            glyph_id.filter(|&id| id != 0)
        })
    }

    fn advance_width(&self, glyph_id: u32) -> Option<f32> {
        self.cell.with_dependent(|_, state| {
            state
                .font
                .glyph_metrics(Size::unscaled(), &state.location)
                .advance_width(GlyphId::new(glyph_id))
        })
    }

    fn draw(&self, glyph_id: u32, pen: &mut impl OutlinePen) -> bool {
        self.cell.with_dependent(|_, state| {
            let Some(outline) = state.outlines.get(GlyphId::new(glyph_id)) else {
                return false;
            };
            let settings = DrawSettings::unhinted(Size::unscaled(), &state.location);
            outline.draw(settings, pen).is_ok()
        })
    }
}
