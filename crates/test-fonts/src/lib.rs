//! Synthesized TrueType fonts for tests.
//!
//! Every font has the same five glyphs at 1000 units per em:
//!
//! | gid | name      | codepoint | advance | outline                        |
//! |-----|-----------|-----------|---------|--------------------------------|
//! | 0   | `.notdef` |           | 500     | none                           |
//! | 1   | `space`   | U+0020    | 250     | none                           |
//! | 2   | `A`       | U+0041    | 600     | rectangle (100,0)-(500,700)    |
//! | 3   | `a`       | U+0061    | 500     | quadratic bowl (50,0)-(450,450) |
//! | 4   | `B`       | U+0042    | 600     | rectangle (100,0)-(450,700)    |

use kurbo::BezPath;
use write_fonts::{
    FontBuilder,
    tables::{
        cmap::Cmap,
        glyf::{GlyfLocaBuilder, Glyph, SimpleGlyph},
        head::{Flags, Head, MacStyle},
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        loca::LocaFormat,
        maxp::Maxp,
        os2::{Os2, SelectionFlags},
        post::Post,
    },
    types::{FWord, Fixed, GlyphId, LongDateTime, Tag, UfWord, Version16Dot16},
};

pub const UNITS_PER_EM: u16 = 1000;
pub const GLYPH_COUNT: u16 = 5;

pub const GID_SPACE: u32 = 1;
pub const GID_UPPER_A: u32 = 2;
pub const GID_LOWER_A: u32 = 3;
pub const GID_UPPER_B: u32 = 4;

const GLYPH_NAMES: [&str; 5] = [".notdef", "space", "A", "a", "B"];
const ADVANCES: [u16; 5] = [500, 250, 600, 500, 600];
// Each outlined glyph's xMin; outlines are positioned by `xMin - lsb`.
const LEFT_SIDE_BEARINGS: [i16; 5] = [0, 0, 100, 50, 100];
const CMAP: [(char, u32); 4] =
    [(' ', GID_SPACE), ('A', GID_UPPER_A), ('a', GID_LOWER_A), ('B', GID_UPPER_B)];

/// Builds one of the test fonts.
///
/// The default is a plain font with a version 3 `post` table and no hinting
/// tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestFont {
    hinting: bool,
    glyph_names: bool,
}

impl TestFont {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `fpgm`, `prep` and `cvt ` tables.
    pub fn with_hinting(mut self) -> Self {
        self.hinting = true;
        self
    }

    /// Uses a version 2 `post` table carrying glyph names.
    pub fn with_glyph_names(mut self) -> Self {
        self.glyph_names = true;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut glyf_builder = GlyfLocaBuilder::new();
        for glyph in glyphs() {
            glyf_builder.add_glyph(&glyph).unwrap();
        }
        let (glyf, loca, loca_format) = glyf_builder.build();

        let mappings = CMAP.map(|(ch, gid)| (ch, GlyphId::new(gid)));
        let cmap = Cmap::from_mappings(mappings).unwrap();

        let mut builder = FontBuilder::new();
        builder.add_table(&head(loca_format)).unwrap();
        builder.add_table(&hhea()).unwrap();
        builder.add_table(&hmtx()).unwrap();
        builder.add_table(&maxp()).unwrap();
        builder.add_table(&os2()).unwrap();
        builder.add_table(&cmap).unwrap();
        builder.add_table(&glyf).unwrap();
        builder.add_table(&loca).unwrap();

        if self.glyph_names {
            builder.add_raw(Tag::new(b"post"), post_v2());
        } else {
            builder.add_table(&post_v3()).unwrap();
        }

        if self.hinting {
            // SVTCA[y] is a harmless single-byte instruction.
            builder.add_raw(Tag::new(b"fpgm"), vec![0x00; 8]);
            builder.add_raw(Tag::new(b"prep"), vec![0x00; 8]);
            let cvt = [0i16, 50, 700, -200].map(i16::to_be_bytes).concat();
            builder.add_raw(Tag::new(b"cvt "), cvt);
        }

        builder.build()
    }
}

/// The plain test font.
pub fn basic_font() -> Vec<u8> {
    TestFont::new().build()
}

/// The test font with hinting tables and glyph names.
pub fn full_font() -> Vec<u8> {
    TestFont::new().with_hinting().with_glyph_names().build()
}

fn rect(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((x_min, y_min));
    path.line_to((x_max, y_min));
    path.line_to((x_max, y_max));
    path.line_to((x_min, y_max));
    path.close_path();
    path
}

fn bowl() -> BezPath {
    let mut path = BezPath::new();
    path.move_to((50.0, 0.0));
    path.line_to((450.0, 0.0));
    path.quad_to((450.0, 450.0), (250.0, 450.0));
    path.quad_to((50.0, 450.0), (50.0, 0.0));
    path.close_path();
    path
}

fn glyphs() -> [Glyph; 5] {
    let simple = |path: BezPath| Glyph::Simple(SimpleGlyph::from_bezpath(&path).unwrap());
    [
        Glyph::Empty,
        Glyph::Empty,
        simple(rect(100.0, 0.0, 500.0, 700.0)),
        simple(bowl()),
        simple(rect(100.0, 0.0, 450.0, 700.0)),
    ]
}

fn head(loca_format: LocaFormat) -> Head {
    Head {
        font_revision: Fixed::from_f64(1.0),
        checksum_adjustment: 0,
        magic_number: 0x5F0F3CF5,
        flags: Flags::empty(),
        units_per_em: UNITS_PER_EM,
        created: LongDateTime::new(0),
        modified: LongDateTime::new(0),
        x_min: 50,
        y_min: 0,
        x_max: 500,
        y_max: 700,
        mac_style: MacStyle::empty(),
        lowest_rec_ppem: 8,
        font_direction_hint: 2,
        index_to_loc_format: match loca_format {
            LocaFormat::Short => 0,
            LocaFormat::Long => 1,
        },
    }
}

fn hhea() -> Hhea {
    Hhea {
        ascender: FWord::new(800),
        descender: FWord::new(-200),
        line_gap: FWord::new(0),
        advance_width_max: UfWord::new(600),
        min_left_side_bearing: FWord::new(50),
        min_right_side_bearing: FWord::new(50),
        x_max_extent: FWord::new(500),
        caret_slope_rise: 1,
        caret_slope_run: 0,
        caret_offset: 0,
        number_of_h_metrics: GLYPH_COUNT,
    }
}

fn hmtx() -> Hmtx {
    Hmtx {
        h_metrics: ADVANCES
            .iter()
            .zip(LEFT_SIDE_BEARINGS)
            .map(|(&advance, side_bearing)| LongMetric {
                advance,
                side_bearing,
            })
            .collect(),
        left_side_bearings: vec![],
    }
}

fn maxp() -> Maxp {
    Maxp {
        num_glyphs: GLYPH_COUNT,
        max_points: Some(8),
        max_contours: Some(1),
        max_composite_points: Some(0),
        max_composite_contours: Some(0),
        max_zones: Some(2),
        max_twilight_points: Some(0),
        max_storage: Some(0),
        max_function_defs: Some(0),
        max_instruction_defs: Some(0),
        max_stack_elements: Some(0),
        max_size_of_instructions: Some(0),
        max_component_elements: Some(0),
        max_component_depth: Some(0),
    }
}

fn os2() -> Os2 {
    Os2 {
        x_avg_char_width: 500,
        us_weight_class: 400,
        us_width_class: 5,
        fs_type: 0,
        y_subscript_x_size: 650,
        y_subscript_y_size: 600,
        y_subscript_x_offset: 0,
        y_subscript_y_offset: 75,
        y_superscript_x_size: 650,
        y_superscript_y_size: 600,
        y_superscript_x_offset: 0,
        y_superscript_y_offset: 350,
        y_strikeout_size: 50,
        y_strikeout_position: 300,
        s_family_class: 0,
        panose_10: [0; 10],
        ul_unicode_range_1: 1,
        ul_unicode_range_2: 0,
        ul_unicode_range_3: 0,
        ul_unicode_range_4: 0,
        ach_vend_id: Tag::new(b"NONE"),
        fs_selection: SelectionFlags::REGULAR,
        us_first_char_index: 0x20,
        us_last_char_index: 0x61,
        s_typo_ascender: 800,
        s_typo_descender: -200,
        s_typo_line_gap: 0,
        us_win_ascent: 800,
        us_win_descent: 200,
        ul_code_page_range_1: Some(1),
        ul_code_page_range_2: Some(0),
        sx_height: Some(450),
        s_cap_height: Some(700),
        us_default_char: Some(0),
        us_break_char: Some(0x20),
        us_max_context: Some(0),
        us_lower_optical_point_size: None,
        us_upper_optical_point_size: None,
    }
}

fn post_v3() -> Post {
    Post {
        version: Version16Dot16::VERSION_3_0,
        italic_angle: Fixed::from_f64(0.0),
        underline_position: FWord::new(-100),
        underline_thickness: FWord::new(50),
        is_fixed_pitch: 0,
        min_mem_type42: 0,
        max_mem_type42: 0,
        min_mem_type1: 0,
        max_mem_type1: 0,
        num_glyphs: Some(GLYPH_COUNT),
        glyph_name_index: None,
        string_data: None,
    }
}

/// Version 2 `post` with every name stored as a custom Pascal string.
fn post_v2() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend(0x0002_0000u32.to_be_bytes());
    data.extend(0u32.to_be_bytes()); // italicAngle
    data.extend((-100i16).to_be_bytes());
    data.extend(50i16.to_be_bytes());
    data.extend([0u8; 4 * 5]); // isFixedPitch, min/max memory usage
    data.extend(GLYPH_COUNT.to_be_bytes());
    for index in 0..GLYPH_COUNT {
        data.extend((258 + index).to_be_bytes());
    }
    for name in GLYPH_NAMES {
        data.push(name.len() as u8);
        data.extend(name.as_bytes());
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_valid_sfnt() {
        let data = basic_font();
        assert_eq!(&data[..4], &[0x00, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_optional_tables_grow_font() {
        assert!(full_font().len() > basic_font().len());
    }

    #[test]
    fn test_side_bearings_match_outline_x_min() {
        for (glyph, lsb) in glyphs().iter().zip(LEFT_SIDE_BEARINGS) {
            match glyph {
                Glyph::Simple(simple) => assert_eq!(simple.bbox.x_min, lsb),
                _ => assert_eq!(lsb, 0),
            }
        }
    }
}
