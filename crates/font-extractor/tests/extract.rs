use glyphkit_font_extractor::{FontSession, GlyphEngine, SessionRegistry, Variation};
use glyphkit_font_path::{CommandKind, GlyphPath, PathCommand};
use glyphkit_test_fonts::{TestFont, basic_font};
use skrifa::{FontRef, MetadataProvider, raw::types::Tag};

fn assert_close(actual: f32, expected: f32) {
    assert!((actual - expected).abs() < 1e-5, "{actual} != {expected}");
}

#[test]
fn test_rectangle_is_normalized_to_em_units() {
    let mut session = FontSession::new(basic_font()).unwrap();
    let path = session.extract('A' as u32, &[]).unwrap();

    assert_eq!(path.units_per_em, 1000);
    assert_close(path.advance_width, 0.6);
    assert_close(path.bounds.min_x, 0.1);
    assert_close(path.bounds.min_y, 0.0);
    assert_close(path.bounds.max_x, 0.5);
    assert_close(path.bounds.max_y, 0.7);

    assert_eq!(path.commands[0].kind(), CommandKind::MoveTo);
    assert_eq!(
        path.commands.last().map(PathCommand::kind),
        Some(CommandKind::Close)
    );
}

#[test]
fn test_quadratic_outline_keeps_control_points() {
    let mut session = FontSession::new(basic_font()).unwrap();
    let path = session.extract('a' as u32, &[]).unwrap();

    assert_close(path.advance_width, 0.5);
    let kinds: Vec<_> = path.commands.iter().map(PathCommand::kind).collect();
    assert!(kinds.contains(&CommandKind::QuadTo));
    // Off-curve points at y=450 define the top of the box.
    assert_close(path.bounds.max_y, 0.45);
    for (x, y) in path.commands.iter().flat_map(PathCommand::points) {
        assert!(path.bounds.contains(x, y));
    }
}

#[test]
fn test_unmapped_codepoint_is_empty() {
    let mut session = FontSession::new(basic_font()).unwrap();
    let path = session.extract('Z' as u32, &[]).unwrap();
    assert_eq!(path, GlyphPath::new());
}

#[test]
fn test_glyph_without_outline_is_empty() {
    let mut session = FontSession::new(basic_font()).unwrap();
    let path = session.extract(' ' as u32, &[]).unwrap();
    assert!(path.is_empty());
    assert_eq!(path.advance_width, 0.0);
}

#[test]
fn test_invalid_scalar_value_is_empty() {
    let mut session = FontSession::new(basic_font()).unwrap();
    assert!(session.extract(0xD800, &[]).unwrap().is_empty());
    assert!(session.extract(u32::MAX, &[]).unwrap().is_empty());
}

#[test]
fn test_unknown_axes_are_ignored_on_static_fonts() {
    let mut session = FontSession::new(basic_font()).unwrap();
    let plain = session.extract('A' as u32, &[]).unwrap();
    let varied = session
        .extract('A' as u32, &[Variation::new("wght", 900.0)])
        .unwrap();
    assert_eq!(plain, varied);
}

#[test]
fn test_hinting_tables_do_not_change_outlines() {
    let mut plain = FontSession::new(basic_font()).unwrap();
    let hinted_font = TestFont::new().with_hinting().build();
    let mut hinted = FontSession::new(hinted_font).unwrap();
    assert_eq!(
        plain.extract('B' as u32, &[]).unwrap(),
        hinted.extract('B' as u32, &[]).unwrap()
    );
}

#[test]
fn test_variable_font_follows_weight() {
    let data = font_test_data::VAZIRMATN_VAR;
    let font = FontRef::new(data).unwrap();
    let mut session = FontSession::new(data).unwrap();
    let cp = font
        .charmap()
        .mappings()
        .map(|(cp, _)| cp)
        .find(|&cp| !session.extract(cp, &[]).unwrap().is_empty())
        .unwrap();

    let light_vars = [Variation::new("wght", 100.0)];
    let heavy_vars = [Variation::new("wght", 900.0)];
    let light = session.extract(cp, &light_vars).unwrap();
    let heavy = session.extract(cp, &heavy_vars).unwrap();
    assert!(!light.is_empty());
    assert_ne!(light.commands, heavy.commands);

    let again = session.extract(cp, &light_vars).unwrap();
    assert_eq!(light, again);
}

#[test]
fn test_session_reports_font_axes() {
    let session = FontSession::new(font_test_data::VAZIRMATN_VAR).unwrap();
    let axes = session.engine().axes();
    assert!(axes.iter().any(|axis| axis.tag == Tag::new(b"wght")));
    assert!(session.engine().units_per_em() > 0);
}

#[test]
fn test_registry_serves_many_threads() {
    let _ = env_logger::builder().is_test(true).try_init();
    let registry = SessionRegistry::new();
    let handle = registry.open(basic_font()).unwrap();
    let expected = registry.extract(handle, 'A' as u32, &[]).unwrap();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..16 {
                    let path = registry.extract(handle, 'A' as u32, &[]).unwrap();
                    assert_eq!(path, expected);
                }
            });
        }
    });

    registry.close(handle).unwrap();
    assert!(registry.is_empty());
}
