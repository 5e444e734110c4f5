//! Exception-free call surface for a foreign-function shim.
//!
//! Every method reports failure through its return value (a zero handle,
//! `None`, or `false`) and logs the cause, so a binding layer only has to
//! marshal plain values.

use std::path::Path;

use glyphkit_font_extractor::{SessionHandle, SessionRegistry, Variation};
use glyphkit_font_subsetter::{AxisConfig, Subsetter, parse_codepoints};
use glyphkit_font_wire::{RecordLayout, pack};
use log::{error, warn};

use crate::{subset::subset_file, validate::sniff_file};

/// Owns every open font session for one embedding runtime.
#[derive(Default)]
pub struct Bridge {
    sessions: SessionRegistry,
    layout: RecordLayout,
}

impl Bridge {
    pub fn new(layout: RecordLayout) -> Self {
        Self {
            sessions: SessionRegistry::new(),
            layout,
        }
    }

    pub fn layout(&self) -> RecordLayout {
        self.layout
    }

    /// Opens a session over a copy of `data`. Returns 0 on failure.
    pub fn create_font_handle(&self, data: &[u8]) -> u64 {
        match self.sessions.open(data) {
            Ok(handle) => handle.into_raw(),
            Err(e) => {
                error!("Failed to create font handle: {e}");
                0
            }
        }
    }

    /// Extracts and packs one glyph. Tags are packed big-endian.
    ///
    /// Returns `None` for a null or closed handle, a missing glyph, or an
    /// extraction failure.
    pub fn extract_path(
        &self,
        handle: u64,
        codepoint: u32,
        variations: &[(u32, f32)],
    ) -> Option<Vec<f32>> {
        let Some(handle) = SessionHandle::from_raw(handle) else {
            warn!("Extraction requested on the null font handle");
            return None;
        };
        let variations: Vec<Variation> = variations
            .iter()
            .map(|&(tag, value)| Variation::from_raw_tag(tag, value))
            .collect();

        match self.sessions.extract(handle, codepoint, &variations) {
            Ok(path) if path.is_empty() => None,
            Ok(path) => Some(pack(&path, self.layout)),
            Err(e) => {
                error!("Failed to extract U+{codepoint:04X}: {e}");
                None
            }
        }
    }

    /// Closes a session. Returns `false` for a null, unknown or already
    /// closed handle.
    pub fn destroy_font_handle(&self, handle: u64) -> bool {
        let Some(handle) = SessionHandle::from_raw(handle) else {
            return false;
        };
        match self.sessions.close(handle) {
            Ok(()) => true,
            Err(e) => {
                warn!("{e}");
                false
            }
        }
    }

    pub fn open_handles(&self) -> usize {
        self.sessions.len()
    }

    /// Subsets `input` into `output`. Codepoints arrive as decimal tokens,
    /// axis instructions as `TAG` or `TAG=MIN:MAX:DEFAULT`; invalid entries
    /// of either are skipped. `output` is never left partially written.
    pub fn subset_font_file<C, A>(
        &self,
        input: &Path,
        output: &Path,
        codepoints: &[C],
        axes: &[A],
        strip_hinting: bool,
        strip_glyph_names: bool,
    ) -> bool
    where
        C: AsRef<str>,
        A: AsRef<str>,
    {
        let axes = axes.iter().filter_map(|spec| {
            let spec = spec.as_ref();
            spec.parse::<AxisConfig>()
                .map_err(|e| warn!("Skipping axis: {e}"))
                .ok()
        });
        let subsetter = Subsetter::new()
            .with_codepoints(parse_codepoints(codepoints))
            .with_axes(axes)
            .strip_hinting(strip_hinting)
            .strip_glyph_names(strip_glyph_names);

        match subset_file(&subsetter, input, output) {
            Ok(_) => true,
            Err(e) => {
                error!("Subsetting {} failed: {e:#}", input.display());
                false
            }
        }
    }

    /// Whether the file starts with a known font signature.
    pub fn validate_font_file(&self, path: &Path) -> bool {
        match sniff_file(path) {
            Ok(_) => true,
            Err(e) => {
                warn!("{e:#}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use glyphkit_font_wire::{HEADER_LEN, unpack};
    use glyphkit_test_fonts::{basic_font, full_font};

    use super::*;

    const WGHT: u32 = u32::from_be_bytes(*b"wght");

    #[test]
    fn test_handle_lifecycle() {
        let bridge = Bridge::default();
        let handle = bridge.create_font_handle(&basic_font());
        assert_ne!(handle, 0);
        assert_eq!(bridge.open_handles(), 1);

        let buf = bridge
            .extract_path(handle, 'A' as u32, &[(WGHT, 400.0)])
            .unwrap();
        assert_eq!(buf.len(), RecordLayout::Padded.packed_len(buf[0] as usize));
        let path = unpack(&buf, RecordLayout::Padded).unwrap();
        assert!((path.advance_width - 0.6).abs() < 1e-6);

        assert!(bridge.destroy_font_handle(handle));
        assert!(!bridge.destroy_font_handle(handle));
        assert!(bridge.extract_path(handle, 'A' as u32, &[]).is_none());
        assert_eq!(bridge.open_handles(), 0);
    }

    #[test]
    fn test_failures_are_values() {
        let bridge = Bridge::new(RecordLayout::Compact);
        assert_eq!(bridge.create_font_handle(&[]), 0);
        assert!(bridge.extract_path(0, 65, &[]).is_none());
        assert!(!bridge.destroy_font_handle(0));
        assert!(!bridge.destroy_font_handle(12345));
    }

    #[test]
    fn test_empty_glyph_is_none() {
        let bridge = Bridge::new(RecordLayout::Compact);
        let handle = bridge.create_font_handle(&basic_font());
        assert!(bridge.extract_path(handle, ' ' as u32, &[]).is_none());
        assert!(bridge.extract_path(handle, 'Z' as u32, &[]).is_none());
        let buf = bridge.extract_path(handle, 'a' as u32, &[]).unwrap();
        assert!(buf.len() > HEADER_LEN);
    }

    #[test]
    fn test_subset_and_validate_files() {
        let dir = env::temp_dir().join(format!("glyphkit_bridge_{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("in.ttf");
        let output = dir.join("out.ttf");
        let bogus = dir.join("bogus.bin");
        fs::write(&input, full_font()).unwrap();
        fs::write(&bogus, b"PK\x03\x04").unwrap();

        let bridge = Bridge::default();
        let codepoints = ["65", "97", "junk"];
        assert!(bridge.subset_font_file(&input, &output, &codepoints, &["XX"], true, true));
        assert!(bridge.validate_font_file(&output));
        assert!(!bridge.validate_font_file(&bogus));
        assert!(!bridge.validate_font_file(&dir.join("missing.ttf")));

        let no_output = dir.join("none.ttf");
        let no_axes: [&str; 0] = [];
        assert!(!bridge.subset_font_file(&input, &no_output, &["nope"], &no_axes, true, true));
        assert!(!no_output.exists());
        fs::remove_dir_all(&dir).unwrap();
    }
}
