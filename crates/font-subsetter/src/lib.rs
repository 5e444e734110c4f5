//! Font subsetting around hb-subset.
//!
//! Reduces a font to the glyphs reachable from a set of codepoints, with
//! optional axis pinning or narrowing for variable fonts and optional removal
//! of hinting and glyph names. Every run measures the font before and after
//! and returns the comparison as a [`SubsetReport`]. Operates on byte slices
//! only; writing the result is left to the caller.
//!
//! # Example
//!
//! ```no_run
//! use glyphkit_font_subsetter::Subsetter;
//!
//! let font_data: &[u8] = &[];
//! let output = Subsetter::new()
//!     .with_codepoints([65, 97])
//!     .with_axes(["wght=300:700:400".parse()?])
//!     .subset(font_data)?;
//! println!("saved {} bytes", output.report.bytes_saved());
//! # Ok::<(), glyphkit_font_subsetter::Error>(())
//! ```

mod axis;
mod codepoints;
mod error;
mod metrics;
mod signature;

use std::collections::BTreeSet;

use hb_subset::{Blob, FontFace, SubsetInput};
use log::{debug, info, warn};

pub use axis::{AxisConfig, AxisMode};
pub use codepoints::parse_codepoints;
pub use error::{Error, Result};
pub use metrics::{AxisRange, FontMetrics, SubsetReport, format_size};
pub use signature::{FontFormat, validate_font};

/// A subset font and the measurements taken around it.
#[derive(Debug, Clone)]
pub struct SubsetOutput {
    pub data: Vec<u8>,
    pub report: SubsetReport,
}

/// Font subsetter with builder pattern.
///
/// Hinting and glyph names are stripped unless disabled.
#[derive(Debug, Clone)]
pub struct Subsetter {
    codepoints: BTreeSet<u32>,
    axes: Vec<AxisConfig>,
    strip_hinting: bool,
    strip_glyph_names: bool,
}

impl Default for Subsetter {
    fn default() -> Self {
        Self::new()
    }
}

impl Subsetter {
    pub fn new() -> Self {
        Self {
            codepoints: BTreeSet::new(),
            axes: Vec::new(),
            strip_hinting: true,
            strip_glyph_names: true,
        }
    }

    /// Adds codepoints to retain.
    pub fn with_codepoints(mut self, codepoints: impl IntoIterator<Item = u32>) -> Self {
        self.codepoints.extend(codepoints);
        self
    }

    /// Adds axis instructions, applied in order.
    pub fn with_axes(mut self, axes: impl IntoIterator<Item = AxisConfig>) -> Self {
        self.axes.extend(axes);
        self
    }

    /// Sets whether to drop `fpgm`, `prep` and `cvt ` (and desubroutinize
    /// CFF). Only takes effect when the font carries hinting tables.
    pub fn strip_hinting(mut self, strip: bool) -> Self {
        self.strip_hinting = strip;
        self
    }

    /// Sets whether to drop glyph names from `post` and `CFF`.
    pub fn strip_glyph_names(mut self, strip: bool) -> Self {
        self.strip_glyph_names = strip;
        self
    }

    pub fn codepoints(&self) -> &BTreeSet<u32> {
        &self.codepoints
    }

    /// Subsets `data` and reports what changed.
    ///
    /// # Errors
    ///
    /// - `Error::NoCodepoints` if no codepoints were added
    /// - `Error::InvalidFont` if `data` (or the subset result) is not a
    ///   readable sfnt
    /// - `Error::SubsetFailed` if hb-subset rejects the input
    pub fn subset(&self, data: &[u8]) -> Result<SubsetOutput> {
        if self.codepoints.is_empty() {
            return Err(Error::NoCodepoints);
        }

        let before = FontMetrics::collect(data)?;
        before.log_summary("Input font");

        let mut input = SubsetInput::new().map_err(|e| Error::SubsetFailed(e.to_string()))?;
        self.configure_flags(&mut input, &before);

        {
            let mut unicode_set = input.unicode_set();
            for &cp in &self.codepoints {
                match char::from_u32(cp) {
                    Some(c) => {
                        unicode_set.insert(c);
                    }
                    None => warn!("Skipping non-scalar codepoint {cp:#x}"),
                }
            }
        }
        info!("Subsetting to {} codepoints", self.codepoints.len());

        let blob = Blob::from_bytes(data).map_err(|e| Error::SubsetFailed(e.to_string()))?;
        let font = FontFace::new(blob).map_err(|e| Error::SubsetFailed(e.to_string()))?;
        self.configure_axes(&mut input, &font);

        debug!("Performing subset operation");
        let subset_font = input
            .subset_font(&font)
            .map_err(|e| Error::SubsetFailed(e.to_string()))?;
        let data = subset_font.underlying_blob().to_vec();

        let after = FontMetrics::collect(&data)?;
        let report = SubsetReport { before, after };
        report.log();

        Ok(SubsetOutput { data, report })
    }

    fn configure_flags(&self, input: &mut SubsetInput, before: &FontMetrics) {
        let mut removing = Vec::new();

        if self.strip_hinting && before.hinting_size() > 0 {
            input.flags().remove_hinting().remove_subroutines();
            removing.push(format!("hinting ({})", format_size(before.hinting_size())));
        }

        // hb-subset drops names unless asked to keep them.
        if !self.strip_glyph_names {
            input.flags().retain_glyph_names();
        } else if before.post_size() > 0 {
            removing.push(format!("glyph names ({})", format_size(before.post_size())));
        }

        if !removing.is_empty() {
            info!("Removing: {}", removing.join(", "));
        }
    }

    fn configure_axes(&self, input: &mut SubsetInput, font: &FontFace) {
        for axis in &self.axes {
            let tag = u32::from_be_bytes(axis.tag.to_be_bytes());
            // SAFETY: both pointers come from live wrappers borrowed for the
            // duration of the call; hb only reads the face and updates the
            // input's axis table.
            let applied = unsafe {
                match axis.mode {
                    AxisMode::PinToDefault => hb_subset::sys::hb_subset_input_pin_axis_to_default(
                        input.as_raw(),
                        font.as_raw(),
                        tag,
                    ),
                    AxisMode::Range { min, max, default } => {
                        hb_subset::sys::hb_subset_input_set_axis_range(
                            input.as_raw(),
                            font.as_raw(),
                            tag,
                            min,
                            max,
                            default,
                        )
                    }
                }
            };

            if applied == 0 {
                warn!("Axis {} is not in the font, ignoring '{axis}'", axis.tag);
            } else {
                match axis.mode {
                    AxisMode::PinToDefault => info!("Removing axis {}", axis.tag),
                    AxisMode::Range { min, max, .. } => {
                        info!("Limiting axis {}: {min:.0}..{max:.0}", axis.tag)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_by_default() {
        let subsetter = Subsetter::default();
        assert!(subsetter.strip_hinting);
        assert!(subsetter.strip_glyph_names);
    }

    #[test]
    fn test_builder_chain() {
        let subsetter = Subsetter::new()
            .with_codepoints([97, 65, 97])
            .with_axes(["wght".parse().unwrap()])
            .strip_hinting(false)
            .strip_glyph_names(false);

        assert_eq!(subsetter.codepoints().len(), 2);
        assert_eq!(subsetter.axes.len(), 1);
        assert!(!subsetter.strip_hinting);
        assert!(!subsetter.strip_glyph_names);
    }

    #[test]
    fn test_empty_codepoints_fail_before_parsing() {
        assert!(matches!(Subsetter::new().subset(&[]), Err(Error::NoCodepoints)));
    }

    #[test]
    fn test_garbage_is_invalid_font() {
        let result = Subsetter::new()
            .with_codepoints([65])
            .subset(b"not a font at all");
        assert!(matches!(result, Err(Error::InvalidFont(_))));
    }
}
