//! Font structure summary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use glyphkit_font_subsetter::{FontFormat, FontMetrics, format_size};

use crate::io::read_font;

#[derive(Debug, Clone, clap::Args)]
pub struct InfoArgs {
    /// Font file to inspect
    pub font: PathBuf,
}

impl InfoArgs {
    pub fn run(self) -> Result<()> {
        let data = read_font(&self.font)?;
        let format = FontFormat::sniff(&data)
            .with_context(|| format!("{}: not a font file", self.font.display()))?;
        let metrics = FontMetrics::collect(&data)
            .with_context(|| format!("Failed to parse {} ({format})", self.font.display()))?;
        print!("{}", render(&metrics, format));
        Ok(())
    }
}

/// Human-readable report of glyphs, axes and tables.
pub fn render(metrics: &FontMetrics, format: FontFormat) -> String {
    let mut out = format!(
        "format: {format}\nsize: {}\nglyphs: {}\n",
        format_size(metrics.total_size),
        metrics.glyph_count
    );

    if !metrics.axes.is_empty() {
        out.push_str("axes:\n");
        for axis in &metrics.axes {
            out.push_str(&format!(
                "  {} {}..{} (default {})\n",
                axis.tag, axis.min, axis.max, axis.default
            ));
        }
    }
    if metrics.hinting_size() > 0 {
        out.push_str(&format!("hinting: {}\n", format_size(metrics.hinting_size())));
    }

    out.push_str(&format!("tables ({}):\n", metrics.tables.len()));
    for (tag, size) in metrics.tables_by_size() {
        out.push_str(&format!("  {tag}: {}\n", format_size(size)));
    }
    out
}

#[cfg(test)]
mod tests {
    use glyphkit_test_fonts::full_font;

    use super::*;

    #[test]
    fn test_lists_tables_and_hinting() {
        let data = full_font();
        let text = render(&FontMetrics::collect(&data).unwrap(), FontFormat::TrueType);
        assert!(text.contains("glyphs: 5"));
        assert!(text.contains("hinting:"));
        assert!(text.contains("  glyf:"));
        assert!(!text.contains("axes:"));
    }

    #[test]
    fn test_lists_axes_of_variable_font() {
        let metrics = FontMetrics::collect(font_test_data::VAZIRMATN_VAR).unwrap();
        let text = render(&metrics, FontFormat::TrueType);
        assert!(text.contains("axes:\n  wght"));
    }
}
