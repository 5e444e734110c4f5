//! Size and structure measurements taken before and after subsetting.

use std::collections::BTreeMap;

use log::{debug, info};
use read_fonts::{FontRef, ReadError, TableProvider, types::Tag};

const FPGM: Tag = Tag::new(b"fpgm");
const PREP: Tag = Tag::new(b"prep");
const CVT: Tag = Tag::new(b"cvt ");
const POST: Tag = Tag::new(b"post");
const GLYPH_DATA: [Tag; 3] = [Tag::new(b"glyf"), Tag::new(b"CFF "), Tag::new(b"CFF2")];

/// Tables whose size changes by more than this are listed as reduced.
const SIGNIFICANT_REDUCTION: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub tag: Tag,
    pub min: f32,
    pub default: f32,
    pub max: f32,
}

/// A snapshot of a font's glyph count, table sizes and axes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontMetrics {
    pub glyph_count: u16,
    pub total_size: usize,
    pub tables: BTreeMap<Tag, usize>,
    pub axes: Vec<AxisRange>,
}

impl FontMetrics {
    /// Measures an sfnt binary.
    pub fn collect(data: &[u8]) -> Result<Self, ReadError> {
        let font = FontRef::new(data)?;

        let tables = font
            .table_directory
            .table_records()
            .iter()
            .map(|record| (record.tag(), record.length() as usize))
            .collect();

        let axes = match font.fvar() {
            Ok(fvar) => fvar
                .axis_instance_arrays()?
                .axes()
                .iter()
                .map(|axis| AxisRange {
                    tag: axis.axis_tag(),
                    min: axis.min_value().to_f64() as f32,
                    default: axis.default_value().to_f64() as f32,
                    max: axis.max_value().to_f64() as f32,
                })
                .collect(),
            Err(_) => Vec::new(),
        };

        Ok(Self {
            glyph_count: font.maxp()?.num_glyphs(),
            total_size: data.len(),
            tables,
            axes,
        })
    }

    pub fn table_size(&self, tag: Tag) -> usize {
        self.tables.get(&tag).copied().unwrap_or(0)
    }

    pub fn fpgm_size(&self) -> usize {
        self.table_size(FPGM)
    }

    pub fn prep_size(&self) -> usize {
        self.table_size(PREP)
    }

    pub fn cvt_size(&self) -> usize {
        self.table_size(CVT)
    }

    pub fn post_size(&self) -> usize {
        self.table_size(POST)
    }

    /// Combined size of the TrueType hinting tables.
    pub fn hinting_size(&self) -> usize {
        self.fpgm_size() + self.prep_size() + self.cvt_size()
    }

    /// Size of the outline table: `glyf`, else `CFF `, else `CFF2`.
    pub fn glyph_data_size(&self) -> usize {
        GLYPH_DATA
            .iter()
            .find_map(|tag| self.tables.get(tag).copied())
            .unwrap_or(0)
    }

    /// Tables sorted largest first.
    pub fn tables_by_size(&self) -> Vec<(Tag, usize)> {
        let mut sorted: Vec<_> = self
            .tables
            .iter()
            .map(|(tag, size)| (*tag, *size))
            .collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        sorted
    }

    pub(crate) fn log_summary(&self, label: &str) {
        info!(
            "{label}: {}, {} glyphs",
            format_size(self.total_size),
            self.glyph_count
        );

        let (large, small): (Vec<_>, Vec<_>) = self
            .tables_by_size()
            .into_iter()
            .partition(|(_, size)| *size > SIGNIFICANT_REDUCTION);
        for (tag, size) in large.iter().take(10) {
            debug!("  {tag}: {}", format_size(*size));
        }
        if !small.is_empty() {
            let total: usize = small.iter().map(|(_, size)| size).sum();
            debug!("  + {} smaller tables: {}", small.len(), format_size(total));
        }

        for axis in &self.axes {
            info!(
                "  axis {}: {:.0}..{:.0} (default {:.0})",
                axis.tag, axis.min, axis.max, axis.default
            );
        }
        if self.hinting_size() > 0 {
            info!(
                "  hinting: {} (fpgm {}, prep {}, cvt {})",
                format_size(self.hinting_size()),
                format_size(self.fpgm_size()),
                format_size(self.prep_size()),
                format_size(self.cvt_size())
            );
        }
    }
}

/// Before/after comparison of one subsetting run.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsetReport {
    pub before: FontMetrics,
    pub after: FontMetrics,
}

impl SubsetReport {
    pub fn glyphs_removed(&self) -> u16 {
        let Self { before, after } = self;
        before.glyph_count.saturating_sub(after.glyph_count)
    }

    pub fn bytes_saved(&self) -> usize {
        self.before.total_size.saturating_sub(self.after.total_size)
    }

    pub fn hinting_bytes_saved(&self) -> usize {
        let Self { before, after } = self;
        before.hinting_size().saturating_sub(after.hinting_size())
    }

    pub fn glyph_names_bytes_saved(&self) -> usize {
        let Self { before, after } = self;
        before.post_size().saturating_sub(after.post_size())
    }

    pub fn glyph_data_bytes_saved(&self) -> usize {
        let Self { before, after } = self;
        before
            .glyph_data_size()
            .saturating_sub(after.glyph_data_size())
    }

    /// Tables present before but not after, with their original size.
    pub fn removed_tables(&self) -> Vec<(Tag, usize)> {
        self.before
            .tables
            .iter()
            .filter(|(tag, _)| !self.after.tables.contains_key(*tag))
            .map(|(tag, size)| (*tag, *size))
            .collect()
    }

    /// Tables that shrank by more than 1 KiB as `(tag, before, after)`,
    /// largest reduction first.
    pub fn reduced_tables(&self) -> Vec<(Tag, usize, usize)> {
        let mut reduced: Vec<_> = self
            .after
            .tables
            .iter()
            .filter_map(|(tag, &after)| {
                let before = self.before.table_size(*tag);
                let shrunk = before.saturating_sub(after) > SIGNIFICANT_REDUCTION;
                shrunk.then_some((*tag, before, after))
            })
            .collect();
        reduced.sort_by_key(|&(_, before, after)| std::cmp::Reverse(before - after));
        reduced
    }

    /// Axes still variable in the output.
    pub fn remaining_axes(&self) -> Vec<Tag> {
        self.after.axes.iter().map(|axis| axis.tag).collect()
    }

    pub fn log(&self) {
        self.after.log_summary("Result");

        let saved = self.bytes_saved();
        let percent = if self.before.total_size > 0 {
            saved * 100 / self.before.total_size
        } else {
            0
        };
        info!(
            "Reduction: {} ({percent}%), {} glyphs removed",
            format_size(saved),
            self.glyphs_removed()
        );

        let removed = self.removed_tables();
        if !removed.is_empty() {
            let total: usize = removed.iter().map(|(_, size)| size).sum();
            let mut names: Vec<String> = removed
                .iter()
                .take(5)
                .map(|(tag, size)| format!("{tag} ({})", format_size(*size)))
                .collect();
            if removed.len() > 5 {
                names.push(format!("+{} more", removed.len() - 5));
            }
            info!(
                "Tables removed ({}): {}",
                format_size(total),
                names.join(", ")
            );
        }

        for (tag, before, after) in self.reduced_tables().into_iter().take(5) {
            info!(
                "  {tag}: {} -> {} (-{}%)",
                format_size(before),
                format_size(after),
                (before - after) * 100 / before
            );
        }

        if !self.after.axes.is_empty() && self.after.axes.len() != self.before.axes.len() {
            let tags: Vec<String> = self.remaining_axes().iter().map(Tag::to_string).collect();
            info!("Remaining axes: {}", tags.join(", "));
        }
    }
}

/// Renders a byte count as `B`, `KB` or `MB` with one decimal place.
pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let bytes_f = bytes as f64;
    if bytes_f < KB {
        format!("{bytes} B")
    } else if bytes_f < KB * KB {
        format!("{:.1} KB", bytes_f / KB)
    } else {
        format!("{:.1} MB", bytes_f / (KB * KB))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(glyphs: u16, tables: &[(&[u8; 4], usize)]) -> FontMetrics {
        let tables: BTreeMap<_, _> = tables
            .iter()
            .map(|(tag, size)| (Tag::new(tag), *size))
            .collect();
        FontMetrics {
            glyph_count: glyphs,
            total_size: tables.values().sum(),
            tables,
            axes: vec![],
        }
    }

    #[test]
    fn test_formats_sizes() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_glyph_data_prefers_glyf() {
        let m = metrics(1, &[(b"CFF ", 10), (b"glyf", 20)]);
        assert_eq!(m.glyph_data_size(), 20);
        assert_eq!(metrics(1, &[(b"CFF2", 7)]).glyph_data_size(), 7);
        assert_eq!(metrics(1, &[]).glyph_data_size(), 0);
    }

    #[test]
    fn test_report_deltas() {
        let tables = [
            (b"glyf", 50_000),
            (b"fpgm", 300),
            (b"prep", 200),
            (b"cvt ", 100),
            (b"post", 4000),
        ];
        let report = SubsetReport {
            before: metrics(100, &tables),
            after: metrics(3, &[(b"glyf", 1_000), (b"post", 32)]),
        };
        assert_eq!(report.glyphs_removed(), 97);
        assert_eq!(report.hinting_bytes_saved(), 600);
        assert_eq!(report.glyph_names_bytes_saved(), 3968);
        assert_eq!(report.glyph_data_bytes_saved(), 49_000);
        assert_eq!(report.removed_tables().len(), 3);
        assert_eq!(
            report.reduced_tables(),
            [
                (Tag::new(b"glyf"), 50_000, 1_000),
                (Tag::new(b"post"), 4000, 32),
            ]
        );
    }

    #[test]
    fn test_growth_never_underflows() {
        let report = SubsetReport {
            before: metrics(1, &[(b"glyf", 10)]),
            after: metrics(2, &[(b"glyf", 20)]),
        };
        assert_eq!(report.glyphs_removed(), 0);
        assert_eq!(report.bytes_saved(), 0);
        assert!(report.reduced_tables().is_empty());
    }

    #[test]
    fn test_collects_from_variable_font() {
        let m = FontMetrics::collect(font_test_data::VAZIRMATN_VAR).unwrap();
        assert!(m.glyph_count > 0);
        assert!(m.axes.iter().any(|a| a.tag == Tag::new(b"wght")));
        assert_eq!(m.total_size, font_test_data::VAZIRMATN_VAR.len());
    }
}
