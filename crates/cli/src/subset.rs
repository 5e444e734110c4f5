//! Font subsetting with HarfBuzz.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use glyphkit_font_subsetter::{AxisConfig, FontFormat, SubsetReport, Subsetter, format_size};
use log::info;

use crate::{
    extract::parse_codepoint,
    io::{read_font, write_font_atomic},
};

/// Subset a font file to an output path using the given subsetter.
///
/// The output is written only after subsetting succeeds, and atomically.
pub fn subset_file(subsetter: &Subsetter, input: &Path, output: &Path) -> Result<SubsetReport> {
    let data = read_font(input)?;
    let name = input.display();
    match FontFormat::sniff(&data) {
        Some(format) if format.is_sfnt() => {}
        Some(format) => bail!("{name}: {format} input must be decompressed first"),
        None => bail!("{name}: not a font file"),
    }

    let subset = subsetter.subset(&data)?;
    write_font_atomic(output, &subset.data)?;

    info!(
        "Subset {} -> {} ({} -> {})",
        input.file_name().unwrap_or_default().to_string_lossy(),
        output.file_name().unwrap_or_default().to_string_lossy(),
        format_size(data.len()),
        format_size(subset.data.len()),
    );
    Ok(subset.report)
}

#[derive(Debug, Clone, clap::Args)]
pub struct SubsetArgs {
    /// Font file to subset
    pub input: PathBuf,
    /// Where to write the subset font
    pub output: PathBuf,
    /// Codepoints to keep, as decimal, U+XXXX, 0xXXXX, or a single character
    #[arg(required = true, value_parser = parse_codepoint)]
    pub codepoints: Vec<u32>,
    /// Axis instruction: TAG pins to default, TAG=MIN:MAX:DEFAULT narrows
    #[arg(long = "axis")]
    pub axes: Vec<AxisConfig>,
    /// Keep fpgm/prep/cvt hinting tables
    #[arg(long)]
    pub keep_hinting: bool,
    /// Keep glyph names in post/CFF
    #[arg(long)]
    pub keep_glyph_names: bool,
}

impl SubsetArgs {
    pub fn subsetter(&self) -> Subsetter {
        Subsetter::new()
            .with_codepoints(self.codepoints.iter().copied())
            .with_axes(self.axes.iter().copied())
            .strip_hinting(!self.keep_hinting)
            .strip_glyph_names(!self.keep_glyph_names)
    }

    pub fn run(self) -> Result<()> {
        let report = subset_file(&self.subsetter(), &self.input, &self.output)?;
        println!(
            "{}: {} glyphs -> {} glyphs, {} saved",
            self.output.display(),
            report.before.glyph_count,
            report.after.glyph_count,
            format_size(report.bytes_saved())
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use glyphkit_test_fonts::full_font;

    use super::*;

    #[test]
    fn test_failed_subset_leaves_no_output() {
        let dir = env::temp_dir().join(format!("glyphkit_subset_fail_{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("in.ttf");
        let output = dir.join("out.ttf");
        fs::write(&input, b"wOF2 compressed").unwrap();

        let result = subset_file(&Subsetter::new().with_codepoints([65]), &input, &output);
        assert!(result.is_err());
        assert!(!output.exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_writes_subset_and_reports() {
        let dir = env::temp_dir().join(format!("glyphkit_subset_ok_{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("in.ttf");
        let output = dir.join("out/sub.ttf");
        fs::write(&input, full_font()).unwrap();

        let subsetter = Subsetter::new().with_codepoints([65, 97]);
        let report = subset_file(&subsetter, &input, &output).unwrap();
        let written = fs::metadata(&output).unwrap().len() as usize;
        assert_eq!(report.after.total_size, written);
        assert!(report.bytes_saved() > 0);
        fs::remove_dir_all(&dir).unwrap();
    }
}
