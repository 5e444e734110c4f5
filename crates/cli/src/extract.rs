//! Glyph outline extraction to packed wire buffers.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use glyphkit_font_extractor::{FontSession, GlyphPath, Variation};
use glyphkit_font_wire::{RecordLayout, as_bytes, pack};
use log::{info, warn};

use crate::{io::read_font, parallel::map_with_state};

/// Parse a codepoint written as decimal, `U+XXXX`, `0xXXXX`, or a single
/// non-digit character.
pub fn parse_codepoint(s: &str) -> Result<u32, String> {
    let hex = s
        .strip_prefix("U+")
        .or_else(|| s.strip_prefix("u+"))
        .or_else(|| s.strip_prefix("0x"));
    if let Some(hex) = hex {
        return u32::from_str_radix(hex, 16).map_err(|e| format!("invalid codepoint '{s}': {e}"));
    }
    if let Ok(cp) = s.parse::<u32>() {
        return Ok(cp);
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch as u32),
        _ => Err(format!("invalid codepoint '{s}'")),
    }
}

/// Parse a `TAG=VALUE` variation setting.
pub fn parse_variation(s: &str) -> Result<Variation, String> {
    let (tag, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected TAG=VALUE, got '{s}'"))?;
    if tag.is_empty() || tag.len() > 4 || !tag.is_ascii() {
        return Err(format!("axis tag '{tag}' must be 1-4 ASCII characters"));
    }
    let value: f32 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid axis value in '{s}'"))?;
    Ok(Variation::new(tag, value))
}

#[derive(Debug, Clone, clap::Args)]
pub struct ExtractArgs {
    /// Font file to read
    pub font: PathBuf,
    /// Codepoints as decimal, U+XXXX, 0xXXXX, or a single character
    #[arg(required = true, value_parser = parse_codepoint)]
    pub codepoints: Vec<u32>,
    /// Variation axis setting, e.g. --var wght=700
    #[arg(long = "var", value_parser = parse_variation)]
    pub variations: Vec<Variation>,
    /// Record layout of the packed buffers
    #[arg(long, default_value_t = RecordLayout::Padded)]
    pub layout: RecordLayout,
    /// Also write every packed buffer, back to back, as raw native-endian f32
    #[arg(long)]
    pub raw: Option<PathBuf>,
    /// Extract on all cores, one font session per worker
    #[arg(long)]
    pub parallel: bool,
}

/// Extract every codepoint sequentially through one session.
pub fn extract_all(
    data: Vec<u8>,
    codepoints: &[u32],
    variations: &[Variation],
) -> Result<Vec<GlyphPath>> {
    let mut session = FontSession::new(data).context("Failed to open font session")?;
    codepoints
        .iter()
        .map(|&cp| {
            session
                .extract(cp, variations)
                .with_context(|| format!("Failed to extract U+{cp:04X}"))
        })
        .collect()
}

/// Extract in parallel; each rayon worker opens its own session.
pub fn extract_all_parallel(
    data: &[u8],
    codepoints: &[u32],
    variations: &[Variation],
) -> Result<Vec<GlyphPath>> {
    // Fail fast on a bad font instead of once per worker.
    FontSession::new(data).context("Failed to open font session")?;

    map_with_state(
        codepoints,
        || FontSession::new(data),
        |session, &cp| {
            let session = session.as_mut().map_err(|e| anyhow!("{e}"))?;
            session
                .extract(cp, variations)
                .with_context(|| format!("Failed to extract U+{cp:04X}"))
        },
    )
    .into_iter()
    .collect()
}

fn write_raw(path: &Path, buffers: &[Vec<f32>]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for buf in buffers {
        out.write_all(as_bytes(buf))?;
    }
    out.flush()
        .with_context(|| format!("Failed to write {}", path.display()))
}

impl ExtractArgs {
    pub fn run(self) -> Result<()> {
        let data = read_font(&self.font)?;
        let paths = if self.parallel {
            extract_all_parallel(&data, &self.codepoints, &self.variations)?
        } else {
            extract_all(data, &self.codepoints, &self.variations)?
        };

        let buffers: Vec<Vec<f32>> = paths.iter().map(|p| pack(p, self.layout)).collect();
        for ((cp, path), buf) in self.codepoints.iter().zip(&paths).zip(&buffers) {
            if path.is_empty() {
                println!("U+{cp:04X}: empty");
            } else {
                println!("U+{cp:04X}: {buf:?}");
            }
        }

        if let Some(raw) = &self.raw {
            write_raw(raw, &buffers)?;
            info!(
                "Wrote {} {} buffers to {}",
                buffers.len(),
                self.layout,
                raw.display()
            );
        }

        let empty = paths.iter().filter(|p| p.is_empty()).count();
        if empty > 0 {
            warn!("{empty} of {} codepoints produced no outline", paths.len());
        }
        Ok(())
    }
}
