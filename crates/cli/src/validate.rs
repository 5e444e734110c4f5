//! Magic-byte font validation.

use std::path::Path;

use anyhow::{Result, bail};
use glyphkit_font_subsetter::FontFormat;

use crate::{
    io::{FontFile, expand_paths},
    parallel::run_parallel,
};

/// Identify a file's font container from its first four bytes.
pub fn sniff_file(path: &Path) -> Result<FontFormat> {
    let signature = FontFile::new(path).read_signature()?;
    match FontFormat::sniff(&signature) {
        Some(format) => Ok(format),
        None => bail!(
            "{}: unknown font signature {signature:02x?}",
            path.display()
        ),
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct ValidateArgs {
    /// Files or glob patterns to check
    #[arg(required = true)]
    pub paths: Vec<String>,
}

impl ValidateArgs {
    pub fn run(self) -> Result<()> {
        let paths = expand_paths(&self.paths)?;
        if paths.is_empty() {
            bail!("No files matched");
        }
        run_parallel("Validate", &paths, |path| {
            let format = sniff_file(path)?;
            println!("{}: {format}", path.display());
            Ok(())
        })
        .ok_or_bail("Validate")
    }
}
