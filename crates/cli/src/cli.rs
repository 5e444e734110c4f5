//! CLI definitions and command dispatch.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::{extract::ExtractArgs, info::InfoArgs, subset::SubsetArgs, validate::ValidateArgs};

#[derive(Parser)]
#[command(name = "glyphkit")]
#[command(about = "Extract glyph outlines, subset fonts and check font files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract glyph outlines as packed float buffers
    Extract(ExtractArgs),
    /// Write a font reduced to the given codepoints
    Subset(SubsetArgs),
    /// Check files for a known font signature
    Validate(ValidateArgs),
    /// Show glyph count, axes and table sizes
    Info(InfoArgs),
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Extract(args) => args.run(),
            Commands::Subset(args) => args.run(),
            Commands::Validate(args) => args.run(),
            Commands::Info(args) => args.run(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::iter;

    use clap::CommandFactory;
    use glyphkit_font_wire::RecordLayout;

    use super::*;

    fn parse(args: &str) -> Result<Cli, clap::Error> {
        let argv = iter::once("glyphkit").chain(args.split_whitespace());
        Cli::try_parse_from(argv)
    }

    #[test]
    fn test_verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_extract_arguments() {
        let args = "extract font.ttf A U+0061 --var wght=700 --layout compact --parallel";
        let Commands::Extract(args) = parse(args).unwrap().command else {
            panic!("expected extract")
        };
        assert_eq!(args.codepoints, [0x41, 0x61]);
        assert_eq!(args.variations.len(), 1);
        assert_eq!(args.layout, RecordLayout::Compact);
        assert!(args.parallel);
    }

    #[test]
    fn test_extract_defaults_to_padded_records() {
        let Commands::Extract(args) = parse("extract font.ttf 65").unwrap().command else {
            panic!("expected extract")
        };
        assert_eq!(args.layout, RecordLayout::Padded);
    }

    #[test]
    fn test_parses_subset_arguments() {
        let args = "subset a b 65 97 --axis wght=300:700:400 --axis opsz --keep-glyph-names";
        let Commands::Subset(args) = parse(args).unwrap().command else {
            panic!("expected subset")
        };
        let subsetter = args.subsetter();
        assert_eq!(subsetter.codepoints().len(), 2);
        assert_eq!(args.axes.len(), 2);
        assert!(!args.keep_hinting);
        assert!(args.keep_glyph_names);
    }

    #[test]
    fn test_rejects_bad_axis() {
        assert!(parse("subset a b 65 --axis wght=9:1:5").is_err());
    }
}
