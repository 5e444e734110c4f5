//! Glyph outline extraction with per-font session reuse.
//!
//! A [`FontSession`] parses a font once and then serves any number of
//! extractions. Each extraction shapes a single codepoint at the requested
//! variation settings (so variation-driven glyph substitution applies), walks
//! the resulting outline and returns it as a [`GlyphPath`] normalized to em
//! units.
//!
//! ```no_run
//! use glyphkit_font_extractor::{FontSession, Variation};
//!
//! let data = std::fs::read("Font[wght].ttf")?;
//! let mut session = FontSession::new(data)?;
//! let path = session.extract('A' as u32, &[Variation::new("wght", 700.0)])?;
//! if !path.is_empty() {
//!     println!("{} commands, advance {}", path.commands.len(), path.advance_width);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod engine;
mod error;
mod pen;
mod registry;
mod session;
mod shaped;
mod variation;

pub use engine::GlyphEngine;
pub use error::{Error, Result};
pub use glyphkit_font_path::GlyphPath;
pub use registry::{SessionHandle, SessionRegistry};
pub use session::FontSession;
pub use shaped::{AxisInfo, ShapedFont};
pub use variation::{MAX_VARIATIONS, Variation};
