use std::{fmt, str::FromStr};

use read_fonts::types::Tag;

use crate::error::Error;

/// What to do with one variation axis while subsetting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisMode {
    /// Instance the axis at its default and drop it from `fvar`.
    PinToDefault,
    /// Keep the axis but narrow it to `[min, max]` with a new default.
    Range { min: f32, max: f32, default: f32 },
}

/// An axis instruction, written `TAG` (pin) or `TAG=MIN:MAX:DEFAULT`
/// (range) on the command line.
///
/// ```
/// use glyphkit_font_subsetter::{AxisConfig, AxisMode};
///
/// let pin: AxisConfig = "opsz".parse().unwrap();
/// assert_eq!(pin.mode, AxisMode::PinToDefault);
///
/// let range: AxisConfig = "wght=300:700:400".parse().unwrap();
/// assert_eq!(range.mode, AxisMode::Range { min: 300.0, max: 700.0, default: 400.0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisConfig {
    pub tag: Tag,
    pub mode: AxisMode,
}

impl AxisConfig {
    pub fn pin(tag: Tag) -> Self {
        Self {
            tag,
            mode: AxisMode::PinToDefault,
        }
    }

    /// # Errors
    ///
    /// `Error::InvalidAxis` unless `min <= default <= max`.
    pub fn range(tag: Tag, min: f32, max: f32, default: f32) -> Result<Self, Error> {
        if !(min <= default && default <= max) {
            return Err(Error::InvalidAxis(format!(
                "{tag}: expected min <= default <= max, got {min}:{max}:{default}"
            )));
        }
        Ok(Self {
            tag,
            mode: AxisMode::Range { min, max, default },
        })
    }
}

fn parse_tag(s: &str) -> Result<Tag, Error> {
    let bytes: [u8; 4] = s
        .as_bytes()
        .try_into()
        .map_err(|_| Error::InvalidAxis(format!("axis tag '{s}' must be 4 characters")))?;
    if !bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        return Err(Error::InvalidAxis(format!("axis tag '{s}' must be printable ASCII")));
    }
    Ok(Tag::new(&bytes))
}

impl FromStr for AxisConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((tag, range)) = s.split_once('=') else {
            return Ok(Self::pin(parse_tag(s)?));
        };
        let tag = parse_tag(tag)?;

        let values: Vec<f32> = range
            .split(':')
            .map(|v| v.trim().parse::<f32>())
            .collect::<Result<_, _>>()
            .map_err(|_| Error::InvalidAxis(format!("{s}: values must be numbers")))?;
        let [min, max, default] = values[..] else {
            return Err(Error::InvalidAxis(format!("{s}: expected TAG=MIN:MAX:DEFAULT")));
        };
        Self::range(tag, min, max, default)
    }
}

impl fmt::Display for AxisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            AxisMode::PinToDefault => write!(f, "{}", self.tag),
            AxisMode::Range { min, max, default } => {
                write!(f, "{}={min}:{max}:{default}", self.tag)
            }
        }
    }
}
