use std::{fmt, str::FromStr};

/// Number of floats before the first command record:
/// `[command_count, advance_width, units_per_em, min_x, min_y, max_x, max_y]`.
pub const HEADER_LEN: usize = 7;

/// Fixed-width shape of each command record.
///
/// Both shapes start with the numeric command type (see
/// [`CommandKind::code`](glyphkit_font_path::CommandKind::code)) and carry all
/// six coordinate slots; slots a command does not use are `0.0`. A consumer
/// must be told which layout a buffer uses; the header does not record it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordLayout {
    /// `[type, x1, y1, x2, y2, x3, y3]`
    Compact,
    /// `[type, 0, 0, 0, f1, f2, f3, f4, f5, f6]`
    #[default]
    Padded,
}

impl RecordLayout {
    /// Floats per command record.
    pub const fn record_len(self) -> usize {
        match self {
            Self::Compact => 7,
            Self::Padded => 10,
        }
    }

    /// Offset of the first coordinate within a record.
    pub(crate) const fn coords_offset(self) -> usize {
        match self {
            Self::Compact => 1,
            Self::Padded => 4,
        }
    }

    /// Total buffer length for `command_count` commands.
    pub const fn packed_len(self, command_count: usize) -> usize {
        HEADER_LEN + command_count * self.record_len()
    }
}

impl fmt::Display for RecordLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Compact => "compact",
            Self::Padded => "padded",
        })
    }
}

impl FromStr for RecordLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" | "7" => Ok(Self::Compact),
            "padded" | "10" => Ok(Self::Padded),
            other => Err(format!("unknown record layout '{other}' (expected compact or padded)")),
        }
    }
}
