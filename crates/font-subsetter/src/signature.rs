use std::fmt;

/// Font container formats recognized from the first four bytes of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFormat {
    /// `00 01 00 00`
    TrueType,
    /// `OTTO`, CFF outlines
    OpenType,
    /// `true`, legacy Apple TrueType
    AppleTrueType,
    /// `wOFF`
    Woff,
    /// `wOF2`
    Woff2,
}

impl FontFormat {
    /// Identifies the container from its magic bytes.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        match data.get(..4)? {
            [0x00, 0x01, 0x00, 0x00] => Some(Self::TrueType),
            b"OTTO" => Some(Self::OpenType),
            b"true" => Some(Self::AppleTrueType),
            b"wOFF" => Some(Self::Woff),
            b"wOF2" => Some(Self::Woff2),
            _ => None,
        }
    }

    /// Whether the bytes are a bare sfnt that can be subset directly.
    pub fn is_sfnt(self) -> bool {
        matches!(self, Self::TrueType | Self::OpenType | Self::AppleTrueType)
    }
}

impl fmt::Display for FontFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TrueType => "TrueType",
            Self::OpenType => "OpenType (CFF)",
            Self::AppleTrueType => "Apple TrueType",
            Self::Woff => "WOFF",
            Self::Woff2 => "WOFF2",
        })
    }
}

/// Whether `data` starts with a known font signature.
pub fn validate_font(data: &[u8]) -> bool {
    FontFormat::sniff(data).is_some()
}
