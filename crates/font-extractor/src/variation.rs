//! Variation axis settings for a single extraction.

use skrifa::raw::types::Tag;

/// Maximum number of axis settings honoured per extraction.
///
/// Settings past this bound are dropped with a warning.
pub const MAX_VARIATIONS: usize = 16;

/// One variation axis setting (tag + user-space value), e.g. `wght=700`.
///
/// Axes not mentioned in a request take the font's default value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variation {
    pub tag: Tag,
    pub value: f32,
}

impl Variation {
    /// Creates a setting from a tag string.
    ///
    /// Tags shorter than four bytes are padded with spaces; extra bytes are
    /// ignored.
    ///
    /// ```
    /// use glyphkit_font_extractor::Variation;
    /// let fill = Variation::new("FILL", 1.0);
    /// assert_eq!(fill.tag.to_string(), "FILL");
    /// ```
    pub fn new(tag: &str, value: f32) -> Self {
        let mut tag_bytes = [b' '; 4];
        for (dst, src) in tag_bytes.iter_mut().zip(tag.as_bytes()) {
            *dst = *src;
        }
        Self {
            tag: Tag::new(&tag_bytes),
            value,
        }
    }

    /// Creates a setting from a tag packed big-endian into a `u32`, as
    /// passed across a foreign call boundary.
    ///
    /// NUL bytes are treated as spaces.
    pub fn from_raw_tag(tag: u32, value: f32) -> Self {
        let bytes = tag.to_be_bytes().map(|b| if b == 0 { b' ' } else { b });
        Self {
            tag: Tag::new(&bytes),
            value,
        }
    }
}

impl From<(&str, f32)> for Variation {
    fn from((tag, value): (&str, f32)) -> Self {
        Self::new(tag, value)
    }
}

impl From<(Tag, f32)> for Variation {
    fn from((tag, value): (Tag, f32)) -> Self {
        Self { tag, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pads_short_tags() {
        assert_eq!(Variation::new("wg", 1.0).tag, Tag::new(b"wg  "));
    }

    #[test]
    fn test_truncates_long_tags() {
        assert_eq!(Variation::new("wghtx", 1.0).tag, Tag::new(b"wght"));
    }

    #[test]
    fn test_decodes_packed_tags() {
        let packed = u32::from_be_bytes(*b"wght");
        let v = Variation::from_raw_tag(packed, 400.0);
        assert_eq!(v.tag, Tag::new(b"wght"));
        assert_eq!(v.value, 400.0);
    }

    #[test]
    fn test_packed_nul_bytes_become_spaces() {
        let packed = u32::from_be_bytes([b'o', b'p', b'z', 0]);
        assert_eq!(Variation::from_raw_tag(packed, 0.0).tag, Tag::new(b"opz "));
    }
}
