//! Path command variants.

/// Numeric kind of a [`PathCommand`].
///
/// The discriminants are the wire type codes and never change between
/// versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandKind {
    MoveTo = 0,
    LineTo = 1,
    QuadTo = 2,
    CubicTo = 3,
    Close = 4,
}

impl CommandKind {
    /// Type code used in packed records.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decodes a type code, returning `None` for unknown codes.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::MoveTo),
            1 => Some(Self::LineTo),
            2 => Some(Self::QuadTo),
            3 => Some(Self::CubicTo),
            4 => Some(Self::Close),
            _ => None,
        }
    }

    /// Number of points (on-curve and control) carried by this kind.
    pub const fn point_count(self) -> usize {
        match self {
            Self::MoveTo | Self::LineTo => 1,
            Self::QuadTo => 2,
            Self::CubicTo => 3,
            Self::Close => 0,
        }
    }
}

/// A single outline drawing step.
///
/// Coordinates are either font units (while an outline is being walked) or
/// normalized em units (after [`GlyphPath::normalize`](crate::GlyphPath::normalize)).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    QuadTo {
        cx: f32,
        cy: f32,
        x: f32,
        y: f32,
    },
    CubicTo {
        cx1: f32,
        cy1: f32,
        cx2: f32,
        cy2: f32,
        x: f32,
        y: f32,
    },
    Close,
}

impl PathCommand {
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::MoveTo { .. } => CommandKind::MoveTo,
            Self::LineTo { .. } => CommandKind::LineTo,
            Self::QuadTo { .. } => CommandKind::QuadTo,
            Self::CubicTo { .. } => CommandKind::CubicTo,
            Self::Close => CommandKind::Close,
        }
    }

    /// Returns the command's coordinates in declaration order, padded with
    /// zeros to six slots.
    pub const fn coords(&self) -> [f32; 6] {
        match *self {
            Self::MoveTo { x, y } | Self::LineTo { x, y } => [x, y, 0.0, 0.0, 0.0, 0.0],
            Self::QuadTo { cx, cy, x, y } => [cx, cy, x, y, 0.0, 0.0],
            Self::CubicTo {
                cx1,
                cy1,
                cx2,
                cy2,
                x,
                y,
            } => [cx1, cy1, cx2, cy2, x, y],
            Self::Close => [0.0; 6],
        }
    }

    /// Rebuilds a command from its kind and coordinate slots.
    ///
    /// Slots beyond the kind's point count are ignored.
    pub const fn from_coords(kind: CommandKind, c: [f32; 6]) -> Self {
        match kind {
            CommandKind::MoveTo => Self::MoveTo { x: c[0], y: c[1] },
            CommandKind::LineTo => Self::LineTo { x: c[0], y: c[1] },
            CommandKind::QuadTo => Self::QuadTo {
                cx: c[0],
                cy: c[1],
                x: c[2],
                y: c[3],
            },
            CommandKind::CubicTo => Self::CubicTo {
                cx1: c[0],
                cy1: c[1],
                cx2: c[2],
                cy2: c[3],
                x: c[4],
                y: c[5],
            },
            CommandKind::Close => Self::Close,
        }
    }

    /// Multiplies every coordinate by `factor`.
    pub fn scale(&mut self, factor: f32) {
        match self {
            Self::MoveTo { x, y } | Self::LineTo { x, y } => {
                *x *= factor;
                *y *= factor;
            }
            Self::QuadTo { cx, cy, x, y } => {
                for v in [cx, cy, x, y] {
                    *v *= factor;
                }
            }
            Self::CubicTo {
                cx1,
                cy1,
                cx2,
                cy2,
                x,
                y,
            } => {
                for v in [cx1, cy1, cx2, cy2, x, y] {
                    *v *= factor;
                }
            }
            Self::Close => {}
        }
    }

    /// Iterates over every point of the command, control points included.
    pub fn points(&self) -> impl Iterator<Item = (f32, f32)> {
        let c = self.coords();
        let n = self.kind().point_count();
        (0..n).map(move |i| (c[2 * i], c[2 * i + 1]))
    }
}
