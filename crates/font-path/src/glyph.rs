//! Extracted glyph outlines and their bounds.

use crate::{PathCommand, PathCommandBuffer};

/// Axis-aligned bounds over a path's control points.
///
/// Computed from every on-curve and off-curve point, so the box may be
/// looser than the rendered curve but never tighter.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl BoundingBox {
    pub const ZERO: Self = Self {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 0.0,
        max_y: 0.0,
    };

    /// Whether the point lies inside or on the edge of the box.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }

    /// Bounds over the control points of `commands`, or [`Self::ZERO`] if
    /// they carry no points.
    pub fn from_commands(commands: &[PathCommand]) -> Self {
        let mut bounds = Bounds::default();
        for (x, y) in commands.iter().flat_map(PathCommand::points) {
            bounds.add(x, y);
        }
        bounds.0.unwrap_or(Self::ZERO)
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// Running min/max accumulator; `None` until the first point arrives.
#[derive(Default)]
struct Bounds(Option<BoundingBox>);

impl Bounds {
    fn add(&mut self, x: f32, y: f32) {
        match &mut self.0 {
            Some(b) => {
                b.min_x = b.min_x.min(x);
                b.min_y = b.min_y.min(y);
                b.max_x = b.max_x.max(x);
                b.max_y = b.max_y.max(y);
            }
            None => {
                self.0 = Some(BoundingBox {
                    min_x: x,
                    min_y: y,
                    max_x: x,
                    max_y: y,
                })
            }
        }
    }
}

/// The outline of one glyph in normalized em units.
///
/// An empty path (no commands) means the codepoint had no glyph or the glyph
/// had no outline; every numeric field is zero in that case. Callers must
/// check [`is_empty`](Self::is_empty) instead of relying on a zero-area box.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlyphPath {
    pub commands: PathCommandBuffer,
    /// Horizontal advance divided by units-per-em.
    pub advance_width: f32,
    pub units_per_em: u16,
    pub bounds: BoundingBox,
}

impl GlyphPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Resets to the empty state, keeping the command buffer's capacity.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.advance_width = 0.0;
        self.units_per_em = 0;
        self.bounds = BoundingBox::ZERO;
    }

    /// Scales every command by `scale` and recomputes [`bounds`](Self::bounds)
    /// from the scaled control points in the same pass.
    ///
    /// `Close` contributes nothing to the bounds. A path with no points gets
    /// [`BoundingBox::ZERO`].
    pub fn normalize(&mut self, scale: f32) {
        let mut bounds = Bounds::default();
        for command in self.commands.as_mut_slice() {
            command.scale(scale);
            for (x, y) in command.points() {
                bounds.add(x, y);
            }
        }
        self.bounds = bounds.0.unwrap_or(BoundingBox::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_of(commands: &[PathCommand]) -> GlyphPath {
        let mut path = GlyphPath::new();
        for cmd in commands {
            path.commands.push(*cmd).unwrap();
        }
        path
    }

    #[test]
    fn test_empty_path_is_all_zero() {
        let path = GlyphPath::new();
        assert!(path.is_empty());
        assert_eq!(path.advance_width, 0.0);
        assert_eq!(path.units_per_em, 0);
        assert_eq!(path.bounds, BoundingBox::ZERO);
    }

    #[test]
    fn test_normalize_scales_and_bounds_control_points() {
        let mut path = path_of(&[
            PathCommand::MoveTo { x: 100.0, y: 0.0 },
            PathCommand::QuadTo {
                cx: 300.0,
                cy: 900.0,
                x: 500.0,
                y: 0.0,
            },
            PathCommand::Close,
        ]);
        path.normalize(1.0 / 1000.0);

        let b = path.bounds;
        assert!((b.min_x - 0.1).abs() < 1e-6);
        assert_eq!(b.min_y, 0.0);
        assert!((b.max_x - 0.5).abs() < 1e-6);
        // The control point is included even though the curve never reaches it.
        assert!((b.max_y - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_bounds_contain_every_point() {
        let mut path = path_of(&[
            PathCommand::MoveTo { x: -20.0, y: 40.0 },
            PathCommand::CubicTo {
                cx1: 10.0,
                cy1: -70.0,
                cx2: 90.0,
                cy2: 15.0,
                x: 60.0,
                y: 5.0,
            },
            PathCommand::LineTo { x: 0.0, y: 0.0 },
            PathCommand::Close,
        ]);
        path.normalize(0.5);

        let bounds = path.bounds;
        for cmd in path.commands.iter() {
            for (x, y) in cmd.points() {
                assert!(bounds.contains(x, y), "({x}, {y}) outside {bounds:?}");
            }
        }
    }

    #[test]
    fn test_close_only_path_has_zero_bounds() {
        let mut path = path_of(&[PathCommand::Close]);
        path.normalize(0.001);
        assert_eq!(path.bounds, BoundingBox::ZERO);
    }

    #[test]
    fn test_clear_resets_fields() {
        let mut path = path_of(&[PathCommand::MoveTo { x: 1.0, y: 2.0 }]);
        path.advance_width = 0.6;
        path.units_per_em = 1000;
        path.normalize(1.0);
        path.clear();
        assert_eq!(path, GlyphPath::new());
    }

    #[test]
    fn test_compute_bounds_matches_normalize_at_unit_scale() {
        let commands = [
            PathCommand::MoveTo { x: 3.0, y: 4.0 },
            PathCommand::LineTo { x: -1.0, y: 8.0 },
        ];
        let mut path = path_of(&commands);
        path.normalize(1.0);
        assert_eq!(path.bounds, BoundingBox::from_commands(&commands));
    }
}
