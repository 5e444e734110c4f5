use std::collections::TryReserveError;

use glyphkit_font_path::{PathCommand, PathCommandBuffer};
use skrifa::outline::OutlinePen;

/// Records outline callbacks into a [`PathCommandBuffer`] in font units.
///
/// The pen interface cannot fail, so the first allocation error is latched
/// and every later callback becomes a no-op.
pub(crate) struct CommandCollector<'a> {
    commands: &'a mut PathCommandBuffer,
    error: Option<TryReserveError>,
    open: bool,
    start: (f32, f32),
}

impl<'a> CommandCollector<'a> {
    pub(crate) fn new(commands: &'a mut PathCommandBuffer) -> Self {
        Self {
            commands,
            error: None,
            open: false,
            start: (0.0, 0.0),
        }
    }

    /// A collector that has already hit `error`.
    #[cfg(test)]
    pub(crate) fn failed(commands: &'a mut PathCommandBuffer, error: TryReserveError) -> Self {
        Self {
            error: Some(error),
            ..Self::new(commands)
        }
    }

    pub(crate) fn finish(self) -> Result<(), TryReserveError> {
        self.error.map_or(Ok(()), Err)
    }

    fn push(&mut self, command: PathCommand) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.commands.push(command) {
            self.error = Some(e);
        }
    }

    // A segment with no open contour starts where the last contour did.
    fn ensure_open(&mut self) {
        if !self.open {
            let (x, y) = self.start;
            self.push(PathCommand::MoveTo { x, y });
            self.open = true;
        }
    }
}

impl OutlinePen for CommandCollector<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.push(PathCommand::MoveTo { x, y });
        self.open = true;
        self.start = (x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.ensure_open();
        self.push(PathCommand::LineTo { x, y });
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.ensure_open();
        self.push(PathCommand::QuadTo {
            cx: cx0,
            cy: cy0,
            x,
            y,
        });
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.ensure_open();
        self.push(PathCommand::CubicTo {
            cx1: cx0,
            cy1: cy0,
            cx2: cx1,
            cy2: cy1,
            x,
            y,
        });
    }

    fn close(&mut self) {
        if !self.open {
            return;
        }
        self.push(PathCommand::Close);
        self.open = false;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use glyphkit_font_path::CommandKind;

    use super::*;

    pub(crate) fn reserve_error() -> TryReserveError {
        Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err()
    }

    #[test]
    fn test_records_in_callback_order() {
        let mut buffer = PathCommandBuffer::new();
        let mut pen = CommandCollector::new(&mut buffer);
        pen.move_to(1.0, 2.0);
        pen.line_to(3.0, 4.0);
        pen.quad_to(5.0, 6.0, 7.0, 8.0);
        pen.curve_to(1.0, 1.0, 2.0, 2.0, 3.0, 3.0);
        pen.close();
        pen.finish().unwrap();

        let kinds: Vec<_> = buffer.iter().map(PathCommand::kind).collect();
        assert_eq!(
            kinds,
            [
                CommandKind::MoveTo,
                CommandKind::LineTo,
                CommandKind::QuadTo,
                CommandKind::CubicTo,
                CommandKind::Close,
            ]
        );
        assert_eq!(
            buffer[2],
            PathCommand::QuadTo {
                cx: 5.0,
                cy: 6.0,
                x: 7.0,
                y: 8.0
            }
        );
    }

    #[test]
    fn test_segment_without_move_starts_at_origin() {
        let mut buffer = PathCommandBuffer::new();
        let mut pen = CommandCollector::new(&mut buffer);
        pen.line_to(10.0, 0.0);
        pen.close();
        pen.finish().unwrap();

        assert_eq!(
            buffer.as_slice(),
            [
                PathCommand::MoveTo { x: 0.0, y: 0.0 },
                PathCommand::LineTo { x: 10.0, y: 0.0 },
                PathCommand::Close,
            ]
        );
    }

    #[test]
    fn test_segment_after_close_reopens_at_contour_start() {
        let mut buffer = PathCommandBuffer::new();
        let mut pen = CommandCollector::new(&mut buffer);
        pen.move_to(5.0, 5.0);
        pen.line_to(10.0, 5.0);
        pen.close();
        pen.line_to(0.0, 10.0);
        pen.finish().unwrap();

        assert_eq!(
            buffer.as_slice(),
            [
                PathCommand::MoveTo { x: 5.0, y: 5.0 },
                PathCommand::LineTo { x: 10.0, y: 5.0 },
                PathCommand::Close,
                PathCommand::MoveTo { x: 5.0, y: 5.0 },
                PathCommand::LineTo { x: 0.0, y: 10.0 },
            ]
        );
    }

    #[test]
    fn test_close_without_contour_is_ignored() {
        let mut buffer = PathCommandBuffer::new();
        let mut pen = CommandCollector::new(&mut buffer);
        pen.close();
        pen.move_to(1.0, 1.0);
        pen.line_to(2.0, 1.0);
        pen.close();
        pen.close();
        pen.finish().unwrap();

        assert_eq!(buffer[0].kind(), CommandKind::MoveTo);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_latched_error_stops_recording() {
        let mut buffer = PathCommandBuffer::new();
        let mut pen = CommandCollector::failed(&mut buffer, reserve_error());
        pen.move_to(0.0, 0.0);
        pen.line_to(1.0, 0.0);
        pen.quad_to(1.0, 1.0, 0.0, 1.0);
        pen.close();
        assert!(pen.finish().is_err());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_spills_past_inline_capacity() {
        let mut buffer = PathCommandBuffer::new();
        let mut pen = CommandCollector::new(&mut buffer);
        pen.move_to(0.0, 0.0);
        for i in 0..100 {
            pen.line_to(i as f32, 0.0);
        }
        pen.finish().unwrap();
        assert_eq!(buffer.len(), 101);
        assert!(!buffer.is_inline());
    }
}
