use crate::model::frame::FrameView;
use crate::model::trajectory::Trajectory;
use crate::ops::error::Error;

/// Random-access position within a trajectory.
///
/// The scanner seeks the cursor to each frame before querying coordinates, so the
/// "current frame" is explicit state owned by the caller.
pub trait TrajectoryCursor {
    fn frame_count(&self) -> usize;

    /// Moves to frame `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameOutOfRange`] if `index >= frame_count()`.
    fn seek(&mut self, index: usize) -> Result<(), Error>;

    fn current_index(&self) -> usize;

    /// Coordinates and topology of the current frame.
    fn frame(&self) -> FrameView<'_>;
}

/// Cursor over an in-memory [`Trajectory`].
#[derive(Debug, Clone, Copy)]
pub struct FrameCursor<'a> {
    trajectory: &'a Trajectory,
    current: usize,
}

impl<'a> FrameCursor<'a> {
    /// Creates a cursor positioned on the first frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameOutOfRange`] for a trajectory without frames.
    pub fn new(trajectory: &'a Trajectory) -> Result<Self, Error> {
        if trajectory.is_empty() {
            return Err(Error::FrameOutOfRange {
                index: 0,
                frame_count: 0,
            });
        }
        Ok(Self {
            trajectory,
            current: 0,
        })
    }
}

impl TrajectoryCursor for FrameCursor<'_> {
    fn frame_count(&self) -> usize {
        self.trajectory.frame_count()
    }

    fn seek(&mut self, index: usize) -> Result<(), Error> {
        if index >= self.trajectory.frame_count() {
            return Err(Error::FrameOutOfRange {
                index,
                frame_count: self.trajectory.frame_count(),
            });
        }
        self.current = index;
        Ok(())
    }

    fn current_index(&self) -> usize {
        self.current
    }

    fn frame(&self) -> FrameView<'_> {
        // `current` is only ever set to an index validated by `seek` or `new`.
        self.trajectory
            .frame(self.current)
            .unwrap_or_else(|| unreachable!("cursor positioned past the last frame"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::frame::Frame;
    use crate::model::system::System;
    use crate::model::types::{Element, Point, ResidueCategory};

    fn three_frames() -> Trajectory {
        let mut system = System::new();
        let res = system.push_residue("W", "HOH", 1, ResidueCategory::Water);
        system.push_atom(res, "OW", Element::O);
        let mut trajectory = Trajectory::new(system);
        for i in 0..3 {
            trajectory
                .push_frame(Frame::new(vec![Point::new(i as f64, 0.0, 0.0)]))
                .unwrap();
        }
        trajectory
    }

    #[test]
    fn seek_moves_between_frames() {
        let trajectory = three_frames();
        let mut cursor = FrameCursor::new(&trajectory).unwrap();

        assert_eq!(cursor.frame_count(), 3);
        assert_eq!(cursor.current_index(), 0);

        cursor.seek(2).unwrap();

        assert_eq!(cursor.current_index(), 2);
        assert_eq!(cursor.frame().index(), 2);
        assert_eq!(cursor.frame().position(0), Some(Point::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn seek_out_of_range_keeps_position() {
        let trajectory = three_frames();
        let mut cursor = FrameCursor::new(&trajectory).unwrap();
        cursor.seek(1).unwrap();

        let err = cursor.seek(3).unwrap_err();

        assert!(matches!(
            err,
            Error::FrameOutOfRange {
                index: 3,
                frame_count: 3
            }
        ));
        assert_eq!(cursor.current_index(), 1);
    }

    #[test]
    fn empty_trajectory_has_no_cursor() {
        let trajectory = Trajectory::new(System::new());

        assert!(FrameCursor::new(&trajectory).is_err());
    }
}
