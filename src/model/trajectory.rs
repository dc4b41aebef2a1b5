//! In-memory trajectories: one shared topology plus an ordered list of frames.

use super::frame::{Frame, FrameView};
use super::system::System;
use std::fmt;

/// Topology together with every frame loaded from a trajectory source.
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    system: System,
    frames: Vec<Frame>,
}

impl Trajectory {
    pub fn new(system: System) -> Self {
        Self {
            system,
            frames: Vec::new(),
        }
    }

    /// Appends a frame. Returns the frame back if its atom count does not match the system.
    pub fn push_frame(&mut self, frame: Frame) -> Result<(), Frame> {
        if frame.len() != self.system.atom_count() {
            return Err(frame);
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, index: usize) -> Option<FrameView<'_>> {
        self.frames
            .get(index)
            .map(|frame| FrameView::new(index, &self.system, frame))
    }

    pub fn iter_frames(&self) -> impl Iterator<Item = FrameView<'_>> {
        self.frames
            .iter()
            .enumerate()
            .map(|(index, frame)| FrameView::new(index, &self.system, frame))
    }
}

impl fmt::Display for Trajectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trajectory {{ frames: {}, residues: {}, atoms: {} }}",
            self.frame_count(),
            self.system.residue_count(),
            self.system.atom_count()
        )
    }
}
