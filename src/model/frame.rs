//! Per-frame coordinate snapshots and the read-only views used to query them.
//!
//! A [`Frame`] is nothing more than one position per atom. Pairing it with its
//! [`System`] yields a [`FrameView`], the immutable snapshot every spatial query in the
//! crate runs against.

use super::atom_set::AtomSet;
use super::grid::Grid;
use super::system::System;
use super::types::{AtomIndex, Point};

/// Smallest cell edge used when binning atoms, guarding against zero-radius queries.
const MIN_CELL_SIZE: f64 = 1.0;

/// Atomic coordinates for one time-sampled snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    positions: Vec<Point>,
}

impl Frame {
    pub fn new(positions: Vec<Point>) -> Self {
        Self { positions }
    }

    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl FromIterator<Point> for Frame {
    fn from_iter<T: IntoIterator<Item = Point>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Immutable pairing of a topology with one frame's coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    index: usize,
    system: &'a System,
    frame: &'a Frame,
}

impl<'a> FrameView<'a> {
    /// Creates a view over `frame`, which must hold exactly one position per atom of `system`.
    pub fn new(index: usize, system: &'a System, frame: &'a Frame) -> Self {
        debug_assert_eq!(
            system.atom_count(),
            frame.len(),
            "Frame {} does not match the system atom count",
            index
        );
        Self {
            index,
            system,
            frame,
        }
    }

    /// Zero-based frame number within the trajectory.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn system(&self) -> &'a System {
        self.system
    }

    pub fn position(&self, atom: AtomIndex) -> Option<Point> {
        self.frame.positions.get(atom).copied()
    }

    /// Selects all atoms within `radius` ångströms (inclusive) of any atom in `source`.
    ///
    /// The source atoms are always part of the result. Source indices without coordinates
    /// are ignored.
    pub fn select_within(&self, source: &AtomSet, radius: f64) -> AtomSet {
        let mut selected: AtomSet = source
            .iter()
            .filter(|&atom| atom < self.frame.len())
            .collect();
        if selected.is_empty() {
            return selected;
        }

        let grid = Grid::new(
            self.frame
                .positions
                .iter()
                .enumerate()
                .map(|(index, pos)| (*pos, index)),
            radius.max(MIN_CELL_SIZE),
        );

        for atom in source.iter() {
            if let Some(center) = self.position(atom) {
                selected.extend(grid.within(center, radius).copied());
            }
        }

        selected
    }
}
