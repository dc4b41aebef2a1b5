use crate::model::atom_set::AtomSet;
use crate::model::frame::FrameView;
use crate::model::types::ResidueIndex;
use crate::ops::candidates::select_candidates;
use crate::ops::config::BridgeConfig;
use crate::ops::cursor::TrajectoryCursor;
use crate::ops::error::Error;
use crate::ops::graph::ResidueGraph;
use crate::ops::hbond::HBondDetector;
use crate::ops::paths::{BridgePath, find_paths};

/// Target residues reached by at least one bridge in a single frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameResult {
    frame: usize,
    terminals: Vec<ResidueIndex>,
}

impl FrameResult {
    /// Collects path terminals in discovery order, dropping repeats.
    pub fn from_paths(frame: usize, paths: &[BridgePath]) -> Self {
        let mut terminals = Vec::new();
        for path in paths {
            let terminal = path.terminal();
            if !terminals.contains(&terminal) {
                terminals.push(terminal);
            }
        }
        Self { frame, terminals }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn terminals(&self) -> &[ResidueIndex] {
        &self.terminals
    }

    pub fn contains(&self, residue: ResidueIndex) -> bool {
        self.terminals.contains(&residue)
    }

    pub fn is_empty(&self) -> bool {
        self.terminals.is_empty()
    }
}

impl AsRef<[ResidueIndex]> for FrameResult {
    fn as_ref(&self) -> &[ResidueIndex] {
        &self.terminals
    }
}

/// Accumulated results of a whole-trajectory scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrajectoryResult {
    all_terminals: Vec<ResidueIndex>,
    per_frame: Vec<FrameResult>,
}

impl TrajectoryResult {
    pub fn push(&mut self, frame: FrameResult) {
        self.all_terminals.extend_from_slice(frame.terminals());
        self.per_frame.push(frame);
    }

    /// Terminal residues of every frame in scan order; a residue appears once per frame
    /// it was reached in.
    pub fn all_terminals(&self) -> &[ResidueIndex] {
        &self.all_terminals
    }

    pub fn per_frame(&self) -> &[FrameResult] {
        &self.per_frame
    }

    pub fn frame_count(&self) -> usize {
        self.per_frame.len()
    }

    /// Distinct terminal residues in ascending order.
    pub fn residues(&self) -> Vec<ResidueIndex> {
        let mut residues = self.all_terminals.clone();
        residues.sort_unstable();
        residues.dedup();
        residues
    }
}

/// Finds hydrogen-bond bridges between two atom selections, frame by frame.
#[derive(Debug, Clone)]
pub struct BridgeScanner<D> {
    detector: D,
    config: BridgeConfig,
}

impl<D: HBondDetector> BridgeScanner<D> {
    pub fn new(detector: D) -> Self {
        Self {
            detector,
            config: BridgeConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BridgeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.config.radius = radius;
        self
    }

    pub fn max_distance(mut self, max_distance: f64) -> Self {
        self.config.max_distance = max_distance;
        self
    }

    pub fn min_angle(mut self, min_angle: f64) -> Self {
        self.config.min_angle = min_angle;
        self
    }

    pub fn max_waters(mut self, max_waters: usize) -> Self {
        self.config.max_waters = max_waters;
        self
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Finds every bridge path in one frame.
    ///
    /// Only atoms within the configured radius of `source` take part in hydrogen-bond
    /// detection, and only target residues with an atom in that neighborhood can end a
    /// path. An empty `source` or `target` yields no paths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for an invalid configuration and propagates
    /// detector and topology failures unchanged.
    pub fn find_bridges(
        &self,
        frame: &FrameView<'_>,
        source: &AtomSet,
        target: &AtomSet,
    ) -> Result<Vec<BridgePath>, Error> {
        self.config.validate()?;
        if source.is_empty() || target.is_empty() {
            log::debug!("frame {}: empty source or target selection", frame.index());
            return Ok(Vec::new());
        }

        let system = frame.system();
        let candidates = select_candidates(frame, source, self.config.radius)?;
        let hits = self.detector.detect(
            frame,
            &candidates,
            self.config.max_distance,
            self.config.min_angle,
        )?;
        let graph = ResidueGraph::from_hits(&hits, |atom| system.residue_of(atom))?;

        let sources = system.selection_residues(source);
        let targets = system.selection_residues(&target.intersection(&candidates));
        let paths = find_paths(&graph, &sources, &targets, self.config.max_steps());

        log::debug!(
            "frame {}: {} candidates, {} hbonds, {} residue edges, {} paths",
            frame.index(),
            candidates.len(),
            hits.len(),
            graph.edge_count(),
            paths.len()
        );
        Ok(paths)
    }

    /// Seeks `cursor` to `index` and reports the target residues bridged in that frame.
    pub fn scan_frame<C: TrajectoryCursor>(
        &self,
        cursor: &mut C,
        index: usize,
        source: &AtomSet,
        target: &AtomSet,
    ) -> Result<FrameResult, Error> {
        cursor.seek(index)?;
        let paths = self.find_bridges(&cursor.frame(), source, target)?;
        Ok(FrameResult::from_paths(index, &paths))
    }

    /// Scans every frame in order with fixed selections.
    ///
    /// The first failing frame aborts the scan.
    pub fn scan_trajectory<C: TrajectoryCursor>(
        &self,
        cursor: &mut C,
        source: &AtomSet,
        target: &AtomSet,
    ) -> Result<TrajectoryResult, Error> {
        self.scan_trajectory_with(
            cursor,
            |_| Ok((source.clone(), target.clone())),
            |_| {},
        )
    }

    /// Scans every frame in order, re-deriving the selections from each frame.
    ///
    /// `select` returns the `(source, target)` atom sets for the frame, which allows
    /// distance-based selections that change over time. `on_frame` observes each frame's
    /// result as soon as it is available.
    pub fn scan_trajectory_with<C, S, F>(
        &self,
        cursor: &mut C,
        mut select: S,
        mut on_frame: F,
    ) -> Result<TrajectoryResult, Error>
    where
        C: TrajectoryCursor,
        S: FnMut(&FrameView<'_>) -> Result<(AtomSet, AtomSet), Error>,
        F: FnMut(&FrameResult),
    {
        self.config.validate()?;
        let mut result = TrajectoryResult::default();
        let mut warned_overlap = false;

        for index in 0..cursor.frame_count() {
            cursor.seek(index)?;
            let frame = cursor.frame();
            let (source, target) = select(&frame)?;

            if !warned_overlap && source.overlaps(&target) {
                log::warn!(
                    "source and target selections share atoms (first seen in frame {}); \
                     shared residues can only match through a bridge",
                    index
                );
                warned_overlap = true;
            }

            let paths = self.find_bridges(&frame, &source, &target)?;
            let frame_result = FrameResult::from_paths(index, &paths);
            on_frame(&frame_result);
            result.push(frame_result);
        }

        log::info!(
            "scanned {} frames, {} distinct bridged residues",
            result.frame_count(),
            result.residues().len()
        );
        Ok(result)
    }
}
