//! Bridge detection pipeline.
//!
//! Each frame is processed in four stages: candidate atoms around the source selection
//! ([`select_candidates`]), atom-level hydrogen bonds among them ([`HBondDetector`]), a
//! residue adjacency graph ([`ResidueGraph`]), and a bounded search for simple paths from
//! source to target residues ([`find_paths`]). [`BridgeScanner`] runs the stages frame by
//! frame and [`render_presence_table`] summarizes a scan as CSV.

mod candidates;
mod config;
mod cursor;
mod error;
mod graph;
mod hbond;
mod paths;
mod presence;
mod scan;

pub use candidates::select_candidates;
pub use config::BridgeConfig;
pub use cursor::{FrameCursor, TrajectoryCursor};
pub use error::Error;
pub use graph::ResidueGraph;
pub use hbond::{GeometricDetector, HBondDetector, HBondHit};
pub use paths::{BridgePath, find_paths, paths_from};
pub use presence::{PresenceTable, render_presence_table};
pub use scan::{BridgeScanner, FrameResult, TrajectoryResult};
