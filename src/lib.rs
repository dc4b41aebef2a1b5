//! # BioBridge
//!
//! **BioBridge** finds hydrogen-bond bridges between two groups of atoms across every frame
//! of a molecular dynamics trajectory. A bridge is either a direct hydrogen bond or a chain
//! of hydrogen bonds through a bounded number of intermediate residues (typically water).
//! Because the analysis works at the residue level, a ligand–protein contact is tracked as
//! persistent even when the water molecule mediating it changes from frame to frame.
//!
//! ## Features
//!
//! - **Trajectory model** – A flat, index-addressed `System` topology shared by all frames, with per-frame coordinates exposed through `FrameView` and spatial queries backed by a uniform grid.
//! - **PDB trajectories** – Multi-model PDB input where every `MODEL` block becomes a frame, with residue classification that understands the water and ion names used by common simulation packages.
//! - **Selection language** – Expressions such as `resn LIG`, `protein and not hydrogen`, or `water and within 3.5 of (chain B)` resolve to atom sets on any frame.
//! - **Bridge detection** – A geometric donor–H···acceptor detector, a symmetric residue graph per frame, and an exhaustive, depth-bounded search for simple source-to-target paths.
//! - **Presence tables** – Whole-trajectory scans aggregate the bridged residues per frame and render a frame × residue CSV table with per-residue totals.
//!
//! ## Example
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! use bio_bridge::io::{IoContext, read_pdb_trajectory};
//! use bio_bridge::ops::{BridgeScanner, FrameCursor, GeometricDetector, render_presence_table};
//! use bio_bridge::select::select_atoms;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = BufReader::new(File::open("traj.pdb")?);
//! let trajectory = read_pdb_trajectory(reader, &IoContext::new_default())?;
//!
//! let first = trajectory.frame(0).ok_or("empty trajectory")?;
//! let source = select_atoms("resn LIG", &first)?;
//! let target = select_atoms("protein", &first)?;
//!
//! let scanner = BridgeScanner::new(GeometricDetector::default()).max_waters(1);
//! let mut cursor = FrameCursor::new(&trajectory)?;
//! let result = scanner.scan_trajectory(&mut cursor, &source, &target)?;
//!
//! render_presence_table(
//!     &mut std::io::stdout(),
//!     trajectory.system(),
//!     &result.residues(),
//!     result.per_frame(),
//! )?;
//! # Ok(())
//! # }
//! ```

mod model;
mod utils;

pub mod io;
pub mod ops;
pub mod select;

pub use model::atom::Atom;
pub use model::atom_set::AtomSet;
pub use model::frame::{Frame, FrameView};
pub use model::residue::{Residue, ResidueLabel};
pub use model::system::System;
pub use model::trajectory::Trajectory;
pub use model::types::{AtomIndex, Element, Point, ResidueCategory, ResidueIndex};
