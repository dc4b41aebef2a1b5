//! Core data structures modeling a simulated molecular system over time.
//!
//! The topology ([`system::System`]) is frame-invariant and flat: atoms and residues are
//! addressed by index. Coordinates live in [`frame::Frame`] snapshots grouped into a
//! [`trajectory::Trajectory`], and every spatial query runs against a
//! [`frame::FrameView`].

pub mod atom;
pub mod atom_set;
pub mod frame;
pub mod grid;
pub mod residue;
pub mod system;
pub mod trajectory;
pub mod types;
