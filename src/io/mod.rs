//! Trajectory input.
//!
//! Readers turn text streams into a [`Trajectory`](crate::Trajectory): one shared topology
//! plus a coordinate frame per model. Residue names are classified through an
//! [`IoContext`] so that water, ions, and polymer residues are recognized regardless of the
//! naming convention of the simulation package that wrote the file.

mod context;
mod error;
mod pdb;

pub use pdb::reader::read as read_pdb_trajectory;

pub use context::IoContext;

pub use error::Error;
