//! Atom selection language.
//!
//! Selections are small boolean expressions over topology attributes, for example
//! `resn LIG`, `chain A and resi 40-52`, or `water and within 3.5 of (resn LIG)`.
//! Value lists use `+` (`resn HOH+WAT`), numeric ranges use `a-b`, and keywords are
//! case-insensitive. Expressions are parsed once with [`parse`] and can then be
//! evaluated against any frame of a trajectory with [`evaluate`].

mod eval;
mod parser;

use crate::model::types::{Element, ResidueCategory};
use std::ops::RangeInclusive;
use thiserror::Error;

pub use eval::{evaluate, select_atoms};
pub use parser::parse;

/// Parsed selection expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    All,
    None,
    Chain(Vec<String>),
    ResidueName(Vec<String>),
    ResidueNumber(Vec<RangeInclusive<i32>>),
    AtomName(Vec<String>),
    Element(Vec<Element>),
    /// Zero-based atom indices.
    Index(Vec<RangeInclusive<usize>>),
    Category(ResidueCategory),
    Hydrogen,
    /// Atoms within a distance (Å) of the inner selection, including the inner selection.
    Within(f64, Box<Expression>),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
    Not(Box<Expression>),
}

/// Errors raised while parsing or evaluating a selection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The expression text is malformed.
    #[error("invalid selection at position {position}: {details}")]
    Parse {
        /// Zero-based byte offset of the offending token.
        position: usize,
        details: String,
    },

    /// A distance-based expression was evaluated without coordinates.
    #[error("'within' requires frame coordinates")]
    MissingCoordinates,
}

impl Error {
    pub(crate) fn parse(position: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            position,
            details: details.into(),
        }
    }
}
