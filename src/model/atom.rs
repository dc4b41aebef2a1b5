//! Topological atom record: name, chemical element, and owning residue.
//!
//! Coordinates are deliberately absent. A trajectory stores one position per atom per
//! frame, so the atom itself only carries the identity that stays fixed across frames.

use super::types::{Element, ResidueIndex};
use smol_str::SmolStr;
use std::fmt;

/// Labeled atom bound to exactly one residue of a [`System`](super::system::System).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    /// Atom name as it appears in structure files (e.g., `OG1`, `HW2`).
    pub name: SmolStr,
    /// Chemical element used by the hydrogen-bond detector to classify donors and acceptors.
    pub element: Element,
    /// Index of the residue that owns this atom.
    pub residue: ResidueIndex,
}

impl Atom {
    /// Creates a new atom owned by `residue`.
    ///
    /// # Arguments
    ///
    /// * `name` - Atom label such as `"OW"` or `"N"`.
    /// * `element` - Chemical identity.
    /// * `residue` - Owning residue index.
    pub fn new(name: &str, element: Element, residue: ResidueIndex) -> Self {
        Self {
            name: SmolStr::new(name),
            element,
            residue,
        }
    }

    pub fn is_hydrogen(&self) -> bool {
        self.element.is_hydrogen()
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Atom {{ name: \"{}\", element: {}, residue: {} }}",
            self.name, self.element, self.residue
        )
    }
}
