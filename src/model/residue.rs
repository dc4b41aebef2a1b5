use super::types::{AtomIndex, ResidueCategory, ResidueIndex};
use smol_str::SmolStr;
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub index: ResidueIndex,
    pub chain_id: SmolStr,
    pub name: SmolStr,
    pub number: i32,
    pub insertion_code: Option<char>,
    pub category: ResidueCategory,
    atoms: Range<AtomIndex>,
}

impl Residue {
    pub fn new(
        index: ResidueIndex,
        chain_id: &str,
        name: &str,
        number: i32,
        category: ResidueCategory,
    ) -> Self {
        Self {
            index,
            chain_id: SmolStr::new(chain_id),
            name: SmolStr::new(name),
            number,
            insertion_code: None,
            category,
            atoms: 0..0,
        }
    }

    pub fn with_insertion_code(mut self, insertion_code: Option<char>) -> Self {
        self.insertion_code = insertion_code;
        self
    }

    /// Atom indices owned by this residue. Residues always own a contiguous block.
    pub fn atom_range(&self) -> Range<AtomIndex> {
        self.atoms.clone()
    }

    pub fn first_atom(&self) -> Option<AtomIndex> {
        (!self.atoms.is_empty()).then_some(self.atoms.start)
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn is_water(&self) -> bool {
        self.category == ResidueCategory::Water
    }

    pub fn label(&self) -> ResidueLabel {
        ResidueLabel {
            chain_id: self.chain_id.clone(),
            name: self.name.clone(),
            number: self.number,
        }
    }

    pub(crate) fn extend_to(&mut self, atom: AtomIndex) {
        if self.atoms.is_empty() {
            self.atoms = atom..atom + 1;
        } else {
            debug_assert_eq!(
                self.atoms.end, atom,
                "Residue '{}' must own a contiguous atom block",
                self.name
            );
            self.atoms.end = atom + 1;
        }
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Residue {{ index: {}, label: {}, category: {}, atoms: {} }}",
            self.index,
            self.label(),
            self.category,
            self.atom_count()
        )
    }
}

/// Human-readable residue identity rendered as `chain:NAMEnumber` (e.g., `A:SER195`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResidueLabel {
    pub chain_id: SmolStr,
    pub name: SmolStr,
    pub number: i32,
}

impl fmt::Display for ResidueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}{}", self.chain_id, self.name, self.number)
    }
}
