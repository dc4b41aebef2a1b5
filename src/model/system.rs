//! Frame-invariant topology of a simulated molecular system.
//!
//! A [`System`] owns every atom and residue in a flat, index-addressed layout. Residues own
//! contiguous atom blocks, so `residue_of` is a constant-time lookup and selection results
//! can be lifted from atoms to residues without any hierarchy traversal.

use super::atom::Atom;
use super::atom_set::AtomSet;
use super::residue::{Residue, ResidueLabel};
use super::types::{AtomIndex, Element, ResidueCategory, ResidueIndex};
use std::collections::BTreeSet;
use std::fmt;

/// Flat atom/residue topology shared by every frame of a trajectory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct System {
    atoms: Vec<Atom>,
    residues: Vec<Residue>,
}

impl System {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new residue and returns its index.
    ///
    /// Subsequent calls to [`System::push_atom`] must target the most recently opened
    /// residue so that atom blocks stay contiguous.
    ///
    /// # Arguments
    ///
    /// * `chain_id` - Chain label (may be empty).
    /// * `name` - Residue name such as `"HOH"`.
    /// * `number` - Author residue number.
    /// * `category` - Chemical role of the residue.
    pub fn push_residue(
        &mut self,
        chain_id: &str,
        name: &str,
        number: i32,
        category: ResidueCategory,
    ) -> ResidueIndex {
        let index = self.residues.len();
        self.residues
            .push(Residue::new(index, chain_id, name, number, category));
        index
    }

    /// Appends an atom to `residue`, returning the new atom index.
    ///
    /// # Panics
    ///
    /// Panics if `residue` does not exist.
    pub fn push_atom(&mut self, residue: ResidueIndex, name: &str, element: Element) -> AtomIndex {
        debug_assert_eq!(
            residue + 1,
            self.residues.len(),
            "Atoms must be appended to the most recently opened residue"
        );
        let index = self.atoms.len();
        self.atoms.push(Atom::new(name, element, residue));
        self.residues[residue].extend_to(index);
        index
    }

    pub(crate) fn residue_mut(&mut self, index: ResidueIndex) -> Option<&mut Residue> {
        self.residues.get_mut(index)
    }

    pub fn atom(&self, index: AtomIndex) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn residue(&self, index: ResidueIndex) -> Option<&Residue> {
        self.residues.get(index)
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Resolves the residue that owns `atom`.
    pub fn residue_of(&self, atom: AtomIndex) -> Option<ResidueIndex> {
        self.atoms.get(atom).map(|a| a.residue)
    }

    /// Resolves the `chain:NAMEnumber` label of a residue.
    pub fn residue_label(&self, residue: ResidueIndex) -> Option<ResidueLabel> {
        self.residues.get(residue).map(Residue::label)
    }

    /// Lifts an atom selection to the set of residues it touches.
    ///
    /// Indices outside the system are ignored.
    pub fn selection_residues(&self, atoms: &AtomSet) -> BTreeSet<ResidueIndex> {
        atoms.iter().filter_map(|a| self.residue_of(a)).collect()
    }

    /// Selects every atom in the system.
    pub fn all_atoms(&self) -> AtomSet {
        (0..self.atoms.len()).collect()
    }

    /// Selects atoms whose atom and residue satisfy `predicate`.
    pub fn atoms_where<F>(&self, mut predicate: F) -> AtomSet
    where
        F: FnMut(&Atom, &Residue) -> bool,
    {
        self.atoms
            .iter()
            .enumerate()
            .filter(|(_, atom)| predicate(atom, &self.residues[atom.residue]))
            .map(|(index, _)| index)
            .collect()
    }

    /// Chain labels in order of first appearance.
    pub fn chain_ids(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.residues
            .iter()
            .filter(|r| seen.insert(r.chain_id.as_str()))
            .map(|r| r.chain_id.as_str())
            .collect()
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "System {{ chains: {}, residues: {}, atoms: {} }}",
            self.chain_ids().len(),
            self.residue_count(),
            self.atom_count()
        )
    }
}
