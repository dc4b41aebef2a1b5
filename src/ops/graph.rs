use crate::model::types::{AtomIndex, ResidueIndex};
use crate::ops::error::Error;
use crate::ops::hbond::HBondHit;
use std::collections::{BTreeMap, BTreeSet};

/// Undirected residue adjacency built from one frame's hydrogen bonds.
///
/// Every edge is stored in both directions and self-loops are never stored, so several
/// atom-level bonds between the same two residues collapse into a single edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidueGraph {
    adjacency: BTreeMap<ResidueIndex, BTreeSet<ResidueIndex>>,
}

impl ResidueGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph by resolving each hit's atoms to their residues.
    ///
    /// # Arguments
    ///
    /// * `hits` - Atom-level hydrogen bonds detected in one frame.
    /// * `residue_of` - Maps an atom index to the residue that owns it.
    ///
    /// # Returns
    ///
    /// A symmetric graph with one edge per distinct pair of bonded residues.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAtom`] if `residue_of` cannot resolve a donor or acceptor.
    pub fn from_hits<F>(hits: &[HBondHit], mut residue_of: F) -> Result<Self, Error>
    where
        F: FnMut(AtomIndex) -> Option<ResidueIndex>,
    {
        let mut graph = Self::new();
        for hit in hits {
            let donor = residue_of(hit.donor).ok_or(Error::UnknownAtom { atom: hit.donor })?;
            let acceptor = residue_of(hit.acceptor).ok_or(Error::UnknownAtom {
                atom: hit.acceptor,
            })?;
            graph.add_edge(donor, acceptor);
        }
        Ok(graph)
    }

    /// Connects two residues in both directions.
    ///
    /// # Returns
    ///
    /// `true` if a new edge was stored; `false` for self-loops and existing edges.
    pub fn add_edge(&mut self, a: ResidueIndex, b: ResidueIndex) -> bool {
        if a == b {
            return false;
        }
        let inserted = self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
        inserted
    }

    /// Neighbors of `residue` in ascending order; empty for unknown residues.
    pub fn neighbors(
        &self,
        residue: ResidueIndex,
    ) -> impl DoubleEndedIterator<Item = ResidueIndex> + '_ {
        self.adjacency
            .get(&residue)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Returns `true` if `residue` takes part in at least one edge.
    pub fn contains(&self, residue: ResidueIndex) -> bool {
        self.adjacency.contains_key(&residue)
    }

    /// Returns `true` if `a` and `b` are bonded.
    pub fn has_edge(&self, a: ResidueIndex, b: ResidueIndex) -> bool {
        self.adjacency.get(&a).is_some_and(|set| set.contains(&b))
    }

    /// Number of residues with at least one edge.
    pub fn residue_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Returns `true` if the frame produced no residue-level bonds.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Returns `true` if every edge is stored in both directions.
    pub fn is_symmetric(&self) -> bool {
        self.adjacency
            .iter()
            .all(|(a, set)| set.iter().all(|b| self.has_edge(*b, *a)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residue_map(atom: AtomIndex) -> Option<ResidueIndex> {
        // Two atoms per residue; atoms past 9 are unknown.
        (atom < 10).then_some(atom / 2)
    }

    #[test]
    fn hits_become_symmetric_residue_edges() {
        let hits = [HBondHit::new(0, 2), HBondHit::new(4, 3)];

        let graph = ResidueGraph::from_hits(&hits, residue_map).unwrap();

        assert!(graph.has_edge(0, 1));
        assert!(graph.has_edge(1, 0));
        assert!(graph.has_edge(1, 2));
        assert!(graph.is_symmetric());
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors(1).collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn multiple_hits_collapse_into_one_edge() {
        let hits = [
            HBondHit::new(0, 2),
            HBondHit::new(1, 3),
            HBondHit::new(3, 0),
        ];

        let graph = ResidueGraph::from_hits(&hits, residue_map).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.residue_count(), 2);
    }

    #[test]
    fn intra_residue_hits_add_no_self_loop() {
        let graph = ResidueGraph::from_hits(&[HBondHit::new(0, 1)], residue_map).unwrap();

        assert!(graph.is_empty());
        assert!(!graph.has_edge(0, 0));
        assert_eq!(graph.neighbors(0).count(), 0);
    }

    #[test]
    fn unresolvable_atom_is_an_error() {
        let result = ResidueGraph::from_hits(&[HBondHit::new(0, 42)], residue_map);

        assert!(matches!(result, Err(Error::UnknownAtom { atom: 42 })));
    }

    #[test]
    fn add_edge_reports_novelty() {
        let mut graph = ResidueGraph::new();

        assert!(graph.add_edge(3, 7));
        assert!(!graph.add_edge(7, 3));
        assert!(!graph.add_edge(5, 5));
        assert!(graph.contains(7));
        assert!(!graph.contains(5));
    }
}
