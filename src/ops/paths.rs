use crate::model::types::ResidueIndex;
use crate::ops::graph::ResidueGraph;
use std::collections::BTreeSet;
use std::fmt;

/// A simple path of residues from a source residue to a target residue.
///
/// Paths hold at least two residues and never revisit one. Any residues between the
/// ends are the bridging residues, usually waters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BridgePath(Vec<ResidueIndex>);

impl BridgePath {
    /// Residues from source to terminal.
    pub fn residues(&self) -> &[ResidueIndex] {
        &self.0
    }

    /// The source residue the path starts from.
    pub fn source(&self) -> ResidueIndex {
        self.0[0]
    }

    /// The target residue the path ends at.
    pub fn terminal(&self) -> ResidueIndex {
        self.0[self.0.len() - 1]
    }

    /// Bridging residues between the ends; empty for a direct bond.
    pub fn intermediates(&self) -> &[ResidueIndex] {
        &self.0[1..self.0.len() - 1]
    }

    /// Number of residues, ends included.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for BridgePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, residue) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", residue)?;
        }
        Ok(())
    }
}

/// Enumerates every bridge path starting at any of `sources`.
///
/// Sources are searched independently in ascending order. See [`paths_from`].
pub fn find_paths(
    graph: &ResidueGraph,
    sources: &BTreeSet<ResidueIndex>,
    targets: &BTreeSet<ResidueIndex>,
    max_steps: usize,
) -> Vec<BridgePath> {
    sources
        .iter()
        .flat_map(|&source| paths_from(graph, source, targets, max_steps))
        .collect()
}

/// Enumerates every simple path from `source` to a target residue with at most
/// `max_steps` residues.
///
/// The search is depth-first and exhaustive: a path stops at the first target residue it
/// reaches, but other branches may still reach the same or other targets through
/// different intermediates, and each of those is reported. The source itself only counts
/// as a target after at least one hop, so a path always has two or more residues.
/// Neighbors are visited in ascending residue order.
pub fn paths_from(
    graph: &ResidueGraph,
    source: ResidueIndex,
    targets: &BTreeSet<ResidueIndex>,
    max_steps: usize,
) -> Vec<BridgePath> {
    let mut found = Vec::new();
    let mut stack = vec![vec![source]];

    while let Some(history) = stack.pop() {
        let Some(&current) = history.last() else {
            continue;
        };

        if history.len() > 1 && targets.contains(&current) {
            log::trace!("bridge path {:?}", history);
            found.push(BridgePath(history));
            continue;
        }

        if history.len() >= max_steps {
            continue;
        }

        for neighbor in graph.neighbors(current).rev() {
            if history.contains(&neighbor) {
                continue;
            }
            let mut next = Vec::with_capacity(history.len() + 1);
            next.extend_from_slice(&history);
            next.push(neighbor);
            stack.push(next);
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ResidueIndex = 0;
    const B: ResidueIndex = 1;
    const W1: ResidueIndex = 10;
    const W2: ResidueIndex = 11;
    const W3: ResidueIndex = 12;

    fn graph(edges: &[(ResidueIndex, ResidueIndex)]) -> ResidueGraph {
        let mut graph = ResidueGraph::new();
        for &(a, b) in edges {
            graph.add_edge(a, b);
        }
        graph
    }

    fn set(items: &[ResidueIndex]) -> BTreeSet<ResidueIndex> {
        items.iter().copied().collect()
    }

    fn as_vecs(paths: &[BridgePath]) -> Vec<Vec<ResidueIndex>> {
        paths.iter().map(|p| p.residues().to_vec()).collect()
    }

    #[test]
    fn single_water_bridge_is_found() {
        let g = graph(&[(A, W1), (W1, B)]);

        let paths = find_paths(&g, &set(&[A]), &set(&[B]), 4);

        assert_eq!(as_vecs(&paths), vec![vec![A, W1, B]]);
        assert_eq!(paths[0].intermediates(), &[W1]);
        assert_eq!(paths[0].to_string(), "0 -> 10 -> 1");
    }

    #[test]
    fn zero_waters_only_allows_direct_contacts() {
        let bridged = graph(&[(A, W1), (W1, B)]);
        assert!(find_paths(&bridged, &set(&[A]), &set(&[B]), 2).is_empty());

        let direct = graph(&[(A, B), (A, W1), (W1, B)]);
        let paths = find_paths(&direct, &set(&[A]), &set(&[B]), 2);
        assert_eq!(as_vecs(&paths), vec![vec![A, B]]);
    }

    #[test]
    fn all_simple_paths_within_depth_are_reported() {
        let g = graph(&[(A, B), (A, W1), (W1, B), (W1, W2), (W2, B)]);

        let paths = find_paths(&g, &set(&[A]), &set(&[B]), 4);

        assert_eq!(
            as_vecs(&paths),
            vec![vec![A, B], vec![A, W1, B], vec![A, W1, W2, B]]
        );
    }

    #[test]
    fn depth_bound_cuts_long_chains() {
        let g = graph(&[(A, W1), (W1, W2), (W2, W3), (W3, B)]);

        assert!(find_paths(&g, &set(&[A]), &set(&[B]), 4).is_empty());
        assert_eq!(find_paths(&g, &set(&[A]), &set(&[B]), 5).len(), 1);
    }

    #[test]
    fn search_stops_at_first_target_on_a_branch() {
        let c: ResidueIndex = 2;
        let g = graph(&[(A, B), (B, W1), (W1, c)]);

        let paths = find_paths(&g, &set(&[A]), &set(&[B, c]), 4);

        assert_eq!(as_vecs(&paths), vec![vec![A, B]]);
    }

    #[test]
    fn source_in_targets_does_not_match_itself() {
        let g = graph(&[]);
        assert!(find_paths(&g, &set(&[A]), &set(&[A]), 4).is_empty());

        let g = graph(&[(A, W1)]);
        assert!(find_paths(&g, &set(&[A]), &set(&[A]), 4).is_empty());
    }

    #[test]
    fn cycles_are_never_followed() {
        let g = graph(&[(A, W1), (W1, W2), (W2, A), (W2, B)]);

        let paths = find_paths(&g, &set(&[A]), &set(&[B]), 6);

        for path in &paths {
            let unique: BTreeSet<_> = path.residues().iter().collect();
            assert_eq!(unique.len(), path.len());
        }
        assert_eq!(
            as_vecs(&paths),
            vec![vec![A, W1, W2, B], vec![A, W2, B]]
        );
    }

    #[test]
    fn each_source_is_searched_independently() {
        let g = graph(&[(A, W1), (W1, B), (W1, W2)]);

        let paths = find_paths(&g, &set(&[A, W2]), &set(&[B]), 4);

        assert_eq!(as_vecs(&paths), vec![vec![A, W1, B], vec![W2, W1, B]]);
        for path in &paths {
            assert!(path.len() >= 2 && path.len() <= 4);
            assert_eq!(path.terminal(), B);
        }
    }

    #[test]
    fn unknown_source_yields_nothing() {
        let g = graph(&[(A, B)]);

        assert!(paths_from(&g, 99, &set(&[B]), 4).is_empty());
    }
}
