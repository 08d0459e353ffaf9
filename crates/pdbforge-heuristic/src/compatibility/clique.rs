//! Maximal clique enumeration and maintenance.
//!
//! Cliques are sorted node-id lists; clique sets are returned sorted so
//! both strategies produce identical output for the same graph.

use std::collections::BTreeSet;

use super::graph::NodeId;

/// A set of pairwise compatible nodes, sorted ascending.
pub type Clique = Vec<NodeId>;

/// Enumerates all maximal cliques with Bron–Kerbosch and Tomita pivoting.
///
/// An empty graph has no cliques.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use pdbforge_heuristic::compatibility::bron_kerbosch;
///
/// // Path 0 - 1 - 2
/// let neighbors: Vec<BTreeSet<usize>> = vec![
///     BTreeSet::from([1]),
///     BTreeSet::from([0, 2]),
///     BTreeSet::from([1]),
/// ];
/// assert_eq!(bron_kerbosch(&neighbors), vec![vec![0, 1], vec![1, 2]]);
/// ```
pub fn bron_kerbosch(neighbors: &[BTreeSet<NodeId>]) -> Vec<Clique> {
    let mut cliques = Vec::new();
    if neighbors.is_empty() {
        return cliques;
    }
    let candidates: BTreeSet<NodeId> = (0..neighbors.len()).collect();
    expand(
        neighbors,
        &mut Vec::new(),
        candidates,
        BTreeSet::new(),
        &mut cliques,
    );
    canonicalize(&mut cliques);
    cliques
}

fn expand(
    neighbors: &[BTreeSet<NodeId>],
    current: &mut Vec<NodeId>,
    mut candidates: BTreeSet<NodeId>,
    mut excluded: BTreeSet<NodeId>,
    out: &mut Vec<Clique>,
) {
    let Some(pivot) = candidates
        .union(&excluded)
        .copied()
        .max_by_key(|&u| neighbors[u].intersection(&candidates).count())
    else {
        let mut clique = current.clone();
        clique.sort_unstable();
        out.push(clique);
        return;
    };

    let branch: Vec<NodeId> = candidates.difference(&neighbors[pivot]).copied().collect();
    for v in branch {
        current.push(v);
        expand(
            neighbors,
            current,
            candidates.intersection(&neighbors[v]).copied().collect(),
            excluded.intersection(&neighbors[v]).copied().collect(),
            out,
        );
        current.pop();
        candidates.remove(&v);
        excluded.insert(v);
    }
}

/// Maximal cliques after `node` joined a graph whose maximal cliques were
/// `previous`. `adjacent` are the new node's neighbors.
///
/// A previous clique survives unless the new node is adjacent to all of its
/// members. Every maximal clique containing the new node is
/// `(C ∩ adjacent) ∪ {node}` for some previous clique `C`; of those
/// candidates only the inclusion-maximal ones are kept.
pub fn extend_maximal_cliques(
    previous: &[Clique],
    node: NodeId,
    adjacent: &BTreeSet<NodeId>,
) -> Vec<Clique> {
    // The empty graph's only maximal clique is the empty set.
    let seed = [Clique::new()];
    let previous = if previous.is_empty() { &seed[..] } else { previous };

    let mut result: Vec<Clique> = previous
        .iter()
        .filter(|c| !c.iter().all(|v| adjacent.contains(v)))
        .cloned()
        .collect();

    let joined: Vec<Clique> = previous
        .iter()
        .map(|c| {
            let mut clique: Clique = c.iter().copied().filter(|v| adjacent.contains(v)).collect();
            clique.push(node);
            clique.sort_unstable();
            clique
        })
        .collect();
    result.extend(retain_maximal(joined));

    canonicalize(&mut result);
    result
}

/// Drops duplicates and every clique strictly contained in another.
fn retain_maximal(mut cliques: Vec<Clique>) -> Vec<Clique> {
    canonicalize(&mut cliques);
    let keep: Vec<bool> = cliques
        .iter()
        .map(|c| {
            !cliques
                .iter()
                .any(|d| d.len() > c.len() && is_sorted_subset(c, d))
        })
        .collect();
    cliques
        .into_iter()
        .zip(keep)
        .filter_map(|(c, keep)| keep.then_some(c))
        .collect()
}

fn canonicalize(cliques: &mut Vec<Clique>) {
    cliques.sort_unstable();
    cliques.dedup();
}

fn is_sorted_subset(small: &[NodeId], big: &[NodeId]) -> bool {
    let mut big = big.iter();
    small.iter().all(|v| big.by_ref().any(|w| w == v))
}
