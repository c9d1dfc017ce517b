//! Path reconstruction from Dijkstra predecessor maps.
//!
//! An empty result means "no path" except when source and target coincide.
//! Callers must treat it as an infinite cost in that case.

/// Ordered `(from, to)` hops from `source` to `target`.
///
/// Walks predecessors back from `target` and reverses. Returns an empty list
/// when `source == target`, and also when the walk dead-ends before reaching
/// `source`.
pub fn reconstruct_edges(
    predecessor: &[Option<usize>],
    source: usize,
    target: usize,
) -> Vec<(usize, usize)> {
    if source == target {
        return Vec::new();
    }

    let mut edges = Vec::new();
    let mut current = target;
    while current != source {
        // A predecessor tree never needs more hops than there are nodes.
        if edges.len() >= predecessor.len() {
            return Vec::new();
        }
        let Some(prev) = predecessor.get(current).copied().flatten() else {
            return Vec::new();
        };
        edges.push((prev, current));
        current = prev;
    }

    edges.reverse();
    edges
}

/// Ordered node sequence `source ..= target`.
///
/// `[source]` when both are equal, empty when `target` is unreachable.
pub fn reconstruct_nodes(predecessor: &[Option<usize>], source: usize, target: usize) -> Vec<usize> {
    if source == target {
        return vec![source];
    }

    let edges = reconstruct_edges(predecessor, source, target);
    if edges.is_empty() {
        return Vec::new();
    }

    let mut nodes = Vec::with_capacity(edges.len() + 1);
    nodes.push(source);
    nodes.extend(edges.iter().map(|&(_, to)| to));
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0 -> 1 -> 2, node 3 unreachable
    fn chain() -> Vec<Option<usize>> {
        vec![None, Some(0), Some(1), None]
    }

    #[test]
    fn test_edges_along_chain() {
        assert_eq!(reconstruct_edges(&chain(), 0, 2), vec![(0, 1), (1, 2)]);
        assert_eq!(reconstruct_edges(&chain(), 0, 1), vec![(0, 1)]);
    }

    #[test]
    fn test_same_node_is_empty() {
        assert!(reconstruct_edges(&chain(), 2, 2).is_empty());
        assert_eq!(reconstruct_nodes(&chain(), 2, 2), vec![2]);
    }

    #[test]
    fn test_unreachable_is_empty() {
        assert!(reconstruct_edges(&chain(), 0, 3).is_empty());
        assert!(reconstruct_nodes(&chain(), 0, 3).is_empty());
    }

    #[test]
    fn test_walk_that_misses_source_is_empty() {
        // Predecessors lead to 0, but the query starts from 1's sibling 3.
        assert!(reconstruct_edges(&chain(), 3, 2).is_empty());
    }

    #[test]
    fn test_corrupt_cycle_terminates() {
        let looping = vec![Some(1), Some(0), None];
        assert!(reconstruct_edges(&looping, 2, 0).is_empty());
    }

    #[test]
    fn test_nodes_along_chain() {
        assert_eq!(reconstruct_nodes(&chain(), 0, 2), vec![0, 1, 2]);
    }
}
