//! Single-source shortest paths (Dijkstra) and cost matrices.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::{Graph, GraphError};
use crate::models::{CostMatrix, NodeId, ShortestPathResult};
use crate::path::{reconstruct_edges, reconstruct_nodes};

/// Heap entry ordered so `BinaryHeap` pops the smallest distance first,
/// lowest node index among equal distances.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    distance: f64,
    node: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Distances and predecessors from one source, indexed by dense node index.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    pub source: usize,
    /// `f64::INFINITY` for unreachable nodes.
    pub distance: Vec<f64>,
    /// `None` for the source and for unreachable nodes.
    pub predecessor: Vec<Option<usize>>,
}

impl ShortestPaths {
    #[inline]
    pub fn distance_to(&self, target: usize) -> f64 {
        self.distance.get(target).copied().unwrap_or(f64::INFINITY)
    }

    pub fn is_reachable(&self, target: usize) -> bool {
        self.distance_to(target).is_finite()
    }

    /// Hops from the source to `target`; see [`reconstruct_edges`].
    pub fn edges_to(&self, target: usize) -> Vec<(usize, usize)> {
        reconstruct_edges(&self.predecessor, self.source, target)
    }

    /// Nodes from the source to `target`; see [`reconstruct_nodes`].
    pub fn nodes_to(&self, target: usize) -> Vec<usize> {
        reconstruct_nodes(&self.predecessor, self.source, target)
    }
}

/// Dijkstra from `source` over the whole graph.
///
/// Fails with `UnknownSource` if `source` is not a node of the graph.
pub fn dijkstra(graph: &Graph, source: NodeId) -> Result<ShortestPaths, GraphError> {
    let source_idx = graph
        .index_of(source)
        .ok_or(GraphError::UnknownSource(source))?;
    Ok(dijkstra_from(graph, source_idx))
}

/// Dijkstra from a dense node index.
///
/// Uses lazy deletion: a node may sit in the heap several times and stale
/// entries are skipped when popped. Requires nonnegative weights, which
/// [`Graph::new`] enforces.
pub fn dijkstra_from(graph: &Graph, source: usize) -> ShortestPaths {
    let n = graph.node_count();
    let mut distance = vec![f64::INFINITY; n];
    let mut predecessor: Vec<Option<usize>> = vec![None; n];
    let mut settled = vec![false; n];

    distance[source] = 0.0;
    let mut heap = BinaryHeap::with_capacity(n);
    heap.push(Frontier {
        distance: 0.0,
        node: source,
    });

    while let Some(Frontier { distance: d, node: u }) = heap.pop() {
        if settled[u] || d > distance[u] {
            continue;
        }
        settled[u] = true;

        for &(v, weight) in graph.neighbors(u) {
            if settled[v] {
                continue;
            }
            let candidate = d + weight;
            if candidate < distance[v] {
                distance[v] = candidate;
                predecessor[v] = Some(u);
                heap.push(Frontier {
                    distance: candidate,
                    node: v,
                });
            }
        }
    }

    ShortestPaths {
        source,
        distance,
        predecessor,
    }
}

/// Shortest path rows for a chosen subset of source nodes.
///
/// Only the start node and job locations are ever used as sources, so this
/// runs Dijkstra once per distinct relevant node rather than once per node.
#[derive(Debug, Clone)]
pub struct RelevantCosts {
    rows: Vec<Option<ShortestPaths>>,
}

impl RelevantCosts {
    /// Travel cost between two dense node indices; infinite when `from` has no row.
    #[inline]
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.paths_from(from)
            .map_or(f64::INFINITY, |paths| paths.distance_to(to))
    }

    pub fn paths_from(&self, from: usize) -> Option<&ShortestPaths> {
        self.rows.get(from).and_then(Option::as_ref)
    }

    /// Hops between two dense node indices, empty when there is no row or no path.
    pub fn edges(&self, from: usize, to: usize) -> Vec<(usize, usize)> {
        self.paths_from(from)
            .map(|paths| paths.edges_to(to))
            .unwrap_or_default()
    }

    /// Number of sources that were computed.
    pub fn source_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_some()).count()
    }
}

/// Run Dijkstra from each distinct node index in `relevant`.
///
/// Each run only reads the graph and fills its own row.
pub fn relevant_costs(graph: &Graph, relevant: impl IntoIterator<Item = usize>) -> RelevantCosts {
    let mut rows: Vec<Option<ShortestPaths>> = vec![None; graph.node_count()];
    for source in relevant {
        if rows[source].is_none() {
            rows[source] = Some(dijkstra_from(graph, source));
        }
    }
    RelevantCosts { rows }
}

/// Cost matrix restricted to `relevant` node ids.
///
/// Fails with `UnknownNode` if any id is not in the graph.
pub fn relevant_cost_matrix(
    graph: &Graph,
    relevant: &[NodeId],
) -> Result<RelevantCosts, GraphError> {
    let indices = relevant
        .iter()
        .map(|&node| graph.require(node))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(relevant_costs(graph, indices))
}

/// Full all-pairs cost matrix over every node, in ascending node id order.
pub fn cost_matrix(graph: &Graph) -> CostMatrix {
    let n = graph.node_count();
    let matrix = (0..n)
        .map(|source| {
            dijkstra_from(graph, source)
                .distance
                .into_iter()
                .map(|d| d.is_finite().then_some(d))
                .collect()
        })
        .collect();

    CostMatrix {
        nodes: graph.node_ids().to_vec(),
        matrix,
    }
}

/// Shortest path between two node ids.
pub fn shortest_path(
    graph: &Graph,
    start: NodeId,
    end: NodeId,
) -> Result<ShortestPathResult, GraphError> {
    let source = graph.require(start)?;
    let target = graph.require(end)?;

    let paths = dijkstra_from(graph, source);
    if !paths.is_reachable(target) {
        return Ok(ShortestPathResult {
            start,
            end,
            distance: None,
            path: Vec::new(),
            reachable: false,
        });
    }

    Ok(ShortestPathResult {
        start,
        end,
        distance: Some(paths.distance_to(target)),
        path: paths
            .nodes_to(target)
            .into_iter()
            .map(|idx| graph.node_id(idx))
            .collect(),
        reachable: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scenario_a() -> Graph {
        Graph::new(&[1, 2, 3], &[(1, 2, 2.0), (2, 3, 3.0), (1, 3, 10.0)]).unwrap()
    }

    #[test]
    fn test_scenario_a_distances() {
        let graph = scenario_a();
        let paths = dijkstra(&graph, 1).unwrap();

        assert_eq!(paths.distance, vec![0.0, 2.0, 5.0]);
        assert_eq!(paths.predecessor, vec![None, Some(0), Some(1)]);
    }

    #[test]
    fn test_scenario_a_path() {
        let result = shortest_path(&scenario_a(), 1, 3).unwrap();

        assert_eq!(result.path, vec![1, 2, 3]);
        assert_eq!(result.distance, Some(5.0));
        assert!(result.reachable);
    }

    #[test]
    fn test_unknown_source() {
        let err = dijkstra(&scenario_a(), 42).unwrap_err();
        assert_eq!(err, GraphError::UnknownSource(42));
    }

    #[test]
    fn test_unreachable_node() {
        let graph = Graph::new(&[1, 2, 3], &[(1, 2, 1.0)]).unwrap();
        let paths = dijkstra(&graph, 1).unwrap();

        assert!(paths.distance[2].is_infinite());
        assert_eq!(paths.predecessor[2], None);

        let result = shortest_path(&graph, 1, 3).unwrap();
        assert_eq!(result.distance, None);
        assert!(result.path.is_empty());
        assert!(!result.reachable);
    }

    #[test]
    fn test_directed_edges_not_reversible() {
        let result = shortest_path(&scenario_a(), 3, 1).unwrap();
        assert!(!result.reachable);
    }

    #[test]
    fn test_path_to_self() {
        let result = shortest_path(&scenario_a(), 2, 2).unwrap();
        assert_eq!(result.path, vec![2]);
        assert_eq!(result.distance, Some(0.0));
    }

    #[test]
    fn test_shortest_path_unknown_endpoint() {
        assert_eq!(
            shortest_path(&scenario_a(), 1, 99).unwrap_err(),
            GraphError::UnknownNode(99)
        );
        assert_eq!(
            shortest_path(&scenario_a(), 99, 1).unwrap_err(),
            GraphError::UnknownNode(99)
        );
    }

    #[test]
    fn test_cost_matrix_marks_unreachable() {
        let matrix = cost_matrix(&scenario_a());

        assert_eq!(matrix.nodes, vec![1, 2, 3]);
        assert_eq!(matrix.matrix[0], vec![Some(0.0), Some(2.0), Some(5.0)]);
        assert_eq!(matrix.matrix[2], vec![None, None, Some(0.0)]);
    }

    #[test]
    fn test_relevant_costs_only_for_requested_rows() {
        let graph = scenario_a();
        let costs = relevant_cost_matrix(&graph, &[1, 3, 1]).unwrap();

        assert_eq!(costs.source_count(), 2);
        assert_eq!(costs.cost(0, 2), 5.0);
        // No row computed for node 2.
        assert!(costs.cost(1, 2).is_infinite());
        assert_eq!(costs.edges(0, 2), vec![(0, 1), (1, 2)]);
        assert!(costs.edges(1, 2).is_empty());
    }

    #[test]
    fn test_relevant_cost_matrix_unknown_node() {
        let err = relevant_cost_matrix(&scenario_a(), &[1, 8]).unwrap_err();
        assert_eq!(err, GraphError::UnknownNode(8));
    }

    #[test]
    fn test_zero_weight_edges() {
        let graph = Graph::new(&[1, 2, 3], &[(1, 2, 0.0), (2, 3, 0.0)]).unwrap();
        let paths = dijkstra(&graph, 1).unwrap();
        assert_eq!(paths.distance, vec![0.0, 0.0, 0.0]);
        assert_eq!(paths.edges_to(2), vec![(0, 1), (1, 2)]);
    }

    /// Reference distances by repeated relaxation (Bellman-Ford).
    fn relaxed_distances(n: usize, edges: &[(usize, usize, f64)], source: usize) -> Vec<f64> {
        let mut dist = vec![f64::INFINITY; n];
        dist[source] = 0.0;
        for _ in 0..n {
            for &(u, v, w) in edges {
                if dist[u] + w < dist[v] {
                    dist[v] = dist[u] + w;
                }
            }
        }
        dist
    }

    fn arb_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize, f64)>)> {
        (1usize..9).prop_flat_map(|n| {
            let edge = (0..n, 0..n, 0u32..20).prop_map(|(u, v, w)| (u, v, w as f64));
            (Just(n), prop::collection::vec(edge, 0..25))
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_dijkstra_matches_relaxation((n, edges) in arb_graph(), source_seed in 0usize..9) {
            let source = source_seed % n;
            let nodes: Vec<NodeId> = (0..n as NodeId).collect();
            let triples: Vec<(NodeId, NodeId, f64)> = edges
                .iter()
                .map(|&(u, v, w)| (u as NodeId, v as NodeId, w))
                .collect();
            let graph = Graph::new(&nodes, &triples).unwrap();

            let paths = dijkstra_from(&graph, source);
            let expected = relaxed_distances(n, &edges, source);
            prop_assert_eq!(&paths.distance, &expected);
        }

        #[test]
        fn prop_reconstructed_edges_sum_to_distance((n, edges) in arb_graph(), source_seed in 0usize..9) {
            let source = source_seed % n;
            let nodes: Vec<NodeId> = (0..n as NodeId).collect();
            let triples: Vec<(NodeId, NodeId, f64)> = edges
                .iter()
                .map(|&(u, v, w)| (u as NodeId, v as NodeId, w))
                .collect();
            let graph = Graph::new(&nodes, &triples).unwrap();
            let paths = dijkstra_from(&graph, source);

            for target in 0..n {
                if !paths.is_reachable(target) {
                    prop_assert!(paths.edges_to(target).is_empty());
                    continue;
                }
                let hops = paths.edges_to(target);
                let total: f64 = hops
                    .iter()
                    .map(|&(u, v)| {
                        graph
                            .neighbors(u)
                            .iter()
                            .filter(|&&(to, _)| to == v)
                            .map(|&(_, w)| w)
                            .fold(f64::INFINITY, f64::min)
                    })
                    .sum();
                let expected = if target == source { 0.0 } else { paths.distance[target] };
                prop_assert_eq!(total, expected);
            }
        }
    }
}
