//! Directed weighted road network.

use thiserror::Error;

use crate::interner::IdIndex;
use crate::models::{AdjacencyEntry, NodeId, RoutingSnapshot};

/// Errors raised while building or querying the road network.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Graph has no nodes")]
    EmptyGraph,
    #[error("Node {0} does not exist in the graph")]
    UnknownNode(NodeId),
    #[error("Source node {0} does not exist in the graph")]
    UnknownSource(NodeId),
    #[error("Edge {from} -> {to} has invalid weight {weight} (weights must be finite and >= 0)")]
    InvalidWeight { from: NodeId, to: NodeId, weight: f64 },
}

/// Immutable adjacency over dense node indices.
#[derive(Debug, Clone)]
pub struct Graph {
    index: IdIndex,
    /// Outgoing `(neighbor, weight)` pairs per node index, in edge input order.
    adjacency: Vec<Vec<(usize, f64)>>,
}

impl Graph {
    /// Build the graph from node ids and `(from, to, weight)` edges.
    ///
    /// Edges leaving an unknown node are dropped. An edge into an unknown node
    /// is kept and registers its destination as a node with no outgoing edges.
    pub fn new(nodes: &[NodeId], edges: &[(NodeId, NodeId, f64)]) -> Result<Self, GraphError> {
        if nodes.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        let declared = IdIndex::from_ids(nodes.iter().copied());

        let mut kept: Vec<(NodeId, NodeId, f64)> = Vec::with_capacity(edges.len());
        for &(from, to, weight) in edges {
            if !declared.contains(from) {
                continue;
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(GraphError::InvalidWeight { from, to, weight });
            }
            kept.push((from, to, weight));
        }

        let index = if kept.iter().all(|&(_, to, _)| declared.contains(to)) {
            declared
        } else {
            IdIndex::from_ids(
                declared
                    .ids()
                    .iter()
                    .copied()
                    .chain(kept.iter().map(|&(_, to, _)| to)),
            )
        };

        let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); index.len()];
        for (from, to, weight) in kept {
            // Both endpoints were registered above.
            if let (Some(u), Some(v)) = (index.get(from), index.get(to)) {
                adjacency[u].push((v, weight));
            }
        }

        Ok(Self { index, adjacency })
    }

    /// Build the graph from a caller snapshot.
    pub fn from_snapshot(snapshot: &RoutingSnapshot) -> Result<Self, GraphError> {
        Self::new(&snapshot.node_ids(), &snapshot.edge_triples())
    }

    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Node ids in ascending order; position equals dense index.
    pub fn node_ids(&self) -> &[NodeId] {
        self.index.ids()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.index.contains(node)
    }

    #[inline]
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.index.get(node)
    }

    /// Dense index of a node, or `UnknownNode`.
    pub fn require(&self, node: NodeId) -> Result<usize, GraphError> {
        self.index_of(node).ok_or(GraphError::UnknownNode(node))
    }

    #[inline]
    pub fn node_id(&self, idx: usize) -> NodeId {
        self.index.id(idx)
    }

    #[inline]
    pub fn neighbors(&self, idx: usize) -> &[(usize, f64)] {
        &self.adjacency[idx]
    }

    /// Adjacency listing in ascending node id order, for display.
    pub fn adjacency_list(&self) -> Vec<AdjacencyEntry> {
        self.adjacency
            .iter()
            .enumerate()
            .map(|(u, neighbors)| AdjacencyEntry {
                node: self.node_id(u),
                neighbors: neighbors
                    .iter()
                    .map(|&(v, w)| (self.node_id(v), w))
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph_rejected() {
        assert_eq!(Graph::new(&[], &[]).unwrap_err(), GraphError::EmptyGraph);
    }

    #[test]
    fn test_adjacency_keeps_input_order() {
        let graph = Graph::new(&[3, 1, 2], &[(1, 3, 10.0), (1, 2, 2.0), (2, 3, 3.0)]).unwrap();

        assert_eq!(graph.node_ids(), &[1, 2, 3]);
        assert_eq!(graph.edge_count(), 3);

        let listing = graph.adjacency_list();
        assert_eq!(listing[0].node, 1);
        assert_eq!(listing[0].neighbors, vec![(3, 10.0), (2, 2.0)]);
        assert_eq!(listing[1].neighbors, vec![(3, 3.0)]);
        assert!(listing[2].neighbors.is_empty());
    }

    #[test]
    fn test_edge_from_unknown_node_dropped() {
        let graph = Graph::new(&[1, 2], &[(9, 1, 1.0), (1, 2, 1.0)]).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(!graph.contains(9));
    }

    #[test]
    fn test_edge_to_unknown_node_registers_destination() {
        let graph = Graph::new(&[1, 2], &[(1, 7, 4.0)]).unwrap();

        assert_eq!(graph.node_ids(), &[1, 2, 7]);
        let seven = graph.require(7).unwrap();
        assert!(graph.neighbors(seven).is_empty());
        assert_eq!(graph.neighbors(graph.require(1).unwrap()), &[(seven, 4.0)]);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let err = Graph::new(&[1, 2], &[(1, 2, -1.0)]).unwrap_err();
        assert!(matches!(err, GraphError::InvalidWeight { from: 1, to: 2, .. }));

        let err = Graph::new(&[1, 2], &[(1, 2, f64::NAN)]).unwrap_err();
        assert!(matches!(err, GraphError::InvalidWeight { .. }));
    }

    #[test]
    fn test_require_unknown_node() {
        let graph = Graph::new(&[1], &[]).unwrap();
        assert_eq!(graph.require(1), Ok(0));
        assert_eq!(graph.require(5), Err(GraphError::UnknownNode(5)));
    }

    #[test]
    fn test_duplicate_nodes_collapse() {
        let graph = Graph::new(&[1, 1, 2], &[]).unwrap();
        assert_eq!(graph.node_count(), 2);
    }
}
