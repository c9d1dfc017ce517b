//! Core data types exchanged with the caller.
//!
//! Input types describe one immutable snapshot of the road network and the
//! jobs to perform on it. Output types mirror the response shapes the web
//! backend serves.

use pyo3::prelude::*;

/// External node identifier.
pub type NodeId = i64;
/// External job identifier.
pub type JobId = i64;

/// A location in the road network. Label and coordinates are carried for the
/// caller and never read by the algorithms.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    #[pyo3(get, set)]
    pub id: NodeId,
    #[pyo3(get, set)]
    pub name: Option<String>,
    #[pyo3(get, set)]
    pub x: Option<f64>,
    #[pyo3(get, set)]
    pub y: Option<f64>,
}

#[pymethods]
impl Node {
    #[new]
    #[pyo3(signature = (id, name=None, x=None, y=None))]
    fn new(id: NodeId, name: Option<String>, x: Option<f64>, y: Option<f64>) -> Self {
        Self { id, name, x, y }
    }

    fn __repr__(&self) -> String {
        format!("Node(id={}, name={:?})", self.id, self.name)
    }
}

/// A directed road segment. Two-way roads are two edges.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    #[pyo3(get, set)]
    pub id: i64,
    #[pyo3(get, set)]
    pub from_node: NodeId,
    #[pyo3(get, set)]
    pub to_node: NodeId,
    #[pyo3(get, set)]
    pub weight: f64,
}

#[pymethods]
impl Edge {
    #[new]
    fn new(id: i64, from_node: NodeId, to_node: NodeId, weight: f64) -> Self {
        Self {
            id,
            from_node,
            to_node,
            weight,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Edge(id={}, {} -> {}, weight={})",
            self.id, self.from_node, self.to_node, self.weight
        )
    }
}

/// Work to be performed at a node.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Job {
    #[pyo3(get, set)]
    pub id: JobId,
    #[pyo3(get, set, name = "type")]
    pub job_type: String,
    #[pyo3(get, set)]
    pub node_id: NodeId,
}

#[pymethods]
impl Job {
    #[new]
    #[pyo3(signature = (id, node_id, job_type=String::new()))]
    fn new(id: JobId, node_id: NodeId, job_type: String) -> Self {
        Self {
            id,
            job_type,
            node_id,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Job(id={}, type={:?}, node_id={})",
            self.id, self.job_type, self.node_id
        )
    }
}

/// `job_before` must complete before `job_after` starts.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Precedence {
    #[pyo3(get, set)]
    pub job_before: JobId,
    #[pyo3(get, set)]
    pub job_after: JobId,
}

#[pymethods]
impl Precedence {
    #[new]
    fn new(job_before: JobId, job_after: JobId) -> Self {
        Self {
            job_before,
            job_after,
        }
    }

    fn __repr__(&self) -> String {
        format!("Precedence({} -> {})", self.job_before, self.job_after)
    }
}

/// Everything one route computation reads. Never mutated while in use.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct RoutingSnapshot {
    #[pyo3(get, set)]
    pub nodes: Vec<Node>,
    #[pyo3(get, set)]
    pub edges: Vec<Edge>,
    #[pyo3(get, set)]
    pub jobs: Vec<Job>,
    #[pyo3(get, set)]
    pub precedences: Vec<Precedence>,
}

impl RoutingSnapshot {
    /// Build a snapshot from bare tuples. Edge ids are assigned by position
    /// and job types are left empty.
    pub fn from_parts(
        nodes: &[NodeId],
        edges: &[(NodeId, NodeId, f64)],
        jobs: &[(JobId, NodeId)],
        precedences: &[(JobId, JobId)],
    ) -> Self {
        Self {
            nodes: nodes
                .iter()
                .map(|&id| Node {
                    id,
                    name: None,
                    x: None,
                    y: None,
                })
                .collect(),
            edges: edges
                .iter()
                .enumerate()
                .map(|(i, &(from_node, to_node, weight))| Edge {
                    id: i as i64 + 1,
                    from_node,
                    to_node,
                    weight,
                })
                .collect(),
            jobs: jobs
                .iter()
                .map(|&(id, node_id)| Job {
                    id,
                    job_type: String::new(),
                    node_id,
                })
                .collect(),
            precedences: precedences
                .iter()
                .map(|&(job_before, job_after)| Precedence {
                    job_before,
                    job_after,
                })
                .collect(),
        }
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|n| n.id).collect()
    }

    pub fn edge_triples(&self) -> Vec<(NodeId, NodeId, f64)> {
        self.edges
            .iter()
            .map(|e| (e.from_node, e.to_node, e.weight))
            .collect()
    }

    pub fn job_ids(&self) -> Vec<JobId> {
        self.jobs.iter().map(|j| j.id).collect()
    }

    /// `(job id, node id)` per job, in input order.
    pub fn job_locations(&self) -> Vec<(JobId, NodeId)> {
        self.jobs.iter().map(|j| (j.id, j.node_id)).collect()
    }

    pub fn precedence_pairs(&self) -> Vec<(JobId, JobId)> {
        self.precedences
            .iter()
            .map(|p| (p.job_before, p.job_after))
            .collect()
    }
}

#[pymethods]
impl RoutingSnapshot {
    #[new]
    #[pyo3(signature = (nodes, edges, jobs=Vec::new(), precedences=Vec::new()))]
    fn new(
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        jobs: Vec<Job>,
        precedences: Vec<Precedence>,
    ) -> Self {
        Self {
            nodes,
            edges,
            jobs,
            precedences,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "RoutingSnapshot(nodes={}, edges={}, jobs={}, precedences={})",
            self.nodes.len(),
            self.edges.len(),
            self.jobs.len(),
            self.precedences.len()
        )
    }
}

/// Answer to a point-to-point shortest path query.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPathResult {
    #[pyo3(get)]
    pub start: NodeId,
    #[pyo3(get)]
    pub end: NodeId,
    /// None when `end` cannot be reached.
    #[pyo3(get)]
    pub distance: Option<f64>,
    #[pyo3(get)]
    pub path: Vec<NodeId>,
    #[pyo3(get)]
    pub reachable: bool,
}

#[pymethods]
impl ShortestPathResult {
    fn __repr__(&self) -> String {
        format!(
            "ShortestPathResult(start={}, end={}, distance={:?}, hops={})",
            self.start,
            self.end,
            self.distance,
            self.path.len().saturating_sub(1)
        )
    }
}

/// All-pairs travel costs. Row and column order follow `nodes`.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct CostMatrix {
    #[pyo3(get)]
    pub nodes: Vec<NodeId>,
    #[pyo3(get)]
    pub matrix: Vec<Vec<Option<f64>>>,
}

#[pymethods]
impl CostMatrix {
    fn __repr__(&self) -> String {
        format!("CostMatrix(nodes={})", self.nodes.len())
    }
}

/// Outgoing edges of one node, for drawing the network.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct AdjacencyEntry {
    #[pyo3(get)]
    pub node: NodeId,
    /// `(to, weight)` pairs in edge input order.
    #[pyo3(get)]
    pub neighbors: Vec<(NodeId, f64)>,
}

#[pymethods]
impl AdjacencyEntry {
    fn __repr__(&self) -> String {
        format!(
            "AdjacencyEntry(node={}, neighbors={})",
            self.node,
            self.neighbors.len()
        )
    }
}

/// Linearization of the precedence graph. `order` is empty whenever
/// `has_cycle` is set.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TopologicalResult {
    #[pyo3(get)]
    pub has_cycle: bool,
    #[pyo3(get)]
    pub order: Vec<JobId>,
}

#[pymethods]
impl TopologicalResult {
    fn __repr__(&self) -> String {
        format!(
            "TopologicalResult(has_cycle={}, order={:?})",
            self.has_cycle, self.order
        )
    }
}

/// A computed job sequence and the physical route that performs it.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct RouteResult {
    /// "greedy" or "optimal".
    #[pyo3(get)]
    pub strategy: String,
    #[pyo3(get)]
    pub start_node: NodeId,
    #[pyo3(get)]
    pub job_order: Vec<JobId>,
    #[pyo3(get)]
    pub total_cost: f64,
    /// Consecutive `(from, to)` hops from `start_node` through every job location.
    #[pyo3(get)]
    pub path_edges: Vec<(NodeId, NodeId)>,
}

#[pymethods]
impl RouteResult {
    fn __repr__(&self) -> String {
        format!(
            "RouteResult(strategy={:?}, start_node={}, job_order={:?}, total_cost={})",
            self.strategy, self.start_node, self.job_order, self.total_cost
        )
    }
}
