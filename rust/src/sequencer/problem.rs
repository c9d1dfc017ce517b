//! Validated inputs shared by both sequencers.

use crate::config::RoutingConfig;
use crate::graph::Graph;
use crate::models::{JobId, NodeId, RouteResult};
use crate::precedence::PrecedenceGraph;
use crate::shortest_path::{relevant_costs, RelevantCosts};
use crate::{log_checks, log_debug};

use super::{RouteError, Strategy};

/// One route computation's view of the network, jobs and precedences.
///
/// Construction performs every check that does not depend on the chosen
/// strategy: the start node exists, precedences are acyclic, job locations
/// resolve, and shortest paths from the relevant nodes are computed.
pub struct RoutingProblem<'a> {
    graph: &'a Graph,
    precedence: &'a PrecedenceGraph,
    start: usize,
    /// Node index per dense job index; `None` when the location is unknown.
    job_nodes: Vec<Option<usize>>,
    costs: RelevantCosts,
    verbosity: u8,
}

impl<'a> RoutingProblem<'a> {
    /// `jobs` maps job ids to node ids. Ids absent from `precedence` are ignored
    /// and the first location listed for a job wins.
    pub fn new(
        graph: &'a Graph,
        precedence: &'a PrecedenceGraph,
        jobs: &[(JobId, NodeId)],
        start_node: NodeId,
        config: &RoutingConfig,
    ) -> Result<Self, RouteError> {
        let start = graph.require(start_node)?;

        if precedence.has_cycle() {
            return Err(RouteError::CyclicPrecedence);
        }

        let n = precedence.job_count();
        let mut job_nodes: Vec<Option<usize>> = vec![None; n];
        let mut assigned = vec![false; n];
        for &(job, node) in jobs {
            let Some(j) = precedence.index_of(job) else {
                continue;
            };
            if assigned[j] {
                continue;
            }
            assigned[j] = true;

            match graph.index_of(node) {
                Some(v) => job_nodes[j] = Some(v),
                None if config.validate_job_nodes => {
                    return Err(RouteError::UnknownJobNode { job, node });
                }
                None => {
                    log_checks!(
                        config.verbosity,
                        "job {} is at unknown node {}; treating it as unreachable",
                        job,
                        node
                    );
                }
            }
        }

        let relevant = std::iter::once(start).chain(job_nodes.iter().flatten().copied());
        let costs = relevant_costs(graph, relevant);
        log_debug!(
            config.verbosity,
            "computed shortest paths from {} relevant nodes ({} nodes, {} edges)",
            costs.source_count(),
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self {
            graph,
            precedence,
            start,
            job_nodes,
            costs,
            verbosity: config.verbosity,
        })
    }

    pub fn job_count(&self) -> usize {
        self.job_nodes.len()
    }

    pub fn precedence(&self) -> &PrecedenceGraph {
        self.precedence
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn start_node(&self) -> NodeId {
        self.graph.node_id(self.start)
    }

    pub fn node_id(&self, idx: usize) -> NodeId {
        self.graph.node_id(idx)
    }

    pub fn job_id(&self, job: usize) -> JobId {
        self.precedence.job_id(job)
    }

    pub fn job_node(&self, job: usize) -> Option<usize> {
        self.job_nodes[job]
    }

    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }

    /// Travel cost from a node index to a job's location.
    pub fn cost_to_job(&self, from: usize, job: usize) -> f64 {
        match self.job_nodes[job] {
            Some(to) => self.costs.cost(from, to),
            None => f64::INFINITY,
        }
    }

    /// Travel cost from the start node to a job's location.
    pub fn start_cost(&self, job: usize) -> f64 {
        self.cost_to_job(self.start, job)
    }

    /// Travel cost between two jobs' locations.
    pub fn job_cost(&self, from_job: usize, to_job: usize) -> f64 {
        match self.job_nodes[from_job] {
            Some(from) => self.cost_to_job(from, to_job),
            None => f64::INFINITY,
        }
    }

    /// Physical hops between two node indices, as node ids.
    pub fn segment(&self, from: usize, to: usize) -> Vec<(NodeId, NodeId)> {
        self.costs
            .edges(from, to)
            .into_iter()
            .map(|(u, v)| (self.node_id(u), self.node_id(v)))
            .collect()
    }

    /// Stitch per-hop segments from the start through each job in `order`.
    pub fn stitch_path(&self, order: &[usize]) -> Vec<(NodeId, NodeId)> {
        let mut edges = Vec::new();
        let mut current = self.start;
        for &job in order {
            let Some(target) = self.job_nodes[job] else {
                continue;
            };
            edges.extend(self.segment(current, target));
            current = target;
        }
        edges
    }

    /// Package a finished sequence of dense job indices.
    pub fn route(
        &self,
        strategy: Strategy,
        order: &[usize],
        total_cost: f64,
        path_edges: Vec<(NodeId, NodeId)>,
    ) -> RouteResult {
        RouteResult {
            strategy: strategy.as_str().to_string(),
            start_node: self.start_node(),
            job_order: order.iter().map(|&j| self.job_id(j)).collect(),
            total_cost,
            path_edges,
        }
    }
}
