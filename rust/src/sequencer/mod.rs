//! Job sequencing over the road network.
//!
//! Two strategies share one validated [`RoutingProblem`]:
//! - `greedy`: nearest available job first, O(J^2) choices
//! - `optimal`: exact subset DP, exponential in J, for small job counts

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::config::RoutingConfig;
use crate::graph::{Graph, GraphError};
use crate::models::{JobId, NodeId, RouteResult, RoutingSnapshot};
use crate::precedence::PrecedenceGraph;

pub mod greedy;
pub mod optimal;
mod problem;

pub use problem::RoutingProblem;


/// Errors that abort a route computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("Cycle detected in job precedences")]
    CyclicPrecedence,
    #[error("No job has all prerequisites satisfied; remaining jobs: {remaining:?}")]
    NoAvailableJob { remaining: Vec<JobId> },
    #[error("Job {job} cannot be reached from node {from}")]
    UnreachableJob { job: JobId, from: NodeId },
    #[error("No precedence-respecting route visits every job")]
    InfeasibleRoute,
    #[error("Job {job} is located at unknown node {node}")]
    UnknownJobNode { job: JobId, node: NodeId },
    #[error("Optimal sequencing supports at most {limit} jobs, got {count}")]
    TooManyJobs { count: usize, limit: usize },
    #[error("Optimal sequencing exceeded its time budget of {budget_ms} ms")]
    DeadlineExceeded { budget_ms: u64 },
    #[error("Unknown routing strategy: {0}")]
    UnknownStrategy(String),
}

/// Which sequencer to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Greedy,
    Optimal,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greedy => "greedy",
            Self::Optimal => "optimal",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "greedy" => Ok(Self::Greedy),
            "optimal" => Ok(Self::Optimal),
            other => Err(RouteError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Run `strategy` on an already validated problem.
pub fn run(
    problem: &RoutingProblem<'_>,
    strategy: Strategy,
    config: &RoutingConfig,
) -> Result<RouteResult, RouteError> {
    match strategy {
        Strategy::Greedy => greedy::sequence(problem),
        Strategy::Optimal => optimal::sequence(problem, config),
    }
}

/// Build the graph, precedence graph and problem from a snapshot, then run
/// `strategy` starting at `start_node`.
pub fn compute_route(
    snapshot: &RoutingSnapshot,
    start_node: NodeId,
    strategy: Strategy,
    config: &RoutingConfig,
) -> Result<RouteResult, RouteError> {
    let graph = Graph::from_snapshot(snapshot)?;
    let precedence = PrecedenceGraph::from_snapshot(snapshot);
    let problem = RoutingProblem::new(
        &graph,
        &precedence,
        &snapshot.job_locations(),
        start_node,
        config,
    )?;
    run(&problem, strategy, config)
}

pub fn greedy_route(
    snapshot: &RoutingSnapshot,
    start_node: NodeId,
    config: &RoutingConfig,
) -> Result<RouteResult, RouteError> {
    compute_route(snapshot, start_node, Strategy::Greedy, config)
}

pub fn optimal_route(
    snapshot: &RoutingSnapshot,
    start_node: NodeId,
    config: &RoutingConfig,
) -> Result<RouteResult, RouteError> {
    compute_route(snapshot, start_node, Strategy::Optimal, config)
}
