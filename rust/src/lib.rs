//! Routing engine for precedence-constrained jobs on a weighted road network.
//!
//! Given a snapshot of nodes, directed edges, jobs placed on nodes and
//! `before -> after` constraints between jobs, this crate computes shortest
//! paths, validates and linearizes the precedence DAG, and sequences the jobs
//! from a start node either greedily or exactly. The Python module exposes the
//! same operations to the web backend that owns storage and HTTP.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

mod config;
pub mod graph;
pub mod interner;
pub mod logging;
mod models;
pub mod path;
pub mod precedence;
pub mod sequencer;
pub mod shortest_path;

pub use config::{RoutingConfig, OPTIMAL_JOB_HARD_CAP};
pub use graph::{Graph, GraphError};
pub use models::{
    AdjacencyEntry, CostMatrix, Edge, Job, JobId, Node, NodeId, Precedence, RouteResult,
    RoutingSnapshot, ShortestPathResult, TopologicalResult,
};
pub use precedence::PrecedenceGraph;
pub use sequencer::{RouteError, RoutingProblem, Strategy};
pub use shortest_path::{dijkstra, relevant_cost_matrix, RelevantCosts, ShortestPaths};

fn value_error(err: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Shortest path between two nodes.
///
/// # Raises
/// * ValueError if the graph is empty or either node does not exist
#[pyfunction]
#[pyo3(name = "shortest_path")]
fn py_shortest_path(
    snapshot: RoutingSnapshot,
    start: NodeId,
    end: NodeId,
) -> PyResult<ShortestPathResult> {
    let graph = Graph::from_snapshot(&snapshot).map_err(value_error)?;
    shortest_path::shortest_path(&graph, start, end).map_err(value_error)
}

/// Travel cost between every pair of nodes (None where unreachable).
#[pyfunction]
#[pyo3(name = "cost_matrix")]
fn py_cost_matrix(snapshot: RoutingSnapshot) -> PyResult<CostMatrix> {
    let graph = Graph::from_snapshot(&snapshot).map_err(value_error)?;
    Ok(shortest_path::cost_matrix(&graph))
}

/// Outgoing edges per node, in ascending node id order.
#[pyfunction]
#[pyo3(name = "adjacency_list")]
fn py_adjacency_list(snapshot: RoutingSnapshot) -> PyResult<Vec<AdjacencyEntry>> {
    let graph = Graph::from_snapshot(&snapshot).map_err(value_error)?;
    Ok(graph.adjacency_list())
}

/// Deterministic topological order of the jobs.
///
/// A cycle is reported through `has_cycle`, not raised.
#[pyfunction]
#[pyo3(name = "topological_order")]
fn py_topological_order(snapshot: RoutingSnapshot) -> TopologicalResult {
    PrecedenceGraph::from_snapshot(&snapshot).topological_order()
}

/// Sequence the jobs with the requested strategy ("greedy" or "optimal").
///
/// # Raises
/// * ValueError for an unknown strategy, unknown start node, cyclic
///   precedences, unreachable jobs, or when the optimal sequencer exceeds its
///   job ceiling or time budget
#[pyfunction]
#[pyo3(name = "compute_route", signature = (snapshot, start_node=1, strategy="greedy", config=None))]
fn py_compute_route(
    snapshot: RoutingSnapshot,
    start_node: NodeId,
    strategy: &str,
    config: Option<RoutingConfig>,
) -> PyResult<RouteResult> {
    let strategy: Strategy = strategy.parse().map_err(value_error)?;
    let config = config.unwrap_or_default();
    sequencer::compute_route(&snapshot, start_node, strategy, &config).map_err(value_error)
}

/// Nearest-available-job route.
#[pyfunction]
#[pyo3(name = "greedy_route", signature = (snapshot, start_node=1, config=None))]
fn py_greedy_route(
    snapshot: RoutingSnapshot,
    start_node: NodeId,
    config: Option<RoutingConfig>,
) -> PyResult<RouteResult> {
    let config = config.unwrap_or_default();
    sequencer::greedy_route(&snapshot, start_node, &config).map_err(value_error)
}

/// Minimum-cost route by exhaustive subset search (small job counts only).
#[pyfunction]
#[pyo3(name = "optimal_route", signature = (snapshot, start_node=1, config=None))]
fn py_optimal_route(
    snapshot: RoutingSnapshot,
    start_node: NodeId,
    config: Option<RoutingConfig>,
) -> PyResult<RouteResult> {
    let config = config.unwrap_or_default();
    sequencer::optimal_route(&snapshot, start_node, &config).map_err(value_error)
}

/// The routeplan.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Input types
    m.add_class::<Node>()?;
    m.add_class::<Edge>()?;
    m.add_class::<Job>()?;
    m.add_class::<Precedence>()?;
    m.add_class::<RoutingSnapshot>()?;

    // Result types
    m.add_class::<ShortestPathResult>()?;
    m.add_class::<CostMatrix>()?;
    m.add_class::<AdjacencyEntry>()?;
    m.add_class::<TopologicalResult>()?;
    m.add_class::<RouteResult>()?;

    // Config types
    m.add_class::<RoutingConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_shortest_path, m)?)?;
    m.add_function(wrap_pyfunction!(py_cost_matrix, m)?)?;
    m.add_function(wrap_pyfunction!(py_adjacency_list, m)?)?;
    m.add_function(wrap_pyfunction!(py_topological_order, m)?)?;
    m.add_function(wrap_pyfunction!(py_compute_route, m)?)?;
    m.add_function(wrap_pyfunction!(py_greedy_route, m)?)?;
    m.add_function(wrap_pyfunction!(py_optimal_route, m)?)?;

    Ok(())
}
