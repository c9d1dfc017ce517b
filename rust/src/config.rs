//! Configuration for route computation.

use pyo3::prelude::*;

/// Hard upper bound on jobs the exact sequencer accepts regardless of config.
///
/// At 24 jobs the DP table already holds 2^24 * 24 entries.
pub const OPTIMAL_JOB_HARD_CAP: usize = 24;

/// Tunables shared by both sequencers.
#[pyclass]
#[derive(Clone, Debug)]
pub struct RoutingConfig {
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Largest job count the optimal sequencer will attempt.
    #[pyo3(get, set)]
    pub max_optimal_jobs: usize,
    /// Wall-clock budget for the optimal sequencer in milliseconds (None = unlimited).
    #[pyo3(get, set)]
    pub time_budget_ms: Option<u64>,
    /// Reject jobs whose location is not a graph node before any Dijkstra run.
    #[pyo3(get, set)]
    pub validate_job_nodes: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            max_optimal_jobs: 20,
            time_budget_ms: None,
            validate_job_nodes: true,
        }
    }
}

impl RoutingConfig {
    /// Job ceiling actually enforced: the configured value clamped to the hard cap.
    pub fn optimal_job_limit(&self) -> usize {
        self.max_optimal_jobs.min(OPTIMAL_JOB_HARD_CAP)
    }
}

#[pymethods]
impl RoutingConfig {
    #[new]
    #[pyo3(signature = (
        verbosity=None,
        max_optimal_jobs=None,
        time_budget_ms=None,
        validate_job_nodes=None
    ))]
    fn new(
        verbosity: Option<u8>,
        max_optimal_jobs: Option<usize>,
        time_budget_ms: Option<u64>,
        validate_job_nodes: Option<bool>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            max_optimal_jobs: max_optimal_jobs.unwrap_or(defaults.max_optimal_jobs),
            time_budget_ms,
            validate_job_nodes: validate_job_nodes.unwrap_or(defaults.validate_job_nodes),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "RoutingConfig(verbosity={}, max_optimal_jobs={}, time_budget_ms={:?}, validate_job_nodes={})",
            self.verbosity, self.max_optimal_jobs, self.time_budget_ms, self.validate_job_nodes
        )
    }
}
