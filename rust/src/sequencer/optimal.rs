//! Exact sequencing by dynamic programming over job subsets.
//!
//! State `(mask, last)` holds the cheapest way to have completed exactly the
//! jobs in `mask`, finishing at job `last`. Time is O(2^J * J^2) and memory
//! O(2^J * J), so the job count is capped by [`RoutingConfig::optimal_job_limit`]
//! and an optional wall-clock budget is enforced while sweeping masks.

use std::time::{Duration, Instant};

use crate::config::RoutingConfig;
use crate::models::RouteResult;
use crate::{log_changes, log_debug};

use super::problem::RoutingProblem;
use super::{RouteError, Strategy};

/// Parent marker for base states (a single job reached from the start).
const NO_PARENT: u8 = u8::MAX;

/// How many masks to process between deadline checks.
const DEADLINE_CHECK_INTERVAL: usize = 1024;

/// Dense `dp[mask][last]` table plus parent pointers.
///
/// The parent of `(mask, k)` is always `(mask ^ (1 << k), parent[mask][k])`,
/// so only the previous job index is stored.
struct SubsetTable {
    jobs: usize,
    cost: Vec<f64>,
    parent: Vec<u8>,
}

impl SubsetTable {
    fn new(jobs: usize) -> Self {
        let states = (1usize << jobs) * jobs;
        Self {
            jobs,
            cost: vec![f64::INFINITY; states],
            parent: vec![NO_PARENT; states],
        }
    }

    #[inline]
    fn slot(&self, mask: usize, last: usize) -> usize {
        mask * self.jobs + last
    }

    #[inline]
    fn get(&self, mask: usize, last: usize) -> f64 {
        self.cost[self.slot(mask, last)]
    }

    /// Job order ending at `(mask, last)`, oldest first.
    fn backtrack(&self, mut mask: usize, mut last: usize) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.jobs);
        loop {
            order.push(last);
            let parent = self.parent[self.slot(mask, last)];
            if parent == NO_PARENT {
                break;
            }
            mask ^= 1 << last;
            last = parent as usize;
        }
        order.reverse();
        order
    }
}

pub fn sequence(
    problem: &RoutingProblem<'_>,
    config: &RoutingConfig,
) -> Result<RouteResult, RouteError> {
    let n = problem.job_count();
    let limit = config.optimal_job_limit();
    if n > limit {
        return Err(RouteError::TooManyJobs { count: n, limit });
    }
    if n == 0 {
        return Ok(problem.route(Strategy::Optimal, &[], 0.0, Vec::new()));
    }

    let verbosity = problem.verbosity();
    let precedence = problem.precedence();

    let start_to_job: Vec<f64> = (0..n).map(|j| problem.start_cost(j)).collect();
    let mut job_to_job = vec![f64::INFINITY; n * n];
    for i in 0..n {
        for j in 0..n {
            job_to_job[i * n + j] = problem.job_cost(i, j);
        }
    }
    let prereq_masks: Vec<usize> = (0..n)
        .map(|j| {
            precedence
                .prereqs(j)
                .iter()
                .fold(0usize, |mask, &p| mask | (1 << p))
        })
        .collect();

    let mut table = SubsetTable::new(n);
    for (idx, &cost) in start_to_job.iter().enumerate() {
        if prereq_masks[idx] != 0 || cost.is_infinite() {
            continue;
        }
        let slot = table.slot(1 << idx, idx);
        table.cost[slot] = cost;
    }

    let started = Instant::now();
    let budget = config.time_budget_ms.map(Duration::from_millis);
    let size = 1usize << n;

    for mask in 1..size {
        if let Some(budget) = budget {
            if (mask - 1) % DEADLINE_CHECK_INTERVAL == 0 && started.elapsed() >= budget {
                return Err(RouteError::DeadlineExceeded {
                    budget_ms: config.time_budget_ms.unwrap_or_default(),
                });
            }
        }

        for last in 0..n {
            if mask & (1 << last) == 0 {
                continue;
            }
            let current = table.get(mask, last);
            if current.is_infinite() {
                continue;
            }

            for k in 0..n {
                let bit = 1 << k;
                if mask & bit != 0 || prereq_masks[k] & !mask != 0 {
                    continue;
                }
                let new_cost = current + job_to_job[last * n + k];
                if new_cost.is_infinite() {
                    continue;
                }
                let slot = table.slot(mask | bit, k);
                if new_cost < table.cost[slot] {
                    table.cost[slot] = new_cost;
                    table.parent[slot] = last as u8;
                }
            }
        }
    }

    let full = size - 1;
    let mut best: Option<(usize, f64)> = None;
    for last in 0..n {
        let cost = table.get(full, last);
        if cost.is_finite() && best.map_or(true, |(_, b)| cost < b) {
            best = Some((last, cost));
        }
    }
    let Some((best_last, best_cost)) = best else {
        return Err(RouteError::InfeasibleRoute);
    };

    log_debug!(
        verbosity,
        "optimal: swept {} masks x {} jobs in {:?}",
        size,
        n,
        started.elapsed()
    );

    let order = table.backtrack(full, best_last);
    let path_edges = problem.stitch_path(&order);

    log_changes!(
        verbosity,
        "optimal: order {:?} total {}",
        order.iter().map(|&j| problem.job_id(j)).collect::<Vec<_>>(),
        best_cost
    );

    Ok(problem.route(Strategy::Optimal, &order, best_cost, path_edges))
}
