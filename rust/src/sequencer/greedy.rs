//! Nearest-available-job heuristic.

use crate::models::RouteResult;
use crate::{log_changes, log_checks};

use super::problem::RoutingProblem;
use super::{RouteError, Strategy};

/// Repeatedly travel to the cheapest job whose prerequisites are all done.
///
/// Ties go to the lowest job id. Fast, but not guaranteed optimal.
pub fn sequence(problem: &RoutingProblem<'_>) -> Result<RouteResult, RouteError> {
    let n = problem.job_count();
    let precedence = problem.precedence();
    let verbosity = problem.verbosity();

    let mut completed = vec![false; n];
    // Ascending job index, which is ascending job id.
    let mut remaining: Vec<usize> = (0..n).collect();
    let mut current = problem.start();
    let mut total_cost = 0.0;
    let mut order: Vec<usize> = Vec::with_capacity(n);
    let mut path_edges = Vec::new();

    while !remaining.is_empty() {
        let available: Vec<usize> = remaining
            .iter()
            .copied()
            .filter(|&j| precedence.prereqs(j).iter().all(|&p| completed[p]))
            .collect();

        let Some(&first) = available.first() else {
            return Err(RouteError::NoAvailableJob {
                remaining: remaining.iter().map(|&j| problem.job_id(j)).collect(),
            });
        };

        let mut best = first;
        let mut best_cost = problem.cost_to_job(current, first);
        for &job in &available {
            let cost = problem.cost_to_job(current, job);
            log_checks!(
                verbosity,
                "from node {}: job {} costs {}",
                problem.node_id(current),
                problem.job_id(job),
                cost
            );
            if cost < best_cost {
                best = job;
                best_cost = cost;
            }
        }

        if best_cost.is_infinite() {
            return Err(RouteError::UnreachableJob {
                job: problem.job_id(best),
                from: problem.node_id(current),
            });
        }

        // Finite cost implies a known location.
        let Some(target) = problem.job_node(best) else {
            return Err(RouteError::UnreachableJob {
                job: problem.job_id(best),
                from: problem.node_id(current),
            });
        };

        path_edges.extend(problem.segment(current, target));
        total_cost += best_cost;
        current = target;
        completed[best] = true;
        remaining.retain(|&j| j != best);
        order.push(best);

        log_changes!(
            verbosity,
            "greedy: job {} at node {} (+{}, total {})",
            problem.job_id(best),
            problem.node_id(target),
            best_cost,
            total_cost
        );
    }

    Ok(problem.route(Strategy::Greedy, &order, total_cost, path_edges))
}
