//! Job precedence graph: cycle detection and deterministic topological order.

use rustc_hash::FxHashSet;
use std::collections::VecDeque;

use crate::interner::IdIndex;
use crate::models::{JobId, RoutingSnapshot, TopologicalResult};

/// Precedence DAG over dense job indices (ascending job id order).
#[derive(Debug, Clone)]
pub struct PrecedenceGraph {
    index: IdIndex,
    /// `successors[j]`: jobs that must wait for `j`, ascending.
    successors: Vec<Vec<usize>>,
    prereqs: Vec<FxHashSet<usize>>,
    succs: Vec<FxHashSet<usize>>,
}

impl PrecedenceGraph {
    /// Build from job ids and `(before, after)` pairs.
    ///
    /// Pairs naming a job outside `jobs` are dropped. Repeated pairs count once.
    pub fn new(jobs: &[JobId], precedences: &[(JobId, JobId)]) -> Self {
        let index = IdIndex::from_ids(jobs.iter().copied());
        let n = index.len();

        let mut prereqs: Vec<FxHashSet<usize>> = vec![FxHashSet::default(); n];
        let mut succs: Vec<FxHashSet<usize>> = vec![FxHashSet::default(); n];
        for &(before, after) in precedences {
            let (Some(b), Some(a)) = (index.get(before), index.get(after)) else {
                continue;
            };
            prereqs[a].insert(b);
            succs[b].insert(a);
        }

        let successors = succs
            .iter()
            .map(|set| {
                let mut list: Vec<usize> = set.iter().copied().collect();
                list.sort_unstable();
                list
            })
            .collect();

        Self {
            index,
            successors,
            prereqs,
            succs,
        }
    }

    pub fn from_snapshot(snapshot: &RoutingSnapshot) -> Self {
        Self::new(&snapshot.job_ids(), &snapshot.precedence_pairs())
    }

    pub fn job_count(&self) -> usize {
        self.index.len()
    }

    /// Job ids in ascending order; position equals dense index.
    pub fn job_ids(&self) -> &[JobId] {
        self.index.ids()
    }

    #[inline]
    pub fn index_of(&self, job: JobId) -> Option<usize> {
        self.index.get(job)
    }

    #[inline]
    pub fn job_id(&self, idx: usize) -> JobId {
        self.index.id(idx)
    }

    /// Jobs that must be completed before `idx`.
    pub fn prereqs(&self, idx: usize) -> &FxHashSet<usize> {
        &self.prereqs[idx]
    }

    /// Jobs waiting on `idx`.
    pub fn succs(&self, idx: usize) -> &FxHashSet<usize> {
        &self.succs[idx]
    }

    /// Topological order of dense indices by Kahn's algorithm, or `None` on a cycle.
    ///
    /// The queue is seeded with every in-degree-0 job in ascending order, and
    /// jobs released by the same dequeue are appended in ascending order.
    pub fn topological_indices(&self) -> Option<Vec<usize>> {
        let n = self.job_count();
        let mut in_degree: Vec<usize> = self.prereqs.iter().map(FxHashSet::len).collect();

        let mut queue: VecDeque<usize> = (0..n).filter(|&j| in_degree[j] == 0).collect();
        let mut order = Vec::with_capacity(n);

        while let Some(job) = queue.pop_front() {
            order.push(job);
            // successors[job] is sorted, so released jobs enter in ascending order.
            for &next in &self.successors[job] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    queue.push_back(next);
                }
            }
        }

        (order.len() == n).then_some(order)
    }

    pub fn has_cycle(&self) -> bool {
        self.topological_indices().is_none()
    }

    /// Topological order in job ids. Never a partial order: a cycle yields
    /// `has_cycle = true` with an empty order.
    pub fn topological_order(&self) -> TopologicalResult {
        match self.topological_indices() {
            Some(order) => TopologicalResult {
                has_cycle: false,
                order: order.into_iter().map(|idx| self.job_id(idx)).collect(),
            },
            None => TopologicalResult {
                has_cycle: true,
                order: Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_chain_order() {
        let graph = PrecedenceGraph::new(&[3, 1, 2], &[(1, 2), (2, 3)]);
        let result = graph.topological_order();

        assert!(!result.has_cycle);
        assert_eq!(result.order, vec![1, 2, 3]);
    }

    #[test]
    fn test_independent_jobs_ascending() {
        let graph = PrecedenceGraph::new(&[5, 3, 9, 1], &[]);
        assert_eq!(graph.topological_order().order, vec![1, 3, 5, 9]);
    }

    #[test]
    fn test_released_jobs_follow_queue_then_ascending() {
        // 1 -> {4, 2}; 3 is free. Queue starts [1, 3]; popping 1 releases 2 then 4.
        let graph = PrecedenceGraph::new(&[1, 2, 3, 4], &[(1, 4), (1, 2)]);
        assert_eq!(graph.topological_order().order, vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_two_cycle_scenario_c() {
        let graph = PrecedenceGraph::new(&[1, 2], &[(1, 2), (2, 1)]);
        let result = graph.topological_order();

        assert!(result.has_cycle);
        assert!(result.order.is_empty());
    }

    #[test]
    fn test_self_loop_is_cycle() {
        let graph = PrecedenceGraph::new(&[1, 2], &[(2, 2)]);
        assert!(graph.has_cycle());
    }

    #[test]
    fn test_cycle_downstream_of_valid_prefix() {
        // 1 is schedulable but 2 <-> 3 cycle; must not return [1].
        let graph = PrecedenceGraph::new(&[1, 2, 3], &[(1, 2), (2, 3), (3, 2)]);
        assert_eq!(
            graph.topological_order(),
            TopologicalResult {
                has_cycle: true,
                order: vec![]
            }
        );
    }

    #[test]
    fn test_unknown_jobs_dropped() {
        let graph = PrecedenceGraph::new(&[1, 2], &[(1, 99), (99, 2), (2, 1)]);
        let one = graph.index_of(1).unwrap();
        let two = graph.index_of(2).unwrap();

        assert!(graph.prereqs(two).is_empty());
        assert!(graph.prereqs(one).contains(&two));
        assert!(graph.succs(two).contains(&one));
        assert_eq!(graph.topological_order().order, vec![2, 1]);
    }

    #[test]
    fn test_duplicate_pairs_count_once() {
        let graph = PrecedenceGraph::new(&[1, 2], &[(1, 2), (1, 2)]);
        assert_eq!(graph.topological_order().order, vec![1, 2]);
        assert_eq!(graph.prereqs(1).len(), 1);
    }

    #[test]
    fn test_empty_job_set() {
        let graph = PrecedenceGraph::new(&[], &[]);
        let result = graph.topological_order();
        assert!(!result.has_cycle);
        assert!(result.order.is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        // Pairs oriented low -> high can never form a cycle.
        #[test]
        fn prop_forward_pairs_respected(
            n in 1i64..12,
            raw in prop::collection::vec((0i64..12, 0i64..12), 0..30)
        ) {
            let jobs: Vec<JobId> = (0..n).collect();
            let pairs: Vec<(JobId, JobId)> = raw
                .into_iter()
                .filter(|(a, b)| a < b && *b < n)
                .collect();
            let result = PrecedenceGraph::new(&jobs, &pairs).topological_order();

            prop_assert!(!result.has_cycle);
            prop_assert_eq!(result.order.len(), jobs.len());
            let position = |job: JobId| result.order.iter().position(|&j| j == job);
            for (before, after) in pairs {
                prop_assert!(position(before) < position(after));
            }
        }

        #[test]
        fn prop_back_edge_closes_cycle(n in 2i64..12) {
            let jobs: Vec<JobId> = (0..n).collect();
            let mut pairs: Vec<(JobId, JobId)> = (0..n - 1).map(|j| (j, j + 1)).collect();
            pairs.push((n - 1, 0));
            let result = PrecedenceGraph::new(&jobs, &pairs).topological_order();

            prop_assert!(result.has_cycle);
            prop_assert!(result.order.is_empty());
        }
    }
}
