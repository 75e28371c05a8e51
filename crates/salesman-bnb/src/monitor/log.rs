// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::{
    monitor::tree_search_monitor::{BranchKind, PruneReason, TreeSearchMonitor},
    stats::BnbSolverStatistics,
};
use salesman_model::{assignment::Assignment, index::Edge, matrix::CostMatrix};
use std::time::{Duration, Instant};

/// Reports search progress through `tracing` at `info` level.
///
/// A progress line is emitted at most once per `log_interval`. The clock is
/// only consulted when the explored node count has all bits of
/// `clock_check_mask` cleared, so with the default mask of `4095` it is read
/// once every 4096 nodes.
#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_cost: Option<i64>,
    last_lower_bound: i64,
    depth: u64,
}

impl LogTreeSearchMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_cost: None,
            last_lower_bound: 0,
            depth: 0,
        }
    }

    /// Returns the cheapest cost reported so far.
    #[inline]
    pub fn best_cost(&self) -> Option<i64> {
        self.best_cost
    }

    #[inline(always)]
    fn should_log(&self, statistics: &BnbSolverStatistics) -> bool {
        (statistics.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
    }

    fn log_line(&mut self, statistics: &BnbSolverStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time);

        tracing::info!(
            elapsed = ?elapsed,
            nodes = statistics.nodes_explored,
            depth = self.depth,
            best = ?self.best_cost,
            lower_bound = self.last_lower_bound,
            pruned_bound = statistics.prunings_bound,
            pruned_infeasible = statistics.prunings_infeasible,
            "branch-and-bound progress"
        );

        self.last_log_time = now;
    }
}

impl Default for LogTreeSearchMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl std::fmt::Display for LogTreeSearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl TreeSearchMonitor for LogTreeSearchMonitor {
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, matrix: &CostMatrix, _statistics: &BnbSolverStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_cost = None;
        self.last_lower_bound = 0;
        self.depth = 0;
        tracing::info!(
            nodes = matrix.size(),
            edges = matrix.num_edges(),
            "branch-and-bound search started"
        );
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics) {
        tracing::info!(
            elapsed = ?statistics.time_total,
            nodes = statistics.nodes_explored,
            max_depth = statistics.max_depth,
            solutions = statistics.solutions_found,
            best = ?self.best_cost,
            "branch-and-bound search finished"
        );
    }

    fn on_step(&mut self, depth: u64, statistics: &BnbSolverStatistics) {
        self.depth = depth;
        if self.should_log(statistics) {
            self.log_line(statistics);
        }
    }

    fn on_lower_bound_computed(&mut self, lower_bound: i64, _statistics: &BnbSolverStatistics) {
        self.last_lower_bound = lower_bound;
    }

    fn on_prune(&mut self, _reason: PruneReason, _statistics: &BnbSolverStatistics) {}

    fn on_branch(&mut self, _edge: Edge, _kind: BranchKind, _statistics: &BnbSolverStatistics) {}

    fn on_solution_found(
        &mut self,
        cost: i64,
        _assignment: &Assignment,
        statistics: &BnbSolverStatistics,
    ) {
        self.best_cost = Some(cost);
        tracing::info!(
            cost,
            nodes = statistics.nodes_explored,
            depth = self.depth,
            "improving tour found"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_best_cost() {
        let mut monitor = LogTreeSearchMonitor::default();
        let stats = BnbSolverStatistics::default();
        assert_eq!(monitor.best_cost(), None);

        monitor.on_solution_found(40, &Assignment::new(2), &stats);
        monitor.on_solution_found(35, &Assignment::new(2), &stats);
        assert_eq!(monitor.best_cost(), Some(35));
    }

    #[test]
    fn test_clock_is_checked_only_on_mask_boundaries() {
        let monitor = LogTreeSearchMonitor::new(Duration::ZERO, 3);
        let mut stats = BnbSolverStatistics::default();

        stats.nodes_explored = 4;
        assert!(monitor.should_log(&stats));
        stats.nodes_explored = 5;
        assert!(!monitor.should_log(&stats));
    }

    #[test]
    fn test_display() {
        let monitor = LogTreeSearchMonitor::default();
        assert_eq!(
            monitor.to_string(),
            "LogTreeSearchMonitor(log_interval: 1s, clock_check_mask: 4095)"
        );
    }
}
