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

//! Monitoring combinators for tree search
//!
//! Provides `CompositeTreeSearchMonitor`, a fan-out monitor that forwards every
//! event to its children. This lets you mix logging, metrics and recording
//! without coupling them to the solver.
//!
//! Events are dispatched to child monitors in insertion order.

use crate::{
    monitor::tree_search_monitor::{BranchKind, PruneReason, TreeSearchMonitor},
    stats::BnbSolverStatistics,
};
use salesman_model::{assignment::Assignment, index::Edge, matrix::CostMatrix};

/// A tree search monitor that aggregates multiple monitors and forwards events to all of them.
#[derive(Default)]
pub struct CompositeTreeSearchMonitor<'a> {
    monitors: Vec<Box<dyn TreeSearchMonitor + 'a>>,
}

impl<'a> CompositeTreeSearchMonitor<'a> {
    /// Creates a new empty `CompositeTreeSearchMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeTreeSearchMonitor` with the specified capacity.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: TreeSearchMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn TreeSearchMonitor + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns a slice of the monitors contained in the composite monitor.
    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn TreeSearchMonitor + 'a>] {
        &self.monitors
    }

    /// Returns the number of monitors contained in the composite monitor.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if the composite monitor contains no monitors.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a> FromIterator<Box<dyn TreeSearchMonitor + 'a>> for CompositeTreeSearchMonitor<'a> {
    #[inline(always)]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn TreeSearchMonitor + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Debug for CompositeTreeSearchMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.monitors.iter().map(|m| m.name()))
            .finish()
    }
}

impl TreeSearchMonitor for CompositeTreeSearchMonitor<'_> {
    #[inline(always)]
    fn name(&self) -> &str {
        "CompositeTreeSearchMonitor"
    }

    #[inline(always)]
    fn on_enter_search(&mut self, matrix: &CostMatrix, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(matrix, statistics);
        }
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    #[inline(always)]
    fn on_step(&mut self, depth: u64, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_step(depth, statistics);
        }
    }

    #[inline(always)]
    fn on_lower_bound_computed(&mut self, lower_bound: i64, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_lower_bound_computed(lower_bound, statistics);
        }
    }

    #[inline(always)]
    fn on_prune(&mut self, reason: PruneReason, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_prune(reason, statistics);
        }
    }

    #[inline(always)]
    fn on_branch(&mut self, edge: Edge, kind: BranchKind, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_branch(edge, kind, statistics);
        }
    }

    #[inline(always)]
    fn on_solution_found(
        &mut self,
        cost: i64,
        assignment: &Assignment,
        statistics: &BnbSolverStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(cost, assignment, statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::no_op::NoOperationMonitor;
    use salesman_model::index::NodeIndex;

    #[derive(Default)]
    struct Counter {
        steps: usize,
        prunes: usize,
        branches: usize,
    }

    impl TreeSearchMonitor for Counter {
        fn name(&self) -> &str {
            "Counter"
        }
        fn on_enter_search(&mut self, _: &CostMatrix, _: &BnbSolverStatistics) {}
        fn on_exit_search(&mut self, _: &BnbSolverStatistics) {}
        fn on_step(&mut self, _: u64, _: &BnbSolverStatistics) {
            self.steps += 1;
        }
        fn on_lower_bound_computed(&mut self, _: i64, _: &BnbSolverStatistics) {}
        fn on_prune(&mut self, _: PruneReason, _: &BnbSolverStatistics) {
            self.prunes += 1;
        }
        fn on_branch(&mut self, _: Edge, _: BranchKind, _: &BnbSolverStatistics) {
            self.branches += 1;
        }
        fn on_solution_found(&mut self, _: i64, _: &Assignment, _: &BnbSolverStatistics) {}
    }

    #[test]
    fn test_forwards_to_every_child() {
        let mut first = Counter::default();
        let mut second = Counter::default();
        {
            let mut composite = CompositeTreeSearchMonitor::with_capacity(3);
            composite.add_monitor(&mut first);
            composite.add_monitor(&mut second);
            composite.add_monitor(NoOperationMonitor::new());
            assert_eq!(composite.len(), 3);

            let stats = BnbSolverStatistics::default();
            let edge = Edge::new(NodeIndex::new(0), NodeIndex::new(1));
            composite.on_step(0, &stats);
            composite.on_step(1, &stats);
            composite.on_prune(PruneReason::BoundDominated, &stats);
            composite.on_branch(edge, BranchKind::Include, &stats);
        }

        assert_eq!((first.steps, first.prunes, first.branches), (2, 1, 1));
        assert_eq!((second.steps, second.prunes, second.branches), (2, 1, 1));
    }

    #[test]
    fn test_debug_lists_children() {
        let composite: CompositeTreeSearchMonitor<'_> =
            vec![Box::new(NoOperationMonitor::new()) as Box<dyn TreeSearchMonitor>]
                .into_iter()
                .collect();
        assert_eq!(format!("{:?}", composite), "[\"NoOperationMonitor\"]");
        assert!(!composite.is_empty());
    }
}
