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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait together with `PruneReason` and
//! `BranchKind` for observing branch-and-bound runs.
//!
//! Lifecycle highlights
//! - enter → step → lower bound / prune → branch → ... → solution → exit
//! - `BnbSolverStatistics` is provided to every callback for telemetry.
//!
//! Design notes
//! - Methods take `&mut self`; monitors are assumed single-threaded.
//! - Monitors observe only. There is no way to stop a run early.

use crate::stats::BnbSolverStatistics;
use salesman_model::{assignment::Assignment, index::Edge, matrix::CostMatrix};

/// Reasons for pruning a search node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PruneReason {
    /// Some row or column of the node has no reachable entry.
    Infeasible,
    /// The node's lower bound is not below the incumbent cost.
    BoundDominated,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::Infeasible => write!(f, "Infeasible"),
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
        }
    }
}

/// The two ways a node is partitioned on its branch arc.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BranchKind {
    /// The arc is part of every tour in the subtree.
    Include,
    /// The arc is part of no tour in the subtree.
    Exclude,
}

impl std::fmt::Display for BranchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BranchKind::Include => write!(f, "Include"),
            BranchKind::Exclude => write!(f, "Exclude"),
        }
    }
}

/// Trait for observing the search process of the solver.
pub trait TreeSearchMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when the search starts.
    fn on_enter_search(&mut self, matrix: &CostMatrix, statistics: &BnbSolverStatistics);
    /// Called when the search ends.
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics);
    /// Called when a node at `depth` is about to be expanded.
    fn on_step(&mut self, depth: u64, statistics: &BnbSolverStatistics);
    /// Called when a node has been reduced and its lower bound is known.
    fn on_lower_bound_computed(&mut self, lower_bound: i64, statistics: &BnbSolverStatistics);
    /// Called when a node is pruned.
    fn on_prune(&mut self, reason: PruneReason, statistics: &BnbSolverStatistics);
    /// Called when descending into a child on `edge`.
    fn on_branch(&mut self, edge: Edge, kind: BranchKind, statistics: &BnbSolverStatistics);
    /// Called when a strictly cheaper tour is installed.
    fn on_solution_found(
        &mut self,
        cost: i64,
        assignment: &Assignment,
        statistics: &BnbSolverStatistics,
    );
}

impl<M> TreeSearchMonitor for &mut M
where
    M: TreeSearchMonitor + ?Sized,
{
    #[inline(always)]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline(always)]
    fn on_enter_search(&mut self, matrix: &CostMatrix, statistics: &BnbSolverStatistics) {
        (**self).on_enter_search(matrix, statistics)
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics) {
        (**self).on_exit_search(statistics)
    }

    #[inline(always)]
    fn on_step(&mut self, depth: u64, statistics: &BnbSolverStatistics) {
        (**self).on_step(depth, statistics)
    }

    #[inline(always)]
    fn on_lower_bound_computed(&mut self, lower_bound: i64, statistics: &BnbSolverStatistics) {
        (**self).on_lower_bound_computed(lower_bound, statistics)
    }

    #[inline(always)]
    fn on_prune(&mut self, reason: PruneReason, statistics: &BnbSolverStatistics) {
        (**self).on_prune(reason, statistics)
    }

    #[inline(always)]
    fn on_branch(&mut self, edge: Edge, kind: BranchKind, statistics: &BnbSolverStatistics) {
        (**self).on_branch(edge, kind, statistics)
    }

    #[inline(always)]
    fn on_solution_found(
        &mut self,
        cost: i64,
        assignment: &Assignment,
        statistics: &BnbSolverStatistics,
    ) {
        (**self).on_solution_found(cost, assignment, statistics)
    }
}

impl std::fmt::Debug for dyn TreeSearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn TreeSearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}
