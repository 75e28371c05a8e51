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

//! Little's branch-and-bound solver for the asymmetric TSP.
//!
//! Every search node carries a reduced submatrix and the lower bound
//! accumulated on the way to it. Expanding a node reduces its matrix, picks
//! the zero arc with the highest opportunity cost and partitions the
//! remaining tours into those that use the arc (include) and those that do
//! not (exclude). Include children lose the arc's row and column; exclude
//! children keep their size and only forbid the one cell. Arcs that would
//! close a subtour are never included, which is decided by regrouping the
//! arcs fixed along the current path at every node.
//!
//! When an include child is down to a single cell the tour is complete: the
//! remaining cell is the only arc that closes it. That completion is priced
//! and the node returns without trying its exclude branch, since no other
//! Hamiltonian completion exists below it.
//!
//! Two drivers walk the tree in exactly the same order: native recursion
//! with a closure-scoped helper that fixes an arc for the duration of a
//! subtree, and an explicit frame stack that pushes the exclude frame below
//! the include frame. The explicit stack is the default. Both share the same
//! node expansion, so they produce the same tour and the same statistics.
//!
//! All per-run state (path assignment, groups, incumbent, statistics) lives
//! in a search session created for one `solve` call. The solver itself only
//! keeps the trail and the frame stack so their allocations can be reused.

use crate::{
    group::NodeGroups,
    monitor::{
        no_op::NoOperationMonitor,
        tree_search_monitor::{BranchKind, PruneReason, TreeSearchMonitor},
    },
    reduction::{reduce, select_branch_arc},
    stack::{Branch, SearchFrame, SearchNode, SearchStack},
    stats::BnbSolverStatistics,
    submatrix::Submatrix,
    trail::SearchTrail,
};
use salesman_model::{
    assignment::Assignment,
    error::MatrixError,
    index::Edge,
    matrix::{CostMatrix, MatrixValidator},
};
use salesman_search::{incumbent::Incumbent, result::SolverOutcome};

/// The smallest matrix the branch-and-bound solver accepts.
pub const MIN_NODES: usize = 2;

/// The outcome of a branch-and-bound run.
pub type BnbSolverOutcome = SolverOutcome<BnbSolverStatistics>;

/// How the search tree is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchStrategy {
    /// Native recursion, one stack frame per tree level.
    Recursive,
    /// An explicit heap-allocated frame stack.
    #[default]
    ExplicitStack,
}

impl std::fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchStrategy::Recursive => write!(f, "Recursive"),
            SearchStrategy::ExplicitStack => write!(f, "ExplicitStack"),
        }
    }
}

/// An exact solver for the asymmetric TSP based on Little's algorithm.
#[derive(Debug, Clone, Default)]
pub struct BnbSolver {
    strategy: SearchStrategy,
    trail: SearchTrail,
    stack: SearchStack,
}

impl BnbSolver {
    /// Creates a solver using the explicit stack driver.
    #[inline]
    pub fn new() -> Self {
        Self {
            strategy: SearchStrategy::default(),
            trail: SearchTrail::new(),
            stack: SearchStack::new(),
        }
    }

    /// Creates a solver with storage preallocated for `num_nodes` nodes.
    ///
    /// # Note
    ///
    /// The solver grows its storage on demand anyway. Preallocating only
    /// moves the allocations to construction time.
    #[inline]
    pub fn preallocated(num_nodes: usize) -> Self {
        Self {
            strategy: SearchStrategy::default(),
            trail: SearchTrail::preallocated(num_nodes),
            stack: SearchStack::preallocated(num_nodes),
        }
    }

    /// Sets the tree walking strategy.
    #[inline]
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns the configured strategy.
    #[inline]
    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Validates `rows` and solves the resulting matrix.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use salesman_bnb::{bnb::BnbSolver, monitor::no_op::NoOperationMonitor};
    /// # use salesman_model::cost::UNREACHABLE;
    /// const S: i64 = UNREACHABLE;
    /// let rows = [[S, 10, 15, 20], [5, S, 9, 10], [6, 13, S, 12], [8, 8, 9, S]];
    /// let outcome = BnbSolver::new()
    ///     .solve_rows(&rows, NoOperationMonitor::new())
    ///     .unwrap();
    /// assert_eq!(outcome.cost(), Some(35));
    /// ```
    pub fn solve_rows<R, S>(
        &mut self,
        rows: &[R],
        monitor: S,
    ) -> Result<BnbSolverOutcome, MatrixError>
    where
        R: AsRef<[i64]>,
        S: TreeSearchMonitor,
    {
        let matrix = MatrixValidator::new().min_size(MIN_NODES).build(rows)?;
        self.solve(&matrix, monitor)
    }

    /// Solves `matrix` to optimality.
    ///
    /// Fails with `MatrixError::InvalidSize` if the matrix has fewer than
    /// `MIN_NODES` nodes. A matrix without any tour is not an error; it is
    /// reported as `SolverResult::Infeasible`.
    pub fn solve<S>(
        &mut self,
        matrix: &CostMatrix,
        mut monitor: S,
    ) -> Result<BnbSolverOutcome, MatrixError>
    where
        S: TreeSearchMonitor,
    {
        if matrix.size() < MIN_NODES {
            return Err(MatrixError::InvalidSize {
                size: matrix.size(),
                min_size: MIN_NODES,
            });
        }

        let session = BnbSolverSearchSession::new(self, matrix, &mut monitor);
        let outcome = session.run();
        self.reset();
        Ok(outcome)
    }

    /// Clears the trail and the stack, keeping their capacity.
    #[inline]
    fn reset(&mut self) {
        self.trail.reset();
        self.stack.reset();
    }
}

/// The two children of an expanded node. Either may be absent.
struct Branches {
    edge: Edge,
    include: Option<SearchNode>,
    exclude: Option<SearchNode>,
}

/// A search session for the branch-and-bound solver.
/// This struct encapsulates the state and logic
/// of a single search run.
struct BnbSolverSearchSession<'a, S> {
    solver: &'a mut BnbSolver,
    matrix: &'a CostMatrix,
    monitor: &'a mut S,
    assignment: Assignment,
    groups: NodeGroups,
    incumbent: Incumbent,
    stats: BnbSolverStatistics,
    start_time: std::time::Instant,
}

impl<S> std::fmt::Debug for BnbSolverSearchSession<'_, S>
where
    S: TreeSearchMonitor,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("matrix", &self.matrix)
            .field("assignment", &self.assignment)
            .field("incumbent", &self.incumbent)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<S> std::fmt::Display for BnbSolverSearchSession<'_, S>
where
    S: TreeSearchMonitor,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchSession(strategy: {}, incumbent: {}, nodes_explored: {})",
            self.solver.strategy, self.incumbent, self.stats.nodes_explored
        )
    }
}

impl<'a, S> BnbSolverSearchSession<'a, S>
where
    S: TreeSearchMonitor,
{
    /// Create a new search session.
    #[inline]
    fn new(solver: &'a mut BnbSolver, matrix: &'a CostMatrix, monitor: &'a mut S) -> Self {
        let size = matrix.size();
        solver.trail.ensure_capacity(size);
        solver.stack.ensure_capacity(size);

        Self {
            solver,
            matrix,
            monitor,
            assignment: Assignment::new(size),
            groups: NodeGroups::new(size),
            incumbent: Incumbent::new(),
            stats: BnbSolverStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Run the search session to completion.
    fn run(mut self) -> BnbSolverOutcome {
        tracing::debug!(
            nodes = self.matrix.size(),
            strategy = %self.solver.strategy,
            monitor = self.monitor.name(),
            "starting branch-and-bound search"
        );
        self.monitor.on_enter_search(self.matrix, &self.stats);

        let root = SearchNode::root(self.matrix);
        match self.solver.strategy {
            SearchStrategy::Recursive => self.search_recursive(root, 0),
            SearchStrategy::ExplicitStack => self.search_with_stack(root),
        }

        debug_assert_eq!(
            self.assignment.num_assigned(),
            0,
            "branch-and-bound search left {} arcs fixed after completion",
            self.assignment.num_assigned()
        );

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);

        let Self {
            matrix,
            incumbent,
            stats,
            ..
        } = self;
        let result = incumbent.into_result(matrix);
        tracing::debug!(
            result = %result,
            nodes_explored = stats.nodes_explored,
            elapsed = ?stats.time_total,
            "branch-and-bound search finished"
        );

        SolverOutcome::new(result, stats)
    }

    /// Walks the tree with native recursion.
    fn search_recursive(&mut self, node: SearchNode, depth: u64) {
        let Some(Branches {
            edge,
            include,
            exclude,
        }) = self.expand(node, depth)
        else {
            return;
        };

        if let Some(child) = include {
            self.enter_branch(edge, BranchKind::Include);
            self.with_edge_fixed(edge, |session| session.search_recursive(child, depth + 1));
        }
        if let Some(child) = exclude {
            self.enter_branch(edge, BranchKind::Exclude);
            self.search_recursive(child, depth + 1);
        }
    }

    /// Fixes `edge` for the duration of `descend` and undoes it afterwards.
    #[inline]
    fn with_edge_fixed<F>(&mut self, edge: Edge, descend: F)
    where
        F: FnOnce(&mut Self),
    {
        let mark = self.solver.trail.mark();
        self.solver.trail.fix(&mut self.assignment, edge);
        descend(self);
        self.solver.trail.backtrack_to(mark, &mut self.assignment);
    }

    /// Walks the tree with the explicit frame stack.
    fn search_with_stack(&mut self, root: SearchNode) {
        self.solver.stack.push(SearchFrame::root(root));

        while let Some(frame) = self.solver.stack.pop() {
            let SearchFrame {
                node,
                trail_len,
                branch,
                depth,
            } = frame;

            self.solver
                .trail
                .backtrack_to(trail_len, &mut self.assignment);
            if let Some(branch) = branch {
                self.enter_branch(branch.edge, branch.kind);
                if let Some(edge) = branch.fixed_edge() {
                    self.solver.trail.fix(&mut self.assignment, edge);
                }
            }

            let Some(Branches {
                edge,
                include,
                exclude,
            }) = self.expand(node, depth)
            else {
                continue;
            };

            // Exclude goes below include so the include subtree is finished first.
            let mark = self.solver.trail.mark();
            if let Some(child) = exclude {
                let branch = Branch {
                    edge,
                    kind: BranchKind::Exclude,
                };
                self.solver
                    .stack
                    .push(SearchFrame::child(child, mark, branch, depth + 1));
            }
            if let Some(child) = include {
                let branch = Branch {
                    edge,
                    kind: BranchKind::Include,
                };
                self.solver
                    .stack
                    .push(SearchFrame::child(child, mark, branch, depth + 1));
            }
        }

        self.solver.trail.backtrack_to(0, &mut self.assignment);
    }

    #[inline]
    fn enter_branch(&mut self, edge: Edge, kind: BranchKind) {
        match kind {
            BranchKind::Include => self.stats.on_include_branch(),
            BranchKind::Exclude => self.stats.on_exclude_branch(),
        }
        self.monitor.on_branch(edge, kind, &self.stats);
    }

    #[inline]
    fn prune(&mut self, reason: PruneReason) {
        match reason {
            PruneReason::Infeasible => self.stats.on_pruning_infeasible(),
            PruneReason::BoundDominated => self.stats.on_pruning_bound(),
        }
        self.monitor.on_prune(reason, &self.stats);
    }

    /// Reduces `node`, picks its branch arc and builds its children.
    ///
    /// Returns `None` if the node is pruned or completes a tour.
    fn expand(&mut self, node: SearchNode, depth: u64) -> Option<Branches> {
        self.stats.on_node_explored();
        self.stats.on_depth_update(depth);
        self.monitor.on_step(depth, &self.stats);

        let SearchNode {
            mut matrix,
            lower_bound,
        } = node;

        debug_assert!(
            matrix.size() >= MIN_NODES,
            "called `BnbSolverSearchSession::expand` with a {}x{} submatrix",
            matrix.size(),
            matrix.size()
        );

        if !self.incumbent.improves(lower_bound) {
            self.prune(PruneReason::BoundDominated);
            return None;
        }

        let Some(reduction) = reduce(&mut matrix) else {
            self.prune(PruneReason::Infeasible);
            return None;
        };
        let lower_bound = lower_bound + reduction.amount;
        if depth == 0 {
            self.stats.set_root_lower_bound(lower_bound);
        }
        self.monitor
            .on_lower_bound_computed(lower_bound, &self.stats);

        if !self.incumbent.improves(lower_bound) {
            self.prune(PruneReason::BoundDominated);
            return None;
        }

        let Some(arc) = select_branch_arc(&matrix, &reduction.zero_arcs) else {
            self.prune(PruneReason::Infeasible);
            return None;
        };
        let edge = Edge::new(matrix.row_node(arc.row), matrix.col_node(arc.col));

        self.groups.rebuild(&self.assignment);

        let include = if self.groups.is_arc_selectable(&self.assignment, edge) {
            let child = matrix.without(arc.row, arc.col);
            if child.size() == 1 {
                self.complete_tour(edge, &child, lower_bound);
                return None;
            }
            Some(SearchNode::new(child, lower_bound))
        } else {
            None
        };

        let exclude = if self.groups.is_arc_skippable(edge) {
            matrix.disable(arc.row, arc.col);
            Some(SearchNode::new(matrix, lower_bound))
        } else {
            None
        };

        Some(Branches {
            edge,
            include,
            exclude,
        })
    }

    /// Prices the tour closed by `edge` and the single cell left in `leaf`.
    fn complete_tour(&mut self, edge: Edge, leaf: &Submatrix, lower_bound: i64) {
        debug_assert_eq!(
            leaf.size(),
            1,
            "called `BnbSolverSearchSession::complete_tour` with a {}x{} submatrix",
            leaf.size(),
            leaf.size()
        );

        let Some(last) = leaf.cell(0, 0).get() else {
            self.prune(PruneReason::Infeasible);
            return;
        };
        let cost = lower_bound + last;
        if !self.incumbent.improves(cost) {
            self.prune(PruneReason::BoundDominated);
            return;
        }

        let closing = Edge::new(leaf.row_node(0), leaf.col_node(0));
        let mark = self.solver.trail.mark();
        self.solver.trail.fix(&mut self.assignment, edge);
        self.solver.trail.fix(&mut self.assignment, closing);

        self.incumbent.try_install(cost, &self.assignment);
        self.stats.on_solution_found();
        tracing::trace!(cost, nodes_explored = self.stats.nodes_explored, "improving tour");
        self.monitor
            .on_solution_found(cost, &self.assignment, &self.stats);

        self.solver.trail.backtrack_to(mark, &mut self.assignment);
    }
}

/// Solves `rows` with a default solver and no monitoring.
#[inline]
pub fn solve<R>(rows: &[R]) -> Result<BnbSolverOutcome, MatrixError>
where
    R: AsRef<[i64]>,
{
    BnbSolver::new().solve_rows(rows, NoOperationMonitor::new())
}
