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

//! Brute-force solver.
//!
//! Depth-first enumeration over partial tours rooted at node `0`. A node is
//! free exactly when it has no successor in the current assignment and is
//! not the node the path currently ends in, so the assignment doubles as the
//! visited set. A partial path is abandoned as soon as its cost reaches the
//! running best, and a full path is closed back to node `0` if that edge
//! exists.

use crate::stats::BruteForceStatistics;
use salesman_model::{
    assignment::Assignment,
    error::MatrixError,
    index::{Edge, NodeIndex},
    matrix::{CostMatrix, MatrixValidator},
};
use salesman_search::{incumbent::Incumbent, result::SolverOutcome};

/// The smallest matrix the brute-force solver accepts.
pub const MIN_NODES: usize = 1;

/// The outcome of a brute-force run.
pub type BruteForceOutcome = SolverOutcome<BruteForceStatistics>;

/// An exhaustive exact solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceSolver;

impl BruteForceSolver {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Validates `rows` and solves the resulting matrix.
    pub fn solve_rows<R>(&self, rows: &[R]) -> Result<BruteForceOutcome, MatrixError>
    where
        R: AsRef<[i64]>,
    {
        let matrix = MatrixValidator::new().min_size(MIN_NODES).build(rows)?;
        Ok(self.solve(&matrix))
    }

    /// Solves `matrix` to optimality.
    ///
    /// A single-node matrix has no edge to close the tour with and is
    /// reported as infeasible.
    pub fn solve(&self, matrix: &CostMatrix) -> BruteForceOutcome {
        BruteForceSearchSession::new(matrix).run()
    }
}

/// State of a single brute-force run.
struct BruteForceSearchSession<'a> {
    matrix: &'a CostMatrix,
    assignment: Assignment,
    incumbent: Incumbent,
    stats: BruteForceStatistics,
    start_time: std::time::Instant,
}

impl<'a> BruteForceSearchSession<'a> {
    #[inline]
    fn new(matrix: &'a CostMatrix) -> Self {
        Self {
            matrix,
            assignment: Assignment::new(matrix.size()),
            incumbent: Incumbent::new(),
            stats: BruteForceStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    fn run(mut self) -> BruteForceOutcome {
        tracing::debug!(nodes = self.matrix.size(), "starting brute-force search");

        self.search(NodeIndex::new(0), 0, 0);
        self.stats.set_time(self.start_time.elapsed());

        let Self {
            matrix,
            incumbent,
            stats,
            ..
        } = self;
        let result = incumbent.into_result(matrix);
        tracing::debug!(
            result = %result,
            nodes = stats.nodes,
            elapsed = ?stats.time,
            "brute-force search finished"
        );

        SolverOutcome::new(result, stats)
    }

    fn search(&mut self, from: NodeIndex, cost: i64, path_len: usize) {
        self.stats.on_node();
        if !self.incumbent.improves(cost) {
            self.stats.on_pruning();
            return;
        }

        let origin = NodeIndex::new(0);
        if path_len + 1 == self.matrix.size() {
            let Some(closing) = self.matrix.cost(from, origin).get() else {
                return;
            };
            let total = cost + closing;
            if self.incumbent.improves(total) {
                self.assignment.assign(Edge::new(from, origin));
                self.incumbent.try_install(total, &self.assignment);
                self.stats.on_solution_found();
                self.assignment.unassign(from);
            }
            return;
        }

        for to in self.matrix.nodes() {
            if to == from || self.assignment.has_successor(to) {
                continue;
            }
            let Some(step) = self.matrix.cost(from, to).get() else {
                continue;
            };

            self.assignment.assign(Edge::new(from, to));
            self.search(to, cost + step, path_len + 1);
            self.assignment.unassign(from);
        }
    }
}

/// Solves `rows` with the brute-force solver.
#[inline]
pub fn solve<R>(rows: &[R]) -> Result<BruteForceOutcome, MatrixError>
where
    R: AsRef<[i64]>,
{
    BruteForceSolver::new().solve_rows(rows)
}
