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

//! # Incumbent (Best Solution Holder)
//!
//! The best complete tour discovered so far during one solver run, together
//! with its cost. The cost doubles as the upper bound used for pruning: a
//! subtree whose lower bound is not strictly below it cannot improve anything.
//!
//! `upper_bound` starts at `i64::MAX`, meaning "no incumbent yet". A candidate
//! is installed only if it is strictly cheaper, so among equal-cost tours the
//! first one found is kept.
//!
//! The incumbent stores the raw successor assignment rather than a `Tour`.
//! Turning it into a tour, and thereby re-pricing it against the original
//! matrix, happens once in `into_result`.

use crate::result::SolverResult;
use salesman_model::{assignment::Assignment, matrix::CostMatrix, tour::Tour};

/// The best assignment found so far and its cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incumbent {
    upper_bound: i64,
    assignment: Option<Assignment>,
}

impl Default for Incumbent {
    fn default() -> Self {
        Self::new()
    }
}

impl Incumbent {
    /// Creates an empty incumbent.
    #[inline]
    pub fn new() -> Self {
        Self {
            upper_bound: i64::MAX,
            assignment: None,
        }
    }

    /// Returns the cost of the incumbent, or `i64::MAX` if there is none.
    #[inline(always)]
    pub fn upper_bound(&self) -> i64 {
        self.upper_bound
    }

    /// Returns `true` if a tour of `cost` would replace the incumbent.
    #[inline(always)]
    pub fn improves(&self, cost: i64) -> bool {
        cost < self.upper_bound
    }

    /// Returns `true` if a tour has been installed.
    #[inline]
    pub fn has_solution(&self) -> bool {
        self.assignment.is_some()
    }

    /// Returns the installed assignment.
    #[inline]
    pub fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    /// Installs `assignment` if `cost` is strictly below the upper bound.
    ///
    /// Returns `true` if the candidate was installed.
    #[inline]
    pub fn try_install(&mut self, cost: i64, assignment: &Assignment) -> bool {
        if !self.improves(cost) {
            return false;
        }
        self.upper_bound = cost;
        match &mut self.assignment {
            Some(best) => best.clone_from(assignment),
            None => self.assignment = Some(assignment.clone()),
        }
        true
    }

    /// Reconstructs the incumbent into a tour over `matrix`.
    ///
    /// An empty incumbent, or one whose assignment does not form a single
    /// reachable cycle, yields `SolverResult::Infeasible`.
    pub fn into_result(self, matrix: &CostMatrix) -> SolverResult {
        let Some(assignment) = self.assignment else {
            return SolverResult::Infeasible;
        };

        match Tour::from_assignment(matrix, &assignment) {
            Ok(tour) => {
                debug_assert_eq!(
                    tour.cost(),
                    self.upper_bound,
                    "called `Incumbent::into_result` with an upper bound that does not match the tour cost"
                );
                SolverResult::Optimal(tour)
            }
            Err(err) => {
                tracing::warn!(error = %err, "incumbent does not form a feasible tour");
                SolverResult::Infeasible
            }
        }
    }
}

impl std::fmt::Display for Incumbent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.has_solution() {
            write!(f, "Incumbent(upper_bound: {})", self.upper_bound)
        } else {
            write!(f, "Incumbent(none)")
        }
    }
}
