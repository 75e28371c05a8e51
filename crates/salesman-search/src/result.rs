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

//! Solver outcomes.

use salesman_model::tour::Tour;

/// The answer a solver gives for a well-formed matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult {
    /// An optimal tour was found and proven.
    Optimal(Tour),
    /// No Hamiltonian cycle exists over the reachable edges.
    Infeasible,
}

impl SolverResult {
    /// Returns the optimal tour, if any.
    #[inline]
    pub fn tour(&self) -> Option<&Tour> {
        match self {
            SolverResult::Optimal(tour) => Some(tour),
            SolverResult::Infeasible => None,
        }
    }

    /// Returns the status corresponding to this result.
    #[inline]
    pub fn status(&self) -> TourStatus {
        match self {
            SolverResult::Optimal(_) => TourStatus::Success,
            SolverResult::Infeasible => TourStatus::Failure,
        }
    }
}

impl std::fmt::Display for SolverResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Optimal(tour) => write!(f, "Optimal(cost={})", tour.cost()),
            SolverResult::Infeasible => write!(f, "Infeasible"),
        }
    }
}

/// Flat success/failure status with a numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TourStatus {
    Success,
    Failure,
}

impl TourStatus {
    /// Returns `0` for success and `-1` for failure.
    #[inline]
    pub const fn code(self) -> i32 {
        match self {
            TourStatus::Success => 0,
            TourStatus::Failure => -1,
        }
    }

    #[inline]
    pub const fn is_success(self) -> bool {
        matches!(self, TourStatus::Success)
    }
}

impl std::fmt::Display for TourStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TourStatus::Success => write!(f, "Success"),
            TourStatus::Failure => write!(f, "Failure"),
        }
    }
}

/// A result together with the statistics of the run that produced it.
///
/// `S` is the solver specific statistics type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverOutcome<S> {
    pub result: SolverResult,
    pub statistics: S,
}

impl<S> SolverOutcome<S> {
    #[inline]
    pub fn new(result: SolverResult, statistics: S) -> Self {
        Self { result, statistics }
    }

    #[inline]
    pub fn result(&self) -> &SolverResult {
        &self.result
    }

    #[inline]
    pub fn statistics(&self) -> &S {
        &self.statistics
    }

    #[inline]
    pub fn status(&self) -> TourStatus {
        self.result.status()
    }

    /// Returns the optimal cost, or `None` if the instance is infeasible.
    #[inline]
    pub fn cost(&self) -> Option<i64> {
        self.result.tour().map(Tour::cost)
    }

    /// Returns the optimal cycle as plain indices, starting and ending at `0`.
    #[inline]
    pub fn cycle(&self) -> Option<Vec<usize>> {
        self.result.tour().map(Tour::to_indices)
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self.result, SolverResult::Infeasible)
    }

    #[inline]
    pub fn into_result(self) -> SolverResult {
        self.result
    }
}

impl<S> std::fmt::Display for SolverOutcome<S>
where
    S: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result: {}", self.result)?;
        if let Some(tour) = self.result.tour() {
            writeln!(f, "Tour: {}", tour)?;
        }
        write!(f, "{}", self.statistics)
    }
}
