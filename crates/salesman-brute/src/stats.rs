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

use std::time::Duration;

/// Statistics collected during one brute-force run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BruteForceStatistics {
    /// Partial paths visited.
    pub nodes: u64,
    /// Partial paths cut off by the running best.
    pub prunings: u64,
    /// Improving tours found.
    pub solutions: u64,
    /// Total time spent in the solver.
    pub time: Duration,
}

impl BruteForceStatistics {
    #[inline]
    pub fn on_node(&mut self) {
        self.nodes = self.nodes.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning(&mut self) {
        self.prunings = self.prunings.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions = self.solutions.saturating_add(1);
    }

    #[inline]
    pub fn set_time(&mut self, duration: Duration) {
        self.time = duration;
    }
}

impl std::fmt::Display for BruteForceStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Salesman-Brute Solver Statistics:")?;
        writeln!(f, "  Nodes:                {}", self.nodes)?;
        writeln!(f, "  Prunings:             {}", self.prunings)?;
        writeln!(f, "  Solutions found:      {}", self.solutions)?;
        writeln!(f, "  Total time:           {:.2?}", self.time)?;
        Ok(())
    }
}
