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

#![allow(dead_code)]

//! Undo log for the path assignment.
//!
//! `SearchTrail` is the only way the branch-and-bound drivers mutate the
//! shared path assignment. Every fixed arc is recorded, and a driver undoes a
//! subtree by truncating the trail back to a mark taken before descending.
//!
//! Typical usage:
//! 1. take `mark()` before fixing anything for a child,
//! 2. call `fix(...)` for each arc the child adds,
//! 3. call `backtrack_to(mark, ...)` before a sibling is explored.

use salesman_model::{assignment::Assignment, index::Edge};

/// A linear log of fixed arcs.
#[derive(Debug, Clone, Default)]
pub struct SearchTrail {
    entries: Vec<Edge>,
}

impl SearchTrail {
    /// Creates a new, empty `SearchTrail`.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a trail with room for a full tour over `num_nodes` nodes.
    #[inline]
    pub fn preallocated(num_nodes: usize) -> Self {
        Self {
            entries: Vec::with_capacity(num_nodes),
        }
    }

    /// Ensures the trail can hold a full tour without reallocating.
    #[inline]
    pub fn ensure_capacity(&mut self, num_nodes: usize) {
        if self.entries.capacity() < num_nodes {
            self.entries.reserve(num_nodes - self.entries.len());
        }
    }

    /// Returns the number of fixed arcs, which is also the current mark.
    #[inline(always)]
    pub fn mark(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of fixed arcs.
    #[inline]
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is fixed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the fixed arcs in the order they were fixed.
    #[inline]
    pub fn entries(&self) -> &[Edge] {
        &self.entries
    }

    /// Fixes `edge` in `assignment` and records it.
    #[inline]
    pub fn fix(&mut self, assignment: &mut Assignment, edge: Edge) {
        assignment.assign(edge);
        self.entries.push(edge);
    }

    /// Undoes every arc fixed after `mark`, most recent first.
    #[inline]
    pub fn backtrack_to(&mut self, mark: usize, assignment: &mut Assignment) {
        debug_assert!(
            mark <= self.entries.len(),
            "called `SearchTrail::backtrack_to` with mark {} beyond the trail length {}",
            mark,
            self.entries.len()
        );

        while self.entries.len() > mark {
            if let Some(edge) = self.entries.pop() {
                let removed = assignment.unassign(edge.from);
                debug_assert_eq!(
                    removed,
                    Some(edge.to),
                    "called `SearchTrail::backtrack_to` with an assignment that diverged from the trail"
                );
            }
        }
    }

    /// Clears the trail, keeping its capacity.
    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
    }
}

impl std::fmt::Display for SearchTrail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchTrail(")?;
        for (i, edge) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", edge)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesman_model::index::NodeIndex;

    fn e(from: usize, to: usize) -> Edge {
        Edge::new(NodeIndex::new(from), NodeIndex::new(to))
    }

    #[test]
    fn test_backtrack_restores_assignment() {
        let mut assignment = Assignment::new(4);
        let mut trail = SearchTrail::preallocated(4);

        trail.fix(&mut assignment, e(0, 2));
        let mark = trail.mark();
        trail.fix(&mut assignment, e(2, 3));
        trail.fix(&mut assignment, e(3, 1));
        assert_eq!(assignment.num_assigned(), 3);
        assert_eq!(trail.depth(), 3);

        trail.backtrack_to(mark, &mut assignment);
        assert_eq!(assignment.num_assigned(), 1);
        assert_eq!(assignment.successor(NodeIndex::new(0)), Some(NodeIndex::new(2)));
        assert!(!assignment.has_successor(NodeIndex::new(2)));
        assert!(!assignment.has_predecessor(NodeIndex::new(1)));
        assert_eq!(trail.entries(), &[e(0, 2)]);

        trail.backtrack_to(0, &mut assignment);
        assert!(trail.is_empty());
        assert_eq!(assignment.num_assigned(), 0);
    }

    #[test]
    fn test_backtrack_to_current_mark_is_noop() {
        let mut assignment = Assignment::new(2);
        let mut trail = SearchTrail::new();
        trail.fix(&mut assignment, e(0, 1));
        trail.backtrack_to(trail.mark(), &mut assignment);
        assert_eq!(assignment.num_assigned(), 1);
    }

    #[test]
    fn test_display() {
        let mut assignment = Assignment::new(3);
        let mut trail = SearchTrail::new();
        trail.fix(&mut assignment, e(0, 1));
        trail.fix(&mut assignment, e(1, 2));
        assert_eq!(trail.to_string(), "SearchTrail(0 -> 1, 1 -> 2)");
    }
}
