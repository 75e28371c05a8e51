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

//! Explicit frame stack for the iterative driver.
//!
//! Each `SearchFrame` is a pending search node together with what the driver
//! has to do to the shared path state before expanding it: backtrack the
//! trail to `trail_len`, then fix the branch arc if the frame is an include
//! branch. Frames own their submatrix, so no two pending frames share one.
//!
//! The stack is LIFO. Pushing the exclude frame of a node before its include
//! frame makes the include subtree run to completion first, which is the
//! same order the recursive driver follows.

use crate::monitor::tree_search_monitor::BranchKind;
use crate::submatrix::Submatrix;
use salesman_model::{index::Edge, matrix::CostMatrix};

/// A node of the search tree that has not been expanded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNode {
    pub matrix: Submatrix,
    pub lower_bound: i64,
}

impl SearchNode {
    #[inline]
    pub fn new(matrix: Submatrix, lower_bound: i64) -> Self {
        Self {
            matrix,
            lower_bound,
        }
    }

    /// The root node: the full original matrix with a zero bound.
    #[inline]
    pub fn root(matrix: &CostMatrix) -> Self {
        Self::new(Submatrix::from_matrix(matrix), 0)
    }
}

/// The branch that led to a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Branch {
    pub edge: Edge,
    pub kind: BranchKind,
}

impl Branch {
    /// Returns the arc to fix before expanding, if this is an include branch.
    #[inline]
    pub fn fixed_edge(&self) -> Option<Edge> {
        match self.kind {
            BranchKind::Include => Some(self.edge),
            BranchKind::Exclude => None,
        }
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.kind, self.edge)
    }
}

/// A pending node with the trail mark and branch it was created under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFrame {
    pub node: SearchNode,
    pub trail_len: usize,
    pub branch: Option<Branch>,
    pub depth: u64,
}

impl SearchFrame {
    /// The frame of the root node.
    #[inline]
    pub fn root(node: SearchNode) -> Self {
        Self {
            node,
            trail_len: 0,
            branch: None,
            depth: 0,
        }
    }

    /// A child frame of a node expanded at `depth - 1`.
    #[inline]
    pub fn child(node: SearchNode, trail_len: usize, branch: Branch, depth: u64) -> Self {
        Self {
            node,
            trail_len,
            branch: Some(branch),
            depth,
        }
    }
}

/// A LIFO stack of pending search frames.
#[derive(Debug, Clone, Default)]
pub struct SearchStack {
    frames: Vec<SearchFrame>,
    max_len: usize,
}

impl SearchStack {
    /// Creates a new, empty `SearchStack`.
    #[inline]
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            max_len: 0,
        }
    }

    /// Creates a stack sized for a problem with `num_nodes` nodes.
    ///
    /// A node pushes at most two frames and the include chain is at most
    /// `num_nodes` deep, so `2 * num_nodes` frames cover the common case.
    #[inline]
    pub fn preallocated(num_nodes: usize) -> Self {
        Self {
            frames: Vec::with_capacity(num_nodes.saturating_mul(2)),
            max_len: 0,
        }
    }

    /// Ensures the stack has capacity for the given problem size.
    #[inline]
    pub fn ensure_capacity(&mut self, num_nodes: usize) {
        let capacity = num_nodes.saturating_mul(2);
        if self.frames.capacity() < capacity {
            self.frames.reserve(capacity - self.frames.len());
        }
    }

    /// Returns the number of pending frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if no frames are pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns the largest number of frames pending at once since the last reset.
    #[inline]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Pushes a frame.
    #[inline]
    pub fn push(&mut self, frame: SearchFrame) {
        self.frames.push(frame);
        self.max_len = self.max_len.max(self.frames.len());
    }

    /// Pops the most recently pushed frame.
    #[inline]
    pub fn pop(&mut self) -> Option<SearchFrame> {
        self.frames.pop()
    }

    /// Clears all frames, but keeps allocated capacity.
    #[inline]
    pub fn reset(&mut self) {
        self.frames.clear();
        self.max_len = 0;
    }
}

impl std::fmt::Display for SearchStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchStack(frames: {}, max_len: {})",
            self.frames.len(),
            self.max_len
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesman_model::{cost::UNREACHABLE, index::NodeIndex};

    const S: i64 = UNREACHABLE;

    fn node(lower_bound: i64) -> SearchNode {
        let matrix = CostMatrix::new(&[[S, 1], [1, S]]).unwrap();
        SearchNode::new(Submatrix::from_matrix(&matrix), lower_bound)
    }

    fn edge() -> Edge {
        Edge::new(NodeIndex::new(0), NodeIndex::new(1))
    }

    #[test]
    fn test_lifo_order_and_high_water_mark() {
        let mut stack = SearchStack::preallocated(2);
        stack.push(SearchFrame::root(node(0)));
        let root = stack.pop().unwrap();
        assert_eq!(root.depth, 0);
        assert!(root.branch.is_none());

        let exclude = Branch {
            edge: edge(),
            kind: BranchKind::Exclude,
        };
        let include = Branch {
            edge: edge(),
            kind: BranchKind::Include,
        };
        stack.push(SearchFrame::child(node(1), 0, exclude, 1));
        stack.push(SearchFrame::child(node(2), 0, include, 1));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.max_len(), 2);

        let first = stack.pop().unwrap();
        assert_eq!(first.node.lower_bound, 2);
        assert_eq!(first.branch.and_then(|b| b.fixed_edge()), Some(edge()));

        let second = stack.pop().unwrap();
        assert_eq!(second.branch.and_then(|b| b.fixed_edge()), None);
        assert!(stack.is_empty());
        assert_eq!(stack.max_len(), 2);

        stack.reset();
        assert_eq!(stack.max_len(), 0);
    }

    #[test]
    fn test_root_node_has_zero_bound() {
        let matrix = CostMatrix::new(&[[S, 3, 4], [5, S, 6], [7, 8, S]]).unwrap();
        let root = SearchNode::root(&matrix);
        assert_eq!(root.lower_bound, 0);
        assert_eq!(root.matrix.size(), 3);
    }
}
