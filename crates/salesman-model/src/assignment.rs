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

//! Successor assignments.
//!
//! An `Assignment` maps every node to the node visited next. During search it
//! holds the partial tour fixed along the current path; once complete it is
//! the tour itself. The inverse map is kept alongside, and asking whether
//! a node already has a predecessor does not require a scan.

use crate::index::{Edge, NodeIndex};

/// A partial or complete successor map over `n` nodes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Assignment {
    successors: Vec<Option<NodeIndex>>,
    predecessors: Vec<Option<NodeIndex>>,
    num_assigned: usize,
}

impl Assignment {
    /// Creates an assignment over `size` nodes with no edges.
    #[inline]
    pub fn new(size: usize) -> Self {
        Self {
            successors: vec![None; size],
            predecessors: vec![None; size],
            num_assigned: 0,
        }
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn size(&self) -> usize {
        self.successors.len()
    }

    /// Returns the number of fixed edges.
    #[inline]
    pub fn num_assigned(&self) -> usize {
        self.num_assigned
    }

    /// Returns `true` if every node has a successor.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.num_assigned == self.size()
    }

    /// Returns the successor of `node`, if fixed.
    #[inline]
    pub fn successor(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.successors[node.get()]
    }

    /// Returns the predecessor of `node`, if fixed.
    #[inline]
    pub fn predecessor(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.predecessors[node.get()]
    }

    /// Returns `true` if `node` already has an outgoing edge.
    #[inline]
    pub fn has_successor(&self, node: NodeIndex) -> bool {
        self.successors[node.get()].is_some()
    }

    /// Returns `true` if some node already maps to `node`.
    #[inline]
    pub fn has_predecessor(&self, node: NodeIndex) -> bool {
        self.predecessors[node.get()].is_some()
    }

    /// Fixes `edge.from -> edge.to`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `edge.from` already has a successor or
    /// `edge.to` already has a predecessor.
    #[inline]
    pub fn assign(&mut self, edge: Edge) {
        debug_assert!(
            !self.has_successor(edge.from),
            "called `Assignment::assign` with node {} that already has a successor",
            edge.from
        );
        debug_assert!(
            !self.has_predecessor(edge.to),
            "called `Assignment::assign` with node {} that already has a predecessor",
            edge.to
        );

        self.successors[edge.from.get()] = Some(edge.to);
        self.predecessors[edge.to.get()] = Some(edge.from);
        self.num_assigned += 1;
    }

    /// Removes the outgoing edge of `from` and returns its target.
    #[inline]
    pub fn unassign(&mut self, from: NodeIndex) -> Option<NodeIndex> {
        let to = self.successors[from.get()].take()?;
        self.predecessors[to.get()] = None;
        self.num_assigned -= 1;
        Some(to)
    }

    /// Returns an iterator over all fixed edges, ordered by source node.
    #[inline]
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.successors
            .iter()
            .enumerate()
            .filter_map(|(from, to)| to.map(|to| Edge::new(NodeIndex::new(from), to)))
    }

    /// Returns the raw successor slice.
    #[inline]
    pub fn successors(&self) -> &[Option<NodeIndex>] {
        &self.successors
    }
}

impl std::fmt::Debug for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.edges()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(from: usize, to: usize) -> Edge {
        Edge::new(NodeIndex::new(from), NodeIndex::new(to))
    }

    #[test]
    fn test_assign_and_unassign_keep_both_directions() {
        let mut a = Assignment::new(4);
        assert_eq!(a.num_assigned(), 0);

        a.assign(e(0, 2));
        a.assign(e(2, 1));
        assert_eq!(a.successor(NodeIndex::new(0)), Some(NodeIndex::new(2)));
        assert_eq!(a.predecessor(NodeIndex::new(1)), Some(NodeIndex::new(2)));
        assert!(a.has_predecessor(NodeIndex::new(2)));
        assert!(!a.has_predecessor(NodeIndex::new(0)));
        assert_eq!(a.num_assigned(), 2);

        assert_eq!(a.unassign(NodeIndex::new(0)), Some(NodeIndex::new(2)));
        assert!(!a.has_predecessor(NodeIndex::new(2)));
        assert_eq!(a.unassign(NodeIndex::new(0)), None);
        assert_eq!(a.num_assigned(), 1);
    }

    #[test]
    fn test_edges_are_ordered_by_source() {
        let mut a = Assignment::new(3);
        a.assign(e(2, 0));
        a.assign(e(0, 1));
        a.assign(e(1, 2));
        assert!(a.is_complete());
        assert_eq!(a.edges().collect::<Vec<_>>(), vec![e(0, 1), e(1, 2), e(2, 0)]);
    }
}
