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

//! Path grouping for subtour elimination.
//!
//! The arcs fixed along the current search path always form a set of
//! disjoint simple paths. `NodeGroups` is a disjoint-set forest over the
//! original node indices where every such path is one group. It is rebuilt
//! from scratch from the current assignment at every search node, so it never
//! has to be undone on backtrack.
//!
//! Two questions are answered on top of it:
//!
//! * an arc is *selectable* if fixing it keeps the paths simple: its source
//!   has no successor, its target no predecessor, and it does not join a path
//!   to itself;
//! * an arc is *skippable* if forbidding it still leaves a way to complete
//!   the tour, which requires some third node outside both endpoints' paths.

use salesman_model::{
    assignment::Assignment,
    index::{Edge, NodeIndex},
};

/// A disjoint-set forest over node indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeGroups {
    parent: Vec<usize>,
}

impl NodeGroups {
    /// Creates `size` singleton groups.
    #[inline]
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
        }
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn size(&self) -> usize {
        self.parent.len()
    }

    /// Returns the root of the group containing `node`.
    #[inline]
    pub fn find(&self, node: NodeIndex) -> usize {
        let mut current = node.get();
        while self.parent[current] != current {
            current = self.parent[current];
        }
        current
    }

    /// Recomputes the groups from the fixed edges of `assignment`.
    ///
    /// For every edge the larger of the two roots is attached to the smaller
    /// one, so the root of a group is always its smallest member.
    pub fn rebuild(&mut self, assignment: &Assignment) {
        debug_assert_eq!(
            assignment.size(),
            self.size(),
            "called `NodeGroups::rebuild` with an assignment of a different size"
        );

        for (i, parent) in self.parent.iter_mut().enumerate() {
            *parent = i;
        }
        for edge in assignment.edges() {
            let a = self.find(edge.from);
            let b = self.find(edge.to);
            if a != b {
                self.parent[a.max(b)] = a.min(b);
            }
        }
    }

    /// Returns `true` if both nodes belong to the same group.
    #[inline]
    pub fn same_group(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.find(a) == self.find(b)
    }

    /// Returns `true` if `edge` can be fixed without closing a subtour.
    #[inline]
    pub fn is_arc_selectable(&self, assignment: &Assignment, edge: Edge) -> bool {
        !assignment.has_successor(edge.from)
            && !assignment.has_predecessor(edge.to)
            && !self.same_group(edge.from, edge.to)
    }

    /// Returns `true` if some node other than the endpoints lies outside both
    /// endpoints' groups.
    pub fn is_arc_skippable(&self, edge: Edge) -> bool {
        let from_group = self.find(edge.from);
        let to_group = self.find(edge.to);
        (0..self.size()).map(NodeIndex::new).any(|node| {
            if node == edge.from || node == edge.to {
                return false;
            }
            let group = self.find(node);
            group != from_group && group != to_group
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn e(from: usize, to: usize) -> Edge {
        Edge::new(n(from), n(to))
    }

    fn assignment(size: usize, edges: &[(usize, usize)]) -> Assignment {
        let mut a = Assignment::new(size);
        for &(from, to) in edges {
            a.assign(e(from, to));
        }
        a
    }

    #[test]
    fn test_rebuild_merges_paths_under_smallest_root() {
        let a = assignment(6, &[(4, 2), (2, 5), (1, 3)]);
        let mut groups = NodeGroups::new(6);
        groups.rebuild(&a);

        assert_eq!(groups.find(n(4)), 2);
        assert_eq!(groups.find(n(5)), 2);
        assert_eq!(groups.find(n(2)), 2);
        assert_eq!(groups.find(n(3)), 1);
        assert_eq!(groups.find(n(0)), 0);
        assert!(groups.same_group(n(4), n(5)));
        assert!(!groups.same_group(n(0), n(1)));
    }

    #[test]
    fn test_rebuild_starts_from_scratch() {
        let mut groups = NodeGroups::new(3);
        groups.rebuild(&assignment(3, &[(0, 1)]));
        assert!(groups.same_group(n(0), n(1)));

        groups.rebuild(&Assignment::new(3));
        assert!(!groups.same_group(n(0), n(1)));
    }

    #[test]
    fn test_arc_closing_a_path_is_not_selectable() {
        // Path 0 -> 1 -> 2; closing 2 -> 0 would form a subtour of three nodes.
        let a = assignment(4, &[(0, 1), (1, 2)]);
        let mut groups = NodeGroups::new(4);
        groups.rebuild(&a);

        assert!(!groups.is_arc_selectable(&a, e(2, 0)));
        assert!(groups.is_arc_selectable(&a, e(2, 3)));
        assert!(groups.is_arc_selectable(&a, e(3, 0)));
        // Node 0 already has a successor.
        assert!(!groups.is_arc_selectable(&a, e(0, 3)));
        // Node 2 already has a predecessor.
        assert!(!groups.is_arc_selectable(&a, e(3, 2)));
    }

    #[test]
    fn test_skippable_requires_a_third_group() {
        let a = assignment(4, &[(0, 1), (1, 2)]);
        let mut groups = NodeGroups::new(4);
        groups.rebuild(&a);

        // Only 3 remains outside the path, and it is an endpoint here.
        assert!(!groups.is_arc_skippable(e(2, 3)));
        // Node 3 is outside the path containing both endpoints.
        assert!(groups.is_arc_skippable(e(2, 0)));

        let empty = Assignment::new(3);
        groups = NodeGroups::new(3);
        groups.rebuild(&empty);
        assert!(groups.is_arc_skippable(e(0, 1)));

        groups = NodeGroups::new(2);
        groups.rebuild(&Assignment::new(2));
        assert!(!groups.is_arc_skippable(e(0, 1)));
    }
}
