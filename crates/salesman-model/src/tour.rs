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

//! Tours reconstructed from successor assignments.
//!
//! A `Tour` is the closed walk `0 -> ... -> 0` obtained by following an
//! assignment for `n` steps. Construction re-prices every edge against the
//! original matrix, so a `Tour` always carries a cost that was verified
//! independently of whatever search produced the assignment.

use crate::{
    assignment::Assignment,
    error::TourError,
    index::{Edge, NodeIndex},
    matrix::CostMatrix,
};
use fixedbitset::FixedBitSet;

/// A Hamiltonian cycle starting and ending at node `0`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Tour {
    cost: i64,
    nodes: Vec<NodeIndex>,
}

impl Tour {
    /// Walks `assignment` from node `0` and prices the walk in `matrix`.
    ///
    /// Fails if the walk breaks off, revisits a node before closing, or uses
    /// an edge that is unreachable in `matrix`.
    pub fn from_assignment(matrix: &CostMatrix, assignment: &Assignment) -> Result<Self, TourError> {
        let size = matrix.size();
        if assignment.size() != size {
            return Err(TourError::SizeMismatch {
                len: assignment.size(),
                size,
            });
        }

        let mut visited = FixedBitSet::with_capacity(size);
        let mut nodes = Vec::with_capacity(size + 1);
        let mut cost: i64 = 0;
        let mut current = NodeIndex::new(0);
        nodes.push(current);

        for _ in 0..size {
            if visited.put(current.get()) {
                return Err(TourError::Subtour { node: current });
            }

            let next = assignment
                .successor(current)
                .ok_or(TourError::Incomplete { node: current })?;
            let edge_cost = matrix
                .cost(current, next)
                .get()
                .ok_or(TourError::Unreachable {
                    from: current,
                    to: next,
                })?;

            cost += edge_cost;
            nodes.push(next);
            current = next;
        }

        if !current.is_origin() {
            return Err(TourError::Subtour { node: current });
        }

        Ok(Self { cost, nodes })
    }

    /// Returns the total cost in the original matrix.
    #[inline]
    pub fn cost(&self) -> i64 {
        self.cost
    }

    /// Returns the `n + 1` nodes of the closed walk, starting and ending at `0`.
    #[inline]
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    /// Returns the number of distinct nodes visited.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Returns `true` if the tour visits no node. Never the case for a
    /// reconstructed tour.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the directed edges of the tour in visiting order.
    #[inline]
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes.windows(2).map(|w| Edge::new(w[0], w[1]))
    }

    /// Returns the node indices as plain `usize`.
    #[inline]
    pub fn to_indices(&self) -> Vec<usize> {
        self.nodes.iter().map(|n| n.get()).collect()
    }
}

impl std::fmt::Debug for Tour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tour")
            .field("cost", &self.cost)
            .field("nodes", &self.to_indices())
            .finish()
    }
}

impl std::fmt::Display for Tour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = self
            .nodes
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        write!(f, "{} (cost {})", path, self.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::UNREACHABLE;

    const S: i64 = UNREACHABLE;

    fn assignment(successors: &[usize]) -> Assignment {
        let mut a = Assignment::new(successors.len());
        for (from, &to) in successors.iter().enumerate() {
            a.assign(Edge::new(NodeIndex::new(from), NodeIndex::new(to)));
        }
        a
    }

    fn four_city() -> CostMatrix {
        CostMatrix::new(&[[S, 10, 15, 20], [5, S, 9, 10], [6, 13, S, 12], [8, 8, 9, S]]).unwrap()
    }

    #[test]
    fn test_reconstructs_closed_walk_and_prices_it() {
        let matrix = four_city();
        // 0 -> 1 -> 3 -> 2 -> 0
        let tour = Tour::from_assignment(&matrix, &assignment(&[1, 3, 0, 2])).unwrap();
        assert_eq!(tour.to_indices(), vec![0, 1, 3, 2, 0]);
        assert_eq!(tour.cost(), 10 + 10 + 9 + 6);
        assert_eq!(tour.len(), 4);
        assert_eq!(tour.edges().count(), 4);
        assert_eq!(tour.to_string(), "0 -> 1 -> 3 -> 2 -> 0 (cost 35)");
    }

    #[test]
    fn test_detects_subtour() {
        let matrix = four_city();
        // 0 <-> 1 and 2 <-> 3
        let err = Tour::from_assignment(&matrix, &assignment(&[1, 0, 3, 2])).unwrap_err();
        assert!(matches!(err, TourError::Subtour { .. }));
    }

    #[test]
    fn test_detects_incomplete_assignment() {
        let matrix = four_city();
        let mut a = Assignment::new(4);
        a.assign(Edge::new(NodeIndex::new(0), NodeIndex::new(2)));
        let err = Tour::from_assignment(&matrix, &a).unwrap_err();
        assert_eq!(
            err,
            TourError::Incomplete {
                node: NodeIndex::new(2)
            }
        );
    }

    #[test]
    fn test_detects_unreachable_edge() {
        let matrix = CostMatrix::new(&[[S, 1, S], [S, S, 1], [1, S, S]]).unwrap();
        assert!(Tour::from_assignment(&matrix, &assignment(&[1, 2, 0])).is_ok());

        let matrix = CostMatrix::new(&[[S, 1, S], [S, S, S], [1, 1, S]]).unwrap();
        let err = Tour::from_assignment(&matrix, &assignment(&[1, 2, 0])).unwrap_err();
        assert_eq!(
            err,
            TourError::Unreachable {
                from: NodeIndex::new(1),
                to: NodeIndex::new(2)
            }
        );
    }

    #[test]
    fn test_rejects_size_mismatch() {
        let matrix = four_city();
        let err = Tour::from_assignment(&matrix, &Assignment::new(3)).unwrap_err();
        assert_eq!(err, TourError::SizeMismatch { len: 3, size: 4 });
    }
}
