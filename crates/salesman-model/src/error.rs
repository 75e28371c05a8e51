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

//! Error types for cost matrix validation and tour reconstruction.

use crate::{cost::MAX_COST, index::NodeIndex};
use thiserror::Error;

/// Which side of the admissible cost range an entry falls off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeViolation {
    /// The entry exceeds `MAX_COST`.
    TooLarge,
    /// The entry is below zero.
    Negative,
}

impl std::fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeViolation::TooLarge => write!(f, "larger than {}", MAX_COST),
            RangeViolation::Negative => write!(f, "negative"),
        }
    }
}

/// The error type for malformed cost matrices.
///
/// Every variant is raised during eager validation, before any search state
/// exists. Infeasibility of a well-formed matrix is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// The matrix has fewer nodes than the solver requires.
    #[error("cost matrix has {size} nodes but at least {min_size} are required")]
    InvalidSize { size: usize, min_size: usize },

    /// A row's length does not match the number of rows.
    #[error("row {row} has {len} entries but the matrix has {size} rows")]
    InvalidShape { row: usize, len: usize, size: usize },

    /// A diagonal entry is not the unreachable sentinel.
    #[error("diagonal entry ({node}, {node}) must be unreachable but is {value}")]
    InvalidDiagonal { node: usize, value: i64 },

    /// A finite entry lies outside `[MIN_COST, MAX_COST]`.
    #[error("cost {value} at ({row}, {col}) is {violation}")]
    CostOutOfRange {
        row: usize,
        col: usize,
        value: i64,
        violation: RangeViolation,
    },
}

impl MatrixError {
    /// Returns `true` for either kind of range violation.
    #[inline]
    pub fn is_cost_out_of_range(&self) -> bool {
        matches!(self, MatrixError::CostOutOfRange { .. })
    }
}

/// The error type for turning a successor assignment into a tour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TourError {
    /// The assignment length does not match the matrix.
    #[error("assignment covers {len} nodes but the matrix has {size}")]
    SizeMismatch { len: usize, size: usize },

    /// A node on the walk has no successor.
    #[error("node {node} has no successor")]
    Incomplete { node: NodeIndex },

    /// The walk returned to a node before covering all nodes.
    #[error("node {node} is visited twice before the tour is closed")]
    Subtour { node: NodeIndex },

    /// The walk uses an edge that does not exist in the original matrix.
    #[error("edge {from} -> {to} is unreachable")]
    Unreachable { from: NodeIndex, to: NodeIndex },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_cell() {
        let err = MatrixError::CostOutOfRange {
            row: 1,
            col: 2,
            value: 30_001,
            violation: RangeViolation::TooLarge,
        };
        assert_eq!(err.to_string(), "cost 30001 at (1, 2) is larger than 30000");
        assert!(err.is_cost_out_of_range());

        let err = MatrixError::InvalidDiagonal { node: 3, value: 0 };
        assert_eq!(
            err.to_string(),
            "diagonal entry (3, 3) must be unreachable but is 0"
        );
        assert!(!err.is_cost_out_of_range());
    }

    #[test]
    fn test_tour_error_messages() {
        let err = TourError::Unreachable {
            from: NodeIndex::new(0),
            to: NodeIndex::new(2),
        };
        assert_eq!(err.to_string(), "edge 0 -> 2 is unreachable");
    }
}
