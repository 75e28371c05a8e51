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

//! Validated, immutable cost matrices.
//!
//! `CostMatrix` is the original instance every solver starts from. It is
//! only constructible through `MatrixValidator`, so holding one proves that
//! the matrix is square, has the sentinel on its diagonal, and keeps every
//! finite entry within `[MIN_COST, MAX_COST]`. Solvers never mutate it; they
//! copy it into their own working state and come back to it when verifying
//! the final tour.
//!
//! Validation is eager and exhaustive. Rows are scanned in order and, within
//! a row, the length is checked first, then the diagonal entry, then every
//! cell left to right. The first violation found is the one reported.

use crate::{
    cost::{Cost, MAX_COST, MIN_COST, UNREACHABLE},
    error::{MatrixError, RangeViolation},
    index::NodeIndex,
};

/// Validates raw cost rows.
///
/// # Configuration
/// * `min_size`: the smallest admissible number of nodes. Defaults to `1`.
///   Branch-and-bound needs at least two nodes to have anything to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixValidator {
    min_size: usize,
}

impl Default for MatrixValidator {
    fn default() -> Self {
        Self { min_size: 1 }
    }
}

impl MatrixValidator {
    /// Creates a validator with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the smallest admissible number of nodes.
    #[inline]
    pub fn min_size(mut self, min_size: usize) -> Self {
        self.min_size = min_size;
        self
    }

    /// Returns the configured minimum size.
    #[inline]
    pub fn required_size(&self) -> usize {
        self.min_size
    }

    /// Checks the raw rows without building a matrix.
    pub fn validate<R>(&self, rows: &[R]) -> Result<(), MatrixError>
    where
        R: AsRef<[i64]>,
    {
        let size = rows.len();
        if size < self.min_size {
            return Err(MatrixError::InvalidSize {
                size,
                min_size: self.min_size,
            });
        }

        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size {
                return Err(MatrixError::InvalidShape {
                    row: i,
                    len: row.len(),
                    size,
                });
            }

            if row[i] != UNREACHABLE {
                return Err(MatrixError::InvalidDiagonal {
                    node: i,
                    value: row[i],
                });
            }

            for (j, &value) in row.iter().enumerate() {
                if value == UNREACHABLE {
                    continue;
                }
                if value > MAX_COST {
                    return Err(MatrixError::CostOutOfRange {
                        row: i,
                        col: j,
                        value,
                        violation: RangeViolation::TooLarge,
                    });
                }
                if value < MIN_COST {
                    return Err(MatrixError::CostOutOfRange {
                        row: i,
                        col: j,
                        value,
                        violation: RangeViolation::Negative,
                    });
                }
            }
        }

        Ok(())
    }

    /// Validates the rows and builds the matrix.
    pub fn build<R>(&self, rows: &[R]) -> Result<CostMatrix, MatrixError>
    where
        R: AsRef<[i64]>,
    {
        self.validate(rows)?;

        let size = rows.len();
        let mut costs = Vec::with_capacity(size * size);
        for row in rows {
            costs.extend(row.as_ref().iter().map(|&raw| Cost::from_raw(raw)));
        }

        Ok(CostMatrix { size, costs })
    }
}

/// A square matrix of directed edge costs, stored row-major.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CostMatrix {
    size: usize,
    costs: Vec<Cost>,
}

impl CostMatrix {
    /// Validates `rows` with the default validator and builds the matrix.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use salesman_model::{cost::UNREACHABLE, matrix::CostMatrix};
    /// const S: i64 = UNREACHABLE;
    /// let matrix = CostMatrix::new(&[[S, 5], [5, S]]).unwrap();
    /// assert_eq!(matrix.size(), 2);
    /// ```
    #[inline]
    pub fn new<R>(rows: &[R]) -> Result<Self, MatrixError>
    where
        R: AsRef<[i64]>,
    {
        MatrixValidator::new().build(rows)
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the cost of the edge `from -> to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn cost(&self, from: NodeIndex, to: NodeIndex) -> Cost {
        debug_assert!(
            from.get() < self.size && to.get() < self.size,
            "called `CostMatrix::cost` with index out of bounds: the size is {} but the edge is {} -> {}",
            self.size,
            from,
            to
        );

        self.costs[from.get() * self.size + to.get()]
    }

    /// Returns the row of outgoing costs for `from`.
    #[inline]
    pub fn row(&self, from: NodeIndex) -> &[Cost] {
        let start = from.get() * self.size;
        &self.costs[start..start + self.size]
    }

    /// Returns all cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cost] {
        &self.costs
    }

    /// Returns an iterator over all node indices.
    #[inline]
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + use<> {
        (0..self.size).map(NodeIndex::new)
    }

    /// Returns the number of reachable (off-diagonal) edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.costs.iter().filter(|c| c.is_reachable()).count()
    }
}

impl std::fmt::Debug for CostMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CostMatrix")
            .field("size", &self.size)
            .field("num_edges", &self.num_edges())
            .finish()
    }
}

impl std::fmt::Display for CostMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for from in self.nodes() {
            let line = self
                .row(from)
                .iter()
                .map(|c| format!("{:>6}", c.to_string()))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: i64 = UNREACHABLE;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    #[test]
    fn test_builds_row_major_matrix() {
        let matrix = CostMatrix::new(&[[S, 1, 2], [3, S, 4], [5, 6, S]]).unwrap();
        assert_eq!(matrix.size(), 3);
        assert_eq!(matrix.cost(n(0), n(2)), Cost::some(2));
        assert_eq!(matrix.cost(n(2), n(1)), Cost::some(6));
        assert_eq!(matrix.cost(n(1), n(1)), Cost::UNREACHABLE);
        assert_eq!(matrix.row(n(1)), &[Cost::some(3), Cost::UNREACHABLE, Cost::some(4)]);
        assert_eq!(matrix.num_edges(), 6);
    }

    #[test]
    fn test_accepts_vec_rows_and_bounds() {
        let rows = vec![vec![S, MAX_COST], vec![MIN_COST, S]];
        let matrix = CostMatrix::new(&rows).unwrap();
        assert_eq!(matrix.cost(n(0), n(1)).get(), Some(MAX_COST));
    }

    #[test]
    fn test_rejects_non_square_rows() {
        let rows = vec![vec![S, 1], vec![1, S], vec![1, 1]];
        assert_eq!(
            CostMatrix::new(&rows),
            Err(MatrixError::InvalidShape {
                row: 0,
                len: 2,
                size: 3
            })
        );
    }

    #[test]
    fn test_rejects_ragged_row() {
        let rows = vec![vec![S, 1, 2], vec![1, S], vec![1, 1, S]];
        assert_eq!(
            CostMatrix::new(&rows),
            Err(MatrixError::InvalidShape {
                row: 1,
                len: 2,
                size: 3
            })
        );
    }

    #[test]
    fn test_rejects_finite_diagonal() {
        let rows = [[S, 1], [1, 0]];
        assert_eq!(
            CostMatrix::new(&rows),
            Err(MatrixError::InvalidDiagonal { node: 1, value: 0 })
        );
    }

    #[test]
    fn test_rejects_out_of_range_costs() {
        let too_large = [[S, 30_001], [1, S]];
        let err = CostMatrix::new(&too_large).unwrap_err();
        assert_eq!(
            err,
            MatrixError::CostOutOfRange {
                row: 0,
                col: 1,
                value: 30_001,
                violation: RangeViolation::TooLarge
            }
        );

        let negative = [[S, 1], [-1, S]];
        let err = CostMatrix::new(&negative).unwrap_err();
        assert_eq!(
            err,
            MatrixError::CostOutOfRange {
                row: 1,
                col: 0,
                value: -1,
                violation: RangeViolation::Negative
            }
        );
    }

    #[test]
    fn test_first_violation_in_scan_order_wins() {
        // Row 0 has an out of range cell, row 1 a bad diagonal.
        let rows = [[S, -5, 1], [1, 7, 1], [1, 1, S]];
        assert!(CostMatrix::new(&rows).unwrap_err().is_cost_out_of_range());

        // Within a row the diagonal is checked before the cells.
        let rows = [[S, 1, 1], [40_000, 0, 1], [1, 1, S]];
        assert_eq!(
            CostMatrix::new(&rows),
            Err(MatrixError::InvalidDiagonal { node: 1, value: 0 })
        );
    }

    #[test]
    fn test_min_size_is_checked_before_contents() {
        let validator = MatrixValidator::new().min_size(2);
        assert_eq!(validator.required_size(), 2);

        // A malformed single-node matrix still reports the size first.
        let rows = [[0i64]];
        assert_eq!(
            validator.validate(&rows),
            Err(MatrixError::InvalidSize {
                size: 1,
                min_size: 2
            })
        );

        let empty: [[i64; 0]; 0] = [];
        assert_eq!(
            MatrixValidator::new().validate(&empty),
            Err(MatrixError::InvalidSize {
                size: 0,
                min_size: 1
            })
        );
    }

    #[test]
    fn test_single_node_is_valid_by_default() {
        let matrix = CostMatrix::new(&[[S]]).unwrap();
        assert_eq!(matrix.size(), 1);
        assert_eq!(matrix.num_edges(), 0);
    }

    #[test]
    fn test_display_marks_missing_edges() {
        let matrix = CostMatrix::new(&[[S, 5], [7, S]]).unwrap();
        let text = matrix.to_string();
        assert!(text.contains('-'));
        assert!(text.contains('5'));
        assert_eq!(text.lines().count(), 2);
    }
}
