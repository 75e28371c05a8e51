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

//! Matrix reduction and opportunity-cost arc selection.
//!
//! Reduction subtracts the smallest reachable entry of every row, then of
//! every column, from the remaining reachable entries of that line. The sum
//! of all subtracted amounts is a lower bound on the cost of any tour that
//! completes the current partial assignment, and afterwards every line
//! contains at least one zero.
//!
//! Zero cells are collected as candidate arcs in discovery order:
//!
//! 1. the row pass walks rows top to bottom and records every zero of a row
//!    once that row is reduced, whether it existed before or was created;
//! 2. the column pass walks columns left to right and records only the zeros
//!    it creates, since a column whose minimum is already zero has all its
//!    zeros recorded by the row pass.
//!
//! No cell is recorded twice.
//!
//! Arc selection scores every candidate by its penalty: the cheapest
//! alternative in its row plus the cheapest alternative in its column. The
//! arc with the highest penalty is the one whose exclusion raises the bound
//! the most, so it is branched on first. Ties go to the earliest candidate.

use crate::submatrix::Submatrix;
use salesman_model::cost::Cost;

/// A zero cell of a reduced submatrix, in local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZeroArc {
    pub row: usize,
    pub col: usize,
}

impl ZeroArc {
    #[inline(always)]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// The outcome of reducing a submatrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction {
    /// Total amount subtracted, to be added to the node's lower bound.
    pub amount: i64,
    /// Zero cells in discovery order.
    pub zero_arcs: Vec<ZeroArc>,
}

/// The arc chosen for branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BranchArc {
    pub row: usize,
    pub col: usize,
    /// Saturated sum of the row and column alternatives. `i64::MAX` if either
    /// side has no alternative.
    pub penalty: i64,
}

#[inline(always)]
fn min_reachable<I>(costs: I) -> Option<i64>
where
    I: IntoIterator<Item = Cost>,
{
    costs.into_iter().filter_map(Cost::get).min()
}

/// Reduces `matrix` in place.
///
/// Returns `None` if some row or column has no reachable entry, which proves
/// that no tour completes the current node. In that case the matrix may be
/// partially reduced.
pub fn reduce(matrix: &mut Submatrix) -> Option<Reduction> {
    let size = matrix.size();
    let mut amount: i64 = 0;
    let mut zero_arcs = Vec::with_capacity(size);

    for row in 0..size {
        let min = min_reachable(matrix.row(row).iter().copied())?;
        let cells = matrix.row_mut(row);
        if min > 0 {
            for cell in cells.iter_mut() {
                *cell = cell.reduced_by(min);
            }
            amount += min;
        }
        zero_arcs.extend(
            cells
                .iter()
                .enumerate()
                .filter(|(_, cell)| **cell == Cost::ZERO)
                .map(|(col, _)| ZeroArc::new(row, col)),
        );
    }

    for col in 0..size {
        let min = min_reachable((0..size).map(|row| matrix.cell(row, col)))?;
        if min == 0 {
            continue;
        }
        for row in 0..size {
            let reduced = matrix.cell(row, col).reduced_by(min);
            matrix.set_cell(row, col, reduced);
            if reduced == Cost::ZERO {
                zero_arcs.push(ZeroArc::new(row, col));
            }
        }
        amount += min;
    }

    Some(Reduction { amount, zero_arcs })
}

/// Returns the penalty of branching away from the zero cell `(row, col)`.
#[inline]
pub fn penalty(matrix: &Submatrix, row: usize, col: usize) -> i64 {
    let size = matrix.size();
    let row_alternative = min_reachable(
        (0..size)
            .filter(|&c| c != col)
            .map(|c| matrix.cell(row, c)),
    );
    let col_alternative = min_reachable(
        (0..size)
            .filter(|&r| r != row)
            .map(|r| matrix.cell(r, col)),
    );

    match (row_alternative, col_alternative) {
        (Some(r), Some(c)) => r.saturating_add(c),
        _ => i64::MAX,
    }
}

/// Picks the candidate with the strictly largest penalty, keeping the
/// earliest one on ties. Returns `None` if there are no candidates.
pub fn select_branch_arc(matrix: &Submatrix, zero_arcs: &[ZeroArc]) -> Option<BranchArc> {
    let mut best: Option<BranchArc> = None;
    for arc in zero_arcs {
        let penalty = penalty(matrix, arc.row, arc.col);
        if best.is_none_or(|b| penalty > b.penalty) {
            best = Some(BranchArc {
                row: arc.row,
                col: arc.col,
                penalty,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesman_model::{cost::UNREACHABLE, matrix::CostMatrix};

    const S: i64 = UNREACHABLE;

    fn submatrix<R: AsRef<[i64]>>(rows: &[R]) -> Submatrix {
        Submatrix::from_matrix(&CostMatrix::new(rows).unwrap())
    }

    fn raw_rows(m: &Submatrix) -> Vec<Vec<i64>> {
        (0..m.size())
            .map(|r| m.row(r).iter().map(|c| c.raw()).collect())
            .collect()
    }

    #[test]
    fn test_reduces_rows_then_columns() {
        let mut m = submatrix(&[[S, 10, 15, 20], [5, S, 9, 10], [6, 13, S, 12], [8, 8, 9, S]]);
        let reduction = reduce(&mut m).unwrap();

        // Rows: 10 + 5 + 6 + 8 = 29. Columns afterwards: 0, 0, 1, 5.
        assert_eq!(reduction.amount, 35);
        assert_eq!(
            raw_rows(&m),
            vec![
                vec![S, 0, 4, 5],
                vec![0, S, 3, 0],
                vec![0, 7, S, 1],
                vec![0, 0, 0, S],
            ]
        );
    }

    #[test]
    fn test_zero_arcs_follow_discovery_order() {
        let mut m = submatrix(&[[S, 10, 15, 20], [5, S, 9, 10], [6, 13, S, 12], [8, 8, 9, S]]);
        let reduction = reduce(&mut m).unwrap();

        // Row pass: (0,1), (1,0), (2,0), (3,0), (3,1).
        // Column 2 then creates (3,2) and column 3 creates (1,3).
        assert_eq!(
            reduction.zero_arcs,
            vec![
                ZeroArc::new(0, 1),
                ZeroArc::new(1, 0),
                ZeroArc::new(2, 0),
                ZeroArc::new(3, 0),
                ZeroArc::new(3, 1),
                ZeroArc::new(3, 2),
                ZeroArc::new(1, 3),
            ]
        );
    }

    #[test]
    fn test_pre_existing_zeros_are_recorded_once() {
        let mut m = submatrix(&[[S, 0, 3], [0, S, 0], [2, 0, S]]);
        let reduction = reduce(&mut m).unwrap();
        assert_eq!(reduction.amount, 0);
        assert_eq!(
            reduction.zero_arcs,
            vec![
                ZeroArc::new(0, 1),
                ZeroArc::new(1, 0),
                ZeroArc::new(1, 2),
                ZeroArc::new(2, 1),
            ]
        );
    }

    #[test]
    fn test_unreachable_row_is_infeasible() {
        let mut m = submatrix(&[[S, 1, 1], [S, S, S], [1, 1, S]]);
        assert_eq!(reduce(&mut m), None);
    }

    #[test]
    fn test_unreachable_column_is_infeasible() {
        let mut m = submatrix(&[[S, 1, S], [1, S, S], [1, 1, S]]);
        assert_eq!(reduce(&mut m), None);
    }

    #[test]
    fn test_penalty_saturates_without_alternative() {
        let mut m = submatrix(&[[S, 5], [5, S]]);
        reduce(&mut m).unwrap();
        assert_eq!(penalty(&m, 0, 1), i64::MAX);
    }

    #[test]
    fn test_selects_largest_penalty() {
        let mut m = submatrix(&[[S, 10, 15, 20], [5, S, 9, 10], [6, 13, S, 12], [8, 8, 9, S]]);
        let reduction = reduce(&mut m).unwrap();

        // Penalties: (0,1)=4, (1,0)=0, (2,0)=1, (3,0)=0, (3,1)=0, (3,2)=3, (1,3)=1.
        let arc = select_branch_arc(&m, &reduction.zero_arcs).unwrap();
        assert_eq!((arc.row, arc.col, arc.penalty), (0, 1, 4));
    }

    #[test]
    fn test_ties_go_to_first_candidate() {
        let mut m = submatrix(&[[S, 1, 1], [1, S, 1], [1, 1, S]]);
        let reduction = reduce(&mut m).unwrap();
        let arc = select_branch_arc(&m, &reduction.zero_arcs).unwrap();
        assert_eq!((arc.row, arc.col), (0, 1));
        assert_eq!(select_branch_arc(&m, &[]), None);
    }
}
