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

//! Working submatrices of the branch-and-bound tree.
//!
//! A `Submatrix` is the square, reduced cost matrix attached to one search
//! node. It shrinks by one row and one column every time an arc is included,
//! and the title tables `row_nodes` and `col_nodes` translate local row and
//! column positions back to original node indices. Excluding an arc keeps
//! the dimensions and only disables a single cell.
//!
//! Cells are stored row-major in one flat vector. Deriving the include child
//! copies everything except the removed row and column in a single pass.

use salesman_model::{cost::Cost, index::NodeIndex, matrix::CostMatrix};

/// A square working matrix with its row and column title tables.
#[derive(Clone, PartialEq, Eq)]
pub struct Submatrix {
    size: usize,
    cells: Vec<Cost>,
    row_nodes: Vec<NodeIndex>,
    col_nodes: Vec<NodeIndex>,
}

impl Submatrix {
    /// Copies the full original matrix. Row `i` and column `i` both map to node `i`.
    pub fn from_matrix(matrix: &CostMatrix) -> Self {
        let nodes: Vec<NodeIndex> = matrix.nodes().collect();
        Self {
            size: matrix.size(),
            cells: matrix.cells().to_vec(),
            row_nodes: nodes.clone(),
            col_nodes: nodes,
        }
    }

    /// Returns the number of rows (and columns).
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the cell at local position `(row, col)`.
    #[inline(always)]
    pub fn cell(&self, row: usize, col: usize) -> Cost {
        debug_assert!(
            row < self.size && col < self.size,
            "called `Submatrix::cell` with position out of bounds: the size is {} but the position is ({}, {})",
            self.size,
            row,
            col
        );

        self.cells[row * self.size + col]
    }

    /// Overwrites the cell at local position `(row, col)`.
    #[inline(always)]
    pub fn set_cell(&mut self, row: usize, col: usize, value: Cost) {
        debug_assert!(
            row < self.size && col < self.size,
            "called `Submatrix::set_cell` with position out of bounds: the size is {} but the position is ({}, {})",
            self.size,
            row,
            col
        );

        self.cells[row * self.size + col] = value;
    }

    /// Returns local row `row`.
    #[inline(always)]
    pub fn row(&self, row: usize) -> &[Cost] {
        let start = row * self.size;
        &self.cells[start..start + self.size]
    }

    /// Returns local row `row` mutably.
    #[inline(always)]
    pub fn row_mut(&mut self, row: usize) -> &mut [Cost] {
        let start = row * self.size;
        &mut self.cells[start..start + self.size]
    }

    /// Returns the original node that local row `row` stands for.
    #[inline(always)]
    pub fn row_node(&self, row: usize) -> NodeIndex {
        self.row_nodes[row]
    }

    /// Returns the original node that local column `col` stands for.
    #[inline(always)]
    pub fn col_node(&self, col: usize) -> NodeIndex {
        self.col_nodes[col]
    }

    /// Returns the row title table.
    #[inline]
    pub fn row_nodes(&self) -> &[NodeIndex] {
        &self.row_nodes
    }

    /// Returns the column title table.
    #[inline]
    pub fn col_nodes(&self) -> &[NodeIndex] {
        &self.col_nodes
    }

    /// Builds the matrix with local row `row` and column `col` removed.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the position is out of bounds or the
    /// matrix is already empty.
    pub fn without(&self, row: usize, col: usize) -> Self {
        debug_assert!(
            row < self.size && col < self.size,
            "called `Submatrix::without` with position out of bounds: the size is {} but the position is ({}, {})",
            self.size,
            row,
            col
        );

        let size = self.size - 1;
        let mut cells = Vec::with_capacity(size * size);
        for (r, values) in self.cells.chunks_exact(self.size).enumerate() {
            if r == row {
                continue;
            }
            cells.extend_from_slice(&values[..col]);
            cells.extend_from_slice(&values[col + 1..]);
        }

        let mut row_nodes = self.row_nodes.clone();
        row_nodes.remove(row);
        let mut col_nodes = self.col_nodes.clone();
        col_nodes.remove(col);

        Self {
            size,
            cells,
            row_nodes,
            col_nodes,
        }
    }

    /// Marks the cell at `(row, col)` as unreachable.
    #[inline]
    pub fn disable(&mut self, row: usize, col: usize) {
        self.set_cell(row, col, Cost::UNREACHABLE);
    }
}

impl std::fmt::Debug for Submatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Submatrix")
            .field("size", &self.size)
            .field("row_nodes", &self.row_nodes)
            .field("col_nodes", &self.col_nodes)
            .finish()
    }
}

impl std::fmt::Display for Submatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:>6}", "")?;
        for node in &self.col_nodes {
            write!(f, " {:>6}", node.to_string())?;
        }
        writeln!(f)?;
        for (r, node) in self.row_nodes.iter().enumerate() {
            write!(f, "{:>6}", node.to_string())?;
            for cost in self.row(r) {
                write!(f, " {:>6}", cost.to_string())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
