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

//! # Salesman Model
//!
//! **The problem representation shared by the exact TSP solvers.**
//!
//! This crate defines what an asymmetric travelling salesman instance looks
//! like once it has been accepted, and what a solved instance hands back. It
//! is the interchange layer between raw input rows and the search engines in
//! `salesman_bnb` and `salesman_brute`.
//!
//! ## Architecture
//!
//! * **`index`**: Strongly typed node indices (`NodeIndex`) and directed edges (`Edge`).
//! * **`cost`**: The sentinel-encoded `Cost` cell and the admissible cost range.
//! * **`matrix`**: `MatrixValidator` and the immutable, validated `CostMatrix`.
//! * **`assignment`**: Successor maps used as partial tours during search.
//! * **`tour`**: Closed tours reconstructed from complete assignments and re-priced.
//! * **`error`**: `MatrixError` and `TourError`.
//!
//! ## Design Philosophy
//!
//! 1.  **Fail-Fast**: Input rows are validated eagerly. A `CostMatrix` cannot exist in an invalid state.
//! 2.  **Dense Layout**: Costs are stored row-major in a single vector, one machine word per cell.
//! 3.  **Independent Verification**: A `Tour` is always priced against the original matrix.

pub mod assignment;
pub mod cost;
pub mod error;
pub mod index;
pub mod matrix;
pub mod tour;
