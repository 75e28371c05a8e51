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

//! Salesman-BnB: Little's branch-and-bound for the asymmetric TSP
//!
//! Exact solver for the travelling salesman problem over an asymmetric cost
//! matrix in which some edges may be missing. The search bounds with matrix
//! reduction, branches on the zero arc with the highest opportunity cost and
//! eliminates subtours by grouping the arcs fixed along the current path.
//!
//! Core flow
//! - Provide raw `i64` rows or a validated `salesman_model::matrix::CostMatrix`.
//! - Optionally pick a `bnb::SearchStrategy` and a `monitor`.
//! - Run `bnb::BnbSolver`, or call `solve` for the defaults.
//!
//! Design highlights
//! - Per-run state lives in a search session; two solves never share it.
//! - The path assignment is only mutated through a trail and always restored.
//! - Submatrices are copied on include and moved into the exclude branch.
//! - Deterministic: ties are broken by discovery order.
//!
//! Module map
//! - `bnb`: the solver engine, drivers and session orchestration.
//! - `submatrix`: working matrices with row/column title tables.
//! - `reduction`: row/column reduction and penalty-based arc selection.
//! - `group`: disjoint-set path grouping for subtour elimination.
//! - `monitor`: tree-search monitors (log, composite, no-op).
//! - `stats`: lightweight counters/timing.

pub mod bnb;
pub mod group;
pub mod monitor;
pub mod reduction;
mod stack;
pub mod stats;
pub mod submatrix;
mod trail;

pub use bnb::solve;
