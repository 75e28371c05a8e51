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

//! Sentinel-encoded edge costs.
//!
//! A cost matrix entry is either a concrete cost or "no direct edge". Instead
//! of `Option<i64>` the `Cost` type reserves `i64::MAX` as the unreachable
//! sentinel, which keeps every matrix cell a single machine word. Reductions
//! and penalties in the branch-and-bound hot loop operate on dense rows of
//! `Cost`, so the layout matters.
//!
//! Arithmetic that may meet the sentinel saturates, which keeps an unreachable
//! value unreachable instead of wrapping into a small number.

/// Raw sentinel used in input rows to mark a missing edge.
pub const UNREACHABLE: i64 = i64::MAX;

/// Largest admissible finite edge cost.
pub const MAX_COST: i64 = 30_000;

/// Smallest admissible finite edge cost.
pub const MIN_COST: i64 = 0;

/// The cost of a directed edge, or the unreachable sentinel.
///
/// # Examples
///
/// ```rust
/// # use salesman_model::cost::Cost;
/// let c = Cost::some(12);
/// assert_eq!(c.get(), Some(12));
/// assert!(Cost::UNREACHABLE.is_unreachable());
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cost(i64);

impl Cost {
    /// The "no direct edge" value.
    pub const UNREACHABLE: Cost = Cost(UNREACHABLE);

    /// A zero cost.
    pub const ZERO: Cost = Cost(0);

    /// Wraps a raw value. `UNREACHABLE` maps to the sentinel.
    #[inline(always)]
    pub const fn from_raw(raw: i64) -> Self {
        Cost(raw)
    }

    /// Creates a reachable cost.
    ///
    /// # Panics
    ///
    /// Panics if `value` is the unreachable sentinel.
    #[inline]
    pub fn some(value: i64) -> Self {
        assert!(
            value != UNREACHABLE,
            "called `Cost::some` with the unreachable sentinel"
        );
        Cost(value)
    }

    /// Returns `true` if this edge exists.
    #[inline(always)]
    pub const fn is_reachable(self) -> bool {
        self.0 != UNREACHABLE
    }

    /// Returns `true` if this is the "no direct edge" sentinel.
    #[inline(always)]
    pub const fn is_unreachable(self) -> bool {
        self.0 == UNREACHABLE
    }

    /// Returns the raw value, including the sentinel.
    #[inline(always)]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Returns the cost if the edge exists.
    #[inline(always)]
    pub const fn get(self) -> Option<i64> {
        if self.is_reachable() { Some(self.0) } else { None }
    }

    /// Lowers a reachable cost by `amount`. The sentinel is left untouched.
    #[inline(always)]
    pub fn reduced_by(self, amount: i64) -> Self {
        if self.is_reachable() {
            Cost(self.0 - amount)
        } else {
            self
        }
    }
}

impl Default for Cost {
    fn default() -> Self {
        Cost::UNREACHABLE
    }
}

impl From<Option<i64>> for Cost {
    #[inline]
    fn from(value: Option<i64>) -> Self {
        match value {
            Some(v) => Cost::some(v),
            None => Cost::UNREACHABLE,
        }
    }
}

impl std::fmt::Debug for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.get() {
            Some(v) => write!(f, "Cost({})", v),
            None => write!(f, "Cost(Unreachable)"),
        }
    }
}

impl std::fmt::Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.get() {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_unreachable() {
        assert!(Cost::UNREACHABLE.is_unreachable());
        assert!(!Cost::UNREACHABLE.is_reachable());
        assert_eq!(Cost::from_raw(UNREACHABLE), Cost::UNREACHABLE);
        assert_eq!(Cost::UNREACHABLE.get(), None);
        assert_eq!(Cost::default(), Cost::UNREACHABLE);
    }

    #[test]
    fn test_reduced_by_keeps_sentinel() {
        assert_eq!(Cost::some(10).reduced_by(4), Cost::some(6));
        assert_eq!(Cost::UNREACHABLE.reduced_by(4), Cost::UNREACHABLE);
    }

    #[test]
    fn test_sentinel_orders_above_every_finite_cost() {
        assert!(Cost::some(MAX_COST) < Cost::UNREACHABLE);
        assert!(Cost::ZERO < Cost::some(1));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Cost::from(Some(3)), Cost::some(3));
        assert_eq!(Cost::from(None), Cost::UNREACHABLE);
    }

    #[test]
    #[should_panic(expected = "unreachable sentinel")]
    fn test_some_rejects_sentinel() {
        let _ = Cost::some(UNREACHABLE);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Cost::some(7)), "7");
        assert_eq!(format!("{}", Cost::UNREACHABLE), "-");
        assert_eq!(format!("{:?}", Cost::UNREACHABLE), "Cost(Unreachable)");
    }
}
