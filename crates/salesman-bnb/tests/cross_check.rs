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

//! Cross-checks the branch-and-bound solver against the brute-force oracle.

use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};
use salesman_bnb::{
    bnb::{BnbSolver, SearchStrategy},
    monitor::no_op::NoOperationMonitor,
};
use salesman_model::cost::UNREACHABLE;

const S: i64 = UNREACHABLE;

fn random_rows(rng: &mut StdRng, n: usize, density: f64, max_cost: i64) -> Vec<Vec<i64>> {
    (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    if i == j || !rng.random_bool(density) {
                        S
                    } else {
                        rng.random_range(0..=max_cost)
                    }
                })
                .collect()
        })
        .collect()
}

fn assert_valid_tour(rows: &[Vec<i64>], cycle: &[usize], cost: i64) {
    let n = rows.len();
    assert_eq!(cycle.len(), n + 1, "cycle {:?} has the wrong length", cycle);
    assert_eq!(cycle[0], 0);
    assert_eq!(cycle[n], 0);

    let mut seen = vec![false; n];
    for &node in &cycle[..n] {
        assert!(!seen[node], "node {} visited twice in {:?}", node, cycle);
        seen[node] = true;
    }

    let mut total = 0;
    for w in cycle.windows(2) {
        let edge = rows[w[0]][w[1]];
        assert_ne!(edge, S, "cycle {:?} uses missing edge {} -> {}", cycle, w[0], w[1]);
        total += edge;
    }
    assert_eq!(total, cost, "cycle {:?} does not add up", cycle);
}

fn bnb_cost(rows: &[Vec<i64>], strategy: SearchStrategy) -> Option<i64> {
    let outcome = BnbSolver::new()
        .with_strategy(strategy)
        .solve_rows(rows, NoOperationMonitor::new())
        .unwrap();
    if let Some(cycle) = outcome.cycle() {
        assert_valid_tour(rows, &cycle, outcome.cost().unwrap());
    }
    outcome.cost()
}

fn oracle_cost(rows: &[Vec<i64>]) -> Option<i64> {
    let outcome = salesman_brute::solve(rows).unwrap();
    if let Some(cycle) = outcome.cycle() {
        assert_valid_tour(rows, &cycle, outcome.cost().unwrap());
    }
    outcome.cost()
}

#[test]
fn random_dense_instances_match_oracle() {
    let mut rng = StdRng::seed_from_u64(0x5a1e5);
    for round in 0..60 {
        let n = rng.random_range(2..=8);
        let rows = random_rows(&mut rng, n, 1.0, 100);
        let expected = oracle_cost(&rows);
        assert!(expected.is_some());
        for strategy in [SearchStrategy::Recursive, SearchStrategy::ExplicitStack] {
            assert_eq!(bnb_cost(&rows, strategy), expected, "round {} with {:?}", round, rows);
        }
    }
}

#[test]
fn random_sparse_instances_agree_on_feasibility() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut infeasible = 0;
    for round in 0..80 {
        let n = rng.random_range(2..=8);
        let rows = random_rows(&mut rng, n, 0.45, 30_000);
        let expected = oracle_cost(&rows);
        if expected.is_none() {
            infeasible += 1;
        }
        for strategy in [SearchStrategy::Recursive, SearchStrategy::ExplicitStack] {
            assert_eq!(bnb_cost(&rows, strategy), expected, "round {} with {:?}", round, rows);
        }
    }
    assert!(infeasible > 0);
}

#[test]
fn many_ties_match_oracle() {
    // Small cost ranges produce many equal penalties and exercise the
    // shortcut that skips the exclude branch after a completed tour.
    let mut rng = StdRng::seed_from_u64(7);
    for round in 0..80 {
        let n = rng.random_range(3..=8);
        let rows = random_rows(&mut rng, n, 0.7, 2);
        let expected = oracle_cost(&rows);
        assert_eq!(
            bnb_cost(&rows, SearchStrategy::ExplicitStack),
            expected,
            "round {} with {:?}",
            round,
            rows
        );
    }
}

#[test]
fn drivers_agree_on_tour_and_statistics() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..25 {
        let n = rng.random_range(2..=9);
        let rows = random_rows(&mut rng, n, 0.8, 500);

        let recursive = BnbSolver::new()
            .with_strategy(SearchStrategy::Recursive)
            .solve_rows(&rows, NoOperationMonitor::new())
            .unwrap();
        let stacked = BnbSolver::new()
            .with_strategy(SearchStrategy::ExplicitStack)
            .solve_rows(&rows, NoOperationMonitor::new())
            .unwrap();

        assert_eq!(recursive.result(), stacked.result());
        assert_eq!(
            recursive.statistics().without_timing(),
            stacked.statistics().without_timing()
        );
    }
}

#[test]
fn resolving_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(99);
    let rows = random_rows(&mut rng, 9, 0.9, 1000);
    let mut solver = BnbSolver::new();
    let first = solver.solve_rows(&rows, NoOperationMonitor::new()).unwrap();
    let second = solver.solve_rows(&rows, NoOperationMonitor::new()).unwrap();
    assert_eq!(first.result(), second.result());
    assert_eq!(first.statistics().nodes_explored, second.statistics().nodes_explored);
}

#[test]
fn isolated_node_fails_in_both_solvers() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..10 {
        let n = rng.random_range(3..=7);
        let mut rows = random_rows(&mut rng, n, 1.0, 50);
        let isolated = rng.random_range(0..n);
        rows[isolated] = vec![S; n];

        let bnb = salesman_bnb::solve(&rows).unwrap();
        let brute = salesman_brute::solve(&rows).unwrap();
        assert!(bnb.is_infeasible());
        assert!(brute.is_infeasible());
        assert_eq!(bnb.status().code(), -1);
        assert_eq!(brute.status().code(), -1);
    }
}

fn arb_rows(max_n: usize) -> impl Strategy<Value = Vec<Vec<i64>>> {
    (2..=max_n).prop_flat_map(|n| {
        proptest::collection::vec(
            proptest::collection::vec(proptest::option::weighted(0.75, 0i64..=60), n),
            n,
        )
        .prop_map(move |cells| {
            cells
                .into_iter()
                .enumerate()
                .map(|(i, row)| {
                    row.into_iter()
                        .enumerate()
                        .map(|(j, cell)| if i == j { S } else { cell.unwrap_or(S) })
                        .collect::<Vec<i64>>()
                })
                .collect::<Vec<Vec<i64>>>()
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn prop_bnb_equals_brute_force(rows in arb_rows(7)) {
        let expected = oracle_cost(&rows);
        let actual = bnb_cost(&rows, SearchStrategy::ExplicitStack);
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_root_bound_never_exceeds_optimum(rows in arb_rows(7)) {
        let outcome = salesman_bnb::solve(&rows).unwrap();
        if let Some(cost) = outcome.cost() {
            prop_assert!(outcome.statistics().root_lower_bound <= cost);
        }
    }
}
