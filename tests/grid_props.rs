// tests/grid_props.rs
//
// Model-based checks: `SparseGrid` against a plain `BTreeMap`, and `ProxyGrid`
// (driven through cells, including overlapping ones) against `SparseGrid`.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sparse_grid::{Cell, ProxyGrid, SparseGrid};

const DEFAULT: i32 = 0;

// ===================================================================
// ---------------------------- Strategies --------------------------
// ===================================================================

fn coords_strategy<const K: usize>() -> impl Strategy<Value = [isize; K]> {
    proptest::collection::vec(-2isize..=2, K).prop_map(|v| std::array::from_fn(|i| v[i]))
}

// Small value range so the default shows up often.
fn value_strategy() -> impl Strategy<Value = i32> {
    -1..=2
}

#[derive(Debug, Clone)]
enum Op<const K: usize> {
    /// Direct write on the grid.
    Set([isize; K], i32),
    /// Write through a cell that is committed immediately.
    Write([isize; K], i32),
    /// Open a cell, set its working value and keep it open.
    Open([isize; K], i32),
    /// Release the n-th open cell (modulo the number open).
    Close(usize),
}

fn op_strategy<const K: usize>() -> impl Strategy<Value = Op<K>> {
    prop_oneof![
        (coords_strategy::<K>(), value_strategy()).prop_map(|(c, v)| Op::Set(c, v)),
        (coords_strategy::<K>(), value_strategy()).prop_map(|(c, v)| Op::Write(c, v)),
        (coords_strategy::<K>(), value_strategy()).prop_map(|(c, v)| Op::Open(c, v)),
        any::<usize>().prop_map(Op::Close),
    ]
}

// ===================================================================
// ----------------------------- Checks -----------------------------
// ===================================================================

fn check_sparse_against_map<const K: usize>(ops: Vec<([isize; K], i32)>) {
    let mut grid = SparseGrid::<i32, K>::with_default(DEFAULT);
    let mut model = BTreeMap::new();

    for (coords, v) in ops {
        grid.set(coords, v);
        if v == DEFAULT { model.remove(&coords); } else { model.insert(coords, v); }

        assert_eq!(*grid.get(coords), v);
        assert_eq!(grid.size(), model.len());
    }

    let items: Vec<_> = grid.iter().map(|(p, v)| (p.into_coords(), *v)).collect();
    let expected: Vec<_> = model.into_iter().collect();
    assert_eq!(items, expected);
}

fn assert_same_state<const K: usize>(proxy: &ProxyGrid<i32, K>, model: &SparseGrid<i32, K>) {
    assert_eq!(proxy.size(), model.size());
    let items: Vec<_> = proxy.iter().collect();
    let expected: Vec<_> = model.iter().map(|(p, v)| (p, *v)).collect();
    assert_eq!(items, expected);
}

fn check_proxy_against_sparse<const K: usize>(ops: Vec<Op<K>>) {
    let proxy = ProxyGrid::<i32, K>::with_default(DEFAULT);
    let mut model = SparseGrid::<i32, K>::with_default(DEFAULT);
    let mut open: Vec<Cell<'_, i32, K>> = Vec::new();

    for op in ops {
        match op {
            Op::Set(c, v) => {
                proxy.set(c, v);
                model.set(c, v);
            }
            Op::Write(c, v) => {
                proxy.cell(c).set(v);
                model.set(c, v);
            }
            Op::Open(c, v) => {
                let mut cell = proxy.cell(c);
                cell.set(v);
                open.push(cell);
            }
            Op::Close(n) => {
                if open.is_empty() { continue; }
                let cell = open.remove(n % open.len());
                model.set_at(cell.position(), *cell.get());
                drop(cell);
            }
        }
        assert_same_state(&proxy, &model);
    }

    while let Some(cell) = open.pop() {
        model.set_at(cell.position(), *cell.get());
        drop(cell);
    }
    assert_same_state(&proxy, &model);
    assert_eq!(proxy.held(), 0);
    drop(open);
    assert_eq!(proxy.into_inner(), model);
}

proptest! {
    #[test]
    fn sparse_matches_map_2d(ops in proptest::collection::vec((coords_strategy::<2>(), value_strategy()), 1..200)) {
        check_sparse_against_map::<2>(ops);
    }

    #[test]
    fn sparse_matches_map_3d(ops in proptest::collection::vec((coords_strategy::<3>(), value_strategy()), 1..200)) {
        check_sparse_against_map::<3>(ops);
    }

    #[test]
    fn proxy_matches_sparse_1d(ops in proptest::collection::vec(op_strategy::<1>(), 1..200)) {
        check_proxy_against_sparse::<1>(ops);
    }

    #[test]
    fn proxy_matches_sparse_2d(ops in proptest::collection::vec(op_strategy::<2>(), 1..200)) {
        check_proxy_against_sparse::<2>(ops);
    }
}

// ===================================================================
// ------------------------- Seeded Workload ------------------------
// ===================================================================

#[test]
fn seeded_overlapping_cells_keep_size_consistent() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let grid = ProxyGrid::<i32, 3>::zeroed();
    let mut open = Vec::new();

    for _ in 0..2_000 {
        let coords = [
            rng.random_range(-1i64..=1) as isize,
            rng.random_range(-1i64..=1) as isize,
            rng.random_range(-1i64..=1) as isize,
        ];
        if rng.random_bool(0.4) || open.is_empty() {
            let mut cell = grid.index(coords[0]).index(coords[1]).index(coords[2]).cell();
            cell.set(rng.random_range(0..3));
            open.push(cell);
        } else {
            let n = rng.random_range(0..open.len());
            drop(open.swap_remove(n));
        }

        assert_eq!(grid.size(), grid.iter().count());
        assert!(grid.iter().all(|(_, v)| v != 0));
    }

    open.clear();
    assert_eq!(grid.held(), 0);
    assert_eq!(grid.size(), grid.to_sparse().size());
}
