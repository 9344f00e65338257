// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Smith normal form of integer matrices by elementary operations.
//!
//! The computation diagonalizes the matrix with determinant-one 2x2 row and
//! column transforms built from extended gcds, then normalizes the diagonal
//! into a divisibility chain. Only the invariant factors are needed here,
//! so no transform matrices are accumulated.

use std::cmp::min;

use ndarray::Array2;
use tracing::{debug, trace};

/// The invariant factors of `target`: the nonzero diagonal of its Smith
/// normal form, each positive and dividing the next. The number of factors
/// is the rank of the matrix.
pub(crate) fn smith_invariant_factors(mut target: Array2<i64>) -> Vec<i64> {
    debug!("computing smith normal form of a {:?} matrix", target.dim());
    if target.iter().all(|entry| *entry == 0) {
        return Vec::new();
    }

    eliminate_all(&mut target);

    let n = min(target.nrows(), target.ncols());
    let mut factors: Vec<i64> = (0..n)
        .map(|i| target[[i, i]].abs())
        .take_while(|factor| *factor != 0)
        .collect();
    normalize_divisibility(&mut factors);

    debug!("smith normal form has rank {}", factors.len());
    factors
}

/// Diagonalize the matrix: for each column, pick a pivot, move it onto the
/// diagonal, and clear its row and column.
fn eliminate_all(target: &mut Array2<i64>) {
    let (rows, columns) = target.dim();
    let mut i = 0;

    for j in 0..columns {
        if i >= rows {
            break;
        }
        if eliminate_step(target, i, j) {
            i += 1;
        }
    }
}

fn eliminate_step(target: &mut Array2<i64>, i: usize, j: usize) -> bool {
    let Some(pivot_row) = select_pivot(target, i, j) else {
        return false;
    };
    trace!("selected pivot ({pivot_row}, {j})");

    if pivot_row > i {
        swap_rows(target, i, pivot_row);
    }
    if j > i {
        swap_cols(target, i, j);
    }
    if target[[i, i]] < 0 {
        negate_col(target, i);
    }

    eliminate_at(target, i, i);
    true
}

/// Among the rows at or below `below`, pick the one holding a nonzero entry
/// in column `j` with the fewest nonzero entries overall. Sparse pivots
/// keep fill-in, and with it coefficient growth, low.
fn select_pivot(target: &Array2<i64>, below: usize, j: usize) -> Option<usize> {
    (below..target.nrows())
        .filter(|row| target[[*row, j]] != 0)
        .map(|row| (row, row_occupancy(target, row)))
        .min_by_key(|(_, occupancy)| *occupancy)
        .map(|(row, _)| row)
}

fn row_occupancy(target: &Array2<i64>, i: usize) -> usize {
    target.row(i).iter().filter(|entry| **entry != 0).count()
}

fn col_occupancy(target: &Array2<i64>, j: usize) -> usize {
    target.column(j).iter().filter(|entry| **entry != 0).count()
}

/// Clear row `i` and column `j` around the pivot at `(i, j)`.
fn eliminate_at(target: &mut Array2<i64>, i: usize, j: usize) {
    debug_assert_ne!(target[[i, j]], 0);

    while row_occupancy(target, i) > 1 || col_occupancy(target, j) > 1 {
        let modified = eliminate_col(target, i, j) | eliminate_row(target, i, j);
        debug_assert!(modified, "pivot elimination made no progress");
    }
}

fn eliminate_row(target: &mut Array2<i64>, i: usize, j: usize) -> bool {
    let mut modified = false;

    for j1 in 0..target.ncols() {
        if j1 == j || target[[i, j1]] == 0 {
            continue;
        }

        // d = sx + ty with a = x/d, b = y/d; the transform sends the
        // column pair (x, y) to (d, 0) and has determinant sa + tb = 1.
        let x = target[[i, j]];
        let y = target[[i, j1]];
        let (d, s, t) = gcdx(x, y);
        let (a, b) = (x / d, y / d);

        col_transform(target, [s, t, -b, a], j, j1);
        modified = true;
    }

    modified
}

fn eliminate_col(target: &mut Array2<i64>, i: usize, j: usize) -> bool {
    let mut modified = false;

    for i1 in 0..target.nrows() {
        if i1 == i || target[[i1, j]] == 0 {
            continue;
        }

        let x = target[[i, j]];
        let y = target[[i1, j]];
        let (d, s, t) = gcdx(x, y);
        let (a, b) = (x / d, y / d);

        row_transform(target, [s, t, -b, a], i, i1);
        modified = true;
    }

    modified
}

/// Replace rows (i, j) with (a*row_i + b*row_j, c*row_i + d*row_j).
fn row_transform(target: &mut Array2<i64>, comps: [i64; 4], i: usize, j: usize) {
    let [a, b, c, d] = comps;
    debug_assert_eq!(a * d - b * c, 1);

    for k in 0..target.ncols() {
        let (x, y) = (target[[i, k]], target[[j, k]]);
        target[[i, k]] = a * x + b * y;
        target[[j, k]] = c * x + d * y;
    }
}

/// Replace columns (i, j) with (a*col_i + b*col_j, c*col_i + d*col_j).
fn col_transform(target: &mut Array2<i64>, comps: [i64; 4], i: usize, j: usize) {
    let [a, b, c, d] = comps;
    debug_assert_eq!(a * d - b * c, 1);

    for k in 0..target.nrows() {
        let (x, y) = (target[[k, i]], target[[k, j]]);
        target[[k, i]] = a * x + b * y;
        target[[k, j]] = c * x + d * y;
    }
}

fn swap_rows(target: &mut Array2<i64>, i: usize, j: usize) {
    for k in 0..target.ncols() {
        target.swap([i, k], [j, k]);
    }
}

fn swap_cols(target: &mut Array2<i64>, i: usize, j: usize) {
    for k in 0..target.nrows() {
        target.swap([k, i], [k, j]);
    }
}

fn negate_col(target: &mut Array2<i64>, j: usize) {
    for k in 0..target.nrows() {
        target[[k, j]] = -target[[k, j]];
    }
}

/// Massage a diagonal into a divisibility chain: replace non-dividing pairs
/// (x, y) with (gcd, lcm) until every factor divides the next.
fn normalize_divisibility(factors: &mut [i64]) {
    if factors.is_empty() {
        return;
    }

    loop {
        let mut stable = true;
        for i in 0..factors.len() - 1 {
            let (x, y) = (factors[i], factors[i + 1]);
            if y % x != 0 {
                let (d, _, _) = gcdx(x, y);
                factors[i] = d;
                factors[i + 1] = x / d * y;
                stable = false;
            }
        }
        if stable {
            break;
        }
    }
}

/// Extended Euclid: returns `(d, s, t)` with `d = gcd(x, y) > 0` and
/// `s*x + t*y = d`. When `x/d` is a unit the trivial cofactors
/// `(x/d, 0)` are preferred, matching the pivot-preserving transforms
/// above.
fn gcdx(x: i64, y: i64) -> (i64, i64, i64) {
    let (mut r0, mut r1) = (x, y);
    let (mut s0, mut s1) = (1i64, 0i64);
    let (mut t0, mut t1) = (0i64, 1i64);

    while r1 != 0 {
        let q = r0 / r1;
        (r0, r1) = (r1, r0 - q * r1);
        (s0, s1) = (s1, s0 - q * s1);
        (t0, t1) = (t1, t0 - q * t1);
    }
    let (d, s, t) = if r0 < 0 { (-r0, -s0, -t0) } else { (r0, s0, t0) };

    let a = x / d;
    if a.abs() == 1 {
        (d, a, 0)
    } else {
        (d, s, t)
    }
}
