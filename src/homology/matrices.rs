// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use ndarray::Array2;
use tracing::debug;

use crate::{Chain, ChainComplex, Cube};

/// The canonical coordinates of `chain` relative to the ordered basis
/// `basis`: entry i is the coefficient of `basis[i]` in the chain, with 0
/// for basis cubes outside the support.
#[must_use]
pub fn canonical_coordinates(chain: &Chain<Cube>, basis: &[Cube]) -> Vec<i64> {
    basis.iter().map(|cube| chain.coef(cube)).collect()
}

/// Rebuild a chain from its canonical coordinates relative to `basis`.
/// Zero entries contribute no support, so this inverts
/// [`canonical_coordinates`] for chains supported in the basis.
///
/// # Panics
/// Panics if `coordinates` and `basis` have different lengths.
#[must_use]
pub fn chain_from_canonical_coordinates(coordinates: &[i64], basis: &[Cube]) -> Chain<Cube> {
    assert_eq!(
        coordinates.len(),
        basis.len(),
        "coordinate vector length must match basis size"
    );
    coordinates
        .iter()
        .zip(basis.iter())
        .filter(|(coef, _)| **coef != 0)
        .map(|(coef, cube)| (cube.clone(), *coef))
        .collect()
}

/// Materialize the boundary operators of `complex` as integer matrices over
/// the canonical bases.
///
/// The k-th returned matrix (k starting at 1) has |E[k−1]| rows and |E[k]|
/// columns; column j holds the canonical coordinates of ∂(E[k][j]) in
/// E[k−1]. Row and column indices reflect the basis order at the time of
/// the call, which stays canonical through reduction.
#[must_use]
pub fn boundary_matrices(complex: &ChainComplex) -> Vec<Array2<i64>> {
    let mut matrices = Vec::new();
    for k in 1..=complex.dimension() {
        let rows = complex.basis(k - 1).len();
        let columns = complex.basis(k).len();
        let mut matrix = Array2::<i64>::zeros((rows, columns));

        for (j, cube) in complex.basis(k).iter().enumerate() {
            let Some(boundary) = complex.boundary_of(cube) else {
                continue;
            };
            let column = canonical_coordinates(boundary, complex.basis(k - 1));
            for (i, coef) in column.into_iter().enumerate() {
                if coef != 0 {
                    matrix[[i, j]] = coef;
                }
            }
        }

        debug!("assembled boundary matrix {k} with shape {rows} x {columns}");
        matrices.push(matrix);
    }
    matrices
}
