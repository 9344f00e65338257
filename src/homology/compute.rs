// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use tracing::info;

use crate::error::HomologyError;
use crate::homology::matrices::boundary_matrices;
use crate::homology::reduction::reduce_chain_complex;
use crate::homology::solver::{HomologySolver, SmithSolver};
use crate::{ChainComplex, CubicalSet};

/// Compute the integer homology of a cubical set with the built-in
/// [`SmithSolver`].
///
/// The result holds, for each dimension k from 0 to the dimension of the
/// set, the invariant factors of H_k(K; ℤ): β_k zeros followed by the
/// torsion coefficients in divisibility order. An empty cubical set yields
/// an empty result.
///
/// With `use_reduction` enabled the chain complex is shrunk by elementary
/// collapses before the boundary matrices are assembled; the returned
/// invariant factors are identical either way, the reduced route just hands
/// the solver far smaller matrices.
///
/// # Errors
/// Propagates [`HomologyError::BoundaryInvariant`] from a defective
/// reduction and solver failures unchanged.
///
/// # Examples
///
/// ```rust
/// use cubehom::{compute_homology, Cube, CubicalSet};
///
/// // A single unit square is contractible.
/// let set = CubicalSet::from_cubes([Cube::top_cube(&[0, 0])]).unwrap();
/// let homology = compute_homology(set, true).unwrap();
/// assert_eq!(homology, vec![vec![0], vec![], vec![]]);
/// ```
pub fn compute_homology(
    set: CubicalSet,
    use_reduction: bool,
) -> Result<Vec<Vec<i64>>, HomologyError> {
    compute_homology_with(set, use_reduction, &SmithSolver)
}

/// Compute the integer homology of a cubical set with a caller-provided
/// solver.
///
/// See [`compute_homology`] for the output contract.
///
/// # Errors
/// Propagates reduction invariant violations and solver failures unchanged.
pub fn compute_homology_with<S: HomologySolver>(
    set: CubicalSet,
    use_reduction: bool,
    solver: &S,
) -> Result<Vec<Vec<i64>>, HomologyError> {
    let mut complex = ChainComplex::from_cubical_set(set);
    if complex.is_empty() {
        return Ok(Vec::new());
    }
    debug_assert!(complex.verify_boundary_invariant().is_ok());

    if use_reduction {
        reduce_chain_complex(&mut complex)?;
    }

    let ranks: Vec<usize> = (0..=complex.dimension())
        .map(|k| complex.basis(k).len())
        .collect();
    let matrices = boundary_matrices(&complex);
    info!(
        "solving homology from {} boundary matrices over chain groups of ranks {ranks:?}",
        matrices.len()
    );
    solver.homology(&ranks, &matrices)
}
