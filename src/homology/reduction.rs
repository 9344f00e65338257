// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Elementary collapse reduction of a cubical chain complex.
//!
//! A pair `(a, b)` with `a` one dimension below `b` and `⟨∂b, a⟩ = ±1` can
//! be excised from the complex by a deformation retraction: erase `b` from
//! every boundary one dimension above, fold `∂b` into the boundary of every
//! sibling whose boundary touches `a`, and drop both cells from their
//! bases. Each collapse shrinks the complex by two cells while preserving
//! homology, which makes the boundary matrices handed to the solver
//! drastically smaller.
//!
//! The rewrite is simultaneous Gaussian elimination on the unit entry
//! `⟨∂b, a⟩` of the boundary matrix, so it is valid at every dimension, not
//! only at the top. Correctness hinges on two structural properties of this
//! crate's chains: coefficients that cancel to zero are erased from the
//! support, and a cube's boundary map is erased exactly when the cube is.
//! ∂∘∂ = 0 is re-verified on the rewritten boundaries after every collapse
//! in debug builds, and once on the whole complex after the driver loop in
//! all builds.

use tracing::{debug, info, trace};

use crate::error::HomologyError;
use crate::{ChainComplex, Cube};

/// Summary of one run of [`reduce_chain_complex`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReductionStats {
    /// The number of collapse pairs that were excised.
    pub removed_pairs: usize,
    /// The number of cells remaining in the complex afterwards.
    pub remaining_cells: usize,
}

/// Reduce `complex` in place by iterated elementary collapses.
///
/// The driver scans dimensions from the top downwards. At each dimension k
/// it searches the current basis for a pair `(a, b)` with `|⟨∂b, a⟩| = 1`;
/// the scan is staged against the mutation, so a found pair is cloned out
/// before the rewrite runs and the scan restarts at the same k on the
/// shrunken containers. A full sweep over all dimensions without a single
/// collapse terminates the loop. Every collapse removes two cells, so the
/// driver performs at most half the initial cell count of iterations.
///
/// Homology is preserved: computing invariant factors from the reduced
/// complex gives the same result as from the unreduced one.
///
/// # Errors
/// Returns [`HomologyError::BoundaryInvariant`] if ∂∘∂ = 0 fails to hold
/// afterwards; the complex must then be considered corrupt and must not be
/// handed to the solver.
pub fn reduce_chain_complex(
    complex: &mut ChainComplex,
) -> Result<ReductionStats, HomologyError> {
    let initial_cells = complex.total_cells();
    let mut removed_pairs = 0;

    let dimension = complex.dimension();
    if dimension > 0 {
        let mut collapsed = true;
        while collapsed {
            collapsed = false;
            for k in (1..=dimension).rev() {
                while let Some((a, b)) = find_collapse_pair(complex, k) {
                    trace!("collapsing pair a = {a}, b = {b} at dimension {k}");
                    apply_collapse(complex, k, &a, &b);
                    removed_pairs += 1;
                    collapsed = true;
                }
            }
        }
    }

    debug_assert!(2 * removed_pairs <= initial_cells);
    complex.verify_boundary_invariant()?;

    let remaining_cells = complex.total_cells();
    info!(
        "reduced chain complex from {initial_cells} to {remaining_cells} cells \
        ({removed_pairs} collapse pairs)"
    );
    Ok(ReductionStats {
        removed_pairs,
        remaining_cells,
    })
}

/// Scan dimension k for a collapse pair, without mutating anything.
///
/// Cubes b are visited in basis order; among the unit-coefficient entries of
/// ∂b the lexicographically smallest a is chosen, so the scan is
/// deterministic even though chain supports iterate in hash order.
fn find_collapse_pair(complex: &ChainComplex, k: usize) -> Option<(Cube, Cube)> {
    for b in &complex.bases[k] {
        let Some(boundary) = complex.boundaries[k - 1].get(b) else {
            continue;
        };
        let mut candidate: Option<&Cube> = None;
        for (a, coef) in boundary.iter() {
            if coef.abs() == 1 && candidate.map_or(true, |current| a < current) {
                candidate = Some(a);
            }
        }
        if let Some(a) = candidate {
            return Some((a.clone(), b.clone()));
        }
    }
    None
}

/// Excise the pair `(a, b)` at dimension k, rewriting neighbouring
/// boundaries so that homology is preserved.
fn apply_collapse(complex: &mut ChainComplex, k: usize, a: &Cube, b: &Cube) {
    let boundary_b = complex.boundaries[k - 1]
        .remove(b)
        .expect("collapse pair cube has no stored boundary");
    let alpha = boundary_b.coef(a);
    debug_assert_eq!(alpha.abs(), 1);

    // b is disappearing: anything one dimension up that had b in its
    // boundary now has zero contribution from it.
    if k < complex.dimension() {
        for c in &complex.bases[k + 1] {
            if let Some(boundary_c) = complex.boundaries[k].get_mut(c) {
                boundary_c.remove(b);
            }
        }
    }

    // Fold ∂b into every sibling whose boundary touches a. The x = a term
    // contributes -β·α·α = -β, so the a-coefficient of ∂c cancels exactly
    // and is erased by the chain's zero-free invariant.
    #[cfg(debug_assertions)]
    let mut rewritten: Vec<Cube> = Vec::new();
    for c in &complex.bases[k] {
        if c == b {
            continue;
        }
        let beta = match complex.boundaries[k - 1].get(c) {
            Some(boundary_c) => boundary_c.coef(a),
            None => 0,
        };
        if beta == 0 {
            continue;
        }
        let factor = -beta * alpha;
        let boundary_c = complex.boundaries[k - 1]
            .get_mut(c)
            .expect("sibling cube has no stored boundary");
        for (x, gamma) in boundary_b.iter() {
            boundary_c.insert_or_add(x.clone(), factor * gamma);
        }
        debug_assert_eq!(boundary_c.coef(a), 0);
        #[cfg(debug_assertions)]
        rewritten.push(c.clone());
    }

    // Check that each rewritten sibling still has a vanishing twice-iterated
    // boundary; the full complex is re-verified once after the driver loop.
    #[cfg(debug_assertions)]
    if k >= 2 {
        for c in &rewritten {
            let boundary_c = &complex.boundaries[k - 1][c];
            let mut twice = crate::Chain::new();
            for (x, coef) in boundary_c.iter() {
                for (y, face_coef) in complex.boundaries[k - 2][x].iter() {
                    twice.insert_or_add(y.clone(), coef * face_coef);
                }
            }
            debug_assert!(
                twice.is_empty(),
                "collapse of ({a}, {b}) at dimension {k} broke the boundary invariant"
            );
        }
    }

    remove_from_basis(&mut complex.bases[k], b);
    remove_from_basis(&mut complex.bases[k - 1], a);
    if k >= 2 {
        complex.boundaries[k - 2].remove(a);
    }
    debug!(
        "removed pair at dimension {k}; {} cells remain",
        complex.total_cells()
    );
}

/// Remove `cube` from a basis by shifting, preserving the canonical order
/// of the remaining cubes.
fn remove_from_basis(basis: &mut Vec<Cube>, cube: &Cube) {
    if let Some(position) = basis.iter().position(|candidate| candidate == cube) {
        basis.remove(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cube, CubicalSet};

    fn complex_of(cubes: impl IntoIterator<Item = Cube>) -> ChainComplex {
        ChainComplex::from_cubical_set(CubicalSet::from_cubes(cubes).unwrap())
    }

    #[test]
    fn square_collapses_to_a_vertex() {
        let mut complex = complex_of([Cube::top_cube(&[0, 0])]);
        assert_eq!(complex.total_cells(), 9);

        let stats = reduce_chain_complex(&mut complex).unwrap();

        assert_eq!(stats.removed_pairs, 4);
        assert_eq!(stats.remaining_cells, 1);
        assert_eq!(complex.basis(0).len(), 1);
        assert!(complex.basis(1).is_empty());
        assert!(complex.basis(2).is_empty());
    }

    #[test]
    fn solid_voxel_collapses_through_every_dimension() {
        // 8 vertices, 12 edges, 6 faces, 1 cube; collapses must fire at
        // dimensions 3, 2 and 1 to reach a single vertex.
        let mut complex = complex_of([Cube::top_cube(&[0, 0, 0])]);
        assert_eq!(complex.total_cells(), 27);

        let stats = reduce_chain_complex(&mut complex).unwrap();

        assert_eq!(stats.removed_pairs, 13);
        assert_eq!(stats.remaining_cells, 1);
        assert_eq!(complex.basis(0).len(), 1);
    }

    #[test]
    fn disjoint_squares_keep_two_components() {
        let mut complex = complex_of([
            Cube::top_cube(&[0, 0]),
            Cube::top_cube(&[0, 2]),
        ]);

        let stats = reduce_chain_complex(&mut complex).unwrap();

        assert_eq!(stats.remaining_cells, 2);
        assert_eq!(complex.basis(0).len(), 2);
    }

    #[test]
    fn annulus_reduction_preserves_a_loop() {
        let mut cubes = Vec::new();
        for x in 0..3i16 {
            for y in 0..3i16 {
                if x == 1 && y == 1 {
                    continue;
                }
                cubes.push(Cube::top_cube(&[x, y]));
            }
        }
        let mut complex = complex_of(cubes);
        let before = complex.total_cells();

        let stats = reduce_chain_complex(&mut complex).unwrap();

        assert!(stats.remaining_cells < before);
        // A circle cannot collapse below one vertex and one 1-cell, and the
        // 2-cells are all collapsible.
        assert!(complex.basis(2).is_empty());
        assert!(!complex.basis(0).is_empty());
        assert_eq!(
            complex.basis(1).len(),
            complex.basis(0).len(),
            "Euler characteristic of an annulus is zero"
        );
    }

    #[test]
    fn reduction_never_exceeds_the_initial_cell_count() {
        let mut complex = complex_of([
            Cube::top_cube(&[0, 0, 0]),
            Cube::top_cube(&[1, 0, 0]),
            Cube::top_cube(&[0, 1, 0]),
        ]);
        let initial_cells = complex.total_cells();

        let stats = reduce_chain_complex(&mut complex).unwrap();
        assert!(2 * stats.removed_pairs <= initial_cells);
        assert_eq!(stats.remaining_cells + 2 * stats.removed_pairs, initial_cells);
    }

    #[test]
    fn boundary_invariant_holds_after_reduction() {
        let mut complex = complex_of([
            Cube::top_cube(&[0, 0, 0]),
            Cube::top_cube(&[1, 1, 1]),
        ]);
        reduce_chain_complex(&mut complex).unwrap();
        assert!(complex.verify_boundary_invariant().is_ok());
    }

    #[test]
    fn reducing_a_point_is_a_no_op() {
        let mut complex = complex_of([Cube::point(&[0, 0])]);
        let stats = reduce_chain_complex(&mut complex).unwrap();
        assert_eq!(stats.removed_pairs, 0);
        assert_eq!(stats.remaining_cells, 1);
    }

    #[test]
    fn reducing_an_empty_complex() {
        let mut complex = ChainComplex::from_cubical_set(CubicalSet::new());
        let stats = reduce_chain_complex(&mut complex).unwrap();
        assert_eq!(stats.removed_pairs, 0);
        assert_eq!(stats.remaining_cells, 0);
    }
}
