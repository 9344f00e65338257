// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use ndarray::Array2;
use tracing::debug;

use crate::error::HomologyError;
use crate::homology::snf::smith_invariant_factors;

/// A solver turning a chain complex, presented as integer boundary
/// matrices, into per-dimension invariant-factor decompositions.
///
/// The input is the sequence of chain-group ranks (rank C_0, …, rank C_d)
/// together with the boundary matrices (M_1, …, M_d), where M_k has
/// rank C_{k−1} rows, rank C_k columns, and M_{k−1} · M_k = 0. The ranks
/// are passed alongside the matrices because the degenerate d = 0 complex
/// has no matrices at all. For each k the solver returns the invariant
/// factors of H_k: first β_k zeros (the free rank), then the torsion
/// coefficients t_1 | t_2 | … | t_r, each at least 2 and each dividing the
/// next.
///
/// The core treats implementations as black boxes and never depends on
/// their internal representation.
pub trait HomologySolver {
    /// Compute the invariant factors of H_0, …, H_d.
    ///
    /// # Errors
    /// Implementations report malformed input (mismatched ranks and matrix
    /// shapes) and internal failures as [`HomologyError::Solver`].
    fn homology(
        &self,
        ranks: &[usize],
        boundaries: &[Array2<i64>],
    ) -> Result<Vec<Vec<i64>>, HomologyError>;
}

/// The built-in [`HomologySolver`]: Smith normal form over ℤ.
///
/// For each k, β_k = rank C_k − rank M_k − rank M_{k+1}, and the torsion of
/// H_k consists of the invariant factors of M_{k+1} that exceed 1.
///
/// # Examples
///
/// ```rust
/// use cubehom::{HomologySolver, SmithSolver};
/// use ndarray::array;
///
/// // The minimal cell structure of the projective plane: one cell per
/// // dimension, with 2-boundary multiplying by 2.
/// let ranks = [1, 1, 1];
/// let boundaries = [array![[0]], array![[2]]];
///
/// let homology = SmithSolver.homology(&ranks, &boundaries).unwrap();
/// assert_eq!(homology, vec![vec![0], vec![2], vec![]]);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SmithSolver;

impl HomologySolver for SmithSolver {
    fn homology(
        &self,
        ranks: &[usize],
        boundaries: &[Array2<i64>],
    ) -> Result<Vec<Vec<i64>>, HomologyError> {
        if ranks.is_empty() {
            if boundaries.is_empty() {
                return Ok(Vec::new());
            }
            return Err(HomologyError::Solver(
                "boundary matrices supplied for an empty chain complex".to_string(),
            ));
        }
        if boundaries.len() + 1 != ranks.len() {
            return Err(HomologyError::Solver(format!(
                "{} chain groups require {} boundary matrices, got {}",
                ranks.len(),
                ranks.len() - 1,
                boundaries.len()
            )));
        }
        for (k, matrix) in boundaries.iter().enumerate() {
            let expected = (ranks[k], ranks[k + 1]);
            if matrix.dim() != expected {
                return Err(HomologyError::Solver(format!(
                    "boundary matrix {} has shape {:?}, expected {:?}",
                    k + 1,
                    matrix.dim(),
                    expected
                )));
            }
        }

        // factor_lists[k] holds the invariant factors of M_{k+1}.
        let factor_lists: Vec<Vec<i64>> = boundaries
            .iter()
            .map(|matrix| smith_invariant_factors(matrix.clone()))
            .collect();

        let mut homology = Vec::with_capacity(ranks.len());
        for (k, rank) in ranks.iter().enumerate() {
            // Rank of ∂_k out of C_k, and of ∂_{k+1} into it.
            let outgoing = if k > 0 { factor_lists[k - 1].len() } else { 0 };
            let incoming = factor_lists.get(k).map_or(0, Vec::len);

            let cycles = rank.checked_sub(outgoing).ok_or_else(|| {
                HomologyError::Solver(format!(
                    "boundary matrix {k} has rank exceeding its column count"
                ))
            })?;
            let betti = cycles.checked_sub(incoming).ok_or_else(|| {
                HomologyError::Solver(format!(
                    "chain group {k} has more boundaries than cycles; the input is not \
                    a chain complex"
                ))
            })?;

            let mut factors = vec![0i64; betti];
            if let Some(incoming_factors) = factor_lists.get(k) {
                factors.extend(incoming_factors.iter().filter(|factor| **factor > 1));
            }
            debug!("H_{k} has free rank {betti} and {} torsion factors", factors.len() - betti);
            homology.push(factors);
        }

        Ok(homology)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{array, Array2};

    use super::*;

    #[test]
    fn point_complex() {
        let homology = SmithSolver.homology(&[1], &[]).unwrap();
        assert_eq!(homology, vec![vec![0]]);
    }

    #[test]
    fn interval_complex() {
        // Two vertices, one edge with boundary [1] - [0].
        let homology = SmithSolver
            .homology(&[2, 1], &[array![[-1], [1]]])
            .unwrap();
        assert_eq!(homology, vec![vec![0], vec![]]);
    }

    #[test]
    fn torus_cell_structure() {
        // One 0-cell, two 1-cells, one 2-cell, all boundaries zero.
        let boundaries = [
            Array2::zeros((1, 2)),
            Array2::zeros((2, 1)),
        ];
        let homology = SmithSolver.homology(&[1, 2, 1], &boundaries).unwrap();
        assert_eq!(homology, vec![vec![0], vec![0, 0], vec![0]]);
    }

    #[test]
    fn projective_plane_has_two_torsion() {
        let boundaries = [array![[0]], array![[2]]];
        let homology = SmithSolver.homology(&[1, 1, 1], &boundaries).unwrap();
        assert_eq!(homology, vec![vec![0], vec![2], vec![]]);
    }

    #[test]
    fn klein_bottle_mixes_free_and_torsion() {
        // One 0-cell, two 1-cells a and b, one 2-cell glued along
        // a b a b^{-1}: the 2-boundary is 2a.
        let boundaries = [Array2::zeros((1, 2)), array![[2], [0]]];
        let homology = SmithSolver.homology(&[1, 2, 1], &boundaries).unwrap();
        assert_eq!(homology, vec![vec![0], vec![0, 2], vec![]]);
    }

    #[test]
    fn sphere_cell_structure() {
        let boundaries = [Array2::zeros((1, 1)), Array2::zeros((1, 1))];
        let homology = SmithSolver.homology(&[1, 1, 1], &boundaries).unwrap();
        assert_eq!(homology, vec![vec![0], vec![], vec![0]]);
    }

    #[test]
    fn empty_complex() {
        let homology = SmithSolver.homology(&[], &[]).unwrap();
        assert!(homology.is_empty());
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let result = SmithSolver.homology(&[2, 1], &[array![[1, 0], [0, 1]]]);
        assert!(matches!(result, Err(HomologyError::Solver(_))));

        let result = SmithSolver.homology(&[2, 1], &[]);
        assert!(matches!(result, Err(HomologyError::Solver(_))));
    }
}
