// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `cubehom` crate computes the integer homology groups of finite
//! cubical sets built from pixel/voxel grids, returning for each dimension
//! the invariant-factor decomposition of H_k(K; ℤ).
//!
//! The pipeline: a [`CubicalSet`] of elementary cubes is closed downward
//! under primary faces into a [`ChainComplex`], optionally shrunk in place
//! by homology-preserving elementary collapses
//! ([`reduce_chain_complex`]), materialized as integer boundary matrices
//! over the canonical bases, and handed to a [`HomologySolver`] — by
//! default [`SmithSolver`], which reads free ranks and torsion coefficients
//! off Smith normal forms.
//!
//! ```rust
//! use cubehom::{compute_homology, PixelGrid};
//!
//! // A 3x3 block of squares with the center removed is an annulus: one
//! // component, one loop, no higher homology.
//! let annulus = PixelGrid::from_fn(3, 3, |x, y| !(x == 1 && y == 1));
//! let homology = compute_homology(annulus.cubical_set(), true).unwrap();
//!
//! assert_eq!(homology, vec![vec![0], vec![0], vec![]]);
//! ```

#![warn(missing_docs)]

pub use crate::algebra::Chain;
pub use crate::complexes::{ChainComplex, Cube, CubicalSet, Interval, MAX_EMBEDDING};
pub use crate::error::HomologyError;
pub use crate::grid::{PixelGrid, VoxelGrid};
pub use crate::homology::{
    boundary_matrices, canonical_coordinates, chain_from_canonical_coordinates, compute_homology,
    compute_homology_with, reduce_chain_complex, HomologySolver, ReductionStats, SmithSolver,
};

mod algebra;
mod complexes;
mod error;
mod grid;
mod homology;
