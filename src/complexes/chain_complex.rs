// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::error::HomologyError;
use crate::{Chain, Cube, CubicalSet};

/// The chain complex of a cubical set: the chain-group bases `E[0..d]` and
/// the sparse boundary operators between them.
///
/// `basis(k)` holds exactly the k-dimensional cubes reachable from the
/// initial cubes by iterated primary-face closure, sorted lexicographically
/// so that the position of a cube is its *canonical index*. The boundary of
/// each cube of positive dimension is stored as a sparse [`Chain`] whose
/// support is a subset of the basis one dimension below.
///
/// The complex is built once from a [`CubicalSet`], optionally mutated in
/// place by [`reduce_chain_complex`](crate::reduce_chain_complex), and then
/// consumed read-only by the matrix assembler. Reduction removes basis cubes
/// by shifting, so the bases stay in canonical order throughout.
#[derive(Clone, Debug)]
pub struct ChainComplex {
    pub(crate) bases: Vec<Vec<Cube>>,
    pub(crate) boundaries: Vec<HashMap<Cube, Chain<Cube>>>,
}

impl ChainComplex {
    /// Build the chain complex of `set` by downward face closure.
    ///
    /// The set is drained: each popped cube is added to the basis of its
    /// dimension, and its primary faces are queued for processing and added
    /// to the basis one dimension below, duplicates collapsing by structural
    /// equality. Once the closure is complete every basis is sorted into
    /// canonical (lexicographic) order and the signed boundary of every cube
    /// of positive dimension is computed and stored.
    #[must_use]
    pub fn from_cubical_set(mut set: CubicalSet) -> Self {
        let Some(dimension) = set.dimension() else {
            return Self {
                bases: Vec::new(),
                boundaries: Vec::new(),
            };
        };
        let dimension = dimension as usize;
        info!("building chain groups for a dimension {dimension} cubical set");

        let mut groups: Vec<HashSet<Cube>> = vec![HashSet::new(); dimension + 1];
        while let Some(cube) = set.pop() {
            let k = cube.dimension() as usize;
            if k > 0 {
                for face in cube.primary_faces() {
                    // A face already present in its group has been queued
                    // before; queue each cube at most once.
                    if groups[k - 1].insert(face.clone()) {
                        set.insert_unchecked(face);
                    }
                }
            }
            groups[k].insert(cube);
        }

        let mut bases: Vec<Vec<Cube>> = Vec::with_capacity(groups.len());
        for group in groups {
            let mut basis: Vec<Cube> = group.into_iter().collect();
            basis.sort();
            bases.push(basis);
        }
        info!(
            "chain group sizes: {:?}",
            bases.iter().map(Vec::len).collect::<Vec<_>>()
        );

        let mut boundaries: Vec<HashMap<Cube, Chain<Cube>>> = Vec::new();
        for k in 1..bases.len() {
            let mut boundary_map = HashMap::with_capacity(bases[k].len());
            for cube in &bases[k] {
                boundary_map.insert(cube.clone(), cube.boundary());
            }
            boundaries.push(boundary_map);
        }
        debug!("stored boundaries for {} chain groups", boundaries.len());

        Self { bases, boundaries }
    }

    /// Whether the complex holds no cells at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bases.iter().all(Vec::is_empty)
    }

    /// The dimension of the complex: the largest k with a (possibly empty)
    /// chain group, i.e. the dimension of the originating cubical set.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.bases.len().saturating_sub(1)
    }

    /// The canonical basis of the k-th chain group. Out-of-range dimensions
    /// yield an empty basis.
    #[must_use]
    pub fn basis(&self, k: usize) -> &[Cube] {
        self.bases.get(k).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The stored boundary chain of `cube`, or `None` for 0-dimensional
    /// cubes and cubes outside the complex.
    #[must_use]
    pub fn boundary_of(&self, cube: &Cube) -> Option<&Chain<Cube>> {
        let k = cube.dimension() as usize;
        if k == 0 {
            return None;
        }
        self.boundaries.get(k - 1)?.get(cube)
    }

    /// The total number of cells Σ_k |E[k]|.
    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.bases.iter().map(Vec::len).sum()
    }

    /// Check that ∂∘∂ = 0 on every basis cube of dimension at least 2.
    ///
    /// Returns [`HomologyError::BoundaryInvariant`] naming the dimension of
    /// the first offending cube. The reduction driver runs this after every
    /// rewrite in debug builds and once at the end in all builds.
    pub fn verify_boundary_invariant(&self) -> Result<(), HomologyError> {
        for k in 2..self.bases.len() {
            for cube in &self.bases[k] {
                let Some(boundary) = self.boundaries[k - 1].get(cube) else {
                    continue;
                };
                let mut twice = Chain::new();
                for (face, coef) in boundary.iter() {
                    if let Some(face_boundary) = self.boundaries[k - 2].get(face) {
                        for (cell, face_coef) in face_boundary.iter() {
                            twice.insert_or_add(cell.clone(), coef * face_coef);
                        }
                    }
                }
                if !twice.is_empty() {
                    return Err(HomologyError::BoundaryInvariant { dimension: k });
                }
            }
        }
        Ok(())
    }
}
