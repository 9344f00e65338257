// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Grid collaborators turning boolean pixel/voxel arrays into cubical sets.
//!
//! An active element (x, y) of a 2-D grid stands for the unit square with
//! lower-left corner (x, y), i.e. the elementary cube
//! `[x, x+1] × [y, y+1]`; the 3-D grid is analogous. Any other producer of
//! elementary cubes with a common embedding number is an equally valid
//! input to the core — these two cover the common raster sources.

use std::collections::HashSet;

use ndarray::{Array2, Array3};

use crate::{Cube, CubicalSet};

/// A rows × columns boolean pixel grid.
///
/// # Examples
///
/// ```rust
/// use cubehom::PixelGrid;
///
/// // A 3x3 annulus: every cell active except the center.
/// let grid = PixelGrid::from_fn(3, 3, |x, y| !(x == 1 && y == 1));
/// assert_eq!(grid.cubical_set().len(), 8);
/// ```
#[derive(Clone, Debug)]
pub struct PixelGrid {
    cells: Array2<bool>,
}

impl PixelGrid {
    /// Create an all-inactive grid.
    ///
    /// # Panics
    /// Panics if either side exceeds `i16::MAX`, the coordinate range of
    /// elementary intervals.
    #[must_use]
    pub fn new(rows: usize, columns: usize) -> Self {
        Self::from_array(Array2::from_elem((rows, columns), false))
    }

    /// Wrap an existing boolean array.
    ///
    /// # Panics
    /// Panics if either side exceeds `i16::MAX`.
    #[must_use]
    pub fn from_array(cells: Array2<bool>) -> Self {
        assert!(
            cells.nrows() <= i16::MAX as usize && cells.ncols() <= i16::MAX as usize,
            "grid sides must fit in the lattice coordinate range"
        );
        Self { cells }
    }

    /// Build a grid by evaluating `active` at every (x, y).
    #[must_use]
    pub fn from_fn(rows: usize, columns: usize, active: impl Fn(usize, usize) -> bool) -> Self {
        Self::from_array(Array2::from_shape_fn((rows, columns), |(x, y)| active(x, y)))
    }

    /// The number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// The number of columns.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.cells.ncols()
    }

    /// Whether the cell at (x, y) is active.
    #[must_use]
    pub fn is_active(&self, x: usize, y: usize) -> bool {
        self.cells[[x, y]]
    }

    /// Activate or deactivate the cell at (x, y).
    pub fn set(&mut self, x: usize, y: usize, active: bool) {
        self.cells[[x, y]] = active;
    }

    /// The cubical set of all active cells: each active (x, y) contributes
    /// the unit square with lower-left corner (x, y).
    #[must_use]
    pub fn cubical_set(&self) -> CubicalSet {
        let mut cubes = HashSet::new();
        for ((x, y), active) in self.cells.indexed_iter() {
            if *active {
                cubes.insert(Cube::top_cube(&[x as i16, y as i16]));
            }
        }
        CubicalSet::from_parts(2, cubes)
    }
}

/// A rows × columns × steps boolean voxel grid.
#[derive(Clone, Debug)]
pub struct VoxelGrid {
    cells: Array3<bool>,
}

impl VoxelGrid {
    /// Create an all-inactive grid.
    ///
    /// # Panics
    /// Panics if any side exceeds `i16::MAX`.
    #[must_use]
    pub fn new(rows: usize, columns: usize, steps: usize) -> Self {
        Self::from_array(Array3::from_elem((rows, columns, steps), false))
    }

    /// Wrap an existing boolean array.
    ///
    /// # Panics
    /// Panics if any side exceeds `i16::MAX`.
    #[must_use]
    pub fn from_array(cells: Array3<bool>) -> Self {
        assert!(
            cells.dim().0 <= i16::MAX as usize
                && cells.dim().1 <= i16::MAX as usize
                && cells.dim().2 <= i16::MAX as usize,
            "grid sides must fit in the lattice coordinate range"
        );
        Self { cells }
    }

    /// Build a grid by evaluating `active` at every (x, y, z).
    #[must_use]
    pub fn from_fn(
        rows: usize,
        columns: usize,
        steps: usize,
        active: impl Fn(usize, usize, usize) -> bool,
    ) -> Self {
        Self::from_array(Array3::from_shape_fn((rows, columns, steps), |(x, y, z)| {
            active(x, y, z)
        }))
    }

    /// The number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.cells.dim().0
    }

    /// The number of columns.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.cells.dim().1
    }

    /// The number of steps along the third axis.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.cells.dim().2
    }

    /// Whether the voxel at (x, y, z) is active.
    #[must_use]
    pub fn is_active(&self, x: usize, y: usize, z: usize) -> bool {
        self.cells[[x, y, z]]
    }

    /// Activate or deactivate the voxel at (x, y, z).
    pub fn set(&mut self, x: usize, y: usize, z: usize, active: bool) {
        self.cells[[x, y, z]] = active;
    }

    /// The cubical set of all active voxels: each active (x, y, z)
    /// contributes the unit cube with lower corner (x, y, z).
    #[must_use]
    pub fn cubical_set(&self) -> CubicalSet {
        let mut cubes = HashSet::new();
        for ((x, y, z), active) in self.cells.indexed_iter() {
            if *active {
                cubes.insert(Cube::top_cube(&[x as i16, y as i16, z as i16]));
            }
        }
        CubicalSet::from_parts(3, cubes)
    }
}
