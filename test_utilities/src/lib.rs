// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared scenario builders for integration tests and benchmarks.

use cubehom::{Cube, CubicalSet, PixelGrid, VoxelGrid};

/// A cubical set holding a single lattice point in the plane.
pub fn single_point() -> CubicalSet {
    CubicalSet::from_cubes([Cube::point(&[0, 0])]).expect("a single cube cannot mismatch")
}

/// A 1x1 grid whose only cell is active: one full unit square.
pub fn filled_square() -> PixelGrid {
    PixelGrid::from_fn(1, 1, |_, _| true)
}

/// A 3x3 grid with the center cell inactive: an annulus with one loop.
pub fn annulus() -> PixelGrid {
    PixelGrid::from_fn(3, 3, |x, y| !(x == 1 && y == 1))
}

/// A 1x3 grid with the middle cell inactive: two squares sharing nothing.
pub fn two_disjoint_squares() -> PixelGrid {
    PixelGrid::from_fn(1, 3, |_, y| y != 1)
}

/// A hollow voxel donut modelling the torus: a 7x7x3 block with the central
/// column removed and the interior ring of the middle layer carved out, so
/// that what remains is a thickened torus surface.
pub fn hollow_torus() -> VoxelGrid {
    VoxelGrid::from_fn(7, 7, 3, |x, y, z| {
        // Hole through the middle.
        if x == 3 && y == 3 {
            return false;
        }
        // Make the donut hollow in the middle layer.
        if z == 1 {
            if (x == 1 || x == 5) && (1..=5).contains(&y) {
                return false;
            }
            if (y == 1 || y == 5) && (1..=5).contains(&x) {
                return false;
            }
        }
        true
    })
}
