// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub use compute::{compute_homology, compute_homology_with};
pub use matrices::{boundary_matrices, canonical_coordinates, chain_from_canonical_coordinates};
pub use reduction::{reduce_chain_complex, ReductionStats};
pub use solver::{HomologySolver, SmithSolver};

mod compute;
mod matrices;
mod reduction;
mod snf;
mod solver;
