// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Error type covering the failure modes of a homology computation: invalid
/// input, a violated chain-complex invariant, and failures reported by the
/// homology solver.
///
/// Homology is an all-or-nothing computation; no partial results accompany
/// these errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HomologyError {
    /// A cube with a different number of interval factors was inserted into
    /// a cubical set. All cubes of one run must share a common embedding
    /// number; this is rejected before chain-group construction begins.
    EmbeddingMismatch {
        /// The embedding number established by the cubes already present.
        expected: usize,
        /// The embedding number of the offending cube.
        found: usize,
    },

    /// The composite ∂∘∂ was found to be nonzero on a cube of the given
    /// dimension. This indicates a defect in the reduction rewrite; the
    /// computation stops rather than handing corrupt matrices to the solver.
    BoundaryInvariant {
        /// Dimension of the cube whose twice-iterated boundary was nonzero.
        dimension: usize,
    },

    /// The homology solver rejected its input, for example because the
    /// boundary matrix sequence does not match the chain-group ranks.
    Solver(String),
}

impl Display for HomologyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::EmbeddingMismatch { expected, found } => {
                write!(
                    f,
                    "cube with embedding number {found} inserted into a cubical set with \
                    embedding number {expected}"
                )
            }
            Self::BoundaryInvariant { dimension } => {
                write!(
                    f,
                    "the boundary of the boundary of a {dimension}-dimensional cube is nonzero \
                    after reduction"
                )
            }
            Self::Solver(message) => {
                write!(f, "the homology solver failed: {message}")
            }
        }
    }
}

impl Error for HomologyError {}
