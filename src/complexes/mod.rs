// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub use chain_complex::ChainComplex;
pub use cubical::{Cube, Interval, MAX_EMBEDDING};
pub use cubical_set::CubicalSet;

mod chain_complex;
mod cubical;
mod cubical_set;
