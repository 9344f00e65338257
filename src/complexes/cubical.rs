// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Elementary intervals and elementary cubes.
//!
//! An elementary interval is a unit-length interval on the integer lattice,
//! either degenerate `[n, n]` (a point) or non-degenerate `[n, n + 1]` (a
//! unit edge). An elementary cube is an ordered product of elementary
//! intervals; the number of factors is its *embedding number* and the count
//! of non-degenerate factors is its *dimension*.
//!
//! Cubes are cheap value types: every face operation returns a fresh cube,
//! and structural equality/hashing over the interval tuple makes them
//! usable as sparse-chain keys. A separate lexicographic order over the
//! interval tuple gives each basis a reproducible canonical layout.

use std::cmp::Ordering;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::iter::FromIterator;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Chain;

/// The maximum embedding number of a [`Cube`]. Intervals are stored inline,
/// so cubes never allocate.
pub const MAX_EMBEDDING: usize = 16;

/// An elementary interval `[left, right]` with `right - left` equal to 0
/// (degenerate, a lattice point) or 1 (non-degenerate, a unit edge).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Interval {
    left: i16,
    right: i16,
}

impl Interval {
    /// Create an interval from its endpoints.
    ///
    /// # Panics
    /// Panics unless `right` equals `left` or `left + 1`.
    #[must_use]
    pub fn new(left: i16, right: i16) -> Self {
        assert!(
            right == left || right == left + 1,
            "elementary intervals must have unit or zero length"
        );
        Self { left, right }
    }

    /// The degenerate interval `[n, n]`.
    #[must_use]
    pub fn degenerate(n: i16) -> Self {
        Self { left: n, right: n }
    }

    /// The non-degenerate unit interval `[n, n + 1]`.
    #[must_use]
    pub fn unit(n: i16) -> Self {
        Self {
            left: n,
            right: n + 1,
        }
    }

    /// The left endpoint.
    #[must_use]
    pub fn left(&self) -> i16 {
        self.left
    }

    /// The right endpoint.
    #[must_use]
    pub fn right(&self) -> i16 {
        self.right
    }

    /// Whether this interval is a single lattice point.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.left == self.right
    }

    /// The degenerate interval at the left endpoint.
    #[must_use]
    pub fn collapse_left(&self) -> Self {
        Self::degenerate(self.left)
    }

    /// The degenerate interval at the right endpoint.
    #[must_use]
    pub fn collapse_right(&self) -> Self {
        Self::degenerate(self.right)
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_degenerate() {
            write!(f, "[{}]", self.left)
        } else {
            write!(f, "[{},{}]", self.left, self.right)
        }
    }
}

impl Serialize for Interval {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.left, self.right).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (left, right) = <(i16, i16)>::deserialize(deserializer)?;
        if right != left && right != left + 1 {
            return Err(D::Error::custom(format!(
                "[{left}, {right}] is not an elementary interval"
            )));
        }
        Ok(Self { left, right })
    }
}

/// An elementary cube: an ordered product of elementary intervals
/// `I_1 × … × I_m` in `m`-dimensional ambient space.
///
/// The *embedding number* `m` is constant across all cubes of one run; the
/// *dimension* of the cube is the number of non-degenerate factors. Equality
/// and hashing are structural over the interval tuple.
///
/// # Examples
///
/// ```rust
/// use cubehom::{Cube, Interval};
///
/// // The unit square with lower-left corner (1, 2).
/// let square = Cube::top_cube(&[1, 2]);
/// assert_eq!(square.embedding_number(), 2);
/// assert_eq!(square.dimension(), 2);
///
/// // A vertical edge: degenerate in x, spanning in y.
/// let edge = Cube::new(vec![Interval::degenerate(1), Interval::unit(2)]);
/// assert_eq!(edge.dimension(), 1);
/// assert_eq!(edge.primary_faces().len(), 2);
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Cube {
    embedding: usize,
    intervals: [Interval; MAX_EMBEDDING],
}

impl Cube {
    /// Create a cube from its interval factors.
    ///
    /// # Panics
    /// Panics if the number of intervals exceeds [`MAX_EMBEDDING`].
    #[must_use]
    pub fn new(intervals: Vec<Interval>) -> Self {
        assert!(
            intervals.len() <= MAX_EMBEDDING,
            "cube embedding number cannot exceed {MAX_EMBEDDING}"
        );
        let mut inline = [Interval::default(); MAX_EMBEDDING];
        inline[..intervals.len()].copy_from_slice(intervals.as_slice());
        Self {
            embedding: intervals.len(),
            intervals: inline,
        }
    }

    /// Create the 0-dimensional cube at the lattice point `coordinates`
    /// (every factor degenerate).
    #[must_use]
    pub fn point(coordinates: &[i16]) -> Self {
        coordinates.iter().map(|n| Interval::degenerate(*n)).collect()
    }

    /// Create the full-dimensional unit cube whose lower corner is
    /// `corner` (every factor non-degenerate).
    #[must_use]
    pub fn top_cube(corner: &[i16]) -> Self {
        corner.iter().map(|n| Interval::unit(*n)).collect()
    }

    /// Create a cube at the lower corner `corner` that spans exactly the
    /// axes flagged in `extent`.
    ///
    /// # Panics
    /// Panics if `corner` and `extent` have different lengths.
    #[must_use]
    pub fn from_extent(corner: &[i16], extent: &[bool]) -> Self {
        assert_eq!(
            corner.len(),
            extent.len(),
            "corner coordinates must match extent length"
        );
        corner
            .iter()
            .zip(extent.iter())
            .map(|(n, spans)| {
                if *spans {
                    Interval::unit(*n)
                } else {
                    Interval::degenerate(*n)
                }
            })
            .collect()
    }

    /// The number of interval factors (the ambient dimension).
    #[must_use]
    pub fn embedding_number(&self) -> usize {
        self.embedding
    }

    /// The dimension of the cube: the number of non-degenerate factors.
    #[must_use]
    pub fn dimension(&self) -> u32 {
        self.intervals()
            .iter()
            .filter(|interval| !interval.is_degenerate())
            .count() as u32
    }

    /// The interval factors as a slice.
    #[must_use]
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals[..self.embedding]
    }

    /// The interval factor along `axis`.
    ///
    /// # Panics
    /// Panics if `axis` is at least the embedding number.
    #[must_use]
    pub fn interval(&self, axis: usize) -> Interval {
        self.intervals[..self.embedding][axis]
    }

    /// Return a fresh cube with the factor along `axis` replaced.
    #[must_use]
    fn with_interval(&self, axis: usize, interval: Interval) -> Self {
        let mut cube = self.clone();
        cube.intervals[axis] = interval;
        cube
    }

    /// The primary faces of this cube: for every non-degenerate factor, the
    /// two cubes obtained by collapsing that factor to its left and right
    /// endpoint. A cube of dimension `k` yields `2k` faces, counted with
    /// multiplicity; deduplication happens by structural equality when the
    /// faces are inserted into a basis.
    #[must_use]
    pub fn primary_faces(&self) -> Vec<Cube> {
        let mut faces = Vec::with_capacity(2 * self.dimension() as usize);
        for (axis, interval) in self.intervals().iter().enumerate() {
            if !interval.is_degenerate() {
                faces.push(self.with_interval(axis, interval.collapse_left()));
                faces.push(self.with_interval(axis, interval.collapse_right()));
            }
        }
        faces
    }

    /// The signed boundary ∂Q as a chain over the primary faces.
    ///
    /// Non-degenerate coordinates are visited in ascending order with an
    /// alternating sign that advances only on non-degenerate factors: the
    /// j-th such coordinate contributes its right-collapse face with sign
    /// `(-1)^j` and its left-collapse face with sign `-(-1)^j`. Structurally
    /// equal faces merge additively. This convention yields ∂∘∂ = 0; in
    /// particular ∂[n, n+1] = [n+1] − [n], and the unit square has edge
    /// signs (+, −, −, +) in bottom, top, left, right order.
    #[must_use]
    pub fn boundary(&self) -> Chain<Cube> {
        let mut chain = Chain::with_capacity(2 * self.dimension() as usize);
        let mut sign = 1;
        for (axis, interval) in self.intervals().iter().enumerate() {
            if !interval.is_degenerate() {
                chain.insert_or_add(self.with_interval(axis, interval.collapse_right()), sign);
                chain.insert_or_add(self.with_interval(axis, interval.collapse_left()), -sign);
                sign = -sign;
            }
        }
        chain
    }
}

impl FromIterator<Interval> for Cube {
    fn from_iter<T: IntoIterator<Item = Interval>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl PartialOrd for Cube {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cube {
    fn cmp(&self, other: &Self) -> Ordering {
        self.intervals().cmp(other.intervals())
    }
}

impl Display for Cube {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (axis, interval) in self.intervals().iter().enumerate() {
            if axis > 0 {
                write!(f, "x")?;
            }
            write!(f, "{}", interval)?;
        }
        Ok(())
    }
}

impl Serialize for Cube {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.intervals().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Cube {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let intervals = Vec::<Interval>::deserialize(deserializer)?;
        if intervals.len() > MAX_EMBEDDING {
            return Err(D::Error::custom(format!(
                "cube embedding number {} exceeds the maximum of {MAX_EMBEDDING}",
                intervals.len()
            )));
        }
        Ok(Self::new(intervals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Chain;

    #[test]
    fn interval_creation_and_access() {
        let degenerate = Interval::degenerate(3);
        assert_eq!(degenerate.left(), 3);
        assert_eq!(degenerate.right(), 3);
        assert!(degenerate.is_degenerate());

        let unit = Interval::unit(-2);
        assert_eq!(unit.left(), -2);
        assert_eq!(unit.right(), -1);
        assert!(!unit.is_degenerate());

        assert_eq!(Interval::new(5, 6), Interval::unit(5));
        assert_eq!(Interval::new(5, 5), Interval::degenerate(5));
    }

    #[test]
    #[should_panic(expected = "elementary intervals must have unit or zero length")]
    fn interval_rejects_long_span() {
        let _interval = Interval::new(0, 2);
    }

    #[test]
    fn interval_collapse() {
        let unit = Interval::unit(4);
        assert_eq!(unit.collapse_left(), Interval::degenerate(4));
        assert_eq!(unit.collapse_right(), Interval::degenerate(5));
    }

    #[test]
    fn cube_constructors_and_dimension() {
        let point = Cube::point(&[1, 2, 3]);
        assert_eq!(point.embedding_number(), 3);
        assert_eq!(point.dimension(), 0);

        let top = Cube::top_cube(&[1, 2, 3]);
        assert_eq!(top.dimension(), 3);

        let edge = Cube::from_extent(&[1, 2, 3], &[false, true, false]);
        assert_eq!(edge.dimension(), 1);
        assert_eq!(edge.interval(0), Interval::degenerate(1));
        assert_eq!(edge.interval(1), Interval::unit(2));
        assert_eq!(edge.interval(2), Interval::degenerate(3));
    }

    #[test]
    #[should_panic(expected = "cube embedding number cannot exceed")]
    fn cube_rejects_oversized_embedding() {
        let _cube = Cube::point(&[0; MAX_EMBEDDING + 1]);
    }

    #[test]
    fn primary_face_count() {
        let square = Cube::top_cube(&[0, 0]);
        assert_eq!(square.primary_faces().len(), 4);

        let voxel = Cube::top_cube(&[0, 0, 0]);
        assert_eq!(voxel.primary_faces().len(), 6);

        let point = Cube::point(&[0, 0]);
        assert!(point.primary_faces().is_empty());
    }

    #[test]
    fn primary_faces_of_square() {
        let square = Cube::top_cube(&[0, 0]);
        let faces = square.primary_faces();

        let left = Cube::from_extent(&[0, 0], &[false, true]);
        let right = Cube::new(vec![Interval::degenerate(1), Interval::unit(0)]);
        let bottom = Cube::from_extent(&[0, 0], &[true, false]);
        let top = Cube::new(vec![Interval::unit(0), Interval::degenerate(1)]);

        for face in [&left, &right, &bottom, &top] {
            assert!(faces.contains(face));
        }
    }

    #[test]
    fn edge_boundary_signs() {
        // A single 1-cube [n, n+1] has boundary [n+1] - [n].
        let edge = Cube::new(vec![Interval::unit(3)]);
        let boundary = edge.boundary();

        assert_eq!(
            boundary,
            Chain::from([
                (Cube::point(&[4]), 1),
                (Cube::point(&[3]), -1),
            ])
        );
    }

    #[test]
    fn square_boundary_signs() {
        // Bottom +, top -, left -, right + (counterclockwise orientation).
        let square = Cube::top_cube(&[0, 0]);
        let boundary = square.boundary();

        let bottom = Cube::new(vec![Interval::unit(0), Interval::degenerate(0)]);
        let top = Cube::new(vec![Interval::unit(0), Interval::degenerate(1)]);
        let left = Cube::new(vec![Interval::degenerate(0), Interval::unit(0)]);
        let right = Cube::new(vec![Interval::degenerate(1), Interval::unit(0)]);

        assert_eq!(boundary.coef(&bottom), 1);
        assert_eq!(boundary.coef(&top), -1);
        assert_eq!(boundary.coef(&left), -1);
        assert_eq!(boundary.coef(&right), 1);
        assert_eq!(boundary.len(), 4);
    }

    #[test]
    fn sign_advances_only_on_nondegenerate_factors() {
        // [0] x [0,1] x [1,2]: the first factor is degenerate, so the two
        // spanning factors take signs (-1)^0 and (-1)^1.
        let cube = Cube::new(vec![
            Interval::degenerate(0),
            Interval::unit(0),
            Interval::unit(1),
        ]);
        let boundary = cube.boundary();

        let y_right = Cube::new(vec![
            Interval::degenerate(0),
            Interval::degenerate(1),
            Interval::unit(1),
        ]);
        let z_right = Cube::new(vec![
            Interval::degenerate(0),
            Interval::unit(0),
            Interval::degenerate(2),
        ]);

        assert_eq!(boundary.coef(&y_right), 1);
        assert_eq!(boundary.coef(&z_right), -1);
    }

    fn boundary_of_chain(chain: &Chain<Cube>) -> Chain<Cube> {
        let mut result = Chain::new();
        for (cube, coef) in chain.iter() {
            for (face, face_coef) in cube.boundary().iter() {
                result.insert_or_add(face.clone(), coef * face_coef);
            }
        }
        result
    }

    #[test]
    fn boundary_of_boundary_vanishes() {
        for cube in [
            Cube::top_cube(&[0, 0]),
            Cube::top_cube(&[1, -2, 3]),
            Cube::from_extent(&[0, 5, 2, 7], &[true, false, true, true]),
        ] {
            let twice = boundary_of_chain(&cube.boundary());
            assert!(twice.is_empty(), "nonzero boundary of boundary for {cube}");
        }
    }

    #[test]
    fn lexicographic_order() {
        let mut cubes = vec![
            Cube::top_cube(&[1, 0]),
            Cube::point(&[0, 0]),
            Cube::from_extent(&[0, 0], &[true, false]),
            Cube::point(&[0, 1]),
        ];
        cubes.sort();

        assert_eq!(
            cubes,
            vec![
                Cube::point(&[0, 0]),
                Cube::from_extent(&[0, 0], &[true, false]),
                Cube::point(&[0, 1]),
                Cube::top_cube(&[1, 0]),
            ]
        );
    }

    #[test]
    fn display_format() {
        let edge = Cube::new(vec![Interval::unit(0), Interval::degenerate(2)]);
        assert_eq!(edge.to_string(), "[0,1]x[2]");
    }

    #[test]
    fn serde_round_trip() {
        let cube = Cube::from_extent(&[3, -1, 0], &[true, false, true]);
        let json = serde_json::to_string(&cube).unwrap();
        let restored: Cube = serde_json::from_str(&json).unwrap();
        assert_eq!(cube, restored);
    }

    #[test]
    fn serde_rejects_invalid_interval() {
        let result: Result<Interval, _> = serde_json::from_str("[0, 4]");
        assert!(result.is_err());
    }
}
