// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::HomologyError;
use crate::Cube;

/// An unordered, finite collection of elementary cubes sharing a common
/// embedding number, typically the top-dimensional cubes produced by a grid
/// loader.
///
/// Duplicate cubes collapse by structural equality. The set offers only an
/// arbitrary pop order; the chain-group construction drains it and imposes
/// the canonical order afterwards. Inserting a cube whose embedding number
/// differs from the cubes already present fails fast with
/// [`HomologyError::EmbeddingMismatch`], before any chain-group work starts.
///
/// # Examples
///
/// ```rust
/// use cubehom::{Cube, CubicalSet};
///
/// let mut set = CubicalSet::new();
/// set.insert(Cube::top_cube(&[0, 0])).unwrap();
/// set.insert(Cube::top_cube(&[0, 0])).unwrap(); // duplicate, absorbed
/// set.insert(Cube::top_cube(&[1, 0])).unwrap();
///
/// assert_eq!(set.len(), 2);
/// assert!(set.insert(Cube::top_cube(&[0, 0, 0])).is_err()); // wrong embedding
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CubicalSet {
    embedding: Option<usize>,
    cubes: HashSet<Cube>,
}

impl CubicalSet {
    /// Create an empty cubical set. The embedding number is fixed by the
    /// first inserted cube.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cubical set from an iterator of cubes, validating that all
    /// cubes share one embedding number.
    pub fn from_cubes<I>(cubes: I) -> Result<Self, HomologyError>
    where
        I: IntoIterator<Item = Cube>,
    {
        let mut set = Self::new();
        for cube in cubes {
            set.insert(cube)?;
        }
        Ok(set)
    }

    pub(crate) fn from_parts(embedding: usize, cubes: HashSet<Cube>) -> Self {
        Self {
            embedding: Some(embedding),
            cubes,
        }
    }

    /// Insert a cube, returning whether it was newly added. Fails if the
    /// cube's embedding number differs from the set's.
    pub fn insert(&mut self, cube: Cube) -> Result<bool, HomologyError> {
        match self.embedding {
            None => self.embedding = Some(cube.embedding_number()),
            Some(expected) if expected != cube.embedding_number() => {
                return Err(HomologyError::EmbeddingMismatch {
                    expected,
                    found: cube.embedding_number(),
                });
            }
            Some(_) => {}
        }
        Ok(self.cubes.insert(cube))
    }

    /// Insert a cube known to share the set's embedding number, such as a
    /// primary face of a cube already present.
    pub(crate) fn insert_unchecked(&mut self, cube: Cube) -> bool {
        self.cubes.insert(cube)
    }

    /// Remove and return an arbitrary cube.
    pub fn pop(&mut self) -> Option<Cube> {
        let cube = self.cubes.iter().next()?.clone();
        self.cubes.take(&cube)
    }

    /// Whether `cube` is present.
    #[must_use]
    pub fn contains(&self, cube: &Cube) -> bool {
        self.cubes.contains(cube)
    }

    /// The number of cubes in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    /// Whether the set holds no cubes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    /// The common embedding number, or `None` while the set is empty and no
    /// cube has fixed it yet.
    #[must_use]
    pub fn embedding_number(&self) -> Option<usize> {
        self.embedding
    }

    /// The maximum cube dimension present, or `None` for an empty set.
    #[must_use]
    pub fn dimension(&self) -> Option<u32> {
        self.cubes.iter().map(Cube::dimension).max()
    }

    /// Iterate over the cubes in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Cube> {
        self.cubes.iter()
    }
}

impl Serialize for CubicalSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut cubes: Vec<&Cube> = self.cubes.iter().collect();
        cubes.sort();
        cubes.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CubicalSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let cubes = Vec::<Cube>::deserialize(deserializer)?;
        Self::from_cubes(cubes).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_and_deduplication() {
        let mut set = CubicalSet::new();
        assert!(set.insert(Cube::top_cube(&[0, 0])).unwrap());
        assert!(!set.insert(Cube::top_cube(&[0, 0])).unwrap());
        assert!(set.insert(Cube::top_cube(&[2, 1])).unwrap());

        assert_eq!(set.len(), 2);
        assert_eq!(set.embedding_number(), Some(2));
        assert!(set.contains(&Cube::top_cube(&[2, 1])));
    }

    #[test]
    fn embedding_mismatch_fails_fast() {
        let mut set = CubicalSet::new();
        set.insert(Cube::top_cube(&[0, 0])).unwrap();

        let result = set.insert(Cube::top_cube(&[0, 0, 0]));
        assert_eq!(
            result,
            Err(HomologyError::EmbeddingMismatch {
                expected: 2,
                found: 3
            })
        );

        // The offending cube was not added.
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn from_cubes_validates() {
        let set = CubicalSet::from_cubes([
            Cube::top_cube(&[0, 0]),
            Cube::top_cube(&[1, 0]),
        ])
        .unwrap();
        assert_eq!(set.len(), 2);

        let result = CubicalSet::from_cubes([
            Cube::top_cube(&[0, 0]),
            Cube::point(&[0]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn pop_drains_the_set() {
        let mut set = CubicalSet::from_cubes([
            Cube::top_cube(&[0, 0]),
            Cube::top_cube(&[1, 0]),
            Cube::top_cube(&[2, 0]),
        ])
        .unwrap();

        let mut drained = Vec::new();
        while let Some(cube) = set.pop() {
            drained.push(cube);
        }

        assert!(set.is_empty());
        assert_eq!(drained.len(), 3);
        drained.sort();
        drained.dedup();
        assert_eq!(drained.len(), 3);
    }

    #[test]
    fn dimension_is_maximum_over_cubes() {
        assert_eq!(CubicalSet::new().dimension(), None);

        let set = CubicalSet::from_cubes([
            Cube::point(&[0, 0]),
            Cube::from_extent(&[0, 0], &[true, false]),
        ])
        .unwrap();
        assert_eq!(set.dimension(), Some(1));
    }

    #[test]
    fn serde_round_trip() {
        let set = CubicalSet::from_cubes([
            Cube::top_cube(&[0, 0]),
            Cube::top_cube(&[1, 2]),
            Cube::point(&[5, 5]),
        ])
        .unwrap();

        let json = serde_json::to_string(&set).unwrap();
        let restored: CubicalSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set, restored);
    }
}
