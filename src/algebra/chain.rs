// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::{hash_map, HashMap};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::hash::Hash;
use std::iter::FromIterator;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A formal ℤ-linear combination of basis elements of type `B`, stored
/// sparsely as a map from basis element to coefficient.
///
/// Absent keys denote a zero coefficient, and the type maintains the
/// invariant that no key maps to 0 after any public operation: a coefficient
/// that becomes zero is erased from the map. This keeps the support of a
/// chain equal to its key set, which the reduction algorithm relies on when
/// it scans boundaries for unit entries.
///
/// # Examples
///
/// ```rust
/// use cubehom::Chain;
///
/// let mut chain = Chain::new();
/// chain.insert_or_add("a", 2);
/// chain.insert_or_add("b", -1);
/// chain.insert_or_add("a", -2); // cancels; "a" is erased
///
/// assert_eq!(chain.coef(&"a"), 0);
/// assert_eq!(chain.coef(&"b"), -1);
/// assert_eq!(chain.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Chain<B> {
    map: HashMap<B, i64>,
}

impl<B: Eq + Hash> PartialEq for Chain<B> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<B: Eq + Hash> Eq for Chain<B> {}

impl<B: Clone + Eq + Hash> Chain<B> {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Create an empty chain with room for `capacity` basis elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
        }
    }

    /// The number of basis elements with nonzero coefficient.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether this is the zero chain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The coefficient of `cell`, with 0 for cells outside the support.
    #[must_use]
    pub fn coef(&self, cell: &B) -> i64 {
        self.map.get(cell).copied().unwrap_or(0)
    }

    /// Whether `cell` lies in the support of this chain.
    #[must_use]
    pub fn contains(&self, cell: &B) -> bool {
        self.map.contains_key(cell)
    }

    /// Add `coef` to the coefficient of `cell`, inserting or erasing the key
    /// as needed to keep the support free of zero coefficients.
    pub fn insert_or_add(&mut self, cell: B, coef: i64) {
        if coef == 0 {
            return;
        }
        match self.map.entry(cell) {
            hash_map::Entry::Occupied(mut entry) => {
                let updated = entry.get() + coef;
                if updated == 0 {
                    entry.remove();
                } else {
                    *entry.get_mut() = updated;
                }
            }
            hash_map::Entry::Vacant(entry) => {
                entry.insert(coef);
            }
        }
    }

    /// Erase `cell` from the support, returning its previous coefficient.
    pub fn remove(&mut self, cell: &B) -> i64 {
        self.map.remove(cell).unwrap_or(0)
    }

    /// Empty the chain.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Multiply every coefficient by `coef`. Multiplication by 0 clears the
    /// chain so the zero-free invariant is preserved.
    pub fn scalar_mul(&mut self, coef: i64) {
        if coef == 0 {
            self.clear();
        } else if coef != 1 {
            for cell_coef in self.map.values_mut() {
                *cell_coef *= coef;
            }
        }
    }

    /// Iterate over `(basis element, coefficient)` pairs of the support.
    pub fn iter(&self) -> impl Iterator<Item = (&B, i64)> {
        self.map.iter().map(|(cell, coef)| (cell, *coef))
    }
}

impl<B: Clone + Eq + Hash> Default for Chain<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> IntoIterator for Chain<B> {
    type IntoIter = hash_map::IntoIter<B, i64>;
    type Item = (B, i64);

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl<B: Clone + Eq + Hash> Neg for Chain<B> {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        for coef in self.map.values_mut() {
            *coef = -*coef;
        }
        self
    }
}

impl<B: Clone + Eq + Hash> AddAssign for Chain<B> {
    fn add_assign(&mut self, rhs: Self) {
        for (cell, coef) in rhs {
            self.insert_or_add(cell, coef);
        }
    }
}

impl<B: Clone + Eq + Hash> Add for Chain<B> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl<B: Clone + Eq + Hash> SubAssign for Chain<B> {
    fn sub_assign(&mut self, rhs: Self) {
        for (cell, coef) in rhs {
            self.insert_or_add(cell, -coef);
        }
    }
}

impl<B: Clone + Eq + Hash> Sub for Chain<B> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self::Output {
        self -= rhs;
        self
    }
}

impl<B: Clone + Eq + Hash, const N: usize> From<[(B, i64); N]> for Chain<B> {
    fn from(items: [(B, i64); N]) -> Self {
        Self::from_iter(items)
    }
}

impl<B: Clone + Eq + Hash> FromIterator<(B, i64)> for Chain<B> {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (B, i64)>,
    {
        let mut chain = Self::new();
        for (cell, coef) in iter {
            chain.insert_or_add(cell, coef);
        }
        chain
    }
}

impl<B: Display> Display for Chain<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.map.is_empty() {
            return write!(f, "0");
        }

        let mut first = true;
        for (cell, coef) in self.map.iter() {
            if !first {
                write!(f, " + ")?;
            }
            first = false;

            if *coef == 1 {
                write!(f, "{}", cell)?;
            } else {
                write!(f, "{}*{}", coef, cell)?;
            }
        }
        Ok(())
    }
}
