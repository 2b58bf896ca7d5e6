// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.


use std::hash::Hash;
use std::hash::Hasher;

use crate::builder::LeanMinHashBuilder;
use crate::error::Error;
use crate::precision::Iter;
use crate::precision::Precision;
use crate::precision::Slots;

/// Source of MinHash state that a [`LeanMinHash`] can be frozen from.
///
/// Implemented by mutable sketch builders that ingest elements and maintain
/// one minimum hash per permutation. Freezing copies the values out, so later
/// updates to the generator are never observable through the snapshot.
pub trait MinHashGenerator {
    /// The seed that selected the generator's permutation family.
    fn seed(&self) -> u64;

    /// The number of bytes each hash value is stored in.
    fn precision(&self) -> Precision;

    /// The current minimum hash value of every permutation, in order.
    fn hash_values(&self) -> &[u64];
}

/// A frozen MinHash sketch.
///
/// A lean MinHash keeps only the seed and the per-slot minimum hash values of
/// a MinHash, stored at the smallest integer width that the chosen
/// [`Precision`] allows. It has no update operation: to add elements, update
/// the generator and freeze a new snapshot.
///
/// Two sketches are equal when their seeds match and their slot values match
/// elementwise. Cloning a sketch copies its slot storage.
///
/// # Examples
///
/// ```
/// use lean_minhash::{LeanMinHash, Precision};
///
/// let a = LeanMinHash::new(42, Precision::U32, &[5, 9, 2, 7]).unwrap();
/// let b = LeanMinHash::new(42, Precision::U32, &[5, 10, 2, 8]).unwrap();
///
/// assert_eq!(a.len(), 4);
/// assert_eq!(a.jaccard(&b).unwrap(), 0.5);
///
/// let merged = LeanMinHash::union([&a, &b]).unwrap();
/// assert_eq!(merged.digest(), vec![5, 9, 2, 7]);
/// ```
#[derive(Debug, Clone)]
pub struct LeanMinHash {
    pub(crate) seed: u64,
    pub(crate) slots: Slots,
}

#[allow(clippy::len_without_is_empty)]
impl LeanMinHash {
    /// Creates a builder for lean MinHash sketches.
    pub fn builder() -> LeanMinHashBuilder {
        LeanMinHashBuilder::default()
    }

    /// Creates a sketch from explicit hash values.
    ///
    /// Shorthand for `LeanMinHash::builder().seed(seed).precision(precision).build(hash_values)`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if
    /// `hash_values` is empty, holds more than `u16::MAX` values, or holds a value that
    /// does not fit in `precision`.
    pub fn new(seed: u64, precision: Precision, hash_values: &[u64]) -> Result<Self, Error> {
        Self::builder()
            .seed(seed)
            .precision(precision)
            .build(hash_values)
    }

    /// Freezes the current state of a generator.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`LeanMinHash::new`].
    pub fn from_generator<G: MinHashGenerator + ?Sized>(generator: &G) -> Result<Self, Error> {
        Self::new(
            generator.seed(),
            generator.precision(),
            generator.hash_values(),
        )
    }

    /// Assembles a sketch from fields that are already known to be valid.
    pub(crate) fn from_parts(seed: u64, slots: Slots) -> Self {
        debug_assert!(slots.len() > 0 && slots.len() <= u16::MAX as usize);
        Self { seed, slots }
    }

    /// Returns the number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of slots as stored in the serialized header.
    pub fn width(&self) -> u16 {
        self.slots.len() as u16
    }

    /// Returns the seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of bytes used per slot value.
    pub fn precision(&self) -> Precision {
        self.slots.precision()
    }

    /// Returns the value of slot `index`, or `None` if it is out of range.
    pub fn get(&self, index: usize) -> Option<u64> {
        self.slots.get(index)
    }

    /// Returns an iterator over the slot values.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.slots)
    }

    /// Returns an owned copy of the slot values.
    pub fn digest(&self) -> Vec<u64> {
        self.iter().collect()
    }

    /// Returns `true` if `other` shares this sketch's seed, width and precision.
    pub fn is_compatible(&self, other: &LeanMinHash) -> bool {
        self.seed == other.seed
            && self.len() == other.len()
            && self.precision() == other.precision()
    }

    pub(crate) fn ensure_compatible(&self, other: &LeanMinHash) -> Result<(), Error> {
        if self.seed != other.seed {
            return Err(Error::incompatible("sketches have different seeds")
                .with_context("expected", self.seed)
                .with_context("actual", other.seed));
        }
        if self.len() != other.len() {
            return Err(Error::incompatible("sketches have different widths")
                .with_context("expected", self.len())
                .with_context("actual", other.len()));
        }
        if self.precision() != other.precision() {
            return Err(Error::incompatible("sketches have different precisions")
                .with_context("expected", self.precision().num_bytes())
                .with_context("actual", other.precision().num_bytes()));
        }
        Ok(())
    }

    /// Estimates the Jaccard similarity of the sets summarized by two sketches.
    ///
    /// The estimate is the fraction of slots holding equal values.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::IncompatibleSketch`](crate::error::ErrorKind::IncompatibleSketch)
    /// if the sketches differ in seed, width or precision.
    pub fn jaccard(&self, other: &LeanMinHash) -> Result<f64, Error> {
        self.ensure_compatible(other)?;
        let matches = self
            .iter()
            .zip(other.iter())
            .filter(|(a, b)| a == b)
            .count();
        Ok(matches as f64 / self.len() as f64)
    }
}

impl PartialEq for LeanMinHash {
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed && self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for LeanMinHash {}

impl Hash for LeanMinHash {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.seed.hash(state);
        self.len().hash(state);
        for value in self.iter() {
            value.hash(state);
        }
    }
}

impl<'a> IntoIterator for &'a LeanMinHash {
    type Item = u64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
