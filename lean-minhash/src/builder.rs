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


use crate::error::Error;
use crate::precision::Precision;
use crate::precision::Slots;
use crate::sketch::LeanMinHash;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 1;

/// Largest number of slots the serialized header can describe.
pub const MAX_WIDTH: usize = u16::MAX as usize;

/// Builder for creating lean MinHash sketches from explicit hash values.
///
/// # Examples
///
/// ```
/// use lean_minhash::{LeanMinHash, Precision};
///
/// let sketch = LeanMinHash::builder()
///     .seed(42)
///     .precision(Precision::U16)
///     .build(&[3, 1, 4, 1, 5])
///     .unwrap();
///
/// assert_eq!(sketch.seed(), 42);
/// assert_eq!(sketch.precision(), Precision::U16);
/// assert_eq!(sketch.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct LeanMinHashBuilder {
    seed: u64,
    precision: Precision,
}

impl Default for LeanMinHashBuilder {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            precision: Precision::U64,
        }
    }
}

impl LeanMinHashBuilder {
    /// Sets the seed of the permutation family the hash values came from.
    ///
    /// Sketches with different seeds are incompatible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the number of bytes each slot value is stored in.
    pub fn precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Builds a sketch holding a copy of `hash_values`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument)
    /// if `hash_values` is empty, holds more than [`MAX_WIDTH`] values, or holds a value
    /// greater than [`Precision::max_value`].
    pub fn build(self, hash_values: &[u64]) -> Result<LeanMinHash, Error> {
        if hash_values.is_empty() {
            return Err(Error::invalid_argument(
                "a sketch requires at least one hash value",
            ));
        }
        if hash_values.len() > MAX_WIDTH {
            return Err(Error::invalid_argument("too many hash values for one sketch")
                .with_context("width", hash_values.len())
                .with_context("max_width", MAX_WIDTH));
        }
        let slots = Slots::try_from_values(self.precision, hash_values)?;
        Ok(LeanMinHash::from_parts(self.seed, slots))
    }
}
