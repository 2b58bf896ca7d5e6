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
use crate::error::ErrorKind;
use crate::sketch::LeanMinHash;

impl LeanMinHash {
    /// Merges compatible sketches into the sketch of the union of their sets.
    ///
    /// Slot `i` of the result is the minimum of slot `i` across all inputs. The
    /// operation is exact, commutative and associative.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::InsufficientInput`] if fewer than two sketches are given.
    /// - [`ErrorKind::IncompatibleSketch`] if any sketch differs from the first in seed,
    ///   width or precision.
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_minhash::{LeanMinHash, Precision};
    ///
    /// let a = LeanMinHash::new(42, Precision::U32, &[5, 9, 2, 7]).unwrap();
    /// let b = LeanMinHash::new(42, Precision::U32, &[3, 10, 1, 8]).unwrap();
    ///
    /// let merged = LeanMinHash::union([&a, &b]).unwrap();
    /// assert_eq!(merged.digest(), vec![3, 9, 1, 7]);
    /// ```
    pub fn union<'a, I>(sketches: I) -> Result<LeanMinHash, Error>
    where
        I: IntoIterator<Item = &'a LeanMinHash>,
    {
        let mut sketches = sketches.into_iter();
        let Some(first) = sketches.next() else {
            return Err(insufficient_input(0));
        };

        let mut slots = first.slots.clone();
        let mut count = 1;
        for sketch in sketches {
            first
                .ensure_compatible(sketch)
                .map_err(|err| err.with_context("index", count))?;
            slots.min_assign(&sketch.slots)?;
            count += 1;
        }

        if count < 2 {
            return Err(insufficient_input(count));
        }
        Ok(LeanMinHash::from_parts(first.seed, slots))
    }
}

fn insufficient_input(count: usize) -> Error {
    Error::new(
        ErrorKind::InsufficientInput,
        "cannot union fewer than two sketches",
    )
    .with_context("count", count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precision::Precision;

    #[test]
    fn test_union_takes_slot_minimum() {
        let a = LeanMinHash::new(42, Precision::U64, &[5, 9, 2, 7]).unwrap();
        let b = LeanMinHash::new(42, Precision::U64, &[3, 10, 1, 8]).unwrap();
        let c = LeanMinHash::new(42, Precision::U64, &[4, 4, 4, 4]).unwrap();

        let merged = LeanMinHash::union([&a, &b, &c]).unwrap();
        assert_eq!(merged.seed(), 42);
        assert_eq!(merged.precision(), Precision::U64);
        assert_eq!(merged.digest(), vec![3, 4, 1, 4]);

        // Inputs are untouched.
        assert_eq!(a.digest(), vec![5, 9, 2, 7]);
    }

    #[test]
    fn test_union_of_identical_sketches() {
        let a = LeanMinHash::new(1, Precision::U8, &[1, 2, 3]).unwrap();
        assert_eq!(LeanMinHash::union([&a, &a]).unwrap(), a);
    }

    #[test]
    fn test_union_requires_two_inputs() {
        let a = LeanMinHash::new(1, Precision::U8, &[1]).unwrap();

        let err = LeanMinHash::union([&a]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientInput);
        assert_eq!(err.context("count"), Some("1"));

        let err = LeanMinHash::union(Vec::<&LeanMinHash>::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientInput);
        assert_eq!(err.context("count"), Some("0"));
    }

    #[test]
    fn test_union_reports_incompatible_index() {
        let a = LeanMinHash::new(1, Precision::U16, &[1, 2]).unwrap();
        let b = LeanMinHash::new(1, Precision::U16, &[3, 4]).unwrap();
        let c = LeanMinHash::new(1, Precision::U32, &[5, 6]).unwrap();

        let err = LeanMinHash::union([&a, &b, &c]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncompatibleSketch);
        assert_eq!(err.context("index"), Some("2"));
    }
}
