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


use std::iter::FusedIterator;

use crate::error::Error;

/// Number of bytes used to encode each slot value.
///
/// The precision selects the native integer width that backs a sketch's
/// slots, so a sketch of `n` slots at [`Precision::U32`] occupies `4 * n`
/// bytes of slot storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    /// One byte per slot.
    U8 = 1,
    /// Two bytes per slot.
    U16 = 2,
    /// Four bytes per slot.
    U32 = 4,
    /// Eight bytes per slot.
    U64 = 8,
}

impl Precision {
    /// Returns the precision encoded by `num_bytes`, or `None` if it is not one of 1, 2, 4, 8.
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_minhash::Precision;
    ///
    /// assert_eq!(Precision::from_num_bytes(4), Some(Precision::U32));
    /// assert_eq!(Precision::from_num_bytes(3), None);
    /// ```
    pub const fn from_num_bytes(num_bytes: u8) -> Option<Self> {
        match num_bytes {
            1 => Some(Precision::U8),
            2 => Some(Precision::U16),
            4 => Some(Precision::U32),
            8 => Some(Precision::U64),
            _ => None,
        }
    }

    /// Returns the number of bytes per slot.
    pub const fn num_bytes(self) -> usize {
        self as usize
    }

    /// Returns the largest slot value representable at this precision.
    pub const fn max_value(self) -> u64 {
        match self {
            Precision::U8 => u8::MAX as u64,
            Precision::U16 => u16::MAX as u64,
            Precision::U32 => u32::MAX as u64,
            Precision::U64 => u64::MAX,
        }
    }
}

/// Slot storage held at its native integer width.
#[derive(Debug, Clone)]
pub(crate) enum Slots {
    U8(Box<[u8]>),
    U16(Box<[u16]>),
    U32(Box<[u32]>),
    U64(Box<[u64]>),
}

impl Slots {
    /// Narrows `values` to `precision`, failing on the first value that does not fit.
    pub(crate) fn try_from_values(precision: Precision, values: &[u64]) -> Result<Self, Error> {
        Ok(match precision {
            Precision::U8 => Slots::U8(narrow(precision, values)?),
            Precision::U16 => Slots::U16(narrow(precision, values)?),
            Precision::U32 => Slots::U32(narrow(precision, values)?),
            Precision::U64 => Slots::U64(values.into()),
        })
    }

    pub(crate) fn precision(&self) -> Precision {
        match self {
            Slots::U8(_) => Precision::U8,
            Slots::U16(_) => Precision::U16,
            Slots::U32(_) => Precision::U32,
            Slots::U64(_) => Precision::U64,
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Slots::U8(v) => v.len(),
            Slots::U16(v) => v.len(),
            Slots::U32(v) => v.len(),
            Slots::U64(v) => v.len(),
        }
    }

    pub(crate) fn get(&self, index: usize) -> Option<u64> {
        match self {
            Slots::U8(v) => v.get(index).map(|&x| x as u64),
            Slots::U16(v) => v.get(index).map(|&x| x as u64),
            Slots::U32(v) => v.get(index).map(|&x| x as u64),
            Slots::U64(v) => v.get(index).copied(),
        }
    }

    /// Lowers every slot to the minimum of itself and the matching slot of `other`.
    ///
    /// Both sides must have the same precision and length.
    pub(crate) fn min_assign(&mut self, other: &Slots) -> Result<(), Error> {
        match (&mut *self, other) {
            (Slots::U8(acc), Slots::U8(src)) => min_in_place(acc, src),
            (Slots::U16(acc), Slots::U16(src)) => min_in_place(acc, src),
            (Slots::U32(acc), Slots::U32(src)) => min_in_place(acc, src),
            (Slots::U64(acc), Slots::U64(src)) => min_in_place(acc, src),
            (acc, src) => {
                return Err(Error::incompatible("slot precision differs")
                    .with_context("expected", acc.precision().num_bytes())
                    .with_context("actual", src.precision().num_bytes()));
            }
        }
        Ok(())
    }
}

fn narrow<T: TryFrom<u64>>(precision: Precision, values: &[u64]) -> Result<Box<[T]>, Error> {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            T::try_from(value).map_err(|_| {
                Error::invalid_argument("hash value does not fit the sketch precision")
                    .with_context("index", index)
                    .with_context("value", value)
                    .with_context("precision", precision.num_bytes())
            })
        })
        .collect()
}

fn min_in_place<T: Copy + Ord>(acc: &mut [T], src: &[T]) {
    debug_assert_eq!(acc.len(), src.len());
    for (a, &b) in acc.iter_mut().zip(src) {
        if b < *a {
            *a = b;
        }
    }
}

/// Iterator over the slot values of a sketch, widened to `u64`.
///
/// Created by [`LeanMinHash::iter`](crate::LeanMinHash::iter).
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    slots: &'a Slots,
    index: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(slots: &'a Slots) -> Self {
        Self { slots, index: 0 }
    }
}

impl Iterator for Iter<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let value = self.slots.get(self.index)?;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.slots.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
