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


//! Binary layout of a lean MinHash.
//!
//! ```text
//! offset  size       field
//! 0       2          width      number of slots
//! 2       1          seed       must be at most 255
//! 3       1          precision  bytes per slot: 1, 2, 4 or 8
//! 4       w * p      slots      slot values in order
//! ```
//!
//! Multi-byte fields use the [`Endianness`] chosen by the caller, and the same
//! endianness must be passed when reading the bytes back.

use byteorder::BigEndian;
use byteorder::ByteOrder;
use byteorder::LittleEndian;
use byteorder::NativeEndian;

use crate::codec::SketchSlice;
use crate::codec::SketchWriter;
use crate::error::Error;
use crate::precision::Precision;
use crate::precision::Slots;
use crate::sketch::LeanMinHash;

/// Size of the fixed header in bytes.
pub const HEADER_SIZE_BYTES: usize = 4;

/// Byte order of the multi-byte fields in a serialized sketch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Endianness {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
    /// The byte order of the running machine.
    #[default]
    Native,
}

impl LeanMinHash {
    /// Returns the number of bytes [`serialize_into`](Self::serialize_into) writes.
    pub fn serialized_size(&self) -> usize {
        HEADER_SIZE_BYTES + self.len() * self.precision().num_bytes()
    }

    /// Serializes the sketch into `buf` starting at `offset`.
    ///
    /// Only `buf[offset..offset + self.serialized_size()]` is written, so several
    /// sketches of the same shape can be packed back to back into one buffer.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if the
    ///   seed does not fit the one-byte seed field.
    /// - [`ErrorKind::BufferTooSmall`](crate::error::ErrorKind::BufferTooSmall) if fewer
    ///   than [`serialized_size`](Self::serialized_size) bytes are available after `offset`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_minhash::{Endianness, LeanMinHash, Precision};
    ///
    /// let sketch = LeanMinHash::new(1, Precision::U32, &[10, 20, 30, 40]).unwrap();
    /// let mut buf = vec![0u8; sketch.serialized_size()];
    /// sketch.serialize_into(&mut buf, Endianness::Little, 0).unwrap();
    ///
    /// let restored = LeanMinHash::deserialize(&buf, Endianness::Little).unwrap();
    /// assert_eq!(restored, sketch);
    /// ```
    pub fn serialize_into(
        &self,
        buf: &mut [u8],
        endianness: Endianness,
        offset: usize,
    ) -> Result<(), Error> {
        let seed = u8::try_from(self.seed).map_err(|_| {
            Error::invalid_argument("seed does not fit the one-byte seed field")
                .with_context("seed", self.seed)
        })?;

        let size = self.serialized_size();
        let available = buf.len().saturating_sub(offset);
        if available < size {
            return Err(Error::buffer_too_small(size, available).with_context("offset", offset));
        }

        let dst = &mut buf[offset..offset + size];
        let written = match endianness {
            Endianness::Little => write_record::<LittleEndian>(dst, seed, &self.slots),
            Endianness::Big => write_record::<BigEndian>(dst, seed, &self.slots),
            Endianness::Native => write_record::<NativeEndian>(dst, seed, &self.slots),
        };
        debug_assert_eq!(written, size);
        Ok(())
    }

    /// Serializes the sketch into a freshly allocated buffer of exactly
    /// [`serialized_size`](Self::serialized_size) bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if
    /// the seed does not fit the one-byte seed field.
    pub fn serialize(&self, endianness: Endianness) -> Result<Vec<u8>, Error> {
        let mut bytes = vec![0u8; self.serialized_size()];
        self.serialize_into(&mut bytes, endianness, 0)?;
        Ok(bytes)
    }

    /// Deserializes a sketch from the start of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MalformedBuffer`](crate::error::ErrorKind::MalformedBuffer) if
    /// the buffer is shorter than its header declares, declares zero slots, or declares a
    /// precision other than 1, 2, 4 or 8.
    pub fn deserialize(bytes: &[u8], endianness: Endianness) -> Result<Self, Error> {
        Self::deserialize_from(bytes, endianness, 0)
    }

    /// Deserializes a sketch starting at `offset` in `bytes`.
    ///
    /// Bytes after the sketch's record are ignored.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`deserialize`](Self::deserialize).
    pub fn deserialize_from(
        bytes: &[u8],
        endianness: Endianness,
        offset: usize,
    ) -> Result<Self, Error> {
        let src = bytes.get(offset..).ok_or_else(|| {
            Error::insufficient_data("header")
                .with_context("offset", offset)
                .with_context("len", bytes.len())
        })?;
        match endianness {
            Endianness::Little => read_record::<LittleEndian>(src),
            Endianness::Big => read_record::<BigEndian>(src),
            Endianness::Native => read_record::<NativeEndian>(src),
        }
    }

    /// Serializes sketches back to back into one buffer.
    ///
    /// Every sketch must have the same serialized size; record `i` starts at
    /// `i * sketches[0].serialized_size()`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if
    /// the serialized sizes differ or a seed does not fit the one-byte seed field.
    ///
    /// # Examples
    ///
    /// ```
    /// use lean_minhash::{Endianness, LeanMinHash, Precision};
    ///
    /// let sketches = vec![
    ///     LeanMinHash::new(7, Precision::U16, &[1, 2, 3]).unwrap(),
    ///     LeanMinHash::new(7, Precision::U16, &[4, 5, 6]).unwrap(),
    /// ];
    /// let bytes = LeanMinHash::serialize_batch(&sketches, Endianness::Big).unwrap();
    /// assert_eq!(bytes.len(), 2 * sketches[0].serialized_size());
    ///
    /// let restored = LeanMinHash::deserialize_batch(&bytes, Endianness::Big).unwrap();
    /// assert_eq!(restored, sketches);
    /// ```
    pub fn serialize_batch<'a, I>(sketches: I, endianness: Endianness) -> Result<Vec<u8>, Error>
    where
        I: IntoIterator<Item = &'a LeanMinHash>,
    {
        let sketches: Vec<&LeanMinHash> = sketches.into_iter().collect();
        let Some(first) = sketches.first() else {
            return Ok(Vec::new());
        };

        let size = first.serialized_size();
        if let Some(index) = sketches.iter().position(|s| s.serialized_size() != size) {
            return Err(
                Error::invalid_argument("batched sketches must share one serialized size")
                    .with_context("index", index)
                    .with_context("expected", size)
                    .with_context("actual", sketches[index].serialized_size()),
            );
        }

        let mut bytes = vec![0u8; size * sketches.len()];
        for (chunk, sketch) in bytes.chunks_exact_mut(size).zip(&sketches) {
            sketch.serialize_into(chunk, endianness, 0)?;
        }
        Ok(bytes)
    }

    /// Deserializes back-to-back records until `bytes` is exhausted.
    ///
    /// Records may differ in shape; each header determines where the next record starts.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MalformedBuffer`](crate::error::ErrorKind::MalformedBuffer) if
    /// any record is malformed, including a truncated trailing record.
    pub fn deserialize_batch(bytes: &[u8], endianness: Endianness) -> Result<Vec<Self>, Error> {
        let mut sketches = Vec::new();
        let mut offset = 0;
        while offset < bytes.len() {
            let sketch = Self::deserialize_from(bytes, endianness, offset)
                .map_err(|err| err.with_context("record", sketches.len()))?;
            offset += sketch.serialized_size();
            sketches.push(sketch);
        }
        Ok(sketches)
    }
}

fn write_record<E: ByteOrder>(dst: &mut [u8], seed: u8, slots: &Slots) -> usize {
    let mut writer = SketchWriter::<E>::new(dst);
    writer.write_u16(slots.len() as u16);
    writer.write_u8(seed);
    writer.write_u8(slots.precision().num_bytes() as u8);
    match slots {
        Slots::U8(values) => writer.write_u8_slice(values),
        Slots::U16(values) => writer.write_u16_slice(values),
        Slots::U32(values) => writer.write_u32_slice(values),
        Slots::U64(values) => writer.write_u64_slice(values),
    }
    writer.written()
}

fn read_record<E: ByteOrder>(bytes: &[u8]) -> Result<LeanMinHash, Error> {
    fn make_error(tag: &'static str) -> impl FnOnce(std::io::Error) -> Error {
        move |_| Error::insufficient_data(tag)
    }

    let mut cursor = SketchSlice::<E>::new(bytes);
    let width = cursor.read_u16().map_err(make_error("width"))? as usize;
    let seed = cursor.read_u8().map_err(make_error("seed"))?;
    let num_bytes = cursor.read_u8().map_err(make_error("precision"))?;

    let precision = Precision::from_num_bytes(num_bytes).ok_or_else(|| {
        Error::malformed("unsupported slot precision").with_context("precision", num_bytes)
    })?;
    if width == 0 {
        return Err(Error::malformed("sketch declares zero slots"));
    }

    let required = width * precision.num_bytes();
    let available = cursor.remaining();
    if available < required {
        return Err(Error::insufficient_data("slots")
            .with_context("required", required)
            .with_context("available", available));
    }

    let slots = match precision {
        Precision::U8 => {
            let mut values = vec![0u8; width];
            cursor.read_u8_into(&mut values).map_err(make_error("slots"))?;
            Slots::U8(values.into_boxed_slice())
        }
        Precision::U16 => {
            let mut values = vec![0u16; width];
            cursor.read_u16_into(&mut values).map_err(make_error("slots"))?;
            Slots::U16(values.into_boxed_slice())
        }
        Precision::U32 => {
            let mut values = vec![0u32; width];
            cursor.read_u32_into(&mut values).map_err(make_error("slots"))?;
            Slots::U32(values.into_boxed_slice())
        }
        Precision::U64 => {
            let mut values = vec![0u64; width];
            cursor.read_u64_into(&mut values).map_err(make_error("slots"))?;
            Slots::U64(values.into_boxed_slice())
        }
    };

    Ok(LeanMinHash::from_parts(seed as u64, slots))
}
