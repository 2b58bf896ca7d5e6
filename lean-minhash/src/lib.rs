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


//! Frozen MinHash sketches.
//!
//! A [`LeanMinHash`] is the immutable snapshot of a MinHash: a seed and one
//! minimum hash value per permutation, stored at 1, 2, 4 or 8 bytes per slot.
//! It is built once, from a [`MinHashGenerator`] or from explicit values, and
//! afterwards can only be read, compared, serialized and merged.
//!
//! # Usage
//!
//! ```rust
//! use lean_minhash::{Endianness, LeanMinHash, Precision};
//!
//! let a = LeanMinHash::new(42, Precision::U32, &[5, 9, 2, 7]).unwrap();
//! let b = LeanMinHash::new(42, Precision::U32, &[3, 10, 1, 8]).unwrap();
//!
//! let merged = LeanMinHash::union([&a, &b]).unwrap();
//! assert_eq!(merged.digest(), vec![3, 9, 1, 7]);
//!
//! let bytes = merged.serialize(Endianness::Little).unwrap();
//! assert_eq!(bytes.len(), merged.serialized_size());
//! assert_eq!(LeanMinHash::deserialize(&bytes, Endianness::Little).unwrap(), merged);
//! ```
//!
//! # Packing many sketches
//!
//! [`LeanMinHash::serialize_into`] writes only the range it is given, so sketches
//! of one shape can be written into disjoint chunks of a shared buffer, from
//! several threads if needed.
//!
//! ```rust
//! use lean_minhash::{Endianness, LeanMinHash, Precision};
//!
//! let sketches: Vec<LeanMinHash> = (0..4u64)
//!     .map(|i| LeanMinHash::new(7, Precision::U16, &[i, i + 1, i + 2]).unwrap())
//!     .collect();
//! let size = sketches[0].serialized_size();
//! let mut buf = vec![0u8; size * sketches.len()];
//!
//! std::thread::scope(|scope| {
//!     for (chunk, sketch) in buf.chunks_exact_mut(size).zip(&sketches) {
//!         scope.spawn(move || sketch.serialize_into(chunk, Endianness::Big, 0).unwrap());
//!     }
//! });
//!
//! let restored = LeanMinHash::deserialize_batch(&buf, Endianness::Big).unwrap();
//! assert_eq!(restored, sketches);
//! ```

pub mod error;

mod builder;
mod codec;
mod precision;
mod serialization;
mod sketch;
mod union;

pub use self::builder::DEFAULT_SEED;
pub use self::builder::LeanMinHashBuilder;
pub use self::builder::MAX_WIDTH;
pub use self::precision::Iter;
pub use self::precision::Precision;
pub use self::serialization::Endianness;
pub use self::serialization::HEADER_SIZE_BYTES;
pub use self::sketch::LeanMinHash;
pub use self::sketch::MinHashGenerator;
