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


#![allow(dead_code)]

use std::hash::Hash;

use lean_minhash::MinHashGenerator;
use lean_minhash::Precision;

/// A small mutable MinHash used to produce realistic snapshots in tests.
///
/// Each slot keeps the minimum of `fmix64(hash(item) ^ key)` masked to the
/// configured precision, where the per-slot keys are derived from the seed.
pub struct TestMinHash {
    seed: u64,
    precision: Precision,
    keys: Vec<u64>,
    hash_values: Vec<u64>,
}

impl TestMinHash {
    pub fn new(num_perm: usize, seed: u64, precision: Precision) -> Self {
        let mut state = seed;
        let keys = (0..num_perm).map(|_| splitmix64(&mut state)).collect();
        Self {
            seed,
            precision,
            keys,
            hash_values: vec![precision.max_value(); num_perm],
        }
    }

    pub fn update<T: Hash>(&mut self, item: T) {
        let mut hasher = mur3::Hasher128::with_seed(self.seed as u32);
        item.hash(&mut hasher);
        let (h, _) = hasher.finish128();

        let mask = self.precision.max_value();
        for (slot, key) in self.hash_values.iter_mut().zip(&self.keys) {
            let value = fmix64(h ^ key) & mask;
            if value < *slot {
                *slot = value;
            }
        }
    }

    pub fn from_items<T: Hash>(
        num_perm: usize,
        seed: u64,
        precision: Precision,
        items: impl IntoIterator<Item = T>,
    ) -> Self {
        let mut minhash = Self::new(num_perm, seed, precision);
        for item in items {
            minhash.update(item);
        }
        minhash
    }
}

impl MinHashGenerator for TestMinHash {
    fn seed(&self) -> u64 {
        self.seed
    }

    fn precision(&self) -> Precision {
        self.precision
    }

    fn hash_values(&self) -> &[u64] {
        &self.hash_values
    }
}

fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51_afd7_ed55_8ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    k ^ (k >> 33)
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
