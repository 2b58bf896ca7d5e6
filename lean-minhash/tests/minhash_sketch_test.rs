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


mod common;

use std::collections::HashSet;

use common::TestMinHash;
use googletest::assert_that;
use googletest::prelude::contains_substring;
use googletest::prelude::eq;
use googletest::prelude::near;
use lean_minhash::LeanMinHash;
use lean_minhash::Precision;
use lean_minhash::error::ErrorKind;

#[test]
fn test_freeze_generator_snapshot() {
    let mut generator = TestMinHash::from_items(128, 1, Precision::U32, 0..100);
    let frozen = LeanMinHash::from_generator(&generator).unwrap();

    assert_that!(frozen.len(), eq(128usize));
    assert_that!(frozen.seed(), eq(1u64));
    assert_eq!(frozen.precision(), Precision::U32);
    let before = frozen.digest();

    // Later updates are not visible through the snapshot.
    for i in 100..10_000 {
        generator.update(i);
    }
    assert_eq!(frozen.digest(), before);
    assert_ne!(LeanMinHash::from_generator(&generator).unwrap(), frozen);
}

#[test]
fn test_equal_sketches_hash_equally() {
    let a = LeanMinHash::from_generator(&TestMinHash::from_items(
        64,
        3,
        Precision::U64,
        ["apple", "banana"],
    ))
    .unwrap();
    let b = LeanMinHash::from_generator(&TestMinHash::from_items(
        64,
        3,
        Precision::U64,
        ["banana", "apple"],
    ))
    .unwrap();
    let c = LeanMinHash::from_generator(&TestMinHash::from_items(
        64,
        3,
        Precision::U64,
        ["cherry"],
    ))
    .unwrap();

    assert_eq!(a, b);
    let set: HashSet<LeanMinHash> = [a.clone(), b, c].into_iter().collect();
    assert_that!(set.len(), eq(2usize));
    assert!(set.contains(&a));
}

#[test]
fn test_copy_is_equal_and_independent() {
    let original = LeanMinHash::new(11, Precision::U16, &[9, 8, 7]).unwrap();
    let copy = original.clone();
    assert_eq!(copy, original);
    drop(original);
    assert_eq!(copy.digest(), vec![9, 8, 7]);
}

#[test]
fn test_jaccard_estimate() {
    let a = TestMinHash::from_items(256, 1, Precision::U32, 0..1_000);
    let b = TestMinHash::from_items(256, 1, Precision::U32, 500..1_500);
    let a = LeanMinHash::from_generator(&a).unwrap();
    let b = LeanMinHash::from_generator(&b).unwrap();

    assert_that!(a.jaccard(&b).unwrap(), near(1.0 / 3.0, 0.12));
    assert_that!(a.jaccard(&a).unwrap(), eq(1.0_f64));
}

#[test]
fn test_jaccard_rejects_incompatible() {
    let a = LeanMinHash::new(1, Precision::U32, &[1, 2, 3, 4]).unwrap();
    let other_width = LeanMinHash::new(1, Precision::U32, &[1, 2, 3]).unwrap();
    let other_precision = LeanMinHash::new(1, Precision::U64, &[1, 2, 3, 4]).unwrap();

    let err = a.jaccard(&other_width).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IncompatibleSketch);
    assert_that!(err.message(), contains_substring("different widths"));

    let err = a.jaccard(&other_precision).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IncompatibleSketch);
    assert_that!(err.message(), contains_substring("different precisions"));
}

#[test]
fn test_construction_validates_precision() {
    let err = LeanMinHash::new(1, Precision::U8, &[1, 2, 300]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_that!(err.to_string().as_str(), contains_substring("index: 2"));

    let sketch = LeanMinHash::new(1, Precision::U8, &[0, 255]).unwrap();
    assert_eq!(sketch.digest(), vec![0, 255]);
}

#[test]
fn test_sketch_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<LeanMinHash>();

    let sketch = LeanMinHash::new(5, Precision::U32, &[1, 2, 3]).unwrap();
    let sums: Vec<u64> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| sketch.iter().sum::<u64>()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(sums, vec![6; 4]);
}
