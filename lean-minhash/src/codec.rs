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


use std::io;
use std::io::Cursor;
use std::io::Read;
use std::marker::PhantomData;

use byteorder::ByteOrder;
use byteorder::ReadBytesExt;

/// Writes fixed-width fields into a caller-provided byte range.
///
/// The range is sized up front by the caller; writing past its end panics.
pub(crate) struct SketchWriter<'a, E> {
    buf: &'a mut [u8],
    pos: usize,
    order: PhantomData<E>,
}

impl<'a, E: ByteOrder> SketchWriter<'a, E> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            order: PhantomData,
        }
    }

    pub fn written(&self) -> usize {
        self.pos
    }

    fn advance(&mut self, n: usize) -> &mut [u8] {
        let start = self.pos;
        self.pos += n;
        &mut self.buf[start..self.pos]
    }

    pub fn write_u8(&mut self, n: u8) {
        self.advance(1)[0] = n;
    }

    pub fn write_u16(&mut self, n: u16) {
        E::write_u16(self.advance(2), n);
    }

    pub fn write_u8_slice(&mut self, src: &[u8]) {
        self.advance(src.len()).copy_from_slice(src);
    }

    pub fn write_u16_slice(&mut self, src: &[u16]) {
        E::write_u16_into(src, self.advance(src.len() * 2));
    }

    pub fn write_u32_slice(&mut self, src: &[u32]) {
        E::write_u32_into(src, self.advance(src.len() * 4));
    }

    pub fn write_u64_slice(&mut self, src: &[u64]) {
        E::write_u64_into(src, self.advance(src.len() * 8));
    }
}

/// Reads fixed-width fields from a borrowed byte slice.
pub(crate) struct SketchSlice<'a, E> {
    slice: Cursor<&'a [u8]>,
    order: PhantomData<E>,
}

impl<'a, E: ByteOrder> SketchSlice<'a, E> {
    pub fn new(slice: &'a [u8]) -> Self {
        Self {
            slice: Cursor::new(slice),
            order: PhantomData,
        }
    }

    pub fn remaining(&self) -> usize {
        let len = self.slice.get_ref().len();
        len.saturating_sub(self.slice.position() as usize)
    }

    pub fn read_u8(&mut self) -> io::Result<u8> {
        self.slice.read_u8()
    }

    pub fn read_u16(&mut self) -> io::Result<u16> {
        self.slice.read_u16::<E>()
    }

    pub fn read_u8_into(&mut self, dst: &mut [u8]) -> io::Result<()> {
        self.slice.read_exact(dst)
    }

    pub fn read_u16_into(&mut self, dst: &mut [u16]) -> io::Result<()> {
        self.slice.read_u16_into::<E>(dst)
    }

    pub fn read_u32_into(&mut self, dst: &mut [u32]) -> io::Result<()> {
        self.slice.read_u32_into::<E>(dst)
    }

    pub fn read_u64_into(&mut self, dst: &mut [u64]) -> io::Result<()> {
        self.slice.read_u64_into::<E>(dst)
    }
}
