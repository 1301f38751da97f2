// glyph-kit/src/checksum.rs
//
// Copyright © 2025 The Glyph Kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CRC32 and Adler32 checksums, as required by the PNG and zlib containers.

/// The IEEE 802.3 polynomial, reflected.
const CRC32_POLYNOMIAL: u32 = 0xedb8_8320;

const ADLER32_MODULUS: u32 = 65521;

lazy_static! {
    static ref CRC32_TABLE: [u32; 256] = {
        let mut table = [0; 256];
        for byte in 0..0x100u32 {
            let mut crc = byte;
            for _ in 0..8 {
                crc = if crc & 1 != 0 {
                    (crc >> 1) ^ CRC32_POLYNOMIAL
                } else {
                    crc >> 1
                };
            }
            table[byte as usize] = crc;
        }
        table
    };
}

/// Computes the CRC32 checksum of `data`.
///
/// Standard initial value of all ones and a final XOR, matching the checksum
/// PNG chunks carry.
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xffff_ffff;
    for &byte in data {
        let index = ((crc ^ u32::from(byte)) & 0xff) as usize;
        crc = (crc >> 8) ^ CRC32_TABLE[index];
    }
    crc ^ 0xffff_ffff
}

/// Computes the Adler32 checksum of `data`, as used by the zlib container.
pub fn adler32(data: &[u8]) -> u32 {
    let mut a = 1u32;
    let mut b = 0u32;
    for &byte in data {
        a = (a + u32::from(byte)) % ADLER32_MODULUS;
        b = (b + a) % ADLER32_MODULUS;
    }
    (b << 16) | a
}
