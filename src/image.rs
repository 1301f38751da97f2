// glyph-kit/src/image.rs
//
// Copyright © 2025 The Glyph Kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Encodes RGB24 canvases as BMP or PNG files.
//!
//! The PNG encoder is deliberately minimal: every row gets the Sub filter and
//! the zlib stream uses stored (uncompressed) DEFLATE blocks, so output
//! round-trips exactly through any conforming decoder at the cost of file
//! size.

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::canvas::{Canvas, Format};
use crate::checksum;
use crate::error::ImageWritingError;
use crate::utils;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// PNG filter type applied to every row.
const PNG_FILTER_SUB: u8 = 1;

/// The largest payload a stored DEFLATE block can carry.
const DEFLATE_STORED_BLOCK_MAX: usize = 65535;

const BMP_HEADER_SIZE: usize = 14 + 40;

/// Encodes a canvas as a 24-bit uncompressed BMP file in memory.
///
/// Rows are written bottom-to-top in BGR order and padded to 4-byte
/// boundaries, per the format.
pub fn bmp_data(canvas: &Canvas) -> Result<Vec<u8>, ImageWritingError> {
    if canvas.format != Format::Rgb24 {
        return Err(ImageWritingError::UnsupportedFormat);
    }

    let width = canvas.size.x() as usize;
    let height = canvas.size.y() as usize;
    let row_size = utils::div_round_up(width * 3, 4) * 4;
    let data_size = row_size * height;
    let file_size = BMP_HEADER_SIZE + data_size;

    let mut out = Vec::with_capacity(file_size);

    // File header.
    out.extend_from_slice(b"BM");
    out.write_u32::<LittleEndian>(file_size as u32)?;
    out.write_u32::<LittleEndian>(0)?;
    out.write_u32::<LittleEndian>(BMP_HEADER_SIZE as u32)?;

    // Info header: 24 bits per pixel, no compression.
    out.write_u32::<LittleEndian>(40)?;
    out.write_i32::<LittleEndian>(width as i32)?;
    out.write_i32::<LittleEndian>(height as i32)?;
    out.write_u16::<LittleEndian>(1)?;
    out.write_u16::<LittleEndian>(24)?;
    out.write_u32::<LittleEndian>(0)?;
    out.write_u32::<LittleEndian>(data_size as u32)?;
    out.write_i32::<LittleEndian>(0)?;
    out.write_i32::<LittleEndian>(0)?;
    out.write_u32::<LittleEndian>(0)?;
    out.write_u32::<LittleEndian>(0)?;

    for y in (0..height).rev() {
        let row = &canvas.pixels[y * canvas.stride..y * canvas.stride + width * 3];
        for pixel in row.chunks(3) {
            out.push(pixel[2]);
            out.push(pixel[1]);
            out.push(pixel[0]);
        }
        for _ in width * 3..row_size {
            out.push(0);
        }
    }

    Ok(out)
}

/// Writes a canvas to `path` as a 24-bit uncompressed BMP file.
pub fn write_bmp<P>(path: P, canvas: &Canvas) -> Result<(), ImageWritingError>
where
    P: AsRef<Path>,
{
    let data = bmp_data(canvas)?;
    let mut file = File::create(path)?;
    file.write_all(&data)?;
    Ok(())
}

/// Encodes a canvas as an 8-bit RGB PNG file in memory.
pub fn png_data(canvas: &Canvas) -> Result<Vec<u8>, ImageWritingError> {
    if canvas.format != Format::Rgb24 {
        return Err(ImageWritingError::UnsupportedFormat);
    }

    let width = canvas.size.x() as usize;
    let height = canvas.size.y() as usize;
    let mut out = Vec::new();
    out.extend_from_slice(&PNG_SIGNATURE);

    // IHDR: dimensions, bit depth 8, color type 2 (RGB), no interlace.
    let mut ihdr = Vec::with_capacity(13);
    ihdr.write_u32::<BigEndian>(width as u32)?;
    ihdr.write_u32::<BigEndian>(height as u32)?;
    ihdr.extend_from_slice(&[8, 2, 0, 0, 0]);
    write_chunk(&mut out, b"IHDR", &ihdr)?;

    // Filter every row with Sub: each byte minus its same-channel neighbor to
    // the left, first pixel raw.
    let bytes_per_pixel = 3;
    let row_bytes = width * bytes_per_pixel;
    let mut filtered = Vec::with_capacity((row_bytes + 1) * height);
    for y in 0..height {
        let row = &canvas.pixels[y * canvas.stride..y * canvas.stride + row_bytes];
        filtered.push(PNG_FILTER_SUB);
        for (index, &byte) in row.iter().enumerate() {
            if index < bytes_per_pixel {
                filtered.push(byte);
            } else {
                filtered.push(byte.wrapping_sub(row[index - bytes_per_pixel]));
            }
        }
    }

    // Wrap the filtered stream in a zlib container of stored DEFLATE blocks.
    let mut idat = Vec::with_capacity(filtered.len() + filtered.len() / DEFLATE_STORED_BLOCK_MAX * 5 + 11);
    idat.push(0x78);
    idat.push(0x01);
    let mut offset = 0;
    loop {
        let block_len = (filtered.len() - offset).min(DEFLATE_STORED_BLOCK_MAX);
        let last = offset + block_len == filtered.len();
        idat.push(last as u8);
        idat.write_u16::<LittleEndian>(block_len as u16)?;
        idat.write_u16::<LittleEndian>(!(block_len as u16))?;
        idat.extend_from_slice(&filtered[offset..offset + block_len]);
        offset += block_len;
        if last {
            break;
        }
    }
    idat.write_u32::<BigEndian>(checksum::adler32(&filtered))?;

    write_chunk(&mut out, b"IDAT", &idat)?;
    write_chunk(&mut out, b"IEND", &[])?;

    Ok(out)
}

/// Writes a canvas to `path` as an 8-bit RGB PNG file.
pub fn write_png<P>(path: P, canvas: &Canvas) -> Result<(), ImageWritingError>
where
    P: AsRef<Path>,
{
    let data = png_data(canvas)?;
    let mut file = File::create(path)?;
    file.write_all(&data)?;
    Ok(())
}

/// Writes one PNG chunk: big-endian length, type tag, data, then the CRC32 of
/// the tag and data together.
fn write_chunk(out: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) -> io::Result<()> {
    out.write_u32::<BigEndian>(data.len() as u32)?;
    out.extend_from_slice(chunk_type);
    out.extend_from_slice(data);
    let mut checksummed = Vec::with_capacity(4 + data.len());
    checksummed.extend_from_slice(chunk_type);
    checksummed.extend_from_slice(data);
    out.write_u32::<BigEndian>(checksum::crc32(&checksummed))?;
    Ok(())
}
