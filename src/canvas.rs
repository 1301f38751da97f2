// glyph-kit/src/canvas.rs
//
// Copyright © 2025 The Glyph Kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An in-memory pixel surface for glyph rasterization and image export.

use pathfinder_geometry::vector::Vector2I;
use std::cmp;

/// An in-memory pixel surface.
///
/// A8 canvases hold single-channel coverage or signed-distance values; RGB24
/// canvases hold the pixel buffers the image codec exports. The canvas owns
/// its pixel storage and releases it on drop.
pub struct Canvas {
    /// The raw pixel data.
    pub pixels: Vec<u8>,
    /// The size of the buffer, in pixels.
    pub size: Vector2I,
    /// The number of *bytes* between successive rows.
    pub stride: usize,
    /// The image format of the canvas.
    pub format: Format,
}

impl Canvas {
    /// Creates a new blank canvas with the given pixel size and format.
    ///
    /// Stride is automatically calculated from width.
    ///
    /// The canvas is initialized with transparent black (all values 0).
    #[inline]
    pub fn new(size: Vector2I, format: Format) -> Canvas {
        Canvas::with_stride(
            size,
            size.x() as usize * format.bytes_per_pixel() as usize,
            format,
        )
    }

    /// Creates a new blank canvas with the given pixel size, stride (number of
    /// bytes between successive rows), and format.
    ///
    /// The canvas is initialized with transparent black (all values 0).
    pub fn with_stride(size: Vector2I, stride: usize, format: Format) -> Canvas {
        Canvas {
            pixels: vec![0; stride * size.y() as usize],
            size,
            stride,
            format,
        }
    }

    /// Copies pixels from `src` into this canvas, converting formats as
    /// needed.
    ///
    /// The copy covers the overlap of the two sizes.
    pub fn blit_from_canvas(&mut self, src: &Canvas) {
        self.blit_from(&src.pixels, src.size, src.stride, src.format)
    }

    /// Copies raw pixels in the given source format into this canvas,
    /// converting formats as needed.
    pub fn blit_from(
        &mut self,
        src_bytes: &[u8],
        src_size: Vector2I,
        src_stride: usize,
        src_format: Format,
    ) {
        let width = cmp::min(src_size.x(), self.size.x()) as usize;
        let height = cmp::min(src_size.y(), self.size.y()) as usize;

        match (self.format, src_format) {
            (Format::A8, Format::A8) | (Format::Rgb24, Format::Rgb24) => {
                self.blit_from_with::<BlitMemcpy>(src_bytes, width, height, src_stride, src_format)
            }
            (Format::A8, Format::Rgb24) => {
                self.blit_from_with::<BlitRgb24ToA8>(src_bytes, width, height, src_stride, src_format)
            }
            (Format::Rgb24, Format::A8) => {
                self.blit_from_with::<BlitA8ToRgb24>(src_bytes, width, height, src_stride, src_format)
            }
        }
    }

    fn blit_from_with<B>(
        &mut self,
        src_bytes: &[u8],
        width: usize,
        height: usize,
        src_stride: usize,
        src_format: Format,
    ) where
        B: Blit,
    {
        let src_bytes_per_pixel = src_format.bytes_per_pixel() as usize;
        let dest_bytes_per_pixel = self.format.bytes_per_pixel() as usize;

        for y in 0..height {
            let (dest_row_start, src_row_start) = (y * self.stride, y * src_stride);
            let dest_row_end = dest_row_start + width * dest_bytes_per_pixel;
            let src_row_end = src_row_start + width * src_bytes_per_pixel;
            let dest_row_pixels = &mut self.pixels[dest_row_start..dest_row_end];
            let src_row_pixels = &src_bytes[src_row_start..src_row_end];
            B::blit(dest_row_pixels, src_row_pixels)
        }
    }
}

/// Multiplies an A8 coverage canvas by a solid color, producing an RGB24
/// canvas of the same size suitable for image export.
pub fn tint_coverage(coverage: &Canvas, color: [u8; 3]) -> Canvas {
    let mut tinted = Canvas::new(coverage.size, Format::Rgb24);
    for y in 0..coverage.size.y() as usize {
        let src_row = &coverage.pixels[y * coverage.stride..];
        let dest_row = &mut tinted.pixels[y * tinted.stride..];
        for x in 0..coverage.size.x() as usize {
            let alpha = u32::from(src_row[x]);
            for channel in 0..3 {
                dest_row[x * 3 + channel] = ((u32::from(color[channel]) * alpha) / 255) as u8;
            }
        }
    }
    tinted
}

/// The image format for the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Format {
    /// R8G8B8, little-endian.
    Rgb24,
    /// A8.
    A8,
}

impl Format {
    /// Returns the number of bits per pixel that this image format corresponds to.
    #[inline]
    pub fn bits_per_pixel(self) -> u8 {
        match self {
            Format::Rgb24 => 24,
            Format::A8 => 8,
        }
    }

    /// Returns the number of bytes per pixel that this image format corresponds to.
    #[inline]
    pub fn bytes_per_pixel(self) -> u8 {
        self.bits_per_pixel() / 8
    }
}

trait Blit {
    fn blit(dest: &mut [u8], src: &[u8]);
}

struct BlitMemcpy;

impl Blit for BlitMemcpy {
    #[inline]
    fn blit(dest: &mut [u8], src: &[u8]) {
        dest.clone_from_slice(src)
    }
}

struct BlitRgb24ToA8;

impl Blit for BlitRgb24ToA8 {
    #[inline]
    fn blit(dest: &mut [u8], src: &[u8]) {
        for (dest, src) in dest.iter_mut().zip(src.chunks(3)) {
            *dest = src[1]
        }
    }
}

struct BlitA8ToRgb24;

impl Blit for BlitA8ToRgb24 {
    #[inline]
    fn blit(dest: &mut [u8], src: &[u8]) {
        for (dest, src) in dest.chunks_mut(3).zip(src.iter()) {
            dest[0] = *src;
            dest[1] = *src;
            dest[2] = *src;
        }
    }
}
