// glyph-kit/src/distance_field.rs
//
// Copyright © 2025 The Glyph Kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Converts coverage bitmaps into signed distance fields.

use crate::canvas::{Canvas, Format};
use crate::utils;

const FAR: f32 = 1e9;

/// Converts an A8 coverage canvas into an A8 signed distance field.
///
/// Coverage is thresholded at 127 into a binary inside/outside mask. Two
/// distance fields are then relaxed independently with four sweeps each
/// (left→right, right→left, top→bottom, bottom→top, each taking the minimum
/// of a cell and its neighbor plus one): one measuring distance to the
/// outside for inside pixels, one measuring distance to the inside for
/// outside pixels. The result is a Manhattan-style approximation, not an
/// exact Euclidean transform; corners and diagonals are under-weighted, which
/// is acceptable for moderate spreads.
///
/// The signed distance (negative inside, positive outside) is clamped to
/// `±spread` and remapped linearly to `[0, 255]`, so 127 sits at the outline
/// boundary, 0 at `-spread`, and 255 at `+spread`.
///
/// Panics if the canvas is not A8.
pub fn coverage_to_distance_field(coverage: &Canvas, spread: f32) -> Canvas {
    assert_eq!(coverage.format, Format::A8);

    let width = coverage.size.x() as usize;
    let height = coverage.size.y() as usize;

    let mut mask = vec![false; width * height];
    for y in 0..height {
        let row = &coverage.pixels[y * coverage.stride..];
        for x in 0..width {
            mask[y * width + x] = row[x] > 127;
        }
    }

    // Distance to the nearest inside pixel, for outside pixels.
    let mut distance_to_inside: Vec<f32> = mask
        .iter()
        .map(|&inside| if inside { 0.0 } else { FAR })
        .collect();
    relax(&mut distance_to_inside, width, height);

    // Distance to the nearest outside pixel, for inside pixels.
    let mut distance_to_outside: Vec<f32> = mask
        .iter()
        .map(|&inside| if inside { FAR } else { 0.0 })
        .collect();
    relax(&mut distance_to_outside, width, height);

    let mut field = Canvas::new(coverage.size, Format::A8);
    let stride = field.stride;
    for y in 0..height {
        let row = &mut field.pixels[y * stride..];
        for x in 0..width {
            let index = y * width + x;
            let distance = if mask[index] {
                -distance_to_outside[index]
            } else {
                distance_to_inside[index]
            };
            let distance = utils::clamp(distance, -spread, spread);
            row[x] = ((distance / spread + 1.0) * 0.5 * 255.0) as u8;
        }
    }
    field
}

/// One round of the four relaxation sweeps.
fn relax(field: &mut [f32], width: usize, height: usize) {
    for y in 0..height {
        for x in 1..width {
            let index = y * width + x;
            field[index] = field[index].min(field[index - 1] + 1.0);
        }
        for x in (0..width.saturating_sub(1)).rev() {
            let index = y * width + x;
            field[index] = field[index].min(field[index + 1] + 1.0);
        }
    }
    for x in 0..width {
        for y in 1..height {
            let index = y * width + x;
            field[index] = field[index].min(field[(y - 1) * width + x] + 1.0);
        }
        for y in (0..height.saturating_sub(1)).rev() {
            let index = y * width + x;
            field[index] = field[index].min(field[(y + 1) * width + x] + 1.0);
        }
    }
}
