// glyph-kit/src/raster.rs
//
// Copyright © 2025 The Glyph Kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Scanline rasterization of glyph outlines into antialiased coverage
//! bitmaps.

use pathfinder_geometry::vector::{Vector2F, Vector2I};
use std::mem;

use crate::canvas::{Canvas, Format};
use crate::outline::{Outline, OutlineSink};
use crate::utils;

/// Edges flatter than this make no winding contribution.
const HORIZONTAL_EPSILON: f32 = 0.001;

/// How many line segments a quadratic curve is flattened into.
const QUADRATIC_SEGMENTS: u32 = 32;

/// Rasterizes an outline into an antialiased A8 coverage canvas.
///
/// The rasterizer is an `OutlineSink`: send it a glyph outline (for example
/// via `Font::outline` or `Outline::copy_to`), then call `finish`. Each
/// directed edge deposits its fractional vertical overlap per row into a
/// floating-point accumulator at the edge's midpoint-x cell; sweeping each
/// row left to right integrates those signed crossings into a winding sum,
/// and `|winding|` clamped to 1 becomes the pixel's coverage. This is the
/// non-zero winding rule with antialiasing supplied by the fractional
/// overlap term instead of supersampling.
pub struct Rasterizer {
    accumulator: Vec<f32>,
    size: Vector2I,
    contour_start: Vector2F,
    current: Vector2F,
}

impl Rasterizer {
    /// Creates a rasterizer for a bitmap of the given pixel size.
    pub fn new(size: Vector2I) -> Rasterizer {
        Rasterizer {
            accumulator: vec![0.0; size.x() as usize * size.y() as usize],
            size,
            contour_start: Vector2F::zero(),
            current: Vector2F::zero(),
        }
    }

    /// Sweeps the accumulated edges into a coverage canvas.
    ///
    /// Rasterizing the same outline at the same size twice yields
    /// bit-identical canvases.
    pub fn finish(self) -> Canvas {
        let mut canvas = Canvas::new(self.size, Format::A8);
        let width = self.size.x() as usize;
        let stride = canvas.stride;
        for y in 0..self.size.y() as usize {
            let mut winding = 0.0;
            let row = &mut canvas.pixels[y * stride..y * stride + width];
            for (x, pixel) in row.iter_mut().enumerate() {
                winding += self.accumulator[y * width + x];
                *pixel = (utils::clamp(winding.abs(), 0.0, 1.0) * 255.0) as u8;
            }
        }
        canvas
    }

    fn add_edge(&mut self, from: Vector2F, to: Vector2F) {
        let (mut x0, mut y0) = (from.x(), from.y());
        let (mut x1, mut y1) = (to.x(), to.y());
        if (y1 - y0).abs() < HORIZONTAL_EPSILON {
            return;
        }

        let mut direction = 1.0;
        if y0 > y1 {
            mem::swap(&mut x0, &mut x1);
            mem::swap(&mut y0, &mut y1);
            direction = -1.0;
        }

        let width = self.size.x();
        let height = self.size.y();
        let y_start = (y0.floor() as i32).max(0);
        let y_end = (y1.ceil() as i32).min(height);

        let dx = x1 - x0;
        let dy = y1 - y0;

        for y in y_start..y_end {
            // Fractional overlap of the edge with this row, and the edge's x
            // at the row's vertical midpoint.
            let row_top = (y as f32).max(y0);
            let row_bottom = ((y + 1) as f32).min(y1);
            let coverage = row_bottom - row_top;
            let y_mid = (row_top + row_bottom) * 0.5;
            let x_mid = x0 + dx * (y_mid - y0) / dy;

            let x_cell = x_mid.floor() as i32;
            if x_cell >= 0 && x_cell < width {
                self.accumulator[y as usize * width as usize + x_cell as usize] +=
                    coverage * direction;
            }
        }
    }
}

impl OutlineSink for Rasterizer {
    fn move_to(&mut self, to: Vector2F) {
        self.contour_start = to;
        self.current = to;
    }

    fn line_to(&mut self, to: Vector2F) {
        let from = self.current;
        self.add_edge(from, to);
        self.current = to;
    }

    fn quadratic_curve_to(&mut self, ctrl: Vector2F, to: Vector2F) {
        let from = self.current;
        let mut previous = from;
        for step in 1..=QUADRATIC_SEGMENTS {
            let t = step as f32 / QUADRATIC_SEGMENTS as f32;
            let b0 = (1.0 - t) * (1.0 - t);
            let b1 = 2.0 * (1.0 - t) * t;
            let b2 = t * t;
            let point = from * b0 + ctrl * b1 + to * b2;
            self.add_edge(previous, point);
            previous = point;
        }
        self.current = to;
    }

    fn close(&mut self) {
        if self.current != self.contour_start {
            let from = self.current;
            let to = self.contour_start;
            self.add_edge(from, to);
        }
        self.current = self.contour_start;
    }
}

/// Rasterizes a stored outline into a coverage canvas of the given size.
pub fn rasterize_outline(outline: &Outline, size: Vector2I) -> Canvas {
    let mut rasterizer = Rasterizer::new(size);
    outline.copy_to(&mut rasterizer);
    rasterizer.finish()
}
