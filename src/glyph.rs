// glyph-kit/src/glyph.rs
//
// Copyright © 2025 The Glyph Kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Decodes simple glyph outlines from the `glyf` table.

use pathfinder_geometry::rect::RectI;
use pathfinder_geometry::vector::{Vector2F, Vector2I};

use crate::error::GlyphLoadingError;
use crate::font::Font;
use crate::outline::OutlineSink;
use crate::utils;

bitflags! {
    /// Per-point flag bits of a simple glyph, as stored in the `glyf` table.
    struct GlyfFlags: u8 {
        const ON_CURVE = 0x01;
        const X_SHORT = 0x02;
        const Y_SHORT = 0x04;
        const REPEAT = 0x08;
        const X_SAME_OR_POSITIVE = 0x10;
        const Y_SAME_OR_POSITIVE = 0x20;
    }
}

impl Font {
    /// Returns the byte offset of the given glyph's outline data within the
    /// font, or `None` if the glyph has no outline.
    ///
    /// `None` is a valid, common outcome (whitespace and other invisible
    /// glyphs), signalled by two equal adjacent `loca` entries. Fonts without
    /// a `glyf` table (e.g. CFF-outline OpenType fonts) report every glyph as
    /// having no outline.
    pub fn glyph_data_offset(&self, glyph_id: u32) -> Result<Option<u32>, GlyphLoadingError> {
        if glyph_id >= self.glyph_count() {
            return Err(GlyphLoadingError::NoSuchGlyph);
        }
        let (glyf, loca) = match (self.glyf, self.loca) {
            (Some(glyf), Some(loca)) => (glyf, loca),
            _ => return Ok(None),
        };
        let data = self.data();
        let (start, end) = if self.index_to_loc_format != 0 {
            let entry = loca as usize + glyph_id as usize * 4;
            (
                utils::read_u32_be(data, entry).ok_or(GlyphLoadingError::Parse)?,
                utils::read_u32_be(data, entry + 4).ok_or(GlyphLoadingError::Parse)?,
            )
        } else {
            let entry = loca as usize + glyph_id as usize * 2;
            (
                u32::from(utils::read_u16_be(data, entry).ok_or(GlyphLoadingError::Parse)?) * 2,
                u32::from(utils::read_u16_be(data, entry + 2).ok_or(GlyphLoadingError::Parse)?)
                    * 2,
            )
        };
        if start == end {
            Ok(None)
        } else {
            glyf.checked_add(start)
                .map(Some)
                .ok_or(GlyphLoadingError::Parse)
        }
    }

    /// Returns the boundaries of a glyph in font units. The origin of the
    /// coordinate space is at the bottom left.
    ///
    /// Glyphs without an outline report a zero rect.
    pub fn typographic_bounds(&self, glyph_id: u32) -> Result<RectI, GlyphLoadingError> {
        let offset = match self.glyph_data_offset(glyph_id)? {
            Some(offset) => offset as usize,
            None => return Ok(RectI::new(Vector2I::zero(), Vector2I::zero())),
        };
        let data = self.data();
        let x_min = read_glyf_i16(data, offset + 2)?;
        let y_min = read_glyf_i16(data, offset + 4)?;
        let x_max = read_glyf_i16(data, offset + 6)?;
        let y_max = read_glyf_i16(data, offset + 8)?;
        // Widen before subtracting; a bbox may span the full i16 range.
        Ok(RectI::new(
            Vector2I::new(i32::from(x_min), i32::from(y_min)),
            Vector2I::new(
                i32::from(x_max) - i32::from(x_min),
                i32::from(y_max) - i32::from(y_min),
            ),
        ))
    }

    /// Returns the pixel boundaries the glyph takes up when rasterized at the
    /// given scale. The origin of the coordinate space is at the top left.
    ///
    /// The rect's origin is the offset of the bitmap within the line of text:
    /// x from the pen position, y down from the baseline-relative top. Empty
    /// glyphs report a zero rect.
    pub fn raster_bounds(
        &self,
        glyph_id: u32,
        scale: Vector2F,
    ) -> Result<RectI, GlyphLoadingError> {
        let zero = RectI::new(Vector2I::zero(), Vector2I::zero());
        let offset = match self.glyph_data_offset(glyph_id)? {
            Some(offset) => offset as usize,
            None => return Ok(zero),
        };
        let data = self.data();
        let number_of_contours = read_glyf_i16(data, offset)?;
        if number_of_contours < 0 {
            return Err(GlyphLoadingError::UnsupportedFormat);
        }
        if number_of_contours == 0 {
            return Ok(zero);
        }
        let x_min = f32::from(read_glyf_i16(data, offset + 2)?);
        let y_min = f32::from(read_glyf_i16(data, offset + 4)?);
        let x_max = f32::from(read_glyf_i16(data, offset + 6)?);
        let y_max = f32::from(read_glyf_i16(data, offset + 8)?);
        let width = ((x_max - x_min) * scale.x()).ceil() as i32 + 1;
        let height = ((y_max - y_min) * scale.y()).ceil() as i32 + 1;
        if width <= 0 || height <= 0 {
            return Ok(zero);
        }
        Ok(RectI::new(
            Vector2I::new((x_min * scale.x()) as i32, (y_max * scale.y()) as i32),
            Vector2I::new(width, height),
        ))
    }

    /// Decodes the glyph's outline, already scaled to pixel space, and sends
    /// it to a sink.
    ///
    /// Output coordinates are translated by `-x_min`, multiplied by `scale`,
    /// and y-flipped so rows run top-down, matching the bitmap produced by
    /// the rasterizer at `raster_bounds`. Implicit on-curve points midway
    /// between consecutive off-curve points are synthesized, so the sink only
    /// ever sees lines and well-formed quadratic curves.
    ///
    /// Empty glyphs succeed without emitting anything. Composite glyphs
    /// return `GlyphLoadingError::UnsupportedFormat`.
    pub fn outline<S>(
        &self,
        glyph_id: u32,
        scale: Vector2F,
        sink: &mut S,
    ) -> Result<(), GlyphLoadingError>
    where
        S: OutlineSink,
    {
        let offset = match self.glyph_data_offset(glyph_id)? {
            Some(offset) => offset as usize,
            None => return Ok(()),
        };
        let data = self.data();

        let number_of_contours = read_glyf_i16(data, offset)?;
        if number_of_contours < 0 {
            return Err(GlyphLoadingError::UnsupportedFormat);
        }
        if number_of_contours == 0 {
            return Ok(());
        }
        let contour_count = number_of_contours as usize;

        let x_min = i32::from(read_glyf_i16(data, offset + 2)?);
        let y_max = i32::from(read_glyf_i16(data, offset + 8)?);

        let end_points_offset = offset + 10;
        let mut end_points = Vec::with_capacity(contour_count);
        for contour_index in 0..contour_count {
            let end_point = utils::read_u16_be(data, end_points_offset + contour_index * 2)
                .ok_or(GlyphLoadingError::Parse)?;
            end_points.push(end_point as usize);
        }
        let point_count = end_points[contour_count - 1] + 1;

        let instruction_length =
            utils::read_u16_be(data, end_points_offset + contour_count * 2)
                .ok_or(GlyphLoadingError::Parse)?;
        let mut cursor = end_points_offset + contour_count * 2 + 2 + instruction_length as usize;

        // Flag bytes, with run-length repeat expansion.
        let mut flags = Vec::with_capacity(point_count);
        while flags.len() < point_count {
            let flag = GlyfFlags::from_bits_truncate(
                utils::read_u8(data, cursor).ok_or(GlyphLoadingError::Parse)?,
            );
            cursor += 1;
            flags.push(flag);
            if flag.contains(GlyfFlags::REPEAT) {
                let repeat_count = utils::read_u8(data, cursor).ok_or(GlyphLoadingError::Parse)?;
                cursor += 1;
                for _ in 0..repeat_count {
                    if flags.len() == point_count {
                        break;
                    }
                    flags.push(flag);
                }
            }
        }

        // Delta-encoded coordinates: all x deltas, then all y deltas, each a
        // running sum.
        let mut xs = Vec::with_capacity(point_count);
        let mut x = 0i32;
        for &flag in &flags {
            if flag.contains(GlyfFlags::X_SHORT) {
                let delta =
                    i32::from(utils::read_u8(data, cursor).ok_or(GlyphLoadingError::Parse)?);
                cursor += 1;
                x += if flag.contains(GlyfFlags::X_SAME_OR_POSITIVE) {
                    delta
                } else {
                    -delta
                };
            } else if !flag.contains(GlyfFlags::X_SAME_OR_POSITIVE) {
                x += i32::from(
                    utils::read_i16_be(data, cursor).ok_or(GlyphLoadingError::Parse)?,
                );
                cursor += 2;
            }
            xs.push(x);
        }

        let mut ys = Vec::with_capacity(point_count);
        let mut y = 0i32;
        for &flag in &flags {
            if flag.contains(GlyfFlags::Y_SHORT) {
                let delta =
                    i32::from(utils::read_u8(data, cursor).ok_or(GlyphLoadingError::Parse)?);
                cursor += 1;
                y += if flag.contains(GlyfFlags::Y_SAME_OR_POSITIVE) {
                    delta
                } else {
                    -delta
                };
            } else if !flag.contains(GlyfFlags::Y_SAME_OR_POSITIVE) {
                y += i32::from(
                    utils::read_i16_be(data, cursor).ok_or(GlyphLoadingError::Parse)?,
                );
                cursor += 2;
            }
            ys.push(y);
        }

        let to_pixel_space = |x: f32, y: f32| {
            Vector2F::new(
                (x - x_min as f32) * scale.x(),
                (y_max as f32 - y) * scale.y(),
            )
        };

        let mut contour_start = 0;
        for &contour_end in &end_points {
            if contour_end < contour_start || contour_end >= point_count {
                return Err(GlyphLoadingError::Parse);
            }
            let mut points = Vec::with_capacity((contour_end - contour_start + 1) * 2);
            for point_index in contour_start..=contour_end {
                let next_index = if point_index == contour_end {
                    contour_start
                } else {
                    point_index + 1
                };
                let on_curve = flags[point_index].contains(GlyfFlags::ON_CURVE);
                points.push((
                    to_pixel_space(xs[point_index] as f32, ys[point_index] as f32),
                    on_curve,
                ));
                // Two consecutive off-curve points imply an on-curve point at
                // their midpoint.
                if !on_curve && !flags[next_index].contains(GlyfFlags::ON_CURVE) {
                    let mid_x = (xs[point_index] + xs[next_index]) as f32 * 0.5;
                    let mid_y = (ys[point_index] + ys[next_index]) as f32 * 0.5;
                    points.push((to_pixel_space(mid_x, mid_y), true));
                }
            }
            emit_contour(&points, sink);
            contour_start = contour_end + 1;
        }

        Ok(())
    }
}

/// Sends one reconstructed contour to the sink as a closed cycle of lines and
/// quadratic curves, starting from its first on-curve point.
fn emit_contour<S>(points: &[(Vector2F, bool)], sink: &mut S)
where
    S: OutlineSink,
{
    if points.len() < 2 {
        return;
    }
    let first = match points.iter().position(|&(_, on_curve)| on_curve) {
        Some(index) => index,
        None => return,
    };
    let point_count = points.len();
    sink.move_to(points[first].0);

    let mut index = first;
    let mut walked = 0;
    while walked < point_count {
        let next = (index + 1) % point_count;
        if points[next].1 {
            if next == first {
                break;
            }
            sink.line_to(points[next].0);
            index = next;
            walked += 1;
        } else {
            // Midpoint synthesis guarantees the point after a control point
            // is on-curve.
            let after = (index + 2) % point_count;
            sink.quadratic_curve_to(points[next].0, points[after].0);
            index = after;
            walked += 2;
            if after == first {
                break;
            }
        }
    }
    sink.close();
}

fn read_glyf_i16(data: &[u8], offset: usize) -> Result<i16, GlyphLoadingError> {
    utils::read_i16_be(data, offset).ok_or(GlyphLoadingError::Parse)
}
