// glyph-kit/src/test.rs
//
// Copyright © 2025 The Glyph Kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Unit tests for the individual pipeline stages.

use pathfinder_geometry::vector::{Vector2F, Vector2I};

use crate::canvas::{self, Canvas, Format};
use crate::charmap::glyph_for_codepoint_in_subtable;
use crate::checksum::{adler32, crc32};
use crate::distance_field::coverage_to_distance_field;
use crate::error::ImageWritingError;
use crate::image;
use crate::outline::{OutlineBuilder, OutlineSink};
use crate::raster::{rasterize_outline, Rasterizer};

// CRC32 of the 4 ASCII bytes "IEND" with no payload, fixed for every PNG
// ever written.
const IEND_CRC32: u32 = 0xae42_6082;

fn push16(data: &mut Vec<u8>, value: u16) {
    data.extend_from_slice(&value.to_be_bytes());
}

fn push32(data: &mut Vec<u8>, value: u32) {
    data.extend_from_slice(&value.to_be_bytes());
}

// (end_code, start_code, id_delta, id_range_offset) per segment.
fn format_4_subtable(segments: &[(u16, u16, i16, u16)], glyph_array: &[u16]) -> Vec<u8> {
    let mut data = vec![];
    push16(&mut data, 4);
    push16(&mut data, 0); // length, unchecked by the lookup
    push16(&mut data, 0); // language
    push16(&mut data, segments.len() as u16 * 2);
    push16(&mut data, 0); // searchRange
    push16(&mut data, 0); // entrySelector
    push16(&mut data, 0); // rangeShift
    for &(end_code, _, _, _) in segments {
        push16(&mut data, end_code);
    }
    push16(&mut data, 0); // reservedPad
    for &(_, start_code, _, _) in segments {
        push16(&mut data, start_code);
    }
    for &(_, _, id_delta, _) in segments {
        push16(&mut data, id_delta as u16);
    }
    for &(_, _, _, id_range_offset) in segments {
        push16(&mut data, id_range_offset);
    }
    for &glyph_id in glyph_array {
        push16(&mut data, glyph_id);
    }
    data
}

#[test]
pub fn crc32_known_vectors() {
    assert_eq!(crc32(b""), 0);
    assert_eq!(crc32(b"123456789"), 0xcbf4_3926);
    assert_eq!(crc32(b"IEND"), IEND_CRC32);
}

#[test]
pub fn adler32_known_vectors() {
    assert_eq!(adler32(b""), 1);
    assert_eq!(adler32(b"Wikipedia"), 0x11e6_0398);
}

#[test]
pub fn cmap_format_0_direct_byte_lookup() {
    let mut subtable = vec![];
    push16(&mut subtable, 0);
    push16(&mut subtable, 262); // 6-byte header + 256 entries
    push16(&mut subtable, 0);
    subtable.extend((0..=255u8).map(|index| index.wrapping_add(1)));
    assert_eq!(glyph_for_codepoint_in_subtable(&subtable, 0, 65), Some(66));
    assert_eq!(glyph_for_codepoint_in_subtable(&subtable, 0, 300), Some(0));
}

#[test]
pub fn cmap_format_6_trimmed_table() {
    let mut subtable = vec![];
    push16(&mut subtable, 6);
    push16(&mut subtable, 0);
    push16(&mut subtable, 0);
    push16(&mut subtable, 0x30); // firstCode
    push16(&mut subtable, 2); // entryCount
    push16(&mut subtable, 7);
    push16(&mut subtable, 8);
    assert_eq!(glyph_for_codepoint_in_subtable(&subtable, 0, 0x30), Some(7));
    assert_eq!(glyph_for_codepoint_in_subtable(&subtable, 0, 0x31), Some(8));
    assert_eq!(glyph_for_codepoint_in_subtable(&subtable, 0, 0x32), Some(0));
    assert_eq!(glyph_for_codepoint_in_subtable(&subtable, 0, 0x2f), Some(0));
}

#[test]
pub fn cmap_format_4_identity_segment() {
    // One segment covering 'A'..'B' with idDelta 0 and no range offset maps
    // each codepoint to itself; anything past the segment is unmapped.
    let subtable = format_4_subtable(&[(66, 65, 0, 0), (0xffff, 0xffff, 1, 0)], &[]);
    assert_eq!(glyph_for_codepoint_in_subtable(&subtable, 0, 65), Some(65));
    assert_eq!(glyph_for_codepoint_in_subtable(&subtable, 0, 66), Some(66));
    assert_eq!(glyph_for_codepoint_in_subtable(&subtable, 0, 67), Some(0));
}

#[test]
pub fn cmap_format_4_delta_wraps_modulo_65536() {
    let subtable = format_4_subtable(&[(65, 65, -64, 0), (0xffff, 0xffff, 1, 0)], &[]);
    assert_eq!(glyph_for_codepoint_in_subtable(&subtable, 0, 65), Some(1));
}

#[test]
pub fn cmap_format_4_range_offset_indirection() {
    // The glyph array sits directly after the two range offsets, so segment
    // 0's offset of 4 bytes lands on it. A raw array value of 0 means
    // "unmapped", not glyph 0 plus delta.
    let subtable = format_4_subtable(&[(0x21, 0x20, 0, 4), (0xffff, 0xffff, 1, 0)], &[5, 0]);
    assert_eq!(glyph_for_codepoint_in_subtable(&subtable, 0, 0x20), Some(5));
    assert_eq!(glyph_for_codepoint_in_subtable(&subtable, 0, 0x21), Some(0));
    assert_eq!(glyph_for_codepoint_in_subtable(&subtable, 0, 0x22), Some(0));
}

#[test]
pub fn cmap_format_12_and_13_grouped_ranges() {
    for format in &[12u16, 13] {
        let mut subtable = vec![];
        push16(&mut subtable, *format);
        push16(&mut subtable, 0);
        push32(&mut subtable, 0); // length
        push32(&mut subtable, 0); // language
        push32(&mut subtable, 1); // nGroups
        push32(&mut subtable, 0x1f600);
        push32(&mut subtable, 0x1f601);
        push32(&mut subtable, 42);
        let second = if *format == 12 { 43 } else { 42 };
        assert_eq!(
            glyph_for_codepoint_in_subtable(&subtable, 0, 0x1f600),
            Some(42)
        );
        assert_eq!(
            glyph_for_codepoint_in_subtable(&subtable, 0, 0x1f601),
            Some(second)
        );
        assert_eq!(
            glyph_for_codepoint_in_subtable(&subtable, 0, 0x1f602),
            Some(0)
        );
    }
}

#[test]
pub fn cmap_format_12_glyph_id_wraps_on_overflow() {
    let mut subtable = vec![];
    push16(&mut subtable, 12);
    push16(&mut subtable, 0);
    push32(&mut subtable, 0); // length
    push32(&mut subtable, 0); // language
    push32(&mut subtable, 1); // nGroups
    push32(&mut subtable, 0x40);
    push32(&mut subtable, 0x41);
    push32(&mut subtable, 0xffff_ffff);
    assert_eq!(
        glyph_for_codepoint_in_subtable(&subtable, 0, 0x40),
        Some(0xffff_ffff)
    );
    assert_eq!(glyph_for_codepoint_in_subtable(&subtable, 0, 0x41), Some(0));
}

#[test]
pub fn cmap_unknown_format_yields_missing_glyph() {
    let mut subtable = vec![];
    push16(&mut subtable, 2);
    push16(&mut subtable, 0);
    assert_eq!(glyph_for_codepoint_in_subtable(&subtable, 0, 65), Some(0));
}

#[test]
pub fn cmap_truncated_subtable_yields_none() {
    let mut subtable = vec![];
    push16(&mut subtable, 4);
    assert_eq!(glyph_for_codepoint_in_subtable(&subtable, 0, 65), None);
}

fn square_outline(side: f32) -> crate::outline::Outline {
    let mut builder = OutlineBuilder::new();
    builder.move_to(Vector2F::new(0.0, 0.0));
    builder.line_to(Vector2F::new(side, 0.0));
    builder.line_to(Vector2F::new(side, side));
    builder.line_to(Vector2F::new(0.0, side));
    builder.close();
    builder.into_outline()
}

#[test]
pub fn rasterize_square_fills_canvas() {
    let canvas = rasterize_outline(&square_outline(4.0), Vector2I::new(4, 4));
    assert!(canvas.pixels.iter().all(|&pixel| pixel == 255));
}

#[test]
pub fn rasterize_empty_outline_is_blank() {
    let canvas = rasterize_outline(&crate::outline::Outline::new(), Vector2I::new(8, 8));
    assert!(canvas.pixels.iter().all(|&pixel| pixel == 0));
}

#[test]
pub fn rasterize_is_deterministic() {
    let mut builder = OutlineBuilder::new();
    builder.move_to(Vector2F::new(1.0, 1.0));
    builder.quadratic_curve_to(Vector2F::new(8.0, 0.0), Vector2F::new(7.0, 7.0));
    builder.line_to(Vector2F::new(1.0, 7.0));
    builder.close();
    let outline = builder.into_outline();

    let first = rasterize_outline(&outline, Vector2I::new(8, 8));
    let second = rasterize_outline(&outline, Vector2I::new(8, 8));
    assert_eq!(first.pixels, second.pixels);
    assert!(first.pixels.iter().any(|&pixel| pixel != 0));
}

#[test]
pub fn rasterize_skips_near_horizontal_edges() {
    let mut rasterizer = Rasterizer::new(Vector2I::new(4, 4));
    rasterizer.move_to(Vector2F::new(0.0, 1.0));
    rasterizer.line_to(Vector2F::new(4.0, 1.0005));
    rasterizer.close();
    let canvas = rasterizer.finish();
    assert!(canvas.pixels.iter().all(|&pixel| pixel == 0));
}

fn single_pixel_coverage() -> Canvas {
    let mut coverage = Canvas::new(Vector2I::new(5, 5), Format::A8);
    coverage.pixels[2 * coverage.stride + 2] = 255;
    coverage
}

#[test]
pub fn distance_field_remaps_signed_distances() {
    let field = coverage_to_distance_field(&single_pixel_coverage(), 2.0);
    // Center is inside at distance 1 from the outside: -1 remaps below 127.
    assert_eq!(field.pixels[2 * field.stride + 2], 63);
    // An adjacent outside pixel sits at distance 1.
    assert_eq!(field.pixels[2 * field.stride + 3], 191);
    // Corners are clamped at +spread.
    assert_eq!(field.pixels[0], 255);
}

#[test]
pub fn distance_field_boundary_is_near_midpoint() {
    let field = coverage_to_distance_field(&single_pixel_coverage(), 16.0);
    let inside = i32::from(field.pixels[2 * field.stride + 2]);
    let outside = i32::from(field.pixels[2 * field.stride + 3]);
    assert!((inside - 127).abs() <= 8);
    assert!((outside - 127).abs() <= 8);
}

#[test]
pub fn tint_coverage_multiplies_color_by_alpha() {
    let mut coverage = Canvas::new(Vector2I::new(2, 1), Format::A8);
    coverage.pixels[0] = 255;
    coverage.pixels[1] = 128;
    let tinted = canvas::tint_coverage(&coverage, [255, 0, 100]);
    assert_eq!(&tinted.pixels[0..3], &[255, 0, 100]);
    assert_eq!(&tinted.pixels[3..6], &[128, 0, 50]);
}

#[test]
pub fn blit_converts_between_formats() {
    let mut coverage = Canvas::new(Vector2I::new(2, 1), Format::A8);
    coverage.pixels.copy_from_slice(&[10, 200]);

    let mut rgb = Canvas::new(Vector2I::new(2, 1), Format::Rgb24);
    rgb.blit_from_canvas(&coverage);
    assert_eq!(rgb.pixels, vec![10, 10, 10, 200, 200, 200]);

    let mut back = Canvas::new(Vector2I::new(2, 1), Format::A8);
    back.blit_from_canvas(&rgb);
    assert_eq!(back.pixels, vec![10, 200]);
}

#[test]
pub fn bmp_rows_are_padded_to_four_bytes() {
    for width in 1..=8 {
        let canvas = Canvas::new(Vector2I::new(width, 3), Format::Rgb24);
        let data = image::bmp_data(&canvas).unwrap();
        let row_size = ((width as usize * 3 + 3) / 4) * 4;
        assert_eq!(data.len(), 54 + row_size * 3);
        assert_eq!(&data[0..2], b"BM");
    }
}

#[test]
pub fn image_codec_rejects_coverage_canvases() {
    let coverage = Canvas::new(Vector2I::new(2, 2), Format::A8);
    match image::png_data(&coverage) {
        Err(ImageWritingError::UnsupportedFormat) => {}
        _ => panic!("expected UnsupportedFormat"),
    }
    match image::bmp_data(&coverage) {
        Err(ImageWritingError::UnsupportedFormat) => {}
        _ => panic!("expected UnsupportedFormat"),
    }
}
