// glyph-kit/src/charmap.rs
//
// Copyright © 2025 The Glyph Kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Maps Unicode codepoints to glyph IDs via the `cmap` table.

use crate::error::CharmapError;
use crate::font::Font;
use crate::utils;

const PLATFORM_ID_UNICODE: u16 = 0;
const PLATFORM_ID_WINDOWS: u16 = 3;
const WINDOWS_ENCODING_UNICODE_BMP: u16 = 1;
const WINDOWS_ENCODING_UNICODE_FULL: u16 = 10;

/// A selected Unicode `cmap` subtable of a font.
pub struct Charmap<'a> {
    font: &'a Font,
    subtable_offset: u32,
}

impl<'a> Charmap<'a> {
    /// Selects a Unicode subtable from the font's `cmap` table.
    ///
    /// Subtable headers are scanned in directory order; the first one with
    /// platform 0 (Unicode) or platform 3 with encoding 1 or 10 (Windows
    /// Unicode BMP/full) wins. There is no re-ranking of candidates.
    pub fn new(font: &'a Font) -> Result<Charmap<'a>, CharmapError> {
        let data = font.data();
        let cmap = font.cmap as usize;
        let subtable_count =
            utils::read_u16_be(data, cmap + 2).ok_or(CharmapError::NoUnicodeCmap)?;
        for subtable_index in 0..subtable_count as usize {
            let record = cmap + 4 + subtable_index * 8;
            let (platform_id, encoding_id, offset) = match (
                utils::read_u16_be(data, record),
                utils::read_u16_be(data, record + 2),
                utils::read_u32_be(data, record + 4),
            ) {
                (Some(platform_id), Some(encoding_id), Some(offset)) => {
                    (platform_id, encoding_id, offset)
                }
                _ => break,
            };
            let unicode = platform_id == PLATFORM_ID_UNICODE
                || (platform_id == PLATFORM_ID_WINDOWS
                    && (encoding_id == WINDOWS_ENCODING_UNICODE_BMP
                        || encoding_id == WINDOWS_ENCODING_UNICODE_FULL));
            if unicode {
                return Ok(Charmap {
                    font,
                    subtable_offset: font.cmap + offset,
                });
            }
        }
        Err(CharmapError::NoUnicodeCmap)
    }

    /// Returns the usual glyph ID for a Unicode character.
    ///
    /// Glyph 0 is the conventional `.notdef` "missing glyph", not an error;
    /// callers must treat it as a valid glyph ID.
    #[inline]
    pub fn glyph_for_char(&self, character: char) -> u32 {
        self.glyph_for_codepoint(character as u32)
    }

    /// Returns the usual glyph ID for a Unicode codepoint, or 0 if the
    /// codepoint is unmapped.
    pub fn glyph_for_codepoint(&self, codepoint: u32) -> u32 {
        glyph_for_codepoint_in_subtable(self.font.data(), self.subtable_offset, codepoint)
            .unwrap_or(0)
    }
}

/// Looks up `codepoint` in the subtable at `subtable_offset`, dispatching on
/// its format field.
///
/// `None` means the subtable bytes ran out; unmapped codepoints and
/// unsupported formats come back as `Some(0)`.
pub(crate) fn glyph_for_codepoint_in_subtable(
    data: &[u8],
    subtable_offset: u32,
    codepoint: u32,
) -> Option<u32> {
    let subtable = subtable_offset as usize;
    let format = utils::read_u16_be(data, subtable)?;
    match format {
        0 => {
            let length = utils::read_u16_be(data, subtable + 2)?;
            if i64::from(codepoint) < i64::from(length) - 6 {
                return Some(u32::from(utils::read_u8(
                    data,
                    subtable + 6 + codepoint as usize,
                )?));
            }
            Some(0)
        }
        6 => {
            let first = u32::from(utils::read_u16_be(data, subtable + 6)?);
            let count = u32::from(utils::read_u16_be(data, subtable + 8)?);
            if codepoint >= first && codepoint < first + count {
                let entry = subtable + 10 + (codepoint - first) as usize * 2;
                return Some(u32::from(utils::read_u16_be(data, entry)?));
            }
            Some(0)
        }
        4 => {
            let segment_count = (utils::read_u16_be(data, subtable + 6)? >> 1) as usize;
            let end_codes = subtable + 14;
            let start_codes = end_codes + segment_count * 2 + 2;
            let id_deltas = start_codes + segment_count * 2;
            let id_range_offsets = id_deltas + segment_count * 2;
            for segment in 0..segment_count {
                let end = u32::from(utils::read_u16_be(data, end_codes + segment * 2)?);
                if codepoint <= end {
                    let start = u32::from(utils::read_u16_be(data, start_codes + segment * 2)?);
                    if codepoint >= start {
                        let delta =
                            i32::from(utils::read_i16_be(data, id_deltas + segment * 2)?);
                        let range_offset =
                            utils::read_u16_be(data, id_range_offsets + segment * 2)?;
                        if range_offset == 0 {
                            return Some((codepoint as i32 + delta) as u32 & 0xffff);
                        }
                        // The range offset is relative to its own location in
                        // the subtable.
                        let entry = id_range_offsets
                            + segment * 2
                            + range_offset as usize
                            + (codepoint - start) as usize * 2;
                        let glyph_id = u32::from(utils::read_u16_be(data, entry)?);
                        return Some(if glyph_id == 0 {
                            0
                        } else {
                            (glyph_id as i32 + delta) as u32 & 0xffff
                        });
                    }
                }
            }
            Some(0)
        }
        12 | 13 => {
            let group_count = utils::read_u32_be(data, subtable + 12)?;
            for group in 0..group_count as usize {
                let entry = subtable + 16 + group * 12;
                let start_char_code = utils::read_u32_be(data, entry)?;
                let end_char_code = utils::read_u32_be(data, entry + 4)?;
                if codepoint >= start_char_code && codepoint <= end_char_code {
                    let start_glyph_id = utils::read_u32_be(data, entry + 8)?;
                    return Some(if format == 12 {
                        start_glyph_id.wrapping_add(codepoint - start_char_code)
                    } else {
                        start_glyph_id
                    });
                }
            }
            Some(0)
        }
        _ => {
            warn!("unsupported cmap subtable format {}", format);
            Some(0)
        }
    }
}
