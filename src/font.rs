// glyph-kit/src/font.rs
//
// Copyright © 2025 The Glyph Kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parses the sfnt table directory of a TrueType/OpenType font and exposes
//! the metrics the rasterization pipeline needs.

use std::cmp;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{FontLoadingError, GlyphLoadingError};
use crate::utils;

/// The four sfnt signatures this crate accepts: a TrueType collection, the
/// TrueType binary version, OpenType, and the legacy Mac `true` tag.
const SFNT_SIGNATURES: [[u8; 4]; 4] = [
    *b"ttcf",
    [0x00, 0x01, 0x00, 0x00],
    *b"OTTO",
    *b"true",
];

/// Byte offset of `unitsPerEm` within the `head` table.
const HEAD_UNITS_PER_EM: usize = 18;
/// Byte offset of `indexToLocFormat` within the `head` table.
const HEAD_INDEX_TO_LOC_FORMAT: usize = 50;
/// Byte offset of `numberOfHMetrics` within the `hhea` table.
const HHEA_NUMBER_OF_H_METRICS: usize = 34;

/// A parsed font.
///
/// Exclusively owns the raw font bytes and records where the tables the
/// pipeline needs live inside them. Construction validates the signature,
/// the presence of the required tables (`cmap`, `head`, `hhea`, `hmtx`, and
/// `loca` whenever `glyf` is present), and the fixed header fields; it does
/// not validate table internals beyond what later stages check themselves.
pub struct Font {
    data: Vec<u8>,
    font_start: u32,
    pub(crate) cmap: u32,
    hhea: u32,
    hmtx: u32,
    pub(crate) glyf: Option<u32>,
    pub(crate) loca: Option<u32>,
    kern: Option<u32>,
    gpos: Option<u32>,
    glyph_count: u32,
    pub(crate) index_to_loc_format: i16,
    units_per_em: u16,
}

impl Font {
    /// Parses a font from raw data (the contents of a `.ttf`/`.otf`/etc.
    /// file), taking ownership of the bytes.
    ///
    /// `font_start` is the byte offset of the font within the data: 0 for a
    /// single font, or the offset of a member font within a collection.
    pub fn from_bytes(data: Vec<u8>, font_start: u32) -> Result<Font, FontLoadingError> {
        let start = font_start as usize;
        let signature = data
            .get(start..start + 4)
            .ok_or(FontLoadingError::Parse)?;
        if !SFNT_SIGNATURES.iter().any(|accepted| accepted == signature) {
            return Err(FontLoadingError::UnknownFormat);
        }

        let cmap = require_table(&data, font_start, b"cmap")?;
        let head = require_table(&data, font_start, b"head")?;
        let hhea = require_table(&data, font_start, b"hhea")?;
        let hmtx = require_table(&data, font_start, b"hmtx")?;
        let glyf = find_table(&data, font_start, b"glyf");
        let loca = find_table(&data, font_start, b"loca");
        let kern = find_table(&data, font_start, b"kern");
        let gpos = find_table(&data, font_start, b"GPOS");

        if glyf.is_some() && loca.is_none() {
            return Err(FontLoadingError::MissingTable(*b"loca"));
        }

        let units_per_em = utils::read_u16_be(&data, head as usize + HEAD_UNITS_PER_EM)
            .ok_or(FontLoadingError::Parse)?;
        let index_to_loc_format =
            utils::read_i16_be(&data, head as usize + HEAD_INDEX_TO_LOC_FORMAT)
                .ok_or(FontLoadingError::Parse)?;
        let glyph_count =
            utils::read_u16_be(&data, hhea as usize + HHEA_NUMBER_OF_H_METRICS)
                .ok_or(FontLoadingError::Parse)?;

        debug!(
            "parsed font: {} glyphs, {} units per em",
            glyph_count, units_per_em
        );

        Ok(Font {
            data,
            font_start,
            cmap,
            hhea,
            hmtx,
            glyf,
            loca,
            kern,
            gpos,
            glyph_count: u32::from(glyph_count),
            index_to_loc_format,
            units_per_em,
        })
    }

    /// Loads a font from an open `.ttf`/`.otf`/etc. file.
    pub fn from_file(file: &mut File, font_start: u32) -> Result<Font, FontLoadingError> {
        let mut data = vec![];
        file.read_to_end(&mut data)?;
        Font::from_bytes(data, font_start)
    }

    /// Loads a font from the path to a `.ttf`/`.otf`/etc. file.
    pub fn from_path<P>(path: P, font_start: u32) -> Result<Font, FontLoadingError>
    where
        P: AsRef<Path>,
    {
        Font::from_file(&mut File::open(path)?, font_start)
    }

    /// Returns the raw font data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the number of glyphs in the font.
    ///
    /// Glyph IDs range from 0 inclusive to this value exclusive. Glyph 0 is
    /// the `.notdef` "missing glyph".
    #[inline]
    pub fn glyph_count(&self) -> u32 {
        self.glyph_count
    }

    /// Returns the number of font units per em.
    #[inline]
    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Returns true if the font carries a `kern` table.
    ///
    /// Kerning itself is not applied by this crate.
    #[inline]
    pub fn has_kerning_table(&self) -> bool {
        self.kern.is_some()
    }

    /// Returns true if the font carries a `GPOS` table.
    #[inline]
    pub fn has_glyph_positioning_table(&self) -> bool {
        self.gpos.is_some()
    }

    /// Returns the uniform scale factor that renders the font at the given
    /// pixel height.
    #[inline]
    pub fn scale_for_pixel_height(&self, pixels: f32) -> f32 {
        pixels / f32::from(self.units_per_em)
    }

    /// Returns the distance from the origin of the given glyph to the next,
    /// in font units.
    ///
    /// Glyphs past the end of the long-metric run reuse the last recorded
    /// advance, per the `hmtx` layout.
    pub fn advance(&self, glyph_id: u32) -> Result<u32, GlyphLoadingError> {
        if glyph_id >= self.glyph_count {
            return Err(GlyphLoadingError::NoSuchGlyph);
        }
        let metric_count =
            utils::read_u16_be(&self.data, self.hhea as usize + HHEA_NUMBER_OF_H_METRICS)
                .ok_or(GlyphLoadingError::Parse)?;
        let metric_index = cmp::min(glyph_id, u32::from(metric_count).max(1) - 1) as usize;
        utils::read_u16_be(&self.data, self.hmtx as usize + 4 * metric_index)
            .map(u32::from)
            .ok_or(GlyphLoadingError::Parse)
    }

    /// Returns the raw bytes of the table with the given tag, if present.
    pub fn table_data(&self, tag: [u8; 4]) -> Option<&[u8]> {
        let directory = self.font_start as usize + 12;
        let table_count = utils::read_u16_be(&self.data, self.font_start as usize + 4)?;
        for table_index in 0..table_count as usize {
            let entry = directory + table_index * 16;
            if *self.data.get(entry..entry + 4)? == tag {
                let offset = utils::read_u32_be(&self.data, entry + 8)? as usize;
                let length = utils::read_u32_be(&self.data, entry + 12)? as usize;
                return self.data.get(offset..offset.checked_add(length)?);
            }
        }
        None
    }
}

fn require_table(data: &[u8], font_start: u32, tag: &[u8; 4]) -> Result<u32, FontLoadingError> {
    find_table(data, font_start, tag).ok_or(FontLoadingError::MissingTable(*tag))
}

/// Linearly scans the table directory for `tag` and returns the table's byte
/// offset from the start of the data.
fn find_table(data: &[u8], font_start: u32, tag: &[u8; 4]) -> Option<u32> {
    let table_count = utils::read_u16_be(data, font_start as usize + 4)?;
    let directory = font_start as usize + 12;
    for table_index in 0..table_count as usize {
        let entry = directory + table_index * 16;
        if *data.get(entry..entry + 4)? == tag[..] {
            return utils::read_u32_be(data, entry + 8);
        }
    }
    None
}
