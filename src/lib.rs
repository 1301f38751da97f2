// glyph-kit/src/lib.rs
//
// Copyright © 2025 The Glyph Kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `glyph-kit` parses binary TrueType/OpenType font data, maps Unicode
//! codepoints to glyph IDs, decodes quadratic Bézier glyph outlines,
//! rasterizes them into antialiased coverage bitmaps, optionally converts
//! coverage into signed distance fields, and exports pixel buffers as PNG or
//! BMP files. Everything is implemented from the raw bytes up; no platform
//! font API is involved.

extern crate byteorder;
extern crate pathfinder_geometry;

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod canvas;
pub mod charmap;
pub mod checksum;
pub mod distance_field;
pub mod error;
pub mod font;
pub mod image;
pub mod outline;
pub mod raster;

mod glyph;
mod utils;

#[cfg(test)]
pub mod test;
