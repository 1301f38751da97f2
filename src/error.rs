// glyph-kit/src/error.rs
//
// Copyright © 2025 The Glyph Kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Various types of errors that `glyph-kit` can return.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io;

/// Reasons why font data might fail to parse.
#[derive(Debug)]
pub enum FontLoadingError {
    /// The data didn't begin with a recognized sfnt signature.
    UnknownFormat,

    /// A table required by every usable font (`cmap`, `head`, `hhea`, `hmtx`,
    /// or `loca` when `glyf` is present) was absent from the table directory.
    MissingTable([u8; 4]),

    /// The table directory or a fixed header field lay outside the data.
    Parse,

    /// A disk or similar I/O error occurred while attempting to load the font.
    Io(io::Error),
}

impl Display for FontLoadingError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            FontLoadingError::UnknownFormat => write!(f, "unknown format"),
            FontLoadingError::MissingTable(ref tag) => {
                write!(f, "missing `{}` table", String::from_utf8_lossy(tag))
            }
            FontLoadingError::Parse => write!(f, "parse error"),
            FontLoadingError::Io(ref err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl Error for FontLoadingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            FontLoadingError::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for FontLoadingError {
    fn from(error: io::Error) -> FontLoadingError {
        FontLoadingError::Io(error)
    }
}

/// Reasons why a font might fail to load a glyph.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum GlyphLoadingError {
    /// The font didn't contain a glyph with that ID.
    NoSuchGlyph,

    /// The glyph is a composite (negative contour count), which this crate
    /// does not decode.
    UnsupportedFormat,

    /// The glyph's outline data was truncated or malformed.
    Parse,
}

impl Display for GlyphLoadingError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            GlyphLoadingError::NoSuchGlyph => write!(f, "no such glyph"),
            GlyphLoadingError::UnsupportedFormat => write!(f, "unsupported glyph format"),
            GlyphLoadingError::Parse => write!(f, "glyph parse error"),
        }
    }
}

impl Error for GlyphLoadingError {}

/// Reasons why a character map might be unavailable for a font.
///
/// A font whose `cmap` table lacks a Unicode subtable still parses and remains
/// usable by raw glyph ID.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum CharmapError {
    /// No Unicode `cmap` subtable was found.
    NoUnicodeCmap,
}

impl Display for CharmapError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            CharmapError::NoUnicodeCmap => write!(f, "no Unicode cmap subtable"),
        }
    }
}

impl Error for CharmapError {}

/// Reasons why a canvas might fail to be encoded or written as an image file.
#[derive(Debug)]
pub enum ImageWritingError {
    /// The canvas wasn't in the RGB24 format the codec emits.
    UnsupportedFormat,

    /// A disk or similar I/O error occurred while writing the file.
    Io(io::Error),
}

impl Display for ImageWritingError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            ImageWritingError::UnsupportedFormat => write!(f, "unsupported canvas format"),
            ImageWritingError::Io(ref err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl Error for ImageWritingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            ImageWritingError::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ImageWritingError {
    fn from(error: io::Error) -> ImageWritingError {
        ImageWritingError::Io(error)
    }
}
