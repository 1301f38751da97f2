// glyph-kit/demos/render-glyph.rs
//
// Copyright © 2025 The Glyph Kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

extern crate clap;
extern crate colored;
extern crate glyph_kit;
extern crate pathfinder_geometry;

use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::Colorize;
use glyph_kit::canvas::tint_coverage;
use glyph_kit::charmap::Charmap;
use glyph_kit::distance_field::coverage_to_distance_field;
use glyph_kit::font::Font;
use glyph_kit::image;
use glyph_kit::outline::OutlineBuilder;
use glyph_kit::raster::rasterize_outline;
use pathfinder_geometry::vector::Vector2F;
use std::path::Path;

fn get_args() -> ArgMatches {
    let font_path_arg = Arg::new("FONT-PATH")
        .help("Path to a .ttf/.otf font file")
        .required(true)
        .index(1);
    let glyph_arg = Arg::new("GLYPH")
        .help("Character to render")
        .default_value("A")
        .index(2);
    let size_arg = Arg::new("SIZE")
        .help("Pixel height to render at")
        .default_value("32")
        .index(3);
    let sdf_arg = Arg::new("sdf")
        .help("Render a signed distance field instead of coverage")
        .long("sdf")
        .action(ArgAction::SetTrue);
    let spread_arg = Arg::new("spread")
        .help("Distance field spread in pixels")
        .long("spread")
        .default_value("8");
    let output_arg = Arg::new("output")
        .help("Write the bitmap to a .png or .bmp file")
        .short('o')
        .long("output")
        .value_names(["PATH"]);
    Command::new("render-glyph")
        .version("0.1")
        .author("The Glyph Kit Project Developers")
        .about("Simple example tool to render glyphs with `glyph-kit`")
        .arg(font_path_arg)
        .arg(glyph_arg)
        .arg(size_arg)
        .arg(sdf_arg)
        .arg(spread_arg)
        .arg(output_arg)
        .get_matches()
}

fn main() {
    let matches = get_args();

    let font_path = matches
        .get_one::<String>("FONT-PATH")
        .map(|s| s.as_str())
        .unwrap();
    let character = matches
        .get_one::<String>("GLYPH")
        .map(|s| s.as_str())
        .unwrap()
        .chars()
        .next()
        .unwrap();
    let size: f32 = matches
        .get_one::<String>("SIZE")
        .map(|s| s.as_str())
        .unwrap()
        .parse()
        .unwrap();
    let spread: f32 = matches
        .get_one::<String>("spread")
        .map(|s| s.as_str())
        .unwrap()
        .parse()
        .unwrap();

    let font = Font::from_path(font_path, 0).unwrap();
    let charmap = Charmap::new(&font).unwrap();
    let glyph_id = charmap.glyph_for_char(character);

    let scale = font.scale_for_pixel_height(size);
    let scale = Vector2F::new(scale, scale);
    let raster_rect = font.raster_bounds(glyph_id, scale).unwrap();

    let mut builder = OutlineBuilder::new();
    font.outline(glyph_id, scale, &mut builder).unwrap();
    let coverage = rasterize_outline(&builder.into_outline(), raster_rect.size());

    let bitmap = if matches.get_flag("sdf") {
        coverage_to_distance_field(&coverage, spread)
    } else {
        coverage
    };

    if let Some(output) = matches.get_one::<String>("output") {
        let rgb = tint_coverage(&bitmap, [255, 255, 255]);
        match Path::new(output).extension().and_then(|ext| ext.to_str()) {
            Some("bmp") => image::write_bmp(output, &rgb).unwrap(),
            _ => image::write_png(output, &rgb).unwrap(),
        }
        println!("{} {}", "wrote".green(), output);
        return;
    }

    println!("glyph {}:", glyph_id);
    for y in 0..raster_rect.height() {
        let mut line = String::new();
        let row = &bitmap.pixels[y as usize * bitmap.stride..];
        for x in 0..raster_rect.width() {
            let shade = shade(row[x as usize]);
            line.push(shade);
            line.push(shade);
        }
        println!("{}", line);
    }
}

fn shade(value: u8) -> char {
    match value {
        0 => ' ',
        1..=84 => '░',
        85..=169 => '▒',
        170..=254 => '▓',
        _ => '█',
    }
}
