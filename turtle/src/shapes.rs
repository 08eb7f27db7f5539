// turtleart/turtle/src/shapes.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Turtle skins: one image per 10° heading bucket.
//!
//! The stock skin is an SVG turtle drawn in a fill and a stroke color and
//! rotated once per bucket. Each document is run through `usvg` so that a
//! broken template fails here rather than in the host's renderer, and so
//! that sprites can be centered on the turtle.

use std::fmt::{Display, Formatter, Result as FormatResult};
use std::str::FromStr;
use std::sync::Arc;

use crate::canvas::Image;
use crate::coords::SHAPES;
use crate::error::{Result, TurtleError};

const TURTLE_SIZE: f64 = 55.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Display for Rgb {
    fn fmt(&self, formatter: &mut Formatter) -> FormatResult {
        write!(formatter, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = TurtleError;

    fn from_str(s: &str) -> Result<Rgb> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(TurtleError::BadTurtleColor(s.to_owned()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| TurtleError::BadTurtleColor(s.to_owned()))
        };
        Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Fill and stroke of a turtle skin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TurtleColors {
    pub fill: Rgb,
    pub stroke: Rgb,
}

impl TurtleColors {
    pub const fn new(fill: Rgb, stroke: Rgb) -> TurtleColors {
        TurtleColors { fill, stroke }
    }

    /// Colors for a turtle whose name is a number: two palette entries ten
    /// steps apart.
    pub fn from_palette(key: i64) -> TurtleColors {
        let fill = wrap100(key);
        let stroke = wrap100(fill + 10);
        TurtleColors::new(palette_rgb(fill), palette_rgb(stroke))
    }
}

impl Default for TurtleColors {
    fn default() -> TurtleColors {
        TurtleColors::new(Rgb(0x00, 0x80, 0x00), Rgb(0x00, 0xa0, 0x00))
    }
}

impl FromStr for TurtleColors {
    type Err = TurtleError;

    /// Parses `"#rrggbb,#rrggbb"`.
    fn from_str(s: &str) -> Result<TurtleColors> {
        match s.split_once(',') {
            Some((fill, stroke)) => Ok(TurtleColors::new(fill.parse()?, stroke.parse()?)),
            None => Err(TurtleError::BadTurtleColor(s.to_owned())),
        }
    }
}

/// Folds any integer onto 0..=99, bouncing at the ends: 100 -> 99,
/// 199 -> 0, 200 -> 0.
pub fn wrap100(n: i64) -> i64 {
    let n = n.rem_euclid(200);
    if n > 99 {
        199 - n
    } else {
        n
    }
}

// Hue anchors of the 100-step palette.
static PALETTE_ANCHORS: &[(i64, Rgb)] = &[
    (0, Rgb(0xff, 0x00, 0x00)),
    (10, Rgb(0xff, 0x80, 0x00)),
    (20, Rgb(0xff, 0xff, 0x00)),
    (40, Rgb(0x00, 0xff, 0x00)),
    (50, Rgb(0x00, 0xff, 0xff)),
    (70, Rgb(0x00, 0x00, 0xff)),
    (90, Rgb(0xff, 0x00, 0xff)),
    (100, Rgb(0xff, 0x00, 0x00)),
];

/// Full-saturation color for palette index `index` (wrapped with `wrap100`).
pub fn palette_rgb(index: i64) -> Rgb {
    let index = wrap100(index);
    for pair in PALETTE_ANCHORS.windows(2) {
        let ((i0, c0), (i1, c1)) = (pair[0], pair[1]);
        if index >= i0 && index < i1 {
            let t = (index - i0) as f64 / (i1 - i0) as f64;
            let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
            return Rgb(mix(c0.0, c1.0), mix(c0.1, c1.1), mix(c0.2, c1.2));
        }
    }
    PALETTE_ANCHORS[0].1
}

/// A generated SVG turtle and its measured size.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgShape {
    source: String,
    width: f64,
    height: f64,
}

impl SvgShape {
    pub fn parse(source: String) -> Result<SvgShape> {
        let tree = usvg::Tree::from_str(&source, &usvg::Options::default())?;
        let size = tree.size();
        Ok(SvgShape {
            source,
            width: f64::from(size.width()),
            height: f64::from(size.height()),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Svg(Arc<SvgShape>),
    /// An image supplied by the program.
    Image(Image),
    /// `source` turned by `degrees` about the center of a `side`-sized
    /// square, large enough to hold it at any angle.
    Rotated {
        source: Arc<Shape>,
        degrees: f64,
        side: u32,
    },
}

impl Shape {
    pub fn size(&self) -> (f64, f64) {
        match self {
            Shape::Svg(svg) => (svg.width, svg.height),
            Shape::Image(image) => (f64::from(image.width()), f64::from(image.height())),
            Shape::Rotated { side, .. } => (f64::from(*side), f64::from(*side)),
        }
    }
}

fn turtle_svg(colors: &TurtleColors, orientation: f64) -> String {
    let c = TURTLE_SIZE / 2.0;
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#,
            r#"<g transform="rotate({orientation} {c} {c})" fill="{fill}" stroke="{stroke}" stroke-width="3.5">"#,
            r#"<circle cx="{c}" cy="10.5" r="6.5"/>"#,
            r#"<circle cx="13" cy="19" r="5"/><circle cx="42" cy="19" r="5"/>"#,
            r#"<circle cx="13" cy="40" r="5"/><circle cx="42" cy="40" r="5"/>"#,
            r#"<path d="M{c} 44.5 L24 51 L31 51 Z"/>"#,
            r#"<ellipse cx="{c}" cy="29.5" rx="14" ry="16"/>"#,
            r#"<path d="M{c} 17 V42 M15 29.5 H40" fill="none"/>"#,
            r#"</g></svg>"#
        ),
        size = TURTLE_SIZE,
        c = c,
        orientation = orientation,
        fill = colors.fill,
        stroke = colors.stroke,
    )
}

/// Builds the 36 stock turtle images for `colors`.
pub fn generate_turtle_shapes(colors: &TurtleColors) -> Result<Vec<Shape>> {
    (0..SHAPES)
        .map(|i| {
            let svg = SvgShape::parse(turtle_svg(colors, (i * 10) as f64))?;
            Ok(Shape::Svg(Arc::new(svg)))
        })
        .collect()
}

/// Spreads one image over every bucket, each copy turned to its heading.
pub fn rotated_shapes(shape: Shape) -> Vec<Shape> {
    let (w, h) = shape.size();
    let side = (w * w + h * h).sqrt() as u32;
    let source = Arc::new(shape);
    (0..SHAPES)
        .map(|i| Shape::Rotated {
            source: source.clone(),
            degrees: (i * 10) as f64,
            side,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap100_bounces() {
        assert_eq!(wrap100(0), 0);
        assert_eq!(wrap100(99), 99);
        assert_eq!(wrap100(100), 99);
        assert_eq!(wrap100(150), 49);
        assert_eq!(wrap100(199), 0);
        assert_eq!(wrap100(200), 0);
        assert_eq!(wrap100(-1), 0);
    }

    #[test]
    fn palette_hits_its_anchors() {
        assert_eq!(palette_rgb(0), Rgb(0xff, 0x00, 0x00));
        assert_eq!(palette_rgb(20), Rgb(0xff, 0xff, 0x00));
        assert_eq!(palette_rgb(70), Rgb(0x00, 0x00, 0xff));
        assert_eq!(palette_rgb(45), Rgb(0x00, 0xff, 0x80));
    }

    #[test]
    fn turtle_colors_parse() {
        let colors: TurtleColors = "#008000,#00A000".parse().unwrap();
        assert_eq!(colors, TurtleColors::default());
        assert_eq!(colors.fill.to_string(), "#008000");
        assert!("#008000".parse::<TurtleColors>().is_err());
        assert!("#00800,#00A000".parse::<TurtleColors>().is_err());
        assert!("#00800g,#00A000".parse::<TurtleColors>().is_err());
    }

    #[test]
    fn palette_turtles_use_two_entries() {
        let colors = TurtleColors::from_palette(5);
        assert_eq!(colors.fill, palette_rgb(5));
        assert_eq!(colors.stroke, palette_rgb(15));
    }

    #[test]
    fn stock_shapes_cover_every_bucket() {
        let shapes = generate_turtle_shapes(&TurtleColors::default()).unwrap();
        assert_eq!(shapes.len(), SHAPES);
        assert_eq!(shapes[0].size(), (TURTLE_SIZE, TURTLE_SIZE));
        match &shapes[9] {
            Shape::Svg(svg) => assert!(svg.source().contains("rotate(90 ")),
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn rotated_shapes_use_the_diagonal() {
        let image = Shape::Image(Image::new(30, 40, vec![0u8; 4]));
        let shapes = rotated_shapes(image);
        assert_eq!(shapes.len(), SHAPES);
        assert_eq!(shapes[3].size(), (50.0, 50.0));
        match &shapes[3] {
            Shape::Rotated { degrees, .. } => assert_eq!(*degrees, 30.0),
            other => panic!("unexpected shape {:?}", other),
        }
    }
}
