// turtleart/turtle/src/coords.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Turtle space has its origin at the center of the canvas with y going up.
//! Screen space has its origin at the top-left corner with y going down.

/// Number of pre-rendered headings per turtle, one every 10°.
pub const SHAPES: usize = 36;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub const fn new(width: f64, height: f64) -> CanvasSize {
        CanvasSize { width, height }
    }

    pub fn turtle_to_screen(&self, pos: (f64, f64)) -> (f64, f64) {
        (self.width / 2.0 + pos.0, self.invert_y(pos.1))
    }

    /// Only the y term is inverted. Peers rely on x passing through
    /// untouched, so this is not the inverse of `turtle_to_screen`.
    pub fn screen_to_turtle(&self, pos: (f64, f64)) -> (f64, f64) {
        (pos.0, self.invert_y(pos.1))
    }

    #[inline]
    fn invert_y(&self, y: f64) -> f64 {
        self.height / 2.0 - y
    }
}

/// Folds any angle into [0, 360).
pub fn normalize_heading(heading: f64) -> f64 {
    let heading = heading.rem_euclid(360.0);
    // Tiny negative angles round up to exactly 360.
    if heading >= 360.0 {
        0.0
    } else {
        heading
    }
}

/// Index of the shape drawn for `heading`. Buckets are centered on multiples
/// of 10°, so 355° and 4° both land in bucket 0.
pub fn bucket(heading: f64) -> usize {
    let heading = normalize_heading(heading);
    ((heading + 5.0) as i64 % 360 / (360 / SHAPES as i64)) as usize
}
