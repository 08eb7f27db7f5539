// turtleart/turtle/src/canvas.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The drawing surface and the sprite layer, both implemented by the host.
//!
//! Canvas calls take screen-space coordinates. Turtles convert before
//! calling.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use turtleart_share::PolyPoint;

use crate::shapes::Shape;

/// Stacking layer of turtle sprites. Labels sit one layer above.
pub const TURTLE_LAYER: i32 = 500;

/// An encoded image (PNG, SVG, ...) handed through to the host untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    data: Arc<[u8]>,
}

impl Image {
    pub fn new<D>(width: u32, height: u32, data: D) -> Image
    where
        D: Into<Arc<[u8]>>,
    {
        Image {
            width,
            height,
            data: data.into(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Where an image lands: `(a, b)` is the offset into the source image,
/// `(x, y)` the screen-space destination and `(w, h)` the drawn size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixbufPlacement {
    pub a: f64,
    pub b: f64,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

pub trait Canvas {
    /// Sets the pen color from its palette index, shade and gray.
    fn set_fgcolor(&mut self, shade: f64, gray: f64, color: f64);
    fn set_pen_size(&mut self, size: f64);
    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
    /// Clockwise arc of `angle` degrees around `(cx, cy)`.
    fn rarc(&mut self, cx: f64, cy: f64, r: f64, angle: f64, heading: f64);
    /// Counter-clockwise arc of `angle` degrees around `(cx, cy)`.
    fn larc(&mut self, cx: f64, cy: f64, r: f64, angle: f64, heading: f64);
    fn fill_polygon(&mut self, points: &[PolyPoint]);
    fn draw_pixbuf(&mut self, image: &Image, placement: &PixbufPlacement, heading: f64);
    fn draw_text(&mut self, label: &str, x: f64, y: f64, size: f64, w: f64, heading: f64);
    fn get_pixel(&self, x: f64, y: f64) -> Rgba;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpriteId(pub u32);

/// Handle of a label sprite. Turtles only remember the id; the stage owns
/// the sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LabelId(pub u32);

pub trait Sprite {
    fn id(&self) -> SpriteId;
    fn move_to(&mut self, pos: (f64, f64));
    fn set_shape(&mut self, shape: &Shape);
    fn set_layer(&mut self, layer: i32);
    fn hide(&mut self);
}

/// The sprite layer of an interactive window. Headless sessions run
/// without one.
pub trait Stage {
    fn new_sprite(&mut self, pos: (f64, f64), shape: &Shape) -> Box<dyn Sprite>;
    fn label_sprite(&mut self, label: LabelId) -> Option<&mut dyn Sprite>;
}

/// A canvas call, as captured by [`Recorder`].
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasOp {
    FgColor {
        shade: f64,
        gray: f64,
        color: f64,
    },
    PenSize(f64),
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    RArc {
        cx: f64,
        cy: f64,
        r: f64,
        angle: f64,
        heading: f64,
    },
    LArc {
        cx: f64,
        cy: f64,
        r: f64,
        angle: f64,
        heading: f64,
    },
    Fill(Vec<PolyPoint>),
    Pixbuf {
        width: u32,
        height: u32,
        placement: PixbufPlacement,
        heading: f64,
    },
    Text {
        label: String,
        x: f64,
        y: f64,
        size: f64,
        w: f64,
        heading: f64,
    },
}

/// Canvas that keeps a list of the calls made on it instead of drawing.
///
/// Clones share the same list, so a caller can hand one clone to a window
/// and read the calls back through another.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    ops: Rc<RefCell<Vec<CanvasOp>>>,
}

impl Recorder {
    pub fn new() -> Recorder {
        Recorder::default()
    }

    pub fn ops(&self) -> Vec<CanvasOp> {
        self.ops.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.ops.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.ops.borrow_mut().clear();
    }

    pub fn lines(&self) -> Vec<CanvasOp> {
        self.ops
            .borrow()
            .iter()
            .filter(|op| matches!(op, CanvasOp::Line { .. }))
            .cloned()
            .collect()
    }

    pub fn fills(&self) -> Vec<Vec<PolyPoint>> {
        self.ops
            .borrow()
            .iter()
            .filter_map(|op| match op {
                CanvasOp::Fill(points) => Some(points.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last(&self) -> Option<CanvasOp> {
        self.ops.borrow().last().cloned()
    }

    fn push(&self, op: CanvasOp) {
        self.ops.borrow_mut().push(op);
    }
}

impl Canvas for Recorder {
    fn set_fgcolor(&mut self, shade: f64, gray: f64, color: f64) {
        self.push(CanvasOp::FgColor { shade, gray, color });
    }

    fn set_pen_size(&mut self, size: f64) {
        self.push(CanvasOp::PenSize(size));
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.push(CanvasOp::Line { x1, y1, x2, y2 });
    }

    fn rarc(&mut self, cx: f64, cy: f64, r: f64, angle: f64, heading: f64) {
        self.push(CanvasOp::RArc {
            cx,
            cy,
            r,
            angle,
            heading,
        });
    }

    fn larc(&mut self, cx: f64, cy: f64, r: f64, angle: f64, heading: f64) {
        self.push(CanvasOp::LArc {
            cx,
            cy,
            r,
            angle,
            heading,
        });
    }

    fn fill_polygon(&mut self, points: &[PolyPoint]) {
        self.push(CanvasOp::Fill(points.to_vec()));
    }

    fn draw_pixbuf(&mut self, image: &Image, placement: &PixbufPlacement, heading: f64) {
        self.push(CanvasOp::Pixbuf {
            width: image.width(),
            height: image.height(),
            placement: *placement,
            heading,
        });
    }

    fn draw_text(&mut self, label: &str, x: f64, y: f64, size: f64, w: f64, heading: f64) {
        self.push(CanvasOp::Text {
            label: label.to_owned(),
            x,
            y,
            size,
            w,
            heading,
        });
    }

    // Nothing is rasterized, so every pixel reads as transparent.
    fn get_pixel(&self, _: f64, _: f64) -> Rgba {
        Rgba::default()
    }
}
