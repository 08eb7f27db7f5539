// turtleart/turtle/src/turtle.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A single turtle: pose, pen and skin.
//!
//! Every primitive follows the same steps. Convert the argument (bad input
//! is logged and the call does nothing), update the state, make the one
//! canvas or sprite call that shows the new state, and, when `share` is set
//! and the window is collaborating, send the matching event to peers.
//!
//! Heading 0 points up the screen and headings grow clockwise, so a step
//! forward moves by `(d·sin h, d·cos h)`.

use std::f64::consts::PI;
use std::fmt::{Debug, Formatter, Result as FormatResult};
use std::mem;
use std::sync::Arc;

use rand::Rng;
use turtleart_share::{encode, Event, PixbufData, PolyPoint, TextData};

use crate::canvas::{Image, LabelId, PixbufPlacement, Rgba, Sprite, SpriteId, TURTLE_LAYER};
use crate::coords::{bucket, normalize_heading, SHAPES};
use crate::error::Result;
use crate::shapes::{generate_turtle_shapes, rotated_shapes, Shape, TurtleColors};
use crate::value::{ColorArg, ResolvedColor, Value};
use crate::window::{Diagnostics, Window};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PenDefaults {
    pub color: f64,
    pub shade: f64,
    pub gray: f64,
    pub size: f64,
}

pub(crate) const PEN_DEFAULTS: PenDefaults = PenDefaults {
    color: 0.0,
    shade: 50.0,
    gray: 100.0,
    size: 5.0,
};

pub struct Turtle {
    name: String,
    remote: bool,
    x: f64,
    y: f64,
    heading: f64,
    pen_state: bool,
    pen_color: f64,
    pen_shade: f64,
    pen_gray: f64,
    pen_size: f64,
    pen_fill: bool,
    poly_points: Vec<PolyPoint>,
    shapes: Arc<Vec<Shape>>,
    colors: TurtleColors,
    custom_shapes: bool,
    hidden: bool,
    sprite: Option<Box<dyn Sprite>>,
    half_width: f64,
    half_height: f64,
    label: Option<LabelId>,
    label_xy: (f64, f64),
}

impl Turtle {
    /// Creates a turtle at the origin. In an interactive window it also gets
    /// a sprite, plus a random spot on its side where a label can attach.
    pub(crate) fn new(
        window: &mut Window,
        name: &str,
        colors: TurtleColors,
        shapes: Arc<Vec<Shape>>,
    ) -> Turtle {
        let mut turtle = Turtle {
            name: name.to_owned(),
            remote: false,
            x: 0.0,
            y: 0.0,
            heading: 0.0,
            pen_state: true,
            pen_color: PEN_DEFAULTS.color,
            pen_shade: PEN_DEFAULTS.shade,
            pen_gray: PEN_DEFAULTS.gray,
            pen_size: PEN_DEFAULTS.size,
            pen_fill: false,
            poly_points: Vec::new(),
            shapes,
            colors,
            custom_shapes: false,
            hidden: false,
            sprite: None,
            half_width: 0.0,
            half_height: 0.0,
            label: None,
            label_xy: (0.0, 0.0),
        };

        let first = match turtle.shapes.first() {
            Some(shape) => shape.clone(),
            None => return turtle,
        };
        if let Some(stage) = window.stage.as_mut() {
            turtle.sprite = Some(stage.new_sprite((0.0, 0.0), &first));
            let (width, height) = first.size();
            turtle.half_width = (width / 2.0).trunc();
            turtle.half_height = (height / 2.0).trunc();
            turtle.label_xy = label_offset(width, rand::thread_rng().gen_range(0.0..PI * 4.0 / 3.0));
        }
        turtle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_remote(&mut self) {
        self.remote = true;
    }

    pub fn is_remote(&self) -> bool {
        self.remote
    }

    pub fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn color(&self) -> f64 {
        self.pen_color
    }

    pub fn gray(&self) -> f64 {
        self.pen_gray
    }

    pub fn shade(&self) -> f64 {
        self.pen_shade
    }

    pub fn pen_size(&self) -> f64 {
        self.pen_size
    }

    pub fn pen_state(&self) -> bool {
        self.pen_state
    }

    pub fn fill(&self) -> bool {
        self.pen_fill
    }

    pub fn poly_points(&self) -> &[PolyPoint] {
        &self.poly_points
    }

    pub fn colors(&self) -> TurtleColors {
        self.colors
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn has_custom_shapes(&self) -> bool {
        self.custom_shapes
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn sprite_id(&self) -> Option<SpriteId> {
        self.sprite.as_ref().map(|sprite| sprite.id())
    }

    pub fn label(&self) -> Option<LabelId> {
        self.label
    }

    pub fn label_xy(&self) -> (f64, f64) {
        self.label_xy
    }

    /// Attaches (or with `None` detaches) a label sprite owned by the stage.
    pub fn set_label(&mut self, label: Option<LabelId>) {
        self.label = label;
    }

    pub(crate) fn shares_shapes_with(&self, shapes: &Arc<Vec<Shape>>) -> bool {
        Arc::ptr_eq(&self.shapes, shapes)
    }

    // Pen

    pub fn set_heading(&mut self, window: &mut Window, heading: impl Into<Value>, share: bool) {
        let heading = match heading.into().to_number() {
            Ok(heading) => heading,
            Err(err) => return window.report(Diagnostics::BAD_VALUE, "set_heading", err),
        };
        self.heading = normalize_heading(heading);
        self.update_shape(window);

        if share && window.sharing() {
            window.send(&Event::Heading(self.heading));
        }
    }

    /// Sets the pen color. Color names also set shade and gray.
    pub fn set_color(&mut self, window: &mut Window, color: impl Into<ColorArg>, share: bool) {
        match color.into().resolve() {
            Ok(ResolvedColor::Palette(color)) => self.pen_color = color,
            Ok(ResolvedColor::Named(named)) => {
                self.set_shade(window, named.shade, share);
                self.set_gray(window, named.gray, share);
                if let Some(base) = named.color {
                    return self.set_color(window, ColorArg::Palette(base), share);
                }
            }
            Err(err) => return window.report(Diagnostics::BAD_VALUE, "set_color", err),
        }
        self.push_fgcolor(window);

        if share && window.sharing() {
            window.send(&Event::Color(self.pen_color));
        }
    }

    pub fn set_gray(&mut self, window: &mut Window, gray: impl Into<Value>, share: bool) {
        let gray = match gray.into().to_number() {
            Ok(gray) => gray,
            Err(err) => return window.report(Diagnostics::BAD_VALUE, "set_gray", err),
        };
        self.pen_gray = gray.max(0.0).min(100.0);
        self.push_fgcolor(window);

        if share && window.sharing() {
            window.send(&Event::Gray(self.pen_gray));
        }
    }

    pub fn set_shade(&mut self, window: &mut Window, shade: impl Into<Value>, share: bool) {
        let shade = match shade.into().to_number() {
            Ok(shade) => shade,
            Err(err) => return window.report(Diagnostics::BAD_VALUE, "set_shade", err),
        };
        self.pen_shade = shade;
        self.push_fgcolor(window);

        if share && window.sharing() {
            window.send(&Event::Shade(self.pen_shade));
        }
    }

    pub fn set_pen_size(&mut self, window: &mut Window, pen_size: impl Into<Value>, share: bool) {
        let pen_size = match pen_size.into().to_number() {
            Ok(pen_size) => pen_size,
            Err(err) => return window.report(Diagnostics::BAD_VALUE, "set_pen_size", err),
        };
        self.pen_size = pen_size.max(0.0);
        window.canvas.set_pen_size(self.pen_size);

        if share && window.sharing() {
            window.send(&Event::PenSize(self.pen_size));
        }
    }

    /// Pen down is `true`. Peers receive the state after the change.
    pub fn set_pen_state(&mut self, window: &mut Window, pen_state: bool, share: bool) {
        self.pen_state = pen_state;

        if share && window.sharing() {
            window.send(&Event::PenState(self.pen_state));
        }
    }

    /// Pushes this turtle's pen to the canvas without sharing anything.
    /// Used when it becomes the active turtle.
    pub fn refresh_pen(&mut self, window: &mut Window) {
        self.push_fgcolor(window);
        window.canvas.set_pen_size(self.pen_size);
    }

    fn push_fgcolor(&self, window: &mut Window) {
        window
            .canvas
            .set_fgcolor(self.pen_shade, self.pen_gray, self.pen_color);
    }

    // Fill

    /// Turning fill off drops anything captured so far.
    pub fn set_fill(&mut self, state: bool) {
        self.pen_fill = state;
        if !self.pen_fill {
            self.poly_points.clear();
        }
    }

    pub fn set_poly_points(&mut self, poly_points: Vec<PolyPoint>) {
        self.poly_points = poly_points;
    }

    pub fn start_fill(&mut self) {
        self.pen_fill = true;
        self.poly_points.clear();
    }

    /// Fills whatever was traced since `start_fill` as one polygon.
    pub fn stop_fill(&mut self, window: &mut Window, share: bool) {
        self.pen_fill = false;
        if self.poly_points.is_empty() {
            return;
        }

        let points = mem::take(&mut self.poly_points);
        window.canvas.fill_polygon(&points);

        if share && window.sharing() {
            let size = window.size();
            let shared = points
                .iter()
                .map(|point| point.map_position(|pos| size.screen_to_turtle(pos)))
                .collect();
            window.send(&Event::Fill(shared));
        }
    }

    // Sprite

    pub fn hide(&mut self, window: &mut Window) {
        if let Some(sprite) = self.sprite.as_mut() {
            sprite.hide();
        }
        if let (Some(label), Some(stage)) = (self.label, window.stage.as_mut()) {
            if let Some(sprite) = stage.label_sprite(label) {
                sprite.hide();
            }
        }
        self.hidden = true;
    }

    pub fn show(&mut self, window: &mut Window) {
        if let Some(sprite) = self.sprite.as_mut() {
            sprite.set_layer(TURTLE_LAYER);
        }
        self.hidden = false;
        self.move_sprite(window, self.xy());
        self.update_shape(window);
        if let (Some(label), Some(stage)) = (self.label, window.stage.as_mut()) {
            if let Some(sprite) = stage.label_sprite(label) {
                sprite.set_layer(TURTLE_LAYER + 1);
            }
        }
    }

    /// Moves the turtle, and its sprite with it.
    pub fn move_turtle(&mut self, window: &mut Window, pos: (f64, f64)) {
        self.x = pos.0;
        self.y = pos.1;
        self.move_sprite(window, pos);
    }

    /// Centers the sprite (and label) on `pos` without touching the turtle.
    pub fn move_sprite(&mut self, window: &mut Window, pos: (f64, f64)) {
        let sprite = match self.sprite.as_mut() {
            Some(sprite) => sprite,
            None => return,
        };
        let (x, y) = window.size().turtle_to_screen(pos);
        let corner = (x - self.half_width, y - self.half_height);

        if !self.hidden {
            sprite.move_to(corner);
        }
        if let (Some(label), Some(stage)) = (self.label, window.stage.as_mut()) {
            if let Some(label) = stage.label_sprite(label) {
                label.move_to((corner.0 + self.label_xy.0, corner.1 + self.label_xy.1));
            }
        }
    }

    fn update_shape(&mut self, window: &mut Window) {
        if self.hidden {
            return;
        }
        let sprite = match self.sprite.as_mut() {
            Some(sprite) => sprite,
            None => return,
        };
        let i = bucket(self.heading);
        match self.shapes.get(i) {
            Some(shape) => sprite.set_shape(shape),
            None => {
                window.report(Diagnostics::MISSING_SHAPE, "set_heading", format_args!("no shape {}", i));
                if let Some(shape) = self.shapes.first() {
                    sprite.set_shape(shape);
                }
            }
        }
    }

    // Skin

    /// Reskins the turtle with freshly generated stock shapes.
    pub fn set_turtle_colors(&mut self, window: &mut Window, colors: TurtleColors) -> Result<()> {
        self.shapes = Arc::new(generate_turtle_shapes(&colors)?);
        self.colors = colors;
        self.set_heading(window, self.heading, false);
        Ok(())
    }

    /// Replaces the turtle's images.
    ///
    /// * one image and `i > 0`: it becomes the image of bucket `i`;
    /// * 36 images: they replace the whole set;
    /// * otherwise the first image is used: at heading 0 it is rotated into
    ///   every bucket, at any other heading it only replaces the bucket of
    ///   the current heading.
    pub fn set_shapes(&mut self, window: &mut Window, images: Vec<Shape>, i: usize) {
        let n = images.len();
        if n == 1 && i > 0 {
            let slot = Arc::make_mut(&mut self.shapes).get_mut(i);
            if let (Some(slot), Some(image)) = (slot, images.into_iter().next()) {
                *slot = image;
            }
        } else if n == SHAPES {
            self.shapes = Arc::new(images);
        } else {
            if n != 1 {
                window.report(
                    Diagnostics::IGNORED_SHAPES,
                    "set_shapes",
                    format_args!("{} images passed, using the first", n),
                );
            }
            let image = match images.into_iter().next() {
                Some(image) => image,
                None => return,
            };
            if self.heading == 0.0 {
                self.shapes = Arc::new(rotated_shapes(image));
            } else {
                let j = bucket(self.heading);
                if let Some(slot) = Arc::make_mut(&mut self.shapes).get_mut(j) {
                    *slot = image;
                }
            }
        }
        self.custom_shapes = true;
        self.show(window);
    }

    /// Goes back to the stock turtle if the program reskinned it.
    pub fn reset_shapes(&mut self) -> Result<()> {
        if self.custom_shapes {
            self.shapes = Arc::new(generate_turtle_shapes(&self.colors)?);
            self.custom_shapes = false;
        }
        Ok(())
    }

    // Motion

    /// Turns clockwise.
    pub fn right(&mut self, window: &mut Window, degrees: impl Into<Value>, share: bool) {
        let degrees = match degrees.into().to_number() {
            Ok(degrees) => degrees,
            Err(err) => return window.report(Diagnostics::BAD_VALUE, "right", err),
        };
        self.heading = normalize_heading(self.heading + degrees);
        self.update_shape(window);

        if share && window.sharing() {
            window.send(&Event::Heading(self.heading));
        }
    }

    pub fn forward(&mut self, window: &mut Window, distance: impl Into<Value>, share: bool) {
        let distance = match distance.into().to_number() {
            Ok(distance) => distance,
            Err(err) => return window.report(Diagnostics::BAD_VALUE, "forward", err),
        };
        let scaled = distance * window.coord_scale();

        let old = self.xy();
        let (sin, cos) = self.heading.to_radians().sin_cos();
        let new = (old.0 + scaled * sin, old.1 + scaled * cos);

        self.draw_line(window, old, new, true);
        self.move_turtle(window, new);

        if share && window.sharing() {
            window.send(&Event::Forward(distance));
        }
    }

    /// Jumps to `pos` (scaled by the coordinate scale), drawing only when
    /// `pendown` is set and the pen is down.
    pub fn set_xy(&mut self, window: &mut Window, pos: impl Into<Value>, share: bool, pendown: bool) {
        let pos = match pos.into().to_pair() {
            Ok(pos) => pos,
            Err(err) => return window.report(Diagnostics::BAD_VALUE, "set_xy", err),
        };
        let scale = window.coord_scale();
        let old = self.xy();
        let new = (pos.0 * scale, pos.1 * scale);

        self.draw_line(window, old, new, pendown);
        self.move_turtle(window, new);

        if share && window.sharing() {
            window.send(&Event::SetXy(pos.0, pos.1));
        }
    }

    fn draw_line(&mut self, window: &mut Window, old: (f64, f64), new: (f64, f64), pendown: bool) {
        if !(self.pen_state && pendown) {
            return;
        }
        let size = window.size();
        let (x1, y1) = size.turtle_to_screen(old);
        let (x2, y2) = size.turtle_to_screen(new);
        window.canvas.draw_line(x1, y1, x2, y2);
        if self.pen_fill {
            if self.poly_points.is_empty() {
                self.poly_points.push(PolyPoint::Move(x1, y1));
            }
            self.poly_points.push(PolyPoint::Line(x2, y2));
        }
    }

    /// Draws an arc of `angle` degrees; positive angles turn clockwise.
    pub fn arc(&mut self, window: &mut Window, angle: impl Into<Value>, radius: impl Into<Value>, share: bool) {
        let (angle, radius) = match (angle.into().to_number(), radius.into().to_number()) {
            (Ok(angle), Ok(radius)) => (angle, radius),
            (Err(err), _) | (_, Err(err)) => return window.report(Diagnostics::BAD_VALUE, "arc", err),
        };
        let pos = if angle < 0.0 {
            self.larc(window, -angle, radius)
        } else {
            self.rarc(window, angle, radius)
        };
        self.move_turtle(window, pos);

        if share && window.sharing() {
            window.send(&Event::Arc(angle, radius));
        }
    }

    /// Traces a clockwise arc and turns the turtle with it. Returns where
    /// the arc ends; the caller moves the turtle there.
    pub fn rarc(&mut self, window: &mut Window, angle: f64, radius: f64) -> (f64, f64) {
        let (mut angle, mut r) = (angle, radius * window.coord_scale());
        if r < 0.0 {
            r = -r;
            angle = -angle;
        }
        let (x, y) = self.xy();
        let (sin, cos) = self.heading.to_radians().sin_cos();
        let (cx, cy) = (x + r * cos, y - r * sin);

        if self.pen_state {
            let size = window.size();
            let (sx, sy) = size.turtle_to_screen((cx, cy));
            window.canvas.rarc(sx, sy, r, angle, self.heading);
            if self.pen_fill {
                self.begin_fill_at(size.turtle_to_screen((x, y)));
                self.poly_points.push(PolyPoint::RArc {
                    cx: sx,
                    cy: sy,
                    r,
                    start: (self.heading - 180.0).to_radians(),
                    end: (self.heading - 180.0 + angle).to_radians(),
                });
            }
        }

        self.right(window, angle, false);
        let (sin, cos) = self.heading.to_radians().sin_cos();
        (cx - r * cos, cy + r * sin)
    }

    /// Counter-clockwise twin of [`Turtle::rarc`].
    pub fn larc(&mut self, window: &mut Window, angle: f64, radius: f64) -> (f64, f64) {
        let (mut angle, mut r) = (angle, radius * window.coord_scale());
        if r < 0.0 {
            r = -r;
            angle = -angle;
        }
        let (x, y) = self.xy();
        let (sin, cos) = self.heading.to_radians().sin_cos();
        let (cx, cy) = (x - r * cos, y + r * sin);

        if self.pen_state {
            let size = window.size();
            let (sx, sy) = size.turtle_to_screen((cx, cy));
            window.canvas.larc(sx, sy, r, angle, self.heading);
            if self.pen_fill {
                self.begin_fill_at(size.turtle_to_screen((x, y)));
                self.poly_points.push(PolyPoint::LArc {
                    cx: sx,
                    cy: sy,
                    r,
                    start: self.heading.to_radians(),
                    end: (self.heading - angle).to_radians(),
                });
            }
        }

        self.right(window, -angle, false);
        let (sin, cos) = self.heading.to_radians().sin_cos();
        (cx + r * cos, cy - r * sin)
    }

    fn begin_fill_at(&mut self, pos: (f64, f64)) {
        if self.poly_points.is_empty() {
            self.poly_points.push(PolyPoint::Move(pos.0, pos.1));
        }
    }

    // Stamps

    /// Draws `image` at `placement` (screen space). Sharing is deferred to
    /// the next idle cycle so that encoding the image doesn't hold up drawing.
    pub fn draw_pixbuf(&mut self, window: &mut Window, image: &Image, placement: PixbufPlacement, share: bool) {
        window.canvas.draw_pixbuf(image, &placement, self.heading);

        if share && window.sharing() {
            let (x, y) = window.size().screen_to_turtle((placement.x, placement.y));
            let nick = window.nick().to_owned();
            let image = image.clone();
            window.defer(move || {
                let pixbuf = PixbufData {
                    a: placement.a,
                    b: placement.b,
                    x,
                    y,
                    w: placement.w,
                    h: placement.h,
                    width: image.width(),
                    height: image.height(),
                    data: image.data().to_vec(),
                };
                encode(&nick, &Event::Pixbuf(pixbuf))
            });
        }
    }

    pub fn draw_text(&mut self, window: &mut Window, label: &str, x: f64, y: f64, size: f64, w: f64, share: bool) {
        let w = w * window.coord_scale();
        window.canvas.draw_text(label, x, y, size, w, self.heading);

        if share && window.sharing() {
            window.send(&Event::Text(TextData {
                label: label.to_owned(),
                x,
                y,
                size,
                w,
            }));
        }
    }

    /// The canvas pixel under the turtle.
    pub fn get_pixel(&self, window: &Window) -> Rgba {
        let (x, y) = window.size().turtle_to_screen(self.xy());
        window.canvas.get_pixel(x, y)
    }
}

impl Debug for Turtle {
    fn fmt(&self, formatter: &mut Formatter) -> FormatResult {
        formatter
            .debug_struct("Turtle")
            .field("name", &self.name)
            .field("remote", &self.remote)
            .field("xy", &self.xy())
            .field("heading", &self.heading)
            .field("pen_state", &self.pen_state)
            .field("pen_color", &self.pen_color)
            .field("pen_shade", &self.pen_shade)
            .field("pen_gray", &self.pen_gray)
            .field("pen_size", &self.pen_size)
            .field("pen_fill", &self.pen_fill)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}

// Labels hug the turtle's sides: 30-150° or 210-330°, never nose or tail.
fn label_offset(width: f64, angle: f64) -> (f64, f64) {
    let radius = width * 0.67;
    if angle > PI * 2.0 / 3.0 {
        let angle = angle + PI / 2.0;
        ((radius * angle.sin()).trunc(), (radius * angle.cos() + width / 2.0).trunc())
    } else {
        let angle = angle + PI / 6.0;
        (
            (radius * angle.sin() + width / 2.0).trunc(),
            (radius * angle.cos() + width / 2.0).trunc(),
        )
    }
}
