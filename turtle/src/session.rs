// turtleart/turtle/src/session.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A drawing session: one window and the turtles drawing in it.
//!
//! Peers' events are replayed here on a turtle named after the peer. That
//! turtle is marked remote and every primitive runs with `share` off, so
//! nothing received is ever sent back out.

use turtleart_share::{decode, Event};

use crate::canvas::{Image, PixbufPlacement};
use crate::error::Result;
use crate::shapes::TurtleColors;
use crate::turtle::Turtle;
use crate::turtles::Turtles;
use crate::value::ColorArg;
use crate::window::Window;

#[derive(Debug)]
pub struct TurtleSession {
    window: Window,
    turtles: Turtles,
}

impl TurtleSession {
    pub fn new(mut window: Window) -> Result<TurtleSession> {
        let turtles = Turtles::new(&mut window)?;
        Ok(TurtleSession { window, turtles })
    }

    /// The active turtle, together with the window it draws in.
    pub fn active(&mut self) -> (&mut Turtle, &mut Window) {
        (self.turtles.active_turtle_mut(), &mut self.window)
    }

    pub fn parts(&mut self) -> (&mut Turtles, &mut Window) {
        (&mut self.turtles, &mut self.window)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn turtles(&self) -> &Turtles {
        &self.turtles
    }

    pub fn set_turtle(&mut self, name: &str, colors: Option<TurtleColors>) -> Result<()> {
        self.turtles.set_turtle(&mut self.window, name, colors)
    }

    pub fn reset_turtles(&mut self) -> Result<()> {
        self.turtles.reset_turtles(&mut self.window)
    }

    /// Flushes deferred sends; see [`Window::run_idle`].
    pub fn run_idle(&mut self) -> usize {
        self.window.run_idle()
    }

    /// Replays one event received from a peer. Lines that don't decode are
    /// returned as errors and change nothing. Our own events, echoed back by
    /// the transport, are ignored.
    pub fn apply_event(&mut self, line: &str) -> Result<()> {
        let (nick, event) = decode(line)?;
        if nick == self.window.nick() {
            tracing::trace!(%nick, "ignoring own event");
            return Ok(());
        }
        tracing::debug!(%nick, tag = %event.tag().as_char(), "applying peer event");

        let previous = self.turtles.active_name().to_owned();
        self.turtles.set_turtle(&mut self.window, &nick, None)?;

        let window = &mut self.window;
        let turtle = self.turtles.active_turtle_mut();
        turtle.set_remote();
        match event {
            Event::Heading(heading) => turtle.set_heading(window, heading, false),
            Event::Color(color) => turtle.set_color(window, ColorArg::Palette(color), false),
            Event::Gray(gray) => turtle.set_gray(window, gray, false),
            Event::Shade(shade) => turtle.set_shade(window, shade, false),
            Event::PenSize(size) => turtle.set_pen_size(window, size, false),
            Event::PenState(down) => turtle.set_pen_state(window, down, false),
            Event::Forward(distance) => turtle.forward(window, distance, false),
            Event::SetXy(x, y) => turtle.set_xy(window, (x, y), false, true),
            Event::Arc(angle, radius) => turtle.arc(window, angle, radius, false),
            Event::Fill(points) => {
                let size = window.size();
                turtle.start_fill();
                turtle.set_poly_points(
                    points
                        .iter()
                        .map(|point| point.map_position(|pos| size.turtle_to_screen(pos)))
                        .collect(),
                );
                turtle.stop_fill(window, false);
            }
            Event::Pixbuf(pixbuf) => {
                let (x, y) = window.size().turtle_to_screen((pixbuf.x, pixbuf.y));
                let placement = PixbufPlacement {
                    a: pixbuf.a,
                    b: pixbuf.b,
                    x,
                    y,
                    w: pixbuf.w,
                    h: pixbuf.h,
                };
                let image = Image::new(pixbuf.width, pixbuf.height, pixbuf.data);
                turtle.draw_pixbuf(window, &image, placement, false);
            }
            Event::Text(text) => {
                turtle.draw_text(window, &text.label, text.x, text.y, text.size, text.w, false)
            }
        }

        self.turtles.set_turtle(&mut self.window, &previous, None)
    }
}
