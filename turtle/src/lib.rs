// turtleart/turtle/src/lib.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Turtles that draw on a host canvas and mirror their moves to peers.
//!
//! A [`TurtleSession`] owns a [`Window`] (the host's canvas, optional
//! sprite stage and optional link to peers) and the [`Turtles`] drawing in
//! it. Programs drive the active turtle; peers' events arrive through
//! [`TurtleSession::apply_event`].

#[macro_use]
extern crate bitflags;

pub mod canvas;
pub mod config;
pub mod coords;
pub mod error;
pub mod session;
pub mod shapes;
pub mod turtle;
pub mod turtles;
pub mod value;
pub mod window;

pub use crate::canvas::{
    Canvas, CanvasOp, Image, LabelId, PixbufPlacement, Recorder, Rgba, Sprite, SpriteId, Stage,
};
pub use crate::config::SessionConfig;
pub use crate::coords::CanvasSize;
pub use crate::error::{Result, TurtleError};
pub use crate::session::TurtleSession;
pub use crate::shapes::{Rgb, Shape, TurtleColors};
pub use crate::turtle::Turtle;
pub use crate::turtles::Turtles;
pub use crate::value::{ColorArg, Value};
pub use crate::window::{Diagnostics, Window};

#[test]
fn headless_session_draws() {
    let canvas = Recorder::new();
    let window = Window::new(SessionConfig::default(), Box::new(canvas.clone()));
    let mut session = TurtleSession::new(window).unwrap();

    let (turtle, window) = session.active();
    turtle.forward(window, 100.0, true);
    assert_eq!(turtle.xy(), (0.0, 100.0));
    assert_eq!(
        canvas.lines(),
        vec![CanvasOp::Line {
            x1: 600.0,
            y1: 450.0,
            x2: 600.0,
            y2: 350.0,
        }]
    );
}

#[test]
fn diagnostics_display() {
    assert_eq!(Diagnostics::empty().to_string(), "");
    assert_eq!(
        (Diagnostics::BAD_VALUE | Diagnostics::IGNORED_SHAPES).to_string(),
        "bad value, ignored shapes"
    );
}
