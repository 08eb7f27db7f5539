// turtleart/turtle/src/config.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Per-session settings.

use std::env;

use crate::coords::CanvasSize;

pub const DEFAULT_TURTLE: &str = "Yertle";

#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    pub width: f64,
    pub height: f64,
    /// Multiplies every distance and position a program asks for.
    pub coord_scale: f64,
    /// Name this session signs its shared events with.
    pub nick: String,
    pub default_turtle_name: String,
    /// Log bad program input at warn level instead of debug.
    pub verbose: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            width: 1200.0,
            height: 900.0,
            coord_scale: 1.0,
            nick: "turtle".to_owned(),
            default_turtle_name: DEFAULT_TURTLE.to_owned(),
            verbose: false,
        }
    }
}

impl SessionConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TURTLE_CANVAS_WIDTH` / `TURTLE_CANVAS_HEIGHT` - Canvas size in pixels (default: 1200x900)
    /// - `TURTLE_COORD_SCALE` - Coordinate scale factor (default: 1.0)
    /// - `TURTLE_NICK` - Sender name for shared events (default: "turtle")
    /// - `TURTLE_DEFAULT_NAME` - Name of the default turtle (default: "Yertle")
    /// - `TURTLE_VERBOSE` - Report bad input at warn level (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(width) = read_env::<f64>("TURTLE_CANVAS_WIDTH").filter(|w| *w > 0.0) {
            config.width = width;
        }
        if let Some(height) = read_env::<f64>("TURTLE_CANVAS_HEIGHT").filter(|h| *h > 0.0) {
            config.height = height;
        }
        if let Some(scale) = read_env::<f64>("TURTLE_COORD_SCALE").filter(|s| s.is_finite()) {
            config.coord_scale = scale;
        }
        if let Ok(nick) = env::var("TURTLE_NICK") {
            config.nick = nick;
        }
        if let Ok(name) = env::var("TURTLE_DEFAULT_NAME") {
            config.default_turtle_name = name;
        }
        if let Some(verbose) = read_env::<bool>("TURTLE_VERBOSE") {
            config.verbose = verbose;
        } else if env::var("TURTLE_VERBOSE").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.verbose = true;
        }

        config
    }

    pub fn size(&self) -> CanvasSize {
        CanvasSize::new(self.width, self.height)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
