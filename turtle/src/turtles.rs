// turtleart/turtle/src/turtles.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The set of turtles in a drawing session, keyed by name.

use std::collections::HashMap;
use std::sync::Arc;

use crate::canvas::SpriteId;
use crate::coords::CanvasSize;
use crate::error::{Result, TurtleError};
use crate::shapes::{generate_turtle_shapes, Shape, TurtleColors};
use crate::turtle::{Turtle, PEN_DEFAULTS};
use crate::window::Window;

#[derive(Debug)]
pub struct Turtles {
    turtles: HashMap<String, Turtle>,
    active: String,
    default_name: String,
    size: CanvasSize,
    default_shapes: Option<Arc<Vec<Shape>>>,
}

impl Turtles {
    /// Creates the registry along with its default turtle, which starts out
    /// active.
    pub fn new(window: &mut Window) -> Result<Turtles> {
        let default_name = window.config().default_turtle_name.clone();
        let mut turtles = Turtles {
            turtles: HashMap::new(),
            active: default_name.clone(),
            default_name: default_name.clone(),
            size: window.size(),
            default_shapes: None,
        };
        turtles.set_turtle(window, &default_name, None)?;
        Ok(turtles)
    }

    /// Looks `name` up. With `create`, a missing turtle is built: in
    /// `colors` if given, in palette colors if the name is a number, and in
    /// the stock colors otherwise.
    pub fn get_turtle(
        &mut self,
        window: &mut Window,
        name: &str,
        create: bool,
        colors: Option<TurtleColors>,
    ) -> Result<Option<&mut Turtle>> {
        if !create || self.turtles.contains_key(name) {
            return Ok(self.turtles.get_mut(name));
        }

        let (colors, shapes) = match (colors, name.trim().parse::<i64>()) {
            (Some(colors), _) => (colors, Arc::new(generate_turtle_shapes(&colors)?)),
            (None, Ok(key)) => {
                let colors = TurtleColors::from_palette(key);
                (colors, Arc::new(generate_turtle_shapes(&colors)?))
            }
            (None, Err(_)) => (TurtleColors::default(), self.default_shapes()?),
        };
        tracing::debug!(name, fill = %colors.fill, stroke = %colors.stroke, "new turtle");

        let turtle = Turtle::new(window, name, colors, shapes);
        Ok(Some(self.turtles.entry(name.to_owned()).or_insert(turtle)))
    }

    pub fn get(&self, name: &str) -> Option<&Turtle> {
        self.turtles.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Turtle> {
        self.turtles.get_mut(name)
    }

    /// The name under which `turtle` is registered.
    pub fn get_turtle_key<'a>(&'a self, turtle: &Turtle) -> Option<&'a str> {
        self.turtles
            .get_key_value(turtle.name())
            .map(|(key, _)| key.as_str())
    }

    pub fn turtle_count(&self) -> usize {
        self.turtles.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turtle> {
        self.turtles.values()
    }

    /// Drops a turtle, hiding it first. If it was active, the default turtle
    /// takes over.
    pub fn remove_turtle(&mut self, window: &mut Window, name: &str) -> Result<()> {
        let mut turtle = match self.turtles.remove(name) {
            Some(turtle) => turtle,
            None => return Err(TurtleError::NoSuchTurtle(name.to_owned())),
        };
        turtle.hide(window);
        if self.active == name {
            let default_name = self.default_name.clone();
            self.set_turtle(window, &default_name, None)?;
        }
        Ok(())
    }

    pub fn show_all(&mut self, window: &mut Window) {
        for turtle in self.turtles.values_mut() {
            turtle.show(window);
        }
    }

    /// The turtle whose sprite is `sprite`, for hosts that hit-test sprites.
    pub fn spr_to_turtle(&self, sprite: SpriteId) -> Option<&Turtle> {
        self.turtles
            .values()
            .find(|turtle| turtle.sprite_id() == Some(sprite))
    }

    /// The stock 36-image set, generated on first use and shared by every
    /// turtle in the default colors.
    pub fn default_shapes(&mut self) -> Result<Arc<Vec<Shape>>> {
        if let Some(shapes) = &self.default_shapes {
            return Ok(shapes.clone());
        }
        let shapes = Arc::new(generate_turtle_shapes(&TurtleColors::default())?);
        self.default_shapes = Some(shapes.clone());
        Ok(shapes)
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn turtle_to_screen(&self, pos: (f64, f64)) -> (f64, f64) {
        self.size.turtle_to_screen(pos)
    }

    pub fn screen_to_turtle(&self, pos: (f64, f64)) -> (f64, f64) {
        self.size.screen_to_turtle(pos)
    }

    pub fn active_name(&self) -> &str {
        &self.active
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    pub fn set_default_turtle_name(&mut self, name: &str) {
        self.default_name = name.to_owned();
    }

    pub fn active_turtle(&self) -> &Turtle {
        self.turtles
            .get(&self.active)
            .expect("active turtle is always registered")
    }

    pub fn active_turtle_mut(&mut self) -> &mut Turtle {
        self.turtles
            .get_mut(&self.active)
            .expect("active turtle is always registered")
    }

    pub fn default_turtle(&self) -> Option<&Turtle> {
        self.turtles.get(&self.default_name)
    }

    /// Makes an existing turtle active without touching the canvas.
    pub fn set_active_turtle(&mut self, name: &str) -> Result<()> {
        if !self.turtles.contains_key(name) {
            return Err(TurtleError::NoSuchTurtle(name.to_owned()));
        }
        self.active = name.to_owned();
        Ok(())
    }

    /// Selects `name`, creating it at the origin if it's new, and reskinning
    /// it if `colors` are given. The canvas pen is switched to the turtle's.
    pub fn set_turtle(
        &mut self,
        window: &mut Window,
        name: &str,
        colors: Option<TurtleColors>,
    ) -> Result<()> {
        if !self.turtles.contains_key(name) {
            let turtle = match self.get_turtle(window, name, true, colors)? {
                Some(turtle) => turtle,
                None => return Err(TurtleError::NoSuchTurtle(name.to_owned())),
            };
            turtle.set_heading(window, 0.0, false);
            turtle.set_xy(window, (0.0, 0.0), false, false);
            turtle.set_pen_state(window, true, false);
        } else if let Some(colors) = colors {
            if let Some(turtle) = self.turtles.get_mut(name) {
                turtle.set_turtle_colors(window, colors)?;
            }
        }

        self.active = name.to_owned();
        let turtle = self.active_turtle_mut();
        turtle.show(window);
        turtle.refresh_pen(window);
        Ok(())
    }

    /// Puts every local turtle back to its starting state and reselects the
    /// default turtle. Turtles driven by peers are left alone.
    pub fn reset_turtles(&mut self, window: &mut Window) -> Result<()> {
        for turtle in self.turtles.values_mut() {
            if turtle.is_remote() {
                continue;
            }
            turtle.set_color(window, PEN_DEFAULTS.color, true);
            turtle.set_shade(window, PEN_DEFAULTS.shade, true);
            turtle.set_gray(window, PEN_DEFAULTS.gray, true);
            turtle.set_pen_size(window, PEN_DEFAULTS.size, true);
            turtle.reset_shapes()?;
            turtle.set_heading(window, 0.0, true);
            turtle.set_pen_state(window, false, true);
            turtle.move_turtle(window, (0.0, 0.0));
            turtle.set_pen_state(window, true, true);
            turtle.set_fill(false);
            turtle.hide(window);
        }
        let default_name = self.default_name.clone();
        self.set_turtle(window, &default_name, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Recorder;
    use crate::config::SessionConfig;

    fn window() -> Window {
        Window::new(SessionConfig::default(), Box::new(Recorder::new()))
    }

    #[test]
    fn default_turtle_is_active() {
        let mut window = window();
        let turtles = Turtles::new(&mut window).unwrap();
        assert_eq!(turtles.turtle_count(), 1);
        assert_eq!(turtles.active_name(), "Yertle");
        assert_eq!(turtles.active_turtle().xy(), (0.0, 0.0));
        assert!(turtles.active_turtle().pen_state());
    }

    #[test]
    fn default_colored_turtles_share_shapes() {
        let mut window = window();
        let mut turtles = Turtles::new(&mut window).unwrap();
        turtles.get_turtle(&mut window, "bob", true, None).unwrap();
        let shapes = turtles.default_shapes().unwrap();
        assert!(turtles.get("bob").unwrap().shares_shapes_with(&shapes));
        assert!(turtles.get("Yertle").unwrap().shares_shapes_with(&shapes));
    }

    #[test]
    fn numeric_names_get_palette_colors() {
        let mut window = window();
        let mut turtles = Turtles::new(&mut window).unwrap();
        let turtle = turtles
            .get_turtle(&mut window, "105", true, None)
            .unwrap()
            .unwrap();
        assert_eq!(turtle.colors(), TurtleColors::from_palette(105));
        assert_eq!(turtle.colors(), TurtleColors::from_palette(94));
    }

    #[test]
    fn lookup_without_create_is_none() {
        let mut window = window();
        let mut turtles = Turtles::new(&mut window).unwrap();
        assert!(turtles
            .get_turtle(&mut window, "ghost", false, None)
            .unwrap()
            .is_none());
        assert_eq!(turtles.turtle_count(), 1);
    }

    #[test]
    fn removing_the_active_turtle_reselects_the_default() {
        let mut window = window();
        let mut turtles = Turtles::new(&mut window).unwrap();
        turtles.set_turtle(&mut window, "bob", None).unwrap();
        assert_eq!(turtles.active_name(), "bob");
        turtles.remove_turtle(&mut window, "bob").unwrap();
        assert_eq!(turtles.active_name(), "Yertle");
        assert!(matches!(
            turtles.remove_turtle(&mut window, "bob"),
            Err(TurtleError::NoSuchTurtle(_))
        ));
    }
}
