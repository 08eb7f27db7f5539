// turtleart/turtle/tests/common/mod.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use turtleart_turtle::{
    LabelId, Recorder, SessionConfig, Shape, Sprite, SpriteId, Stage, TurtleSession, Window,
};

#[derive(Clone, Debug, PartialEq)]
pub enum SpriteCall {
    MoveTo(SpriteId, (f64, f64)),
    SetShape(SpriteId, Shape),
    SetLayer(SpriteId, i32),
    Hide(SpriteId),
}

pub type SpriteLog = Rc<RefCell<Vec<SpriteCall>>>;

pub struct TestSprite {
    id: SpriteId,
    log: SpriteLog,
}

impl Sprite for TestSprite {
    fn id(&self) -> SpriteId {
        self.id
    }

    fn move_to(&mut self, pos: (f64, f64)) {
        self.log.borrow_mut().push(SpriteCall::MoveTo(self.id, pos));
    }

    fn set_shape(&mut self, shape: &Shape) {
        self.log
            .borrow_mut()
            .push(SpriteCall::SetShape(self.id, shape.clone()));
    }

    fn set_layer(&mut self, layer: i32) {
        self.log.borrow_mut().push(SpriteCall::SetLayer(self.id, layer));
    }

    fn hide(&mut self) {
        self.log.borrow_mut().push(SpriteCall::Hide(self.id));
    }
}

/// Stage whose sprites write every call to a shared log.
#[derive(Default)]
pub struct TestStage {
    next_id: u32,
    log: SpriteLog,
    labels: HashMap<LabelId, Box<dyn Sprite>>,
}

impl TestStage {
    pub fn new(log: SpriteLog) -> TestStage {
        TestStage {
            next_id: 0,
            log,
            labels: HashMap::new(),
        }
    }

    /// Registers a label sprite. Label sprite ids start at 1000.
    pub fn with_label(mut self, label: LabelId) -> TestStage {
        let sprite = TestSprite {
            id: SpriteId(1000 + label.0),
            log: self.log.clone(),
        };
        self.labels.insert(label, Box::new(sprite));
        self
    }
}

impl Stage for TestStage {
    fn new_sprite(&mut self, _: (f64, f64), _: &Shape) -> Box<dyn Sprite> {
        let id = SpriteId(self.next_id);
        self.next_id += 1;
        Box::new(TestSprite {
            id,
            log: self.log.clone(),
        })
    }

    fn label_sprite(&mut self, label: LabelId) -> Option<&mut dyn Sprite> {
        match self.labels.get_mut(&label) {
            Some(sprite) => Some(sprite.as_mut()),
            None => None,
        }
    }
}

pub type Outbox = Rc<RefCell<Vec<String>>>;

pub fn config(nick: &str) -> SessionConfig {
    SessionConfig {
        nick: nick.to_owned(),
        ..SessionConfig::default()
    }
}

/// A session with no sprites and no peers.
pub fn headless() -> (TurtleSession, Recorder) {
    let canvas = Recorder::new();
    let window = Window::new(config("me"), Box::new(canvas.clone()));
    (TurtleSession::new(window).unwrap(), canvas)
}

/// A session whose shared events land in the returned outbox.
pub fn sharing(nick: &str) -> (TurtleSession, Recorder, Outbox) {
    sharing_with(config(nick))
}

pub fn sharing_with(config: SessionConfig) -> (TurtleSession, Recorder, Outbox) {
    let canvas = Recorder::new();
    let outbox = Outbox::default();
    let window = Window::new(config, Box::new(canvas.clone())).with_sharing(Box::new(outbox.clone()));
    (TurtleSession::new(window).unwrap(), canvas, outbox)
}

/// A session with a sprite stage, logging sprite calls.
pub fn interactive(stage: TestStage) -> (TurtleSession, Recorder) {
    let canvas = Recorder::new();
    let window = Window::new(config("me"), Box::new(canvas.clone())).with_stage(Box::new(stage));
    (TurtleSession::new(window).unwrap(), canvas)
}

pub fn approx(a: (f64, f64), b: (f64, f64)) -> bool {
    (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
}
