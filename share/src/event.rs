// turtleart/share/src/event.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Events exchanged between collaborating sessions.
//!
//! Every state-mutating turtle primitive has a matching event. Events carry
//! plain values; turning them into wire strings is the job of `wire`.

/// One drawing op captured while a turtle is filling.
///
/// Points are screen-space when captured locally and turtle-space when sent
/// over the wire. Arc angles are radians.
#[derive(Clone, Debug, PartialEq)]
pub enum PolyPoint {
    Move(f64, f64),
    Line(f64, f64),
    RArc {
        cx: f64,
        cy: f64,
        r: f64,
        start: f64,
        end: f64,
    },
    LArc {
        cx: f64,
        cy: f64,
        r: f64,
        start: f64,
        end: f64,
    },
}

impl PolyPoint {
    /// The anchor of the op: the target of a move/line or the center of an arc.
    pub fn position(&self) -> (f64, f64) {
        match *self {
            PolyPoint::Move(x, y) | PolyPoint::Line(x, y) => (x, y),
            PolyPoint::RArc { cx, cy, .. } | PolyPoint::LArc { cx, cy, .. } => (cx, cy),
        }
    }

    /// Returns a copy with the anchor mapped through `f`; radii and angles
    /// are left as they are.
    pub fn map_position<F>(&self, f: F) -> PolyPoint
    where
        F: FnOnce((f64, f64)) -> (f64, f64),
    {
        let (x, y) = f(self.position());
        match *self {
            PolyPoint::Move(..) => PolyPoint::Move(x, y),
            PolyPoint::Line(..) => PolyPoint::Line(x, y),
            PolyPoint::RArc { r, start, end, .. } => PolyPoint::RArc {
                cx: x,
                cy: y,
                r,
                start,
                end,
            },
            PolyPoint::LArc { r, start, end, .. } => PolyPoint::LArc {
                cx: x,
                cy: y,
                r,
                start,
                end,
            },
        }
    }

    pub(crate) fn op_name(&self) -> &'static str {
        match self {
            PolyPoint::Move(..) => "move",
            PolyPoint::Line(..) => "line",
            PolyPoint::RArc { .. } => "rarc",
            PolyPoint::LArc { .. } => "larc",
        }
    }
}

/// Image drawn by a turtle, shipped to peers together with its placement.
#[derive(Clone, Debug, PartialEq)]
pub struct PixbufData {
    pub a: f64,
    pub b: f64,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub width: u32,
    pub height: u32,
    /// Encoded image bytes. Base64 only exists on the wire.
    pub data: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextData {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub w: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Heading(f64),
    Color(f64),
    Gray(f64),
    Shade(f64),
    PenSize(f64),
    PenState(bool),
    Forward(f64),
    SetXy(f64, f64),
    Arc(f64, f64), // Angle, radius.
    Fill(Vec<PolyPoint>),
    Pixbuf(PixbufData),
    Text(TextData),
}

impl Event {
    pub fn tag(&self) -> Tag {
        match self {
            Event::Heading(_) => Tag::Heading,
            Event::Color(_) => Tag::Color,
            Event::Gray(_) => Tag::Gray,
            Event::Shade(_) => Tag::Shade,
            Event::PenSize(_) => Tag::PenSize,
            Event::PenState(_) => Tag::PenState,
            Event::Forward(_) => Tag::Forward,
            Event::SetXy(..) => Tag::SetXy,
            Event::Arc(..) => Tag::Arc,
            Event::Fill(_) => Tag::Fill,
            Event::Pixbuf(_) => Tag::Pixbuf,
            Event::Text(_) => Tag::Text,
        }
    }
}

/// Single-character event tags used as the wire prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Heading,
    Color,
    Gray,
    Shade,
    PenSize,
    PenState,
    Forward,
    SetXy,
    Arc,
    Fill,
    Pixbuf,
    Text,
}

impl Tag {
    pub const fn as_char(self) -> char {
        match self {
            Tag::Heading => 'r',
            Tag::Color => 'c',
            Tag::Gray => 'g',
            Tag::Shade => 's',
            Tag::PenSize => 'w',
            Tag::PenState => 'p',
            Tag::Forward => 'f',
            Tag::SetXy => 'x',
            Tag::Arc => 'a',
            Tag::Fill => 'F',
            Tag::Pixbuf => 'P',
            Tag::Text => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Tag> {
        let tag = match c {
            'r' => Tag::Heading,
            'c' => Tag::Color,
            'g' => Tag::Gray,
            's' => Tag::Shade,
            'w' => Tag::PenSize,
            'p' => Tag::PenState,
            'f' => Tag::Forward,
            'x' => Tag::SetXy,
            'a' => Tag::Arc,
            'F' => Tag::Fill,
            'P' => Tag::Pixbuf,
            'W' => Tag::Text,
            _ => return None,
        };
        Some(tag)
    }
}
