// turtleart/turtle/src/window.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Everything a turtle draws through: the canvas, the optional sprite
//! stage, the optional link to peers, and the session settings.

use std::fmt::{Debug, Display, Formatter, Result as FormatResult};

use turtleart_share::{encode, Event, EventSender, IdleQueue};

use crate::canvas::{Canvas, Stage};
use crate::config::SessionConfig;
use crate::coords::CanvasSize;

bitflags! {
    // NB: If you change this, make sure to update the `Display`
    // implementation as well.
    pub struct Diagnostics: u8 {
        const BAD_VALUE      = 0x01;
        const MISSING_SHAPE  = 0x02;
        const IGNORED_SHAPES = 0x04;
    }
}

impl Display for Diagnostics {
    fn fmt(&self, formatter: &mut Formatter) -> FormatResult {
        if self.is_empty() {
            return Ok(());
        }

        let mut first = true;
        for (bit, name) in NAMES.iter().enumerate() {
            if (self.bits() >> bit) & 1 == 0 {
                continue;
            }
            if !first {
                formatter.write_str(", ")?;
            } else {
                first = false;
            }
            formatter.write_str(name)?;
        }

        return Ok(());

        // Must match the order in `Diagnostics`.
        static NAMES: &'static [&'static str] = &[
            "bad value",
            "missing shape",
            "ignored shapes",
        ];
    }
}

pub struct Window {
    pub(crate) canvas: Box<dyn Canvas>,
    pub(crate) stage: Option<Box<dyn Stage>>,
    sender: Option<Box<dyn EventSender>>,
    idle: IdleQueue,
    config: SessionConfig,
    diagnostics: Diagnostics,
}

impl Window {
    /// A headless window: drawing goes to `canvas`, there are no sprites and
    /// nothing is shared.
    pub fn new(config: SessionConfig, canvas: Box<dyn Canvas>) -> Window {
        Window {
            canvas,
            stage: None,
            sender: None,
            idle: IdleQueue::new(),
            config,
            diagnostics: Diagnostics::empty(),
        }
    }

    pub fn with_stage(mut self, stage: Box<dyn Stage>) -> Window {
        self.stage = Some(stage);
        self
    }

    /// Joins a collaborative session; shared primitives are sent to `sender`.
    pub fn with_sharing(mut self, sender: Box<dyn EventSender>) -> Window {
        self.sender = Some(sender);
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn nick(&self) -> &str {
        &self.config.nick
    }

    pub fn coord_scale(&self) -> f64 {
        self.config.coord_scale
    }

    pub fn size(&self) -> CanvasSize {
        self.config.size()
    }

    pub fn sharing(&self) -> bool {
        self.sender.is_some()
    }

    pub fn is_interactive(&self) -> bool {
        self.stage.is_some()
    }

    /// Problems with program input seen since the last `clear_diagnostics`.
    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    pub fn clear_diagnostics(&mut self) {
        self.diagnostics = Diagnostics::empty();
    }

    pub fn idle_pending(&self) -> usize {
        self.idle.len()
    }

    /// Runs deferred sends. Hosts call this from their idle handler.
    pub fn run_idle(&mut self) -> usize {
        match self.sender.as_mut() {
            Some(sender) => self.idle.run(&mut **sender),
            None => 0,
        }
    }

    pub(crate) fn send(&mut self, event: &Event) {
        if let Some(sender) = self.sender.as_mut() {
            let line = encode(&self.config.nick, event);
            tracing::trace!(%line, "sharing event");
            sender.send_event(&line);
        }
    }

    pub(crate) fn defer<F>(&mut self, task: F)
    where
        F: FnOnce() -> String + 'static,
    {
        self.idle.push(task);
    }

    pub(crate) fn report(&mut self, flag: Diagnostics, op: &str, detail: impl Display) {
        self.diagnostics.insert(flag);
        if self.config.verbose {
            tracing::warn!(op, "{}: {}", flag, detail);
        } else {
            tracing::debug!(op, "{}: {}", flag, detail);
        }
    }
}

impl Debug for Window {
    fn fmt(&self, formatter: &mut Formatter) -> FormatResult {
        formatter
            .debug_struct("Window")
            .field("config", &self.config)
            .field("interactive", &self.is_interactive())
            .field("sharing", &self.sharing())
            .field("idle", &self.idle)
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}
