// turtleart/share/src/queue.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Outgoing event delivery.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt::{Debug, Formatter, Result as FormatResult};
use std::rc::Rc;

/// Fire-and-forget transport to the other sessions.
pub trait EventSender {
    fn send_event(&mut self, event: &str);
}

impl EventSender for Vec<String> {
    fn send_event(&mut self, event: &str) {
        self.push(event.to_owned());
    }
}

impl<S: EventSender + ?Sized> EventSender for Rc<RefCell<S>> {
    fn send_event(&mut self, event: &str) {
        self.borrow_mut().send_event(event);
    }
}

type Task = Box<dyn FnOnce() -> String>;

/// Serialize-then-send work deferred to the host's next idle cycle.
///
/// Tasks run in FIFO order among themselves, but nothing orders them against
/// events sent directly through an `EventSender`.
#[derive(Default)]
pub struct IdleQueue {
    tasks: VecDeque<Task>,
}

impl IdleQueue {
    pub fn new() -> IdleQueue {
        IdleQueue::default()
    }

    pub fn push<F>(&mut self, task: F)
    where
        F: FnOnce() -> String + 'static,
    {
        self.tasks.push_back(Box::new(task));
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Runs every queued task and hands its event to `sender`. Returns the
    /// number of events sent.
    pub fn run(&mut self, sender: &mut dyn EventSender) -> usize {
        let mut sent = 0;
        while let Some(task) = self.tasks.pop_front() {
            let event = task();
            tracing::trace!(len = event.len(), "sending deferred event");
            sender.send_event(&event);
            sent += 1;
        }
        sent
    }
}

impl Debug for IdleQueue {
    fn fmt(&self, formatter: &mut Formatter) -> FormatResult {
        formatter
            .debug_struct("IdleQueue")
            .field("pending", &self.tasks.len())
            .finish()
    }
}
