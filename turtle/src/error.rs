// turtleart/turtle/src/error.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors for the turtle core.
//!
//! Bad program input never leaves a drawing primitive as an error: it is
//! logged and recorded in the window's diagnostics instead. The variants
//! that do reach callers come from shape generation, registry lookups and
//! decoding peer events.

use thiserror::Error;
use turtleart_share::ShareError;

use crate::value::Value;

pub type Result<T> = std::result::Result<T, TurtleError>;

#[derive(Debug, Error)]
pub enum TurtleError {
    #[error("expected {expected}, found {found}")]
    BadValue { expected: &'static str, found: String },

    #[error("unknown color name {0:?}")]
    UnknownColor(String),

    #[error("invalid turtle color {0:?}, expected #rrggbb")]
    BadTurtleColor(String),

    #[error("no turtle named {0:?}")]
    NoSuchTurtle(String),

    #[error("failed to build turtle shape")]
    Shape(#[from] usvg::Error),

    #[error(transparent)]
    Share(#[from] ShareError),
}

impl TurtleError {
    pub(crate) fn bad_value(expected: &'static str, found: &Value) -> Self {
        TurtleError::BadValue {
            expected,
            found: found.to_string(),
        }
    }
}
