// turtleart/share/src/error.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors raised while decoding events received from peers.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShareError>;

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("event has no '|' between tag and payload")]
    MissingSeparator,

    #[error("unknown event tag {0:?}")]
    UnknownTag(String),

    #[error("event payload is not valid JSON")]
    Json(#[from] serde_json::Error),

    #[error("malformed payload for '{tag}' event: {reason}")]
    Payload { tag: char, reason: &'static str },

    #[error("image data is not valid base64")]
    Image(#[from] base64::DecodeError),
}

impl ShareError {
    pub(crate) fn payload(tag: char, reason: &'static str) -> Self {
        ShareError::Payload { tag, reason }
    }
}
