// turtleart/share/src/lib.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Wire protocol used to mirror turtle drawing between collaborating
//! sessions: one `<tag>|[nick, value]` line per state change.

pub mod error;
pub mod event;
pub mod queue;
pub mod wire;

pub use crate::error::{Result, ShareError};
pub use crate::event::{Event, PixbufData, PolyPoint, Tag, TextData};
pub use crate::queue::{EventSender, IdleQueue};
pub use crate::wire::{decode, encode, round_int};

#[test]
fn wire_event_decoder() {
    assert!(decode(r#"r|["bob", 90]"#).is_ok());
    assert!(decode(r#"c|["bob", 30]"#).is_ok());
    assert!(decode(r#"g|["bob", 50.5]"#).is_ok());
    assert!(decode(r#"s|["bob", 100]"#).is_ok());
    assert!(decode(r#"w|["bob", 7]"#).is_ok());
    assert!(decode(r#"p|["bob", true]"#).is_ok());
    assert!(decode(r#"f|["bob", 100]"#).is_ok());
    assert!(decode(r#"x|["bob", [10, -20]]"#).is_ok());
    assert!(decode(r#"a|["bob", [90, 50]]"#).is_ok());
    assert!(decode(r#"F|["bob", [["move", 0, 0], ["line", 0, 50]]]"#).is_ok());
    assert!(decode(r#"W|["bob", ["hello", 0, 0, 12, 100]]"#).is_ok());
    assert!(decode(r#"P|["bob", [0, 0, 0, 0, 1, 1, 1, 1, "AAAA"]]"#).is_ok());

    assert!(decode("bleh").is_err());
    assert!(decode(r#"z|["bob", 90]"#).is_err());
    assert!(decode(r#"r|["bob", "ninety"]"#).is_err());
    assert!(decode(r#"r|[90, "bob"]"#).is_err());
    assert!(decode(r#"x|["bob", [10]]"#).is_err());
}

#[test]
fn wire_event_encoder() {
    assert_eq!(encode("bob", &Event::Heading(90.0)), r#"r|["bob",90]"#);
    assert_eq!(encode("bob", &Event::PenState(false)), r#"p|["bob",false]"#);
    assert_eq!(encode("bob", &Event::SetXy(10.0, -20.5)), r#"x|["bob",[10,-20.5]]"#);
    assert_eq!(encode("bob", &Event::Arc(-90.0, 50.0)), r#"a|["bob",[-90,50]]"#);

    let (nick, event) = decode(&encode("bob", &Event::Gray(33.0))).unwrap();
    assert_eq!(nick, "bob");
    assert_eq!(event.tag(), Tag::Gray);
}
