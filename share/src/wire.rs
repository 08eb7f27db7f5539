// turtleart/share/src/wire.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `<tag>|<payload>` wire format.
//!
//! The payload is a JSON array `[nick, value]`. Scalar values go through
//! [`round_int`], so whole numbers travel as integers and everything else
//! keeps two decimal places. Fill points are sent unrounded.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Number, Value};

use crate::error::{Result, ShareError};
use crate::event::{Event, PixbufData, PolyPoint, Tag, TextData};

/// Drops the fractional part of whole numbers and rounds the rest to two
/// decimal places, away from zero.
pub fn round_int(n: f64) -> Value {
    if !n.is_finite() {
        return Value::Null;
    }
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        return Value::from(n as i64);
    }
    let nn = if n < 0.0 {
        ((n - 0.005) * 100.0).trunc() / 100.0
    } else {
        ((n + 0.005) * 100.0).trunc() / 100.0
    };
    if nn.fract() == 0.0 {
        Value::from(nn as i64)
    } else {
        float(nn)
    }
}

fn float(n: f64) -> Value {
    Number::from_f64(n).map_or(Value::Null, Value::Number)
}

pub fn encode(nick: &str, event: &Event) -> String {
    let value = match event {
        Event::Heading(v)
        | Event::Color(v)
        | Event::Gray(v)
        | Event::Shade(v)
        | Event::PenSize(v) => round_int(*v),
        Event::PenState(down) => Value::Bool(*down),
        // Peers replay the distance as an integer step.
        Event::Forward(distance) => Value::from(distance.trunc() as i64),
        Event::SetXy(x, y) => json!([round_int(*x), round_int(*y)]),
        Event::Arc(angle, radius) => json!([round_int(*angle), round_int(*radius)]),
        Event::Fill(points) => Value::Array(points.iter().map(point_to_json).collect()),
        Event::Pixbuf(pixbuf) => json!([
            round_int(pixbuf.a),
            round_int(pixbuf.b),
            round_int(pixbuf.x),
            round_int(pixbuf.y),
            round_int(pixbuf.w),
            round_int(pixbuf.h),
            pixbuf.width,
            pixbuf.height,
            STANDARD.encode(&pixbuf.data),
        ]),
        Event::Text(text) => json!([
            text.label,
            round_int(text.x),
            round_int(text.y),
            round_int(text.size),
            round_int(text.w),
        ]),
    };
    format!("{}|{}", event.tag().as_char(), json!([nick, value]))
}

fn point_to_json(point: &PolyPoint) -> Value {
    match *point {
        PolyPoint::Move(x, y) | PolyPoint::Line(x, y) => {
            json!([point.op_name(), float(x), float(y)])
        }
        PolyPoint::RArc {
            cx,
            cy,
            r,
            start,
            end,
        }
        | PolyPoint::LArc {
            cx,
            cy,
            r,
            start,
            end,
        } => json!([
            point.op_name(),
            float(cx),
            float(cy),
            float(r),
            float(start),
            float(end),
        ]),
    }
}

/// Parses a wire line into the sender's nick and the event it carries.
pub fn decode(line: &str) -> Result<(String, Event)> {
    let (tag, payload) = line.split_once('|').ok_or(ShareError::MissingSeparator)?;
    let mut chars = tag.chars();
    let tag = match (chars.next(), chars.next()) {
        (Some(c), None) => Tag::from_char(c),
        _ => None,
    }
    .ok_or_else(|| ShareError::UnknownTag(tag.to_owned()))?;
    let c = tag.as_char();

    let payload: Value = serde_json::from_str(payload)?;
    let (nick, value) = match payload.as_array().map(Vec::as_slice) {
        Some([Value::String(nick), value]) => (nick.clone(), value),
        _ => return Err(ShareError::payload(c, "expected [nick, value]")),
    };

    let event = match tag {
        Tag::Heading => Event::Heading(number(c, value)?),
        Tag::Color => Event::Color(number(c, value)?),
        Tag::Gray => Event::Gray(number(c, value)?),
        Tag::Shade => Event::Shade(number(c, value)?),
        Tag::PenSize => Event::PenSize(number(c, value)?),
        Tag::PenState => {
            let down = value
                .as_bool()
                .or_else(|| value.as_f64().map(|n| n != 0.0))
                .ok_or_else(|| ShareError::payload(c, "expected a boolean"))?;
            Event::PenState(down)
        }
        Tag::Forward => Event::Forward(number(c, value)?),
        Tag::SetXy => {
            let [x, y] = numbers::<2>(c, value)?;
            Event::SetXy(x, y)
        }
        Tag::Arc => {
            let [angle, radius] = numbers::<2>(c, value)?;
            Event::Arc(angle, radius)
        }
        Tag::Fill => {
            let points = value
                .as_array()
                .ok_or_else(|| ShareError::payload(c, "expected a list of points"))?
                .iter()
                .map(|point| point_from_json(c, point))
                .collect::<Result<Vec<_>>>()?;
            Event::Fill(points)
        }
        Tag::Pixbuf => Event::Pixbuf(pixbuf_from_json(c, value)?),
        Tag::Text => Event::Text(text_from_json(c, value)?),
    };
    Ok((nick, event))
}

fn number(tag: char, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| ShareError::payload(tag, "expected a number"))
}

fn numbers<const N: usize>(tag: char, value: &Value) -> Result<[f64; N]> {
    let items = list(tag, value, N)?;
    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = number(tag, item)?;
    }
    Ok(out)
}

fn list(tag: char, value: &Value, len: usize) -> Result<&[Value]> {
    value
        .as_array()
        .filter(|items| items.len() == len)
        .map(Vec::as_slice)
        .ok_or_else(|| ShareError::payload(tag, "wrong number of values"))
}

fn point_from_json(tag: char, value: &Value) -> Result<PolyPoint> {
    let items = value
        .as_array()
        .ok_or_else(|| ShareError::payload(tag, "point is not a list"))?;
    let (op, rest) = match items.split_first() {
        Some((Value::String(op), rest)) => (op.as_str(), rest),
        _ => return Err(ShareError::payload(tag, "point has no op name")),
    };
    let args = rest
        .iter()
        .map(|item| number(tag, item))
        .collect::<Result<Vec<_>>>()?;
    let point = match (op, args.as_slice()) {
        ("move", &[x, y]) => PolyPoint::Move(x, y),
        ("line", &[x, y]) => PolyPoint::Line(x, y),
        ("rarc", &[cx, cy, r, start, end]) => PolyPoint::RArc {
            cx,
            cy,
            r,
            start,
            end,
        },
        ("larc", &[cx, cy, r, start, end]) => PolyPoint::LArc {
            cx,
            cy,
            r,
            start,
            end,
        },
        _ => return Err(ShareError::payload(tag, "unknown point op")),
    };
    Ok(point)
}

fn dimension(tag: char, value: &Value) -> Result<u32> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| ShareError::payload(tag, "image size is not a u32"))
}

fn pixbuf_from_json(tag: char, value: &Value) -> Result<PixbufData> {
    let items = list(tag, value, 9)?;
    let data = items[8]
        .as_str()
        .ok_or_else(|| ShareError::payload(tag, "image data is not a string"))?;
    Ok(PixbufData {
        a: number(tag, &items[0])?,
        b: number(tag, &items[1])?,
        x: number(tag, &items[2])?,
        y: number(tag, &items[3])?,
        w: number(tag, &items[4])?,
        h: number(tag, &items[5])?,
        width: dimension(tag, &items[6])?,
        height: dimension(tag, &items[7])?,
        data: STANDARD.decode(data)?,
    })
}

fn text_from_json(tag: char, value: &Value) -> Result<TextData> {
    let items = list(tag, value, 5)?;
    let label = match &items[0] {
        Value::String(label) => label.clone(),
        other => other.to_string(),
    };
    Ok(TextData {
        label,
        x: number(tag, &items[1])?,
        y: number(tag, &items[2])?,
        size: number(tag, &items[3])?,
        w: number(tag, &items[4])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_int_keeps_whole_numbers_integral() {
        assert_eq!(round_int(7.0), json!(7));
        assert_eq!(round_int(-90.0), json!(-90));
        assert_eq!(round_int(12.341), json!(12.34));
        assert_eq!(round_int(-12.341), json!(-12.34));
        assert_eq!(round_int(2.999), json!(3));
        assert_eq!(round_int(f64::NAN), Value::Null);
    }

    #[test]
    fn pen_size_event_has_tag_and_nick() {
        assert_eq!(encode("alice", &Event::PenSize(7.0)), r#"w|["alice",7]"#);
    }

    #[test]
    fn forward_distance_is_truncated() {
        assert_eq!(encode("bob", &Event::Forward(99.9)), r#"f|["bob",99]"#);
        assert_eq!(encode("bob", &Event::Forward(-12.7)), r#"f|["bob",-12]"#);
    }

    #[test]
    fn pen_state_accepts_numbers() {
        let (_, event) = decode(r#"p|["bob", 0]"#).unwrap();
        assert_eq!(event, Event::PenState(false));
        let (_, event) = decode(r#"p|["bob", true]"#).unwrap();
        assert_eq!(event, Event::PenState(true));
    }

    #[test]
    fn fill_points_survive_the_wire() {
        let points = vec![
            PolyPoint::Move(0.0, 10.5),
            PolyPoint::Line(20.25, 10.5),
            PolyPoint::RArc {
                cx: 5.0,
                cy: -5.0,
                r: 30.0,
                start: -1.5,
                end: 0.25,
            },
        ];
        let line = encode("carol", &Event::Fill(points.clone()));
        assert!(line.starts_with("F|"));
        let (nick, event) = decode(&line).unwrap();
        assert_eq!(nick, "carol");
        assert_eq!(event, Event::Fill(points));
    }

    #[test]
    fn pixbuf_data_travels_as_base64() {
        let pixbuf = PixbufData {
            a: 0.0,
            b: 0.0,
            x: -20.0,
            y: 15.0,
            w: 40.0,
            h: 30.0,
            width: 2,
            height: 1,
            data: vec![0x89, b'P', b'N', b'G'],
        };
        let line = encode("dave", &Event::Pixbuf(pixbuf.clone()));
        assert!(line.contains(&STANDARD.encode([0x89, b'P', b'N', b'G'])));
        let (_, event) = decode(&line).unwrap();
        assert_eq!(event, Event::Pixbuf(pixbuf));
    }

    #[test]
    fn text_label_may_be_a_number() {
        let (_, event) = decode(r#"W|["eve", [42, 1, 2, 12, 100]]"#).unwrap();
        match event {
            Event::Text(text) => assert_eq!(text.label, "42"),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn bad_lines_are_rejected() {
        assert!(matches!(decode("r"), Err(ShareError::MissingSeparator)));
        assert!(matches!(decode("q|[\"a\", 1]"), Err(ShareError::UnknownTag(_))));
        assert!(matches!(decode("rr|[\"a\", 1]"), Err(ShareError::UnknownTag(_))));
        assert!(matches!(decode("r|not json"), Err(ShareError::Json(_))));
        assert!(matches!(decode("r|[\"a\"]"), Err(ShareError::Payload { tag: 'r', .. })));
        assert!(matches!(decode("x|[\"a\", [1]]"), Err(ShareError::Payload { tag: 'x', .. })));
        assert!(matches!(
            decode("F|[\"a\", [[\"curve\", 1, 2]]]"),
            Err(ShareError::Payload { tag: 'F', .. })
        ));
        assert!(matches!(
            decode("P|[\"a\", [0,0,0,0,1,1,1,1,\"***\"]]"),
            Err(ShareError::Image(_))
        ));
    }
}
