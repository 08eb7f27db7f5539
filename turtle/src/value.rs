// turtleart/turtle/src/value.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Arguments as they arrive from a running program.
//!
//! Block programs are dynamically typed, so a primitive may receive text
//! where it wanted a number. Conversion happens once, at the top of each
//! turtle primitive.

use std::fmt::{Display, Formatter, Result as FormatResult};

use crate::error::{Result, TurtleError};

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Bool(bool),
    List(Vec<Value>),
}

impl Value {
    /// A finite number, or a `BadValue` error.
    pub fn to_number(&self) -> Result<f64> {
        match *self {
            Value::Number(n) if n.is_finite() => Ok(n),
            _ => Err(TurtleError::bad_value("a number", self)),
        }
    }

    /// Two finite numbers, as used for positions.
    pub fn to_pair(&self) -> Result<(f64, f64)> {
        match self {
            Value::List(items) if items.len() == 2 => {
                Ok((items[0].to_number()?, items[1].to_number()?))
            }
            _ => Err(TurtleError::bad_value("an (x, y) pair", self)),
        }
    }
}

impl Display for Value {
    fn fmt(&self, formatter: &mut Formatter) -> FormatResult {
        match self {
            Value::Number(n) => write!(formatter, "{}", n),
            Value::Text(text) => write!(formatter, "{:?}", text),
            Value::Bool(b) => write!(formatter, "{}", b),
            Value::List(items) => {
                formatter.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{}", item)?;
                }
                formatter.write_str("]")
            }
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Value {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Value {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Value {
        Value::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Value {
        Value::Text(text)
    }
}

impl From<(f64, f64)> for Value {
    fn from(pos: (f64, f64)) -> Value {
        Value::List(vec![Value::Number(pos.0), Value::Number(pos.1)])
    }
}

/// A color block: a base palette index (if any) plus the shade and gray it
/// implies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NamedColor {
    pub name: &'static str,
    pub color: Option<f64>,
    pub shade: f64,
    pub gray: f64,
}

// White and black have no hue of their own and keep the current color.
static COLOR_NAMES: &[NamedColor] = &[
    NamedColor { name: "white", color: None, shade: 100.0, gray: 0.0 },
    NamedColor { name: "black", color: None, shade: 0.0, gray: 0.0 },
    NamedColor { name: "red", color: Some(0.0), shade: 50.0, gray: 100.0 },
    NamedColor { name: "orange", color: Some(10.0), shade: 50.0, gray: 100.0 },
    NamedColor { name: "yellow", color: Some(20.0), shade: 50.0, gray: 100.0 },
    NamedColor { name: "green", color: Some(40.0), shade: 50.0, gray: 100.0 },
    NamedColor { name: "cyan", color: Some(50.0), shade: 50.0, gray: 100.0 },
    NamedColor { name: "blue", color: Some(70.0), shade: 50.0, gray: 100.0 },
    NamedColor { name: "purple", color: Some(90.0), shade: 50.0, gray: 100.0 },
];

pub fn named_color(name: &str) -> Option<&'static NamedColor> {
    COLOR_NAMES.iter().find(|color| color.name == name)
}

/// Argument of `set_color`.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorArg {
    Named(String),
    Palette(f64),
    /// Whatever the program passed; resolved to one of the other two.
    Raw(Value),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum ResolvedColor {
    Named(&'static NamedColor),
    Palette(f64),
}

impl ColorArg {
    pub(crate) fn resolve(&self) -> Result<ResolvedColor> {
        match self {
            ColorArg::Named(name) => named_color(name)
                .map(ResolvedColor::Named)
                .ok_or_else(|| TurtleError::UnknownColor(name.clone())),
            ColorArg::Palette(n) if n.is_finite() => Ok(ResolvedColor::Palette(*n)),
            ColorArg::Palette(n) => Err(TurtleError::bad_value("a color", &Value::Number(*n))),
            ColorArg::Raw(Value::Text(name)) => ColorArg::Named(name.clone()).resolve(),
            ColorArg::Raw(value) => value.to_number().map(ResolvedColor::Palette),
        }
    }
}

impl From<f64> for ColorArg {
    fn from(n: f64) -> ColorArg {
        ColorArg::Palette(n)
    }
}

impl From<i32> for ColorArg {
    fn from(n: i32) -> ColorArg {
        ColorArg::Palette(f64::from(n))
    }
}

impl From<&str> for ColorArg {
    fn from(name: &str) -> ColorArg {
        ColorArg::Named(name.to_owned())
    }
}

impl From<Value> for ColorArg {
    fn from(value: Value) -> ColorArg {
        ColorArg::Raw(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_must_be_finite() {
        assert_eq!(Value::from(12).to_number().unwrap(), 12.0);
        assert!(Value::from(f64::NAN).to_number().is_err());
        assert!(Value::from("forty").to_number().is_err());
        assert!(Value::from(true).to_number().is_err());
    }

    #[test]
    fn pairs_need_two_numbers() {
        assert_eq!(Value::from((3.0, -4.0)).to_pair().unwrap(), (3.0, -4.0));
        assert!(Value::List(vec![Value::from(1)]).to_pair().is_err());
        assert!(Value::List(vec![Value::from(1), Value::from("y")])
            .to_pair()
            .is_err());
    }

    #[test]
    fn raw_colors_resolve_by_kind() {
        assert_eq!(
            ColorArg::Raw(Value::from(35)).resolve().unwrap(),
            ResolvedColor::Palette(35.0)
        );
        match ColorArg::Raw(Value::from("blue")).resolve().unwrap() {
            ResolvedColor::Named(color) => assert_eq!(color.color, Some(70.0)),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            ColorArg::from("mauve").resolve(),
            Err(TurtleError::UnknownColor(_))
        ));
        assert!(ColorArg::Raw(Value::Bool(false)).resolve().is_err());
    }
}
