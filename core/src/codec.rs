//! Wire encoding for parameter values.
//!
//! # Design
//! The remote API takes every list-capable parameter as one flat string:
//! elements joined with `,`, inclusive ranges written as `from-to`. `Value`
//! and `ValueList` carry the typed form; their `Display` impls produce the
//! wire form, and `serialize_value` / `serialize_list` are thin aliases for
//! callers that want the named operations.
//!
//! Both types deserialize from JSON (`5`, `"nat"`, `{"from":1,"to":2}` or an
//! array of these) so whole queries can cross the FFI boundary as JSON.

use std::fmt;

use serde::Deserialize;

/// An inclusive range of integer values, rendered as `from-to`.
///
/// Bounds are always ordered: constructing or deserializing a range with
/// `to <= from` swaps them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RangeBounds")]
pub struct Range {
    from: i64,
    to: i64,
}

#[derive(Deserialize)]
struct RangeBounds {
    from: i64,
    to: i64,
}

impl From<RangeBounds> for Range {
    fn from(bounds: RangeBounds) -> Self {
        Range::new(bounds.from, bounds.to)
    }
}

impl Range {
    pub fn new(from: i64, to: i64) -> Self {
        if to <= from {
            Self { from: to, to: from }
        } else {
            Self { from, to }
        }
    }

    /// The smaller bound.
    pub fn lower(&self) -> i64 {
        self.from
    }

    /// The larger bound.
    pub fn upper(&self) -> i64 {
        self.to
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Build a [`Range`], swapping the bounds if `to <= from`.
pub fn range(from: i64, to: i64) -> Range {
    Range::new(from, to)
}

/// A single parameter value: a scalar or an inclusive range.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Range(Range),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Range(range) => fmt::Display::fmt(range, f),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<Range> for Value {
    fn from(range: Range) -> Self {
        Value::Range(range)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// An ordered list of values. Order is significant to the remote API.
///
/// A lone value converts into a one-element list, so every list-capable
/// parameter accepts either form.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "OneOrMany")]
pub struct ValueList(Vec<Value>);

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Value>),
    One(Value),
}

impl From<OneOrMany> for ValueList {
    fn from(raw: OneOrMany) -> Self {
        match raw {
            OneOrMany::Many(values) => ValueList(values),
            OneOrMany::One(value) => ValueList(vec![value]),
        }
    }
}

impl ValueList {
    pub fn new(values: Vec<Value>) -> Self {
        ValueList(values)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            fmt::Display::fmt(value, f)?;
        }
        Ok(())
    }
}

macro_rules! value_list_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ValueList {
                fn from(value: $ty) -> Self {
                    ValueList(vec![value.into()])
                }
            }
        )*
    };
}

value_list_from_scalar!(Value, Range, i64, i32, u32, f64, &str, String);

impl<T: Into<Value>> From<Vec<T>> for ValueList {
    fn from(values: Vec<T>) -> Self {
        ValueList(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for ValueList {
    fn from(values: [T; N]) -> Self {
        ValueList(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> FromIterator<T> for ValueList {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        ValueList(iter.into_iter().map(Into::into).collect())
    }
}

/// Render one value in wire form: `from-to` for a range, the plain string
/// form otherwise.
pub fn serialize_value(value: &Value) -> String {
    value.to_string()
}

/// Render a value or list of values in wire form, comma-joined in order.
pub fn serialize_list(values: impl Into<ValueList>) -> String {
    values.into().to_string()
}
