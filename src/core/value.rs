//! Runtime option values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An owned runtime value held by (or proposed to) an option store.
///
/// `Value` is a plain tree with no interior sharing, so `Clone` is a deep
/// copy: a cloned value has zero shared mutable substructure with its source.
/// Every read out of the store relies on this to guarantee copy-on-read
/// isolation.
///
/// Mappings and sets are kept as ordered entry lists rather than hash
/// containers so that floats remain admissible and rendering stays
/// deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Explicit "absent" sentinel, admitted only by optional types.
    None,
    /// Boolean scalar.
    Bool(bool),
    /// Integer scalar.
    Int(i64),
    /// Floating-point scalar.
    Float(f64),
    /// Text scalar.
    Text(String),
    /// Byte-string scalar.
    Bytes(Vec<u8>),
    /// Ordered sequence; duplicates allowed.
    Seq(Vec<Value>),
    /// Set; element order is as written, duplicates are a type error.
    Set(Vec<Value>),
    /// Key/value mapping, in insertion order.
    Map(Vec<(Value, Value)>),
    /// Fixed-arity tuple.
    Tuple(Vec<Value>),
}

impl Value {
    /// Short name of this value's runtime kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::Seq(_) => "seq",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
            Value::Tuple(_) => "tuple",
        }
    }

    /// Borrow as a boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow as an integer, if this is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrow as text, if this is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
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

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "none"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            // Debug form keeps the trailing ".0" so floats stay
            // distinguishable from integers.
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Text(s) => write!(f, "{s:?}"),
            Value::Bytes(b) => write!(f, "b\"{}\"", b.escape_ascii()),
            Value::Seq(items) => {
                write!(f, "[")?;
                write_list(f, items)?;
                write!(f, "]")
            }
            Value::Set(items) => {
                write!(f, "{{")?;
                write_list(f, items)?;
                write!(f, "}}")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Tuple(items) => {
                write!(f, "(")?;
                write_list(f, items)?;
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_is_a_deep_copy() {
        let original = Value::Seq(vec![Value::Int(1), Value::Int(2)]);
        let mut copy = original.clone();
        if let Value::Seq(items) = &mut copy {
            items.push(Value::Int(3));
        }
        assert_eq!(original, Value::Seq(vec![Value::Int(1), Value::Int(2)]));
    }

    #[test]
    fn display_renders_literals() {
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
        assert_eq!(Value::Text("hi".into()).to_string(), "\"hi\"");
        assert_eq!(Value::Bytes(vec![0x41, 0x00]).to_string(), "b\"A\\x00\"");
        assert_eq!(
            Value::Seq(vec![Value::Int(1), Value::Int(2)]).to_string(),
            "[1, 2]"
        );
        assert_eq!(
            Value::Map(vec![(Value::Text("a".into()), Value::Int(1))]).to_string(),
            "{\"a\": 1}"
        );
        assert_eq!(
            Value::Tuple(vec![Value::Bool(false), Value::None]).to_string(),
            "(false, none)"
        );
    }

    #[test]
    fn from_impls_cover_scalars() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(7i64), Value::Int(7));
        assert_eq!(Value::from(7i32), Value::Int(7));
        assert_eq!(Value::from(0.5), Value::Float(0.5));
        assert_eq!(Value::from("x"), Value::Text("x".into()));
        assert_eq!(Value::from(vec![1u8]), Value::Bytes(vec![1]));
    }

    #[test]
    fn accessors_match_kind() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(3).as_bool(), None);
        assert_eq!(Value::Int(3).as_int(), Some(3));
        assert_eq!(Value::Text("x".into()).as_str(), Some("x"));
    }
}
