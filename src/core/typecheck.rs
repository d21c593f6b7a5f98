//! Recursive validation of runtime values against declared option types.

use crate::core::value::Value;
use crate::error::{OptionsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural description of the value shape an option accepts.
///
/// Checked recursively by [`check`]; composite descriptors nest arbitrarily.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OptionType {
    /// Boolean scalar.
    Bool,
    /// Integer scalar.
    Int,
    /// Floating-point scalar.
    Float,
    /// Text scalar.
    Text,
    /// Byte-string scalar.
    Bytes,
    /// Either [`Value::None`] or a valid inner value.
    Optional(Box<OptionType>),
    /// Ordered sequence of the inner type; duplicates allowed.
    Seq(Box<OptionType>),
    /// Set of the inner type; duplicate elements are rejected.
    Set(Box<OptionType>),
    /// Mapping with typed keys and values.
    Map(Box<OptionType>, Box<OptionType>),
    /// Fixed tuple; arity and per-position types must match exactly.
    Tuple(Vec<OptionType>),
    /// Closed enumeration: the value must equal one of the listed literals.
    Choice(Vec<Value>),
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Bool => write!(f, "bool"),
            OptionType::Int => write!(f, "int"),
            OptionType::Float => write!(f, "float"),
            OptionType::Text => write!(f, "str"),
            OptionType::Bytes => write!(f, "bytes"),
            OptionType::Optional(inner) => write!(f, "optional {inner}"),
            OptionType::Seq(inner) => write!(f, "sequence of {inner}"),
            OptionType::Set(inner) => write!(f, "set of {inner}"),
            OptionType::Map(k, v) => write!(f, "map of {k} to {v}"),
            OptionType::Tuple(parts) => {
                write!(f, "tuple of (")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{part}")?;
                }
                write!(f, ")")
            }
            OptionType::Choice(literals) => {
                write!(f, "one of [")?;
                for (i, literal) in literals.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{literal}")?;
                }
                write!(f, "]")
            }
        }
    }
}

fn mismatch(name: &str, expected: &OptionType, found: impl fmt::Display) -> OptionsError {
    OptionsError::IncompatibleType {
        name: name.to_string(),
        expected: expected.to_string(),
        found: found.to_string(),
    }
}

/// Validate `value` against `expected`, failing on the first mismatch found.
///
/// `name` is the option being checked and only feeds error messages.
pub(crate) fn check(name: &str, expected: &OptionType, value: &Value) -> Result<()> {
    match (expected, value) {
        (OptionType::Bool, Value::Bool(_)) => Ok(()),
        (OptionType::Int, Value::Int(_)) => Ok(()),
        (OptionType::Float, Value::Float(_)) => Ok(()),
        (OptionType::Text, Value::Text(_)) => Ok(()),
        (OptionType::Bytes, Value::Bytes(_)) => Ok(()),
        (OptionType::Optional(_), Value::None) => Ok(()),
        (OptionType::Optional(inner), v) => check(name, inner, v),
        (OptionType::Seq(inner), Value::Seq(items)) => {
            for item in items {
                check(name, inner, item)?;
            }
            Ok(())
        }
        (OptionType::Set(inner), Value::Set(items)) => {
            for (i, item) in items.iter().enumerate() {
                check(name, inner, item)?;
                if items[..i].contains(item) {
                    return Err(mismatch(
                        name,
                        expected,
                        format!("duplicate element {item}"),
                    ));
                }
            }
            Ok(())
        }
        (OptionType::Map(key_ty, val_ty), Value::Map(entries)) => {
            for (k, v) in entries {
                check(name, key_ty, k)?;
                check(name, val_ty, v)?;
            }
            Ok(())
        }
        (OptionType::Tuple(parts), Value::Tuple(items)) => {
            if parts.len() != items.len() {
                return Err(mismatch(
                    name,
                    expected,
                    format!("tuple of arity {}", items.len()),
                ));
            }
            for (part, item) in parts.iter().zip(items) {
                check(name, part, item)?;
            }
            Ok(())
        }
        (OptionType::Choice(literals), v) => {
            if literals.contains(v) {
                Ok(())
            } else {
                Err(mismatch(name, expected, v))
            }
        }
        (_, v) => Err(mismatch(name, expected, v.kind())),
    }
}
