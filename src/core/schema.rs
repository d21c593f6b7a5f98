//! Declaration of the fixed option schema.

use crate::core::typecheck::OptionType;
use crate::core::value::Value;
use crate::error::{OptionsError, Result};
use std::collections::HashSet;

/// One declared option: a name, its type, and its default.
#[derive(Debug, Clone)]
pub(crate) struct SchemaEntry {
    pub(crate) name: String,
    pub(crate) ty: OptionType,
    pub(crate) default: Value,
}

/// An ordered, pre-built table of option declarations.
///
/// The schema fixes the store's key set: no option can be added or removed
/// after a store is constructed from it. Declaration order is preserved and
/// drives the store's iteration and rendering order.
///
/// # Examples
///
/// ```rust
/// use optstore::prelude::*;
///
/// # fn main() -> optstore::error::Result<()> {
/// let schema = Schema::builder()
///     .option("verbose", OptionType::Bool, Value::Bool(false))
///     .option("retries", OptionType::Int, Value::Int(3))
///     .build()?;
/// assert_eq!(schema.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    entries: Vec<SchemaEntry>,
}

impl Schema {
    /// Create a new builder with no declarations.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Number of declared options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no options are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> Vec<SchemaEntry> {
        self.entries
    }
}

/// Fluent builder for a [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    entries: Vec<SchemaEntry>,
}

impl SchemaBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Declare an option with its type and default value.
    ///
    /// Options are kept in the order they are declared. The default is
    /// type-checked when a store is constructed, not here.
    pub fn option(
        mut self,
        name: impl Into<String>,
        ty: OptionType,
        default: impl Into<Value>,
    ) -> Self {
        self.entries.push(SchemaEntry {
            name: name.into(),
            ty,
            default: default.into(),
        });
        self
    }

    /// Finish the schema, rejecting duplicate names.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::Schema`] if the same name was declared twice.
    pub fn build(self) -> Result<Schema> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(OptionsError::Schema {
                    name: entry.name.clone(),
                    reason: "declared more than once".to_string(),
                });
            }
        }
        Ok(Schema {
            entries: self.entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_preserves_declaration_order() {
        let schema = Schema::builder()
            .option("b", OptionType::Int, 1)
            .option("a", OptionType::Int, 2)
            .build()
            .unwrap();
        let names: Vec<_> = schema
            .into_entries()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = Schema::builder()
            .option("x", OptionType::Int, 1)
            .option("x", OptionType::Bool, true)
            .build()
            .unwrap_err();
        assert!(matches!(err, OptionsError::Schema { name, .. } if name == "x"));
    }
}
