//! Error types for optstore.

/// Result type alias for optstore operations.
pub type Result<T> = std::result::Result<T, OptionsError>;

/// Errors that can occur when constructing or mutating an option store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptionsError {
    /// A declared default (or supplied initial value) failed its own type
    /// check at construction. Construction does not complete.
    #[error("invalid default for option '{name}': {reason}")]
    Schema {
        /// The offending option name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// An operation referenced a name that was never declared.
    #[error("no such option: {name}")]
    UnknownOption {
        /// The undeclared name.
        name: String,
    },

    /// A proposed value does not match the option's declared type.
    #[error("option '{name}' expects {expected}, got {found}")]
    IncompatibleType {
        /// The option being written.
        name: String,
        /// Rendered form of the declared type.
        expected: String,
        /// Rendered form of what was found instead.
        found: String,
    },

    /// Semantic validation failure raised by a "changed" subscriber.
    ///
    /// This is the only error kind that triggers rollback inside
    /// [`update`](crate::core::OptionStore::update); it is swallowed at the
    /// transaction boundary and never reaches `update`'s caller.
    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    /// A subscriber failed for a non-semantic reason.
    ///
    /// Propagates out of `update` uncaught, with the store left in its
    /// already-mutated state. No rollback is performed for this kind.
    #[error("subscriber failed: {0}")]
    Subscriber(String),
}

/// A semantic (business-rule) validation failure.
///
/// Raised by "changed" subscribers to veto a transaction after the values
/// have been applied. Distinct from a type mismatch, which is caught before
/// any mutation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ConstraintError {
    message: String,
}

impl ConstraintError {
    /// Create a constraint error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The human-readable reason the constraint rejected the update.
    pub fn message(&self) -> &str {
        &self.message
    }
}
