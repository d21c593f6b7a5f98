//! # optstore
//!
//! Typed option store with transactional batched updates, change
//! notification, and semantic rollback.
//!
//! ## Overview
//!
//! `optstore` lets a host application expose a fixed set of named, typed
//! settings that can be updated atomically:
//! - A batch of proposed values either applies in full or not at all
//! - Values are validated against declared types before anything is written
//! - Subscribers observe every applied transaction, synchronously and in
//!   registration order
//! - A subscriber can veto a transaction with a constraint error, rolling
//!   the store back to its pre-call state
//! - Every read returns a deep copy, so callers can never corrupt stored
//!   state through a value they were handed
//!
//! ## Quick Start
//!
//! ```rust
//! use optstore::prelude::*;
//!
//! # fn main() -> optstore::error::Result<()> {
//! let schema = Schema::builder()
//!     .option("verbose", OptionType::Bool, Value::Bool(false))
//!     .option("retries", OptionType::Int, Value::Int(3))
//!     .build()?;
//!
//! let mut opts = OptionStore::new(schema)?;
//!
//! opts.on_changed(|store, updated| {
//!     println!("changed: {updated:?}, now {store}");
//!     Ok(())
//! });
//!
//! opts.update([("verbose", Value::Bool(true))])?;
//! assert!(opts.get_bool("verbose")?);
//! assert_eq!(opts.get_int("retries")?, 3);
//! assert!(opts.has_changed("verbose")?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Transactions
//!
//! [`OptionStore::update`](core::OptionStore::update) is fail-fast and
//! two-phase: the whole proposal is validated before any value is written,
//! so an unknown name or a type mismatch anywhere in the batch leaves every
//! current value untouched. After application, "changed" subscribers run;
//! one of them returning a [`ConstraintError`](error::ConstraintError)
//! restores the pre-call state, fires "errored", re-announces the rollback
//! with a second "changed", and is swallowed. Any other subscriber error
//! propagates with the store left mutated; rollback is intentionally
//! limited to constraint errors.
//!
//! The store is single-threaded and synchronous throughout. Callers that
//! need concurrent access must serialize transactions externally.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod notify;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{OptionStore, OptionType, Schema, SchemaBuilder, Setter, Toggler, Value};
    pub use crate::error::{ConstraintError, OptionsError, Result};
}
