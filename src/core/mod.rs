//! Core store types: values, types, schema, and the transactional store.

mod schema;
mod store;
mod transaction;
mod typecheck;
mod value;

pub use schema::{Schema, SchemaBuilder};
pub use store::OptionStore;
pub use transaction::{Setter, Toggler};
pub use typecheck::OptionType;
pub use value::Value;
