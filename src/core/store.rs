//! The option store: fixed schema, current values, per-store notifier.

use crate::core::schema::Schema;
use crate::core::typecheck::{self, OptionType};
use crate::core::value::Value;
use crate::error::{ConstraintError, OptionsError, Result};
use crate::notify::ChangeNotifier;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use tracing::debug;

#[derive(Debug)]
struct Slot {
    ty: OptionType,
    default: Value,
    current: Value,
}

/// A typed key-value store with a fixed key set and transactional updates.
///
/// The store is built once from a [`Schema`] and lives for the lifetime of
/// its owner; only [`update`](Self::update) and [`reset`](Self::reset)
/// mutate current values, and only within a transaction. Every read returns
/// a deep copy, so callers can never corrupt stored state by mutating what
/// they were handed.
///
/// The store is single-threaded by contract: all operations run to
/// completion on the calling thread, and no internal locking is provided.
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
/// let mut opts = OptionStore::new(schema)?;
///
/// opts.update([("verbose", Value::Bool(true))])?;
/// assert!(opts.get_bool("verbose")?);
/// assert_eq!(opts.get_int("retries")?, 3);
/// assert!(opts.has_changed("verbose")?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct OptionStore {
    order: Vec<String>,
    slots: HashMap<String, Slot>,
    notifier: ChangeNotifier,
}

impl OptionStore {
    /// Construct a store with every option at its schema default.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::Schema`] if any default fails its own type
    /// check.
    pub fn new(schema: Schema) -> Result<Self> {
        Self::with_values(schema, std::iter::empty::<(String, Value)>())
    }

    /// Construct a store, overriding selected defaults with initial values.
    ///
    /// Initial values are validated exactly like defaults. No notification
    /// fires during construction.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::Schema`] if a default or initial value fails
    /// its type check, or [`OptionsError::UnknownOption`] if `initial`
    /// names an undeclared option.
    pub fn with_values<I, S>(schema: Schema, initial: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let mut initial: BTreeMap<String, Value> = initial
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();

        let mut order = Vec::new();
        let mut slots = HashMap::new();
        for entry in schema.into_entries() {
            typecheck::check(&entry.name, &entry.ty, &entry.default).map_err(|e| {
                OptionsError::Schema {
                    name: entry.name.clone(),
                    reason: e.to_string(),
                }
            })?;
            let current = match initial.remove(&entry.name) {
                Some(value) => {
                    typecheck::check(&entry.name, &entry.ty, &value).map_err(|e| {
                        OptionsError::Schema {
                            name: entry.name.clone(),
                            reason: e.to_string(),
                        }
                    })?;
                    value
                }
                None => entry.default.clone(),
            };
            order.push(entry.name.clone());
            slots.insert(
                entry.name,
                Slot {
                    ty: entry.ty,
                    default: entry.default,
                    current,
                },
            );
        }

        if let Some(name) = initial.into_keys().next() {
            return Err(OptionsError::UnknownOption { name });
        }

        debug!(options = order.len(), "option store constructed");
        Ok(Self {
            order,
            slots,
            notifier: ChangeNotifier::new(),
        })
    }

    /// Deep copy of the current value of `name`.
    ///
    /// The returned value shares no mutable substructure with the store:
    /// mutating it never affects a later `get`.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::UnknownOption`] for an undeclared name.
    pub fn get(&self, name: &str) -> Result<Value> {
        self.slot(name).map(|slot| slot.current.clone())
    }

    /// Current value of a boolean option.
    ///
    /// # Errors
    ///
    /// [`OptionsError::UnknownOption`] for an undeclared name, or
    /// [`OptionsError::IncompatibleType`] if the option is not a boolean.
    pub fn get_bool(&self, name: &str) -> Result<bool> {
        let slot = self.slot(name)?;
        slot.current
            .as_bool()
            .ok_or_else(|| wrong_kind(name, "bool", &slot.current))
    }

    /// Current value of an integer option.
    ///
    /// # Errors
    ///
    /// [`OptionsError::UnknownOption`] for an undeclared name, or
    /// [`OptionsError::IncompatibleType`] if the option is not an integer.
    pub fn get_int(&self, name: &str) -> Result<i64> {
        let slot = self.slot(name)?;
        slot.current
            .as_int()
            .ok_or_else(|| wrong_kind(name, "int", &slot.current))
    }

    /// Current value of a text option, as an owned string.
    ///
    /// # Errors
    ///
    /// [`OptionsError::UnknownOption`] for an undeclared name, or
    /// [`OptionsError::IncompatibleType`] if the option is not text.
    pub fn get_str(&self, name: &str) -> Result<String> {
        let slot = self.slot(name)?;
        slot.current
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| wrong_kind(name, "str", &slot.current))
    }

    /// Deep copy of the schema default for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::UnknownOption`] for an undeclared name.
    pub fn default(&self, name: &str) -> Result<Value> {
        self.slot(name).map(|slot| slot.default.clone())
    }

    /// The declared type of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::UnknownOption`] for an undeclared name.
    pub fn option_type(&self, name: &str) -> Result<&OptionType> {
        self.slot(name).map(|slot| &slot.ty)
    }

    /// All declared option names, as a read-only snapshot.
    pub fn keys(&self) -> BTreeSet<String> {
        self.order.iter().cloned().collect()
    }

    /// Whether `name` is declared in this store.
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// True iff the current value of `name` differs from its default.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::UnknownOption`] for an undeclared name.
    pub fn has_changed(&self, name: &str) -> Result<bool> {
        self.slot(name).map(|slot| slot.current != slot.default)
    }

    /// Register a subscriber for "changed" events.
    ///
    /// Fires after every applied transaction with the store and the set of
    /// updated names. Delivery is synchronous and in registration order.
    /// Returning [`OptionsError::Constraint`] vetoes the transaction and
    /// triggers rollback; any other error propagates to `update`'s caller
    /// with the store left mutated.
    pub fn on_changed<F>(&mut self, callback: F)
    where
        F: Fn(&OptionStore, &BTreeSet<String>) -> Result<()> + 'static,
    {
        self.notifier.on_changed(callback);
    }

    /// Register a subscriber for "errored" events.
    ///
    /// Fires when a constraint rejects a transaction, carrying the store
    /// and the triggering error, before the rollback is re-announced.
    pub fn on_errored<F>(&mut self, callback: F)
    where
        F: Fn(&OptionStore, &ConstraintError) -> Result<()> + 'static,
    {
        self.notifier.on_errored(callback);
    }

    /// Number of registered "changed" subscribers.
    pub fn changed_subscribers(&self) -> usize {
        self.notifier.changed_len()
    }

    /// Number of registered "errored" subscribers.
    pub fn errored_subscribers(&self) -> usize {
        self.notifier.errored_len()
    }

    fn slot(&self, name: &str) -> Result<&Slot> {
        self.slots.get(name).ok_or_else(|| OptionsError::UnknownOption {
            name: name.to_string(),
        })
    }

    pub(crate) fn check_value(&self, name: &str, value: &Value) -> Result<()> {
        typecheck::check(name, &self.slot(name)?.ty, value)
    }

    pub(crate) fn defaults_in_order(&self) -> Vec<(String, Value)> {
        self.order
            .iter()
            .filter_map(|name| {
                self.slots
                    .get(name)
                    .map(|slot| (name.clone(), slot.default.clone()))
            })
            .collect()
    }

    /// Full copy of the current-value map, taken at transaction start.
    pub(crate) fn snapshot(&self) -> HashMap<String, Value> {
        self.slots
            .iter()
            .map(|(name, slot)| (name.clone(), slot.current.clone()))
            .collect()
    }

    pub(crate) fn restore(&mut self, snapshot: HashMap<String, Value>) {
        for (name, value) in snapshot {
            if let Some(slot) = self.slots.get_mut(&name) {
                slot.current = value;
            }
        }
    }

    /// Write values directly, without validation or notification.
    ///
    /// Only the transaction path calls this, after the whole proposal has
    /// been validated.
    pub(crate) fn apply_all(&mut self, values: &BTreeMap<String, Value>) {
        for (name, value) in values {
            if let Some(slot) = self.slots.get_mut(name) {
                slot.current = value.clone();
            }
        }
    }

    pub(crate) fn notify_changed(&self, updated: &BTreeSet<String>) -> Result<()> {
        self.notifier.send_changed(self, updated)
    }

    pub(crate) fn notify_errored(&self, error: &ConstraintError) -> Result<()> {
        self.notifier.send_errored(self, error)
    }
}

fn wrong_kind(name: &str, expected: &str, found: &Value) -> OptionsError {
    OptionsError::IncompatibleType {
        name: name.to_string(),
        expected: expected.to_string(),
        found: found.kind().to_string(),
    }
}

/// Compares current-value maps only; subscribers and defaults are ignored.
impl PartialEq for OptionStore {
    fn eq(&self, other: &Self) -> bool {
        self.slots.len() == other.slots.len()
            && self.slots.iter().all(|(name, slot)| {
                other
                    .slots
                    .get(name)
                    .is_some_and(|theirs| theirs.current == slot.current)
            })
    }
}

/// Deterministic, declaration-ordered dump of current values.
impl fmt::Display for OptionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.order.is_empty() {
            return write!(f, "OptionStore {{}}");
        }
        writeln!(f, "OptionStore {{")?;
        for name in &self.order {
            if let Some(slot) = self.slots.get(name) {
                writeln!(f, "    {name} = {}", slot.current)?;
            }
        }
        write!(f, "}}")
    }
}
