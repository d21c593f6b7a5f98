//! The transactional write surface: `update`, `reset`, setters and togglers.

use crate::core::store::OptionStore;
use crate::core::typecheck::OptionType;
use crate::core::value::Value;
use crate::error::{OptionsError, Result};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

impl OptionStore {
    /// Apply a batch of proposed values atomically.
    ///
    /// The whole proposal is validated before anything is written: an
    /// undeclared name or a type mismatch anywhere in the batch fails the
    /// call with no value applied, even for the valid keys. Once applied,
    /// one "changed" event fires with the set of updated names.
    ///
    /// If a "changed" subscriber returns [`OptionsError::Constraint`], the
    /// store is restored to its pre-call state, one "errored" event fires
    /// with the constraint, a second "changed" event announces the
    /// rollback, and `update` returns `Ok` — the caller never sees the
    /// constraint. Any other subscriber error propagates out of `update`
    /// with the store left in its mutated state; rollback is deliberately
    /// not performed for those.
    ///
    /// # Errors
    ///
    /// [`OptionsError::UnknownOption`] or [`OptionsError::IncompatibleType`]
    /// before mutation, or any non-constraint subscriber error afterwards.
    pub fn update<I, S>(&mut self, proposed: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let proposed: BTreeMap<String, Value> = proposed
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();

        // Phase one: exhaustive validation, nothing written yet.
        for (name, value) in &proposed {
            if !self.contains(name) {
                return Err(OptionsError::UnknownOption { name: name.clone() });
            }
            self.check_value(name, value)?;
        }

        // Phase two: snapshot, apply, notify.
        let snapshot = self.snapshot();
        self.apply_all(&proposed);
        let updated: BTreeSet<String> = proposed.into_keys().collect();

        match self.notify_changed(&updated) {
            Ok(()) => {
                debug!(updated = updated.len(), "options updated");
                Ok(())
            }
            Err(OptionsError::Constraint(error)) => {
                warn!(%error, "update rejected by constraint, rolling back");
                self.restore(snapshot);
                self.notify_errored(&error)?;
                self.notify_changed(&updated)?;
                Ok(())
            }
            Err(other) => Err(other),
        }
    }

    /// Restore every option to its schema default.
    ///
    /// Runs as one transaction: a single "changed" event fires whose
    /// updated set is the full key set, and constraint rollback applies as
    /// in [`update`](Self::update).
    ///
    /// # Errors
    ///
    /// As for [`update`](Self::update).
    pub fn reset(&mut self) -> Result<()> {
        self.update(self.defaults_in_order())
    }

    /// Build a reusable single-option setter.
    ///
    /// The name is resolved now, not at call time.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::UnknownOption`] for an undeclared name.
    pub fn setter(&self, name: &str) -> Result<Setter> {
        if !self.contains(name) {
            return Err(OptionsError::UnknownOption {
                name: name.to_string(),
            });
        }
        Ok(Setter {
            name: name.to_string(),
        })
    }

    /// Build a toggler for a boolean option.
    ///
    /// The name is resolved now, not at call time.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::UnknownOption`] for an undeclared name, or
    /// [`OptionsError::IncompatibleType`] if the option is not boolean.
    pub fn toggler(&self, name: &str) -> Result<Toggler> {
        match self.option_type(name)? {
            OptionType::Bool => Ok(Toggler {
                name: name.to_string(),
            }),
            other => Err(OptionsError::IncompatibleType {
                name: name.to_string(),
                expected: OptionType::Bool.to_string(),
                found: other.to_string(),
            }),
        }
    }
}

/// Writes a single pre-resolved option through a full transaction.
///
/// Built by [`OptionStore::setter`]; invoking it is equivalent to
/// `update([(name, value)])`.
#[derive(Debug, Clone)]
pub struct Setter {
    name: String,
}

impl Setter {
    /// The option this setter writes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the option to `value`.
    ///
    /// # Errors
    ///
    /// As for [`OptionStore::update`].
    pub fn set(&self, store: &mut OptionStore, value: impl Into<Value>) -> Result<()> {
        store.update([(self.name.clone(), value.into())])
    }
}

/// Flips a pre-resolved boolean option through a full transaction.
///
/// Built by [`OptionStore::toggler`].
#[derive(Debug, Clone)]
pub struct Toggler {
    name: String,
}

impl Toggler {
    /// The option this toggler flips.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invert the option's current value.
    ///
    /// # Errors
    ///
    /// As for [`OptionStore::update`].
    pub fn toggle(&self, store: &mut OptionStore) -> Result<()> {
        let current = store.get_bool(&self.name)?;
        store.update([(self.name.clone(), Value::Bool(!current))])
    }
}
