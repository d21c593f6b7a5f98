//! Ordered, synchronous subscriber lists for store events.

use crate::core::OptionStore;
use crate::error::{ConstraintError, Result};
use std::collections::BTreeSet;
use std::fmt;

/// Callback invoked after a transaction is applied (or rolled back).
pub type ChangedSubscriber = Box<dyn Fn(&OptionStore, &BTreeSet<String>) -> Result<()>>;

/// Callback invoked when a constraint rejects a transaction.
pub type ErroredSubscriber = Box<dyn Fn(&OptionStore, &ConstraintError) -> Result<()>>;

/// Ordered subscriber lists for the two event kinds a store emits.
///
/// Owned by exactly one [`OptionStore`]; there is no ambient global
/// registry. Delivery is synchronous and in registration order, with no
/// isolation between subscribers: the first subscriber to return an error
/// stops delivery for that send, and the error surfaces to the sender.
/// Earlier subscribers in the same send have already run.
pub struct ChangeNotifier {
    changed: Vec<ChangedSubscriber>,
    errored: Vec<ErroredSubscriber>,
}

impl ChangeNotifier {
    pub(crate) fn new() -> Self {
        Self {
            changed: Vec::new(),
            errored: Vec::new(),
        }
    }

    /// Append a "changed" subscriber. No duplicate detection, no priority.
    pub(crate) fn on_changed<F>(&mut self, callback: F)
    where
        F: Fn(&OptionStore, &BTreeSet<String>) -> Result<()> + 'static,
    {
        self.changed.push(Box::new(callback));
    }

    /// Append an "errored" subscriber.
    pub(crate) fn on_errored<F>(&mut self, callback: F)
    where
        F: Fn(&OptionStore, &ConstraintError) -> Result<()> + 'static,
    {
        self.errored.push(Box::new(callback));
    }

    pub(crate) fn send_changed(
        &self,
        store: &OptionStore,
        updated: &BTreeSet<String>,
    ) -> Result<()> {
        for subscriber in &self.changed {
            subscriber(store, updated)?;
        }
        Ok(())
    }

    pub(crate) fn send_errored(
        &self,
        store: &OptionStore,
        error: &ConstraintError,
    ) -> Result<()> {
        for subscriber in &self.errored {
            subscriber(store, error)?;
        }
        Ok(())
    }

    pub(crate) fn changed_len(&self) -> usize {
        self.changed.len()
    }

    pub(crate) fn errored_len(&self) -> usize {
        self.errored.len()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("changed", &self.changed.len())
            .field("errored", &self.errored.len())
            .finish()
    }
}
