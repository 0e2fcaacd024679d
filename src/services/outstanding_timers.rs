//! Bookkeeping of timers scheduled through the interceptor and not yet cancelled.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Set of timer identifiers that were scheduled and not explicitly cancelled.
///
/// Only the interceptor mutates the set. An identifier leaves the set solely
/// through an intercepted cancel call: a one-shot timer that has already fired
/// stays in the set until someone cancels it, and a repeating timer is tracked
/// from its first schedule until its first cancel no matter how often it ticks.
#[derive(Debug)]
pub struct OutstandingTimerSet<Id> {
    ids: Mutex<HashSet<Id>>,
}

impl<Id> Default for OutstandingTimerSet<Id> {
    fn default() -> Self {
        Self {
            ids: Mutex::new(HashSet::new()),
        }
    }
}

impl<Id> OutstandingTimerSet<Id>
where
    Id: Clone + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<Id>> {
        // The set holds plain keys; a panic mid-insert cannot leave it torn.
        self.ids.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a freshly scheduled identifier. Returns the new size.
    pub(crate) fn insert(&self, id: Id) -> usize {
        let mut ids = self.lock();
        ids.insert(id);
        ids.len()
    }

    /// Forget an identifier. Removing an absent identifier is a no-op.
    /// Returns the new size.
    pub(crate) fn remove(&self, id: &Id) -> usize {
        let mut ids = self.lock();
        ids.remove(id);
        ids.len()
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.lock().contains(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the current identifiers, in no particular order
    pub fn snapshot(&self) -> Vec<Id> {
        self.lock().iter().cloned().collect()
    }
}

impl<Id> OutstandingTimerSet<Id>
where
    Id: Clone + Eq + Hash + Debug + Ord,
{
    /// Copy of the current identifiers in ascending order
    pub fn sorted(&self) -> Vec<Id> {
        let mut ids = self.snapshot();
        ids.sort();
        ids
    }
}
