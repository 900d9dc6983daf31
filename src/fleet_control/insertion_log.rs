use crate::bridge::CorrelationId;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Number of object creations remembered for error attribution.
pub const INSERTION_LOG_CAPACITY: usize = 10;

/// A thread-safe, fixed-size record of recent object creation requests.
///
/// Failure notifications only carry the id of the failed command; this log maps
/// it back to the object type that was requested. Once full, every new record
/// evicts the oldest one.
#[derive(Debug)]
pub(crate) struct InsertionLog {
    entries: Mutex<VecDeque<(CorrelationId, String)>>,
}

impl InsertionLog {
    /// Creates an empty `InsertionLog`.
    pub fn new() -> Self { Self { entries: Mutex::new(VecDeque::with_capacity(INSERTION_LOG_CAPACITY)) } }

    /// Acquires the lock on the entries.
    ///
    /// A poisoned lock is taken over as is, the entries stay consistent since
    /// every mutation is a single push or pop.
    fn lock_entries(&self) -> MutexGuard<'_, VecDeque<(CorrelationId, String)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a creation request, evicting the oldest one when full.
    ///
    /// # Arguments
    /// - `id`: The correlation id the creation was sent with.
    /// - `type_name`: The requested simulator object type.
    pub fn record(&self, id: CorrelationId, type_name: &str) {
        let mut entries = self.lock_entries();
        if entries.len() == INSERTION_LOG_CAPACITY {
            entries.pop_front();
        }
        entries.push_back((id, type_name.to_string()));
    }

    /// Looks up the object type requested under `id`.
    ///
    /// # Returns
    /// - `Some(type_name)` if the request is still remembered, `None` otherwise.
    pub fn lookup(&self, id: CorrelationId) -> Option<String> {
        self.lock_entries().iter().rev().find(|(i, _)| *i == id).map(|(_, t)| t.clone())
    }

    pub fn len(&self) -> usize { self.lock_entries().len() }

    pub fn is_empty(&self) -> bool { self.lock_entries().is_empty() }
}
