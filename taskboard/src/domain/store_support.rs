//! List reconciliation shared by the task and user stores.

use std::sync::{PoisonError, RwLock};

use super::{Task, TaskId, User, UserId};

/// Entities the stores reconcile by identifier.
pub(crate) trait Keyed {
    type Key: Copy + PartialEq;

    fn key(&self) -> Self::Key;
}

impl Keyed for Task {
    type Key = TaskId;

    fn key(&self) -> TaskId {
        self.id
    }
}

impl Keyed for User {
    type Key = UserId;

    fn key(&self) -> UserId {
        self.id
    }
}

/// Replace the entry sharing `entry`'s key. Returns `false` when none matches.
pub(crate) fn replace_entry<T: Keyed>(items: &mut [T], entry: T) -> bool {
    match items.iter_mut().find(|item| item.key() == entry.key()) {
        Some(slot) => {
            *slot = entry;
            true
        }
        None => false,
    }
}

/// Remove every entry with `key`. Returns `true` when something was removed.
pub(crate) fn remove_entry<T: Keyed>(items: &mut Vec<T>, key: T::Key) -> bool {
    let before = items.len();
    items.retain(|item| item.key() != key);
    items.len() != before
}

/// Clone the current value out of a lock, recovering from poisoning.
pub(crate) fn read_current<T: Clone>(lock: &RwLock<T>) -> T {
    lock.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Overwrite the value behind a lock, recovering from poisoning.
pub(crate) fn write_current<T>(lock: &RwLock<T>, value: T) {
    *lock.write().unwrap_or_else(PoisonError::into_inner) = value;
}
