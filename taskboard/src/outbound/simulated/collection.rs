//! In-memory collection mirrored into one storage slot.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use super::records::{SlotEntity, decode_collection, encode_collection};
use crate::outbound::storage::{KeyValueStore, StorageError};

struct CollectionState<T> {
    items: Vec<T>,
    next_id: i64,
}

impl<T: SlotEntity> CollectionState<T> {
    fn from_items(items: Vec<T>) -> Self {
        let next_id = next_id_after(&items);
        Self { items, next_id }
    }
}

fn next_id_after<T: SlotEntity>(items: &[T]) -> i64 {
    items
        .iter()
        .map(SlotEntity::raw_id)
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

/// Collection of `T` persisted as a whole under `key` after every mutation.
///
/// The state mutex is held while the slot is written, and a mutation is only
/// committed in memory once the write succeeds, so memory and slot agree.
pub(super) struct PersistedCollection<T> {
    key: &'static str,
    store: Arc<dyn KeyValueStore>,
    state: Mutex<CollectionState<T>>,
}

impl<T: SlotEntity> PersistedCollection<T> {
    /// Load `key` from `store`, falling back to an empty collection when the
    /// slot is absent or unreadable. Non-empty `seeds` replace an empty load
    /// and are persisted immediately.
    pub(super) fn load(store: Arc<dyn KeyValueStore>, key: &'static str, seeds: &[T]) -> Self {
        let mut items = read_slot::<T>(store.as_ref(), key);
        let seeded = items.is_empty() && !seeds.is_empty();
        if seeded {
            items = seeds.to_vec();
        }
        let collection = Self {
            key,
            store,
            state: Mutex::new(CollectionState::from_items(items)),
        };
        if seeded {
            let state = collection.lock();
            if let Err(err) = collection.persist(&state.items) {
                warn!(slot = key, error = %err, "failed to persist seed entities");
            }
            debug!(slot = key, count = state.items.len(), "seeded empty slot");
        }
        collection
    }

    pub(super) fn snapshot(&self) -> Vec<T> {
        self.lock().items.clone()
    }

    pub(super) fn find(&self, id: i64) -> Option<T> {
        self.lock()
            .items
            .iter()
            .find(|item| item.raw_id() == id)
            .cloned()
    }

    /// Append the entity `build` produces for the next identifier.
    ///
    /// Nothing changes in memory, including the id counter, unless the slot
    /// write succeeds.
    pub(super) fn insert_with(&self, build: impl FnOnce(i64) -> T) -> Result<T, StorageError> {
        let mut state = self.lock();
        let id = state.next_id;
        let item = build(id);
        let mut items = state.items.clone();
        items.push(item.clone());
        self.persist(&items)?;
        state.items = items;
        state.next_id = id.saturating_add(1);
        Ok(item)
    }

    /// Apply `change` to the entity with `id`. Unknown ids leave the slot
    /// alone; a failed write leaves the entity as it was.
    pub(super) fn modify(
        &self,
        id: i64,
        change: impl FnOnce(&mut T),
    ) -> Result<Option<T>, StorageError> {
        let mut state = self.lock();
        let Some(index) = state.items.iter().position(|item| item.raw_id() == id) else {
            return Ok(None);
        };
        let mut items = state.items.clone();
        let Some(item) = items.get_mut(index) else {
            return Ok(None);
        };
        change(item);
        let updated = item.clone();
        self.persist(&items)?;
        state.items = items;
        Ok(Some(updated))
    }

    /// Drop the entity with `id`; `true` when one was removed.
    pub(super) fn remove(&self, id: i64) -> Result<bool, StorageError> {
        let mut state = self.lock();
        let items: Vec<T> = state
            .items
            .iter()
            .filter(|item| item.raw_id() != id)
            .cloned()
            .collect();
        if items.len() == state.items.len() {
            return Ok(false);
        }
        self.persist(&items)?;
        state.items = items;
        Ok(true)
    }

    /// Empty the collection, delete the slot, and restart ids at 1.
    pub(super) fn clear(&self) -> Result<(), StorageError> {
        let mut state = self.lock();
        self.store.remove(self.key)?;
        *state = CollectionState::from_items(Vec::new());
        Ok(())
    }

    /// Replace every entity and persist the result.
    pub(super) fn replace_all(&self, items: Vec<T>) -> Result<(), StorageError> {
        let mut state = self.lock();
        self.persist(&items)?;
        let next_id = next_id_after(&items).max(state.next_id);
        *state = CollectionState { items, next_id };
        Ok(())
    }

    fn persist(&self, items: &[T]) -> Result<(), StorageError> {
        let raw = encode_collection(items).map_err(|err| StorageError::Write {
            key: self.key.to_owned(),
            message: err.to_string(),
        })?;
        self.store.set(self.key, &raw)
    }

    fn lock(&self) -> MutexGuard<'_, CollectionState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn read_slot<T: SlotEntity>(store: &dyn KeyValueStore, key: &str) -> Vec<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!(slot = key, error = %err, "storage slot unreadable; starting empty");
            return Vec::new();
        }
    };
    match decode_collection(&raw) {
        Ok(items) => items,
        Err(err) => {
            warn!(slot = key, error = %err, "storage slot malformed; starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{User, UserId};
    use crate::outbound::storage::MemoryKeyValueStore;
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    const KEY: &str = "taskboard.users";

    fn user(id: i64) -> User {
        User {
            id: UserId::new(id),
            name: format!("user-{id}"),
            email: format!("user-{id}@example.com"),
            created_at: Utc.timestamp_millis_opt(0).single().expect("epoch"),
            updated_at: None,
        }
    }

    #[fixture]
    fn store() -> Arc<dyn KeyValueStore> {
        Arc::new(MemoryKeyValueStore::new())
    }

    /// Reads through to memory slots but refuses every write.
    struct ReadOnlyStore {
        inner: MemoryKeyValueStore,
    }

    impl ReadOnlyStore {
        fn holding(collection: &[User]) -> Self {
            let inner = MemoryKeyValueStore::new();
            let raw = encode_collection(collection).expect("encode");
            inner.set(KEY, &raw).expect("write");
            Self { inner }
        }

        fn refusal(key: &str) -> StorageError {
            StorageError::Write {
                key: key.to_owned(),
                message: "disk full".to_owned(),
            }
        }
    }

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(Self::refusal(key))
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            Err(Self::refusal(key))
        }
    }

    fn read_only(collection: &[User]) -> PersistedCollection<User> {
        PersistedCollection::load(Arc::new(ReadOnlyStore::holding(collection)), KEY, &[])
    }

    fn renamed(user: &mut User) {
        user.name = "renamed".to_owned();
    }

    #[rstest]
    fn ids_continue_after_the_highest_persisted_id(store: Arc<dyn KeyValueStore>) {
        let seeded = PersistedCollection::load(store.clone(), KEY, &[user(4), user(9)]);
        drop(seeded);

        let reloaded = PersistedCollection::<User>::load(store, KEY, &[]);
        let created = reloaded.insert_with(user).expect("insert");
        assert_eq!(created.id, UserId::new(10));
    }

    #[rstest]
    fn seeds_are_ignored_when_the_slot_has_data(store: Arc<dyn KeyValueStore>) {
        PersistedCollection::load(store.clone(), KEY, &[user(1)]);
        let reloaded = PersistedCollection::load(store, KEY, &[user(2), user(3)]);
        assert_eq!(reloaded.snapshot(), vec![user(1)]);
    }

    #[rstest]
    fn malformed_slot_loads_empty(store: Arc<dyn KeyValueStore>) {
        store.set(KEY, "not json at all").expect("write");
        let collection = PersistedCollection::<User>::load(store, KEY, &[]);
        assert!(collection.snapshot().is_empty());
        assert_eq!(collection.insert_with(user).expect("insert").id, UserId::new(1));
    }

    #[rstest]
    fn unknown_ids_do_not_touch_the_slot(store: Arc<dyn KeyValueStore>) {
        let collection = PersistedCollection::<User>::load(store.clone(), KEY, &[]);
        assert_eq!(collection.modify(5, |_| {}), Ok(None));
        assert_eq!(collection.remove(5), Ok(false));
        assert_eq!(store.get(KEY), Ok(None));
    }

    #[rstest]
    fn removed_ids_are_not_reused(store: Arc<dyn KeyValueStore>) {
        let collection = PersistedCollection::<User>::load(store, KEY, &[]);
        collection.insert_with(user).expect("first");
        let second = collection.insert_with(user).expect("second");
        assert_eq!(collection.remove(second.raw_id()), Ok(true));
        assert_eq!(collection.insert_with(user).expect("third").id, UserId::new(3));
    }

    #[rstest]
    fn clear_removes_slot_and_restarts_ids(store: Arc<dyn KeyValueStore>) {
        let collection = PersistedCollection::<User>::load(store.clone(), KEY, &[user(7)]);
        collection.clear().expect("clear");
        assert_eq!(store.get(KEY), Ok(None));
        assert_eq!(collection.insert_with(user).expect("insert").id, UserId::new(1));
    }

    #[rstest]
    fn failed_insert_leaves_no_trace() {
        let collection = read_only(&[user(1)]);

        assert!(matches!(
            collection.insert_with(user),
            Err(StorageError::Write { .. })
        ));

        assert_eq!(collection.snapshot(), vec![user(1)]);
        assert_eq!(collection.find(2), None);
    }

    #[rstest]
    fn failed_insert_does_not_consume_an_id() {
        let refusing = read_only(&[]);
        assert!(refusing.insert_with(user).is_err());
        assert!(refusing.insert_with(user).is_err());

        assert_eq!(refusing.lock().next_id, 1);
    }

    #[rstest]
    fn failed_modify_keeps_the_previous_entity() {
        let collection = read_only(&[user(1)]);

        assert!(collection.modify(1, renamed).is_err());

        assert_eq!(collection.find(1), Some(user(1)));
    }

    #[rstest]
    fn failed_remove_keeps_the_entity() {
        let collection = read_only(&[user(1), user(2)]);

        assert!(collection.remove(2).is_err());

        assert_eq!(collection.snapshot(), vec![user(1), user(2)]);
    }

    #[rstest]
    fn failed_replace_and_clear_keep_the_collection() {
        let collection = read_only(&[user(1)]);

        assert!(collection.replace_all(vec![user(5), user(6)]).is_err());
        assert!(collection.clear().is_err());

        assert_eq!(collection.snapshot(), vec![user(1)]);
        assert_eq!(collection.lock().next_id, 2);
    }
}
