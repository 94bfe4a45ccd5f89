//! Tests for the simulated task repository.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::UserId;
use crate::outbound::simulated::{ImmediateSleeper, TASKS_SLOT};
use crate::outbound::storage::{MemoryKeyValueStore, StorageError};
use crate::test_support::{MutableClock, RecordingSleeper};

struct Harness {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<MutableClock>,
}

impl Harness {
    fn runtime(&self) -> SimulatedRuntime {
        SimulatedRuntime::new(self.clock.clone(), Arc::new(ImmediateSleeper), Duration::ZERO)
    }

    fn repository(&self) -> SimulatedTaskRepository {
        SimulatedTaskRepository::new(self.store.clone(), self.runtime(), &[])
    }
}

#[fixture]
fn harness() -> Harness {
    Harness {
        store: Arc::new(MemoryKeyValueStore::new()),
        clock: Arc::new(MutableClock::fixed()),
    }
}

#[rstest]
#[tokio::test]
async fn fresh_repository_assigns_increasing_ids_from_one(harness: Harness) {
    let repo = harness.repository();

    let first = repo.create(NewTask::new("first")).await.expect("create");
    let second = repo.create(NewTask::new("second")).await.expect("create");

    assert_eq!(first.id, TaskId::new(1));
    assert_eq!(second.id, TaskId::new(2));
    assert!(!first.completed);
    assert!(first.updated_at.is_none());
}

#[rstest]
#[tokio::test]
async fn reload_continues_after_persisted_ids(harness: Harness) {
    let repo = harness.repository();
    for title in ["a", "b", "c"] {
        repo.create(NewTask::new(title)).await.expect("create");
    }
    repo.delete(TaskId::new(3)).await.expect("delete");
    drop(repo);

    let reloaded = harness.repository();
    let persisted = reloaded.list().await.expect("list");
    let created = reloaded.create(NewTask::new("d")).await.expect("create");

    assert_eq!(persisted.len(), 2);
    assert!(persisted.iter().all(|task| task.id < created.id));
    assert_eq!(created.id, TaskId::new(3));
}

#[rstest]
#[tokio::test]
async fn toggling_twice_restores_completion(harness: Harness) {
    let repo = harness.repository();
    let task = repo
        .create(NewTask::new("T1").owned_by(UserId::new(1)))
        .await
        .expect("create");

    harness.clock.advance_seconds(60);
    let done = repo
        .toggle_complete(task.id)
        .await
        .expect("toggle")
        .expect("known task");
    harness.clock.advance_seconds(60);
    let undone = repo
        .toggle_complete(task.id)
        .await
        .expect("toggle")
        .expect("known task");

    assert!(done.completed);
    assert!(!undone.completed);
    assert!(done.updated_at.is_some());
    assert!(undone.updated_at > done.updated_at);
    assert_eq!(undone.user_id, Some(UserId::new(1)));
}

#[rstest]
#[tokio::test]
async fn unknown_ids_are_not_errors(harness: Harness) {
    let repo = harness.repository();
    repo.create(NewTask::new("only")).await.expect("create");

    let patch = TaskPatch::new(TaskId::new(42)).title("ghost");
    assert_eq!(repo.update(patch).await, Ok(None));
    assert_eq!(repo.delete(TaskId::new(42)).await, Ok(false));
    assert_eq!(repo.toggle_complete(TaskId::new(42)).await, Ok(None));
    assert_eq!(repo.get_by_id(TaskId::new(42)).await, Ok(None));
    assert_eq!(repo.list().await.expect("list").len(), 1);
}

#[rstest]
#[tokio::test]
async fn update_can_clear_the_owner(harness: Harness) {
    let repo = harness.repository();
    let task = repo
        .create(NewTask::new("owned").owned_by(UserId::new(2)))
        .await
        .expect("create");

    let updated = repo
        .update(TaskPatch::new(task.id).user_id(None))
        .await
        .expect("update")
        .expect("known task");

    assert!(updated.user_id.is_none());
    assert_eq!(updated.title, "owned");
    assert!(updated.updated_at.is_some());
}

#[rstest]
#[tokio::test]
async fn mutations_are_persisted_immediately(harness: Harness) {
    let repo = harness.repository();
    repo.create(NewTask::new("saved")).await.expect("create");

    let raw = harness
        .store
        .get(TASKS_SLOT)
        .expect("read slot")
        .expect("slot written");
    assert!(raw.contains(r#""title":"saved""#));
    assert!(raw.contains(r#""createdAt":"2024-05-01T12:00:00.000Z""#));
}

#[rstest]
#[tokio::test]
async fn fill_with_sample_data_installs_seven_tasks(harness: Harness) {
    let repo = harness.repository();

    repo.fill_with_sample_data().expect("fill");
    let tasks = repo.list().await.expect("list");

    assert_eq!(tasks.len(), 7);
    assert_eq!(tasks.iter().filter(|task| task.completed).count(), 3);
    assert!(tasks.iter().all(|task| {
        task.user_id
            .is_some_and(|owner| (1..=3).contains(&owner.get()))
    }));
    let next = repo.create(NewTask::new("after fill")).await.expect("create");
    assert_eq!(next.id, TaskId::new(8));
}

#[rstest]
#[tokio::test]
async fn clear_all_removes_the_slot(harness: Harness) {
    let repo = harness.repository();
    repo.fill_with_sample_data().expect("fill");

    repo.clear_all().expect("clear");

    assert!(repo.list().await.expect("list").is_empty());
    assert_eq!(harness.store.get(TASKS_SLOT), Ok(None));
    let first = repo.create(NewTask::new("fresh")).await.expect("create");
    assert_eq!(first.id, TaskId::new(1));
}

#[rstest]
#[tokio::test]
async fn seeds_apply_only_to_an_empty_slot(harness: Harness) {
    let seeds = crate::outbound::simulated::sample_tasks(harness.clock.utc());
    let seeded = SimulatedTaskRepository::new(harness.store.clone(), harness.runtime(), &seeds);
    assert_eq!(seeded.list().await.expect("list"), seeds);

    seeded.clear_all().expect("clear");
    seeded.create(NewTask::new("mine")).await.expect("create");
    drop(seeded);

    let reloaded = SimulatedTaskRepository::new(harness.store.clone(), harness.runtime(), &seeds);
    let titles: Vec<_> = reloaded
        .list()
        .await
        .expect("list")
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(titles, ["mine"]);
}

#[rstest]
#[tokio::test]
async fn every_contract_call_awaits_the_configured_latency(harness: Harness) {
    let sleeper = Arc::new(RecordingSleeper::default());
    let runtime = SimulatedRuntime::new(
        harness.clock.clone(),
        sleeper.clone(),
        Duration::from_millis(200),
    );
    let repo = SimulatedTaskRepository::new(harness.store.clone(), runtime, &[]);

    repo.list().await.expect("list");
    repo.create(NewTask::new("slow")).await.expect("create");

    assert_eq!(sleeper.recorded(), vec![Duration::from_millis(200); 2]);
}

/// Memory slots whose writes always fail.
struct FullDisk(MemoryKeyValueStore);

impl KeyValueStore for FullDisk {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.get(key)
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Write {
            key: key.to_owned(),
            message: "disk full".to_owned(),
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.0.remove(key)
    }
}

#[rstest]
#[tokio::test]
async fn failed_writes_leave_tasks_untouched(harness: Harness) {
    let seeded = harness.repository();
    let kept = seeded.create(NewTask::new("kept")).await.expect("create");
    let raw = harness.store.get(TASKS_SLOT).expect("read").expect("written");
    let disk = MemoryKeyValueStore::new();
    disk.set(TASKS_SLOT, &raw).expect("copy slot");
    let repo = SimulatedTaskRepository::new(Arc::new(FullDisk(disk)), harness.runtime(), &[]);

    let created = repo.create(NewTask::new("ghost")).await;
    let toggled = repo.toggle_complete(kept.id).await;
    let deleted = repo.delete(kept.id).await;

    assert!(matches!(created, Err(TaskRepositoryError::Storage { .. })));
    assert!(matches!(toggled, Err(TaskRepositoryError::Storage { .. })));
    assert!(matches!(deleted, Err(TaskRepositoryError::Storage { .. })));
    assert_eq!(repo.list().await.expect("list"), vec![kept]);
}
