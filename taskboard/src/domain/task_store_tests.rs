//! Tests for the task store.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::rstest;
use url::Url;

use super::*;
use crate::domain::UserId;
use crate::domain::ports::{
    DataSourceError, MockRepositoryFactory, MockTaskRepository, TaskRepositoryError,
};

fn task(id: i64, title: &str) -> Task {
    Task {
        id: TaskId::new(id),
        title: title.to_owned(),
        completed: false,
        user_id: Some(UserId::new(1)),
        created_at: Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid date"),
        updated_at: None,
    }
}

fn store_with(repo: MockTaskRepository) -> TaskStore {
    store_with_factory(repo, MockRepositoryFactory::new())
}

fn store_with_factory(repo: MockTaskRepository, factory: MockRepositoryFactory) -> TaskStore {
    let repository: Arc<dyn TaskRepository> = Arc::new(repo);
    TaskStore::with_repository(Arc::new(factory), DataSourceKind::Simulated, repository)
}

async fn loaded_store(mut repo: MockTaskRepository, tasks: Vec<Task>) -> TaskStore {
    repo.expect_list().times(1).return_once(move || Ok(tasks));
    let store = store_with(repo);
    store.fetch_all().await;
    store
}

#[tokio::test]
async fn fetch_all_replaces_list_and_resets_loading() {
    let store = loaded_store(MockTaskRepository::new(), vec![task(1, "a"), task(2, "b")]).await;

    let state = store.snapshot();
    assert_eq!(state.tasks.len(), 2);
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn fetch_all_failure_keeps_list_and_records_error() {
    let mut repo = MockTaskRepository::new();
    let mut calls = 0;
    repo.expect_list().times(2).returning(move || {
        calls += 1;
        if calls == 1 {
            Ok(vec![task(1, "kept")])
        } else {
            Err(TaskRepositoryError::storage("slot unreadable"))
        }
    });
    let store = store_with(repo);

    store.fetch_all().await;
    store.fetch_all().await;

    let state = store.snapshot();
    assert_eq!(state.tasks, vec![task(1, "kept")]);
    assert!(!state.loading);
    assert_eq!(
        state.error.as_deref(),
        Some("task storage failed: slot unreadable")
    );
}

#[tokio::test]
async fn create_appends_returned_task() {
    let mut repo = MockTaskRepository::new();
    repo.expect_create()
        .withf(|input: &NewTask| input.title == "T1" && input.user_id == Some(UserId::new(1)))
        .times(1)
        .return_once(|_| Ok(task(4, "T1")));
    let store = loaded_store(repo, vec![task(3, "existing")]).await;

    let created = store
        .create(NewTask::new("T1").owned_by(UserId::new(1)))
        .await
        .expect("task created");

    assert_eq!(created.id, TaskId::new(4));
    let ids: Vec<_> = store.snapshot().tasks.iter().map(|t| t.id.get()).collect();
    assert_eq!(ids, [3, 4]);
}

#[tokio::test]
async fn create_failure_is_recorded_and_list_untouched() {
    let mut repo = MockTaskRepository::new();
    repo.expect_create()
        .times(1)
        .return_once(|_| Err(TaskRepositoryError::transport("connection refused")));
    let store = store_with(repo);

    assert!(store.create(NewTask::new("lost")).await.is_none());

    let state = store.snapshot();
    assert!(state.tasks.is_empty());
    assert!(
        state
            .error
            .as_deref()
            .is_some_and(|message| message.contains("connection refused"))
    );
}

#[tokio::test]
async fn update_miss_leaves_list_and_error_untouched() {
    let mut repo = MockTaskRepository::new();
    repo.expect_update().times(1).return_once(|_| Ok(None));
    let store = loaded_store(repo, vec![task(1, "a")]).await;
    let before = store.snapshot();

    let result = store.update(TaskPatch::new(TaskId::new(99)).title("x")).await;

    assert!(result.is_none());
    let after = store.snapshot();
    assert_eq!(after.tasks, before.tasks);
    assert!(after.error.is_none());
    assert!(!after.loading);
}

#[tokio::test]
async fn update_hit_replaces_matching_entry() {
    let mut repo = MockTaskRepository::new();
    let mut renamed = task(2, "renamed");
    renamed.updated_at = Some(Utc::now());
    let returned = renamed.clone();
    repo.expect_update()
        .times(1)
        .return_once(move |_| Ok(Some(returned)));
    let store = loaded_store(repo, vec![task(1, "a"), task(2, "b")]).await;

    store
        .update(TaskPatch::new(TaskId::new(2)).title("renamed"))
        .await
        .expect("task updated");

    let tasks = store.snapshot().tasks;
    assert_eq!(tasks.get(1), Some(&renamed));
    assert_eq!(tasks.first().map(|t| t.title.as_str()), Some("a"));
}

#[rstest]
#[case::removed(true, 1)]
#[case::missing(false, 2)]
#[tokio::test]
async fn delete_reconciles_only_when_removed(#[case] removed: bool, #[case] remaining: usize) {
    let mut repo = MockTaskRepository::new();
    repo.expect_delete()
        .times(1)
        .return_once(move |_| Ok(removed));
    let store = loaded_store(repo, vec![task(1, "a"), task(2, "b")]).await;

    assert_eq!(store.delete(TaskId::new(1)).await, removed);
    assert_eq!(store.snapshot().tasks.len(), remaining);
}

#[tokio::test]
async fn toggle_complete_replaces_entry() {
    let mut repo = MockTaskRepository::new();
    let mut done = task(1, "a");
    done.completed = true;
    done.updated_at = Some(Utc::now());
    let returned = done.clone();
    repo.expect_toggle_complete()
        .times(1)
        .return_once(move |_| Ok(Some(returned)));
    let store = loaded_store(repo, vec![task(1, "a")]).await;

    store.toggle_complete(TaskId::new(1)).await;

    assert_eq!(store.snapshot().tasks, vec![done]);
}

#[tokio::test]
async fn next_action_clears_previous_error() {
    let mut repo = MockTaskRepository::new();
    repo.expect_delete()
        .times(1)
        .return_once(|_| Err(TaskRepositoryError::rejected("boom")));
    repo.expect_toggle_complete()
        .times(1)
        .return_once(|_| Ok(None));
    let store = store_with(repo);

    store.delete(TaskId::new(1)).await;
    assert!(store.snapshot().error.is_some());

    store.toggle_complete(TaskId::new(1)).await;
    assert!(store.snapshot().error.is_none());
}

#[tokio::test]
async fn change_data_source_swaps_repository_and_reloads() {
    let mut remote = MockTaskRepository::new();
    remote
        .expect_list()
        .times(1)
        .return_once(|| Ok(vec![task(7, "remote")]));
    let remote: Arc<dyn TaskRepository> = Arc::new(remote);

    let mut factory = MockRepositoryFactory::new();
    factory
        .expect_task_repository()
        .withf(|config: &DataSourceConfig| config.kind == DataSourceKind::Remote)
        .times(1)
        .return_once(move |_| Ok(remote));
    let store = store_with_factory(MockTaskRepository::new(), factory);

    let endpoint = Url::parse("http://localhost:4000/graphql").expect("url");
    store
        .change_data_source(&DataSourceConfig::remote(endpoint))
        .await;

    let state = store.snapshot();
    assert_eq!(state.data_source, DataSourceKind::Remote);
    assert_eq!(state.tasks, vec![task(7, "remote")]);
}

#[tokio::test]
async fn change_data_source_failure_keeps_previous_repository() {
    let mut factory = MockRepositoryFactory::new();
    factory.expect_task_repository().times(1).return_once(|_| {
        Err(DataSourceError::missing_endpoint(DataSourceKind::Rest))
    });
    let mut current = MockTaskRepository::new();
    current
        .expect_list()
        .times(1)
        .return_once(|| Ok(vec![task(1, "local")]));
    let store = store_with_factory(current, factory);

    let config = DataSourceConfig {
        kind: DataSourceKind::Rest,
        ..DataSourceConfig::default()
    };
    store.change_data_source(&config).await;

    let state = store.snapshot();
    assert_eq!(state.data_source, DataSourceKind::Simulated);
    assert_eq!(
        state.error.as_deref(),
        Some("data source `rest` requires an endpoint")
    );

    store.fetch_all().await;
    assert_eq!(store.snapshot().tasks, vec![task(1, "local")]);
}

#[tokio::test]
async fn subscribers_observe_state_changes() {
    let store = loaded_store(MockTaskRepository::new(), Vec::new()).await;
    let mut receiver = store.subscribe();
    receiver.borrow_and_update();

    store.reset();

    assert!(receiver.has_changed().expect("sender alive"));
    assert!(receiver.borrow().tasks.is_empty());
}
