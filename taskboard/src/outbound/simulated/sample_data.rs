//! Fixed demonstration dataset installed by `fill_with_sample_data`.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{Task, TaskId, User, UserId};

const SAMPLE_USERS: [(&str, &str, i64); 3] = [
    ("Ada Lovelace", "ada@example.com", 30),
    ("Grace Hopper", "grace@example.com", 21),
    ("Alan Turing", "alan@example.com", 14),
];

/// (title, completed, owner, created days ago, completed days ago)
const SAMPLE_TASKS: [(&str, bool, i64, i64, Option<i64>); 7] = [
    ("Draft the project brief", true, 1, 12, Some(10)),
    ("Review the onboarding checklist", false, 1, 9, None),
    ("Set up the staging environment", true, 2, 8, Some(5)),
    ("Write release notes", false, 2, 6, None),
    ("Audit access permissions", false, 3, 4, None),
    ("Plan the quarterly retrospective", true, 3, 3, Some(1)),
    ("Triage the bug backlog", false, 1, 1, None),
];

/// Three users with creation dates backdated from `now`.
pub fn sample_users(now: DateTime<Utc>) -> Vec<User> {
    SAMPLE_USERS
        .iter()
        .zip(1..)
        .map(|(&(name, email, days_ago), id)| User {
            id: UserId::new(id),
            name: name.to_owned(),
            email: email.to_owned(),
            created_at: now - Duration::days(days_ago),
            updated_at: None,
        })
        .collect()
}

/// Seven tasks owned by the sample users; completed ones carry a backdated
/// `updated_at`.
pub fn sample_tasks(now: DateTime<Utc>) -> Vec<Task> {
    SAMPLE_TASKS
        .iter()
        .zip(1..)
        .map(
            |(&(title, completed, owner, created_days_ago, completed_days_ago), id)| Task {
                id: TaskId::new(id),
                title: title.to_owned(),
                completed,
                user_id: Some(UserId::new(owner)),
                created_at: now - Duration::days(created_days_ago),
                updated_at: completed_days_ago.map(|days| now - Duration::days(days)),
            },
        )
        .collect()
}
