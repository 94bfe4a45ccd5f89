//! Plain-text rendering of tasks and users.

use std::io::{self, Write};

use chrono::SecondsFormat;

use crate::domain::{Task, User};

pub(super) fn write_task(out: &mut impl Write, task: &Task, users: &[User]) -> io::Result<()> {
    let mark = if task.completed { 'x' } else { ' ' };
    write!(out, "[{mark}] #{} {}", task.id, task.title)?;
    match task.user_id {
        Some(owner) => match users.iter().find(|user| user.id == owner) {
            Some(user) => write!(out, " (owner: {})", user.name)?,
            None => write!(out, " (owner: #{owner})")?,
        },
        None => write!(out, " (unassigned)")?,
    }
    writeln!(out)
}

pub(super) fn write_user(out: &mut impl Write, user: &User) -> io::Result<()> {
    write!(
        out,
        "#{} {} <{}> created {}",
        user.id,
        user.name,
        user.email,
        user.created_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    if let Some(updated_at) = user.updated_at {
        write!(
            out,
            ", updated {}",
            updated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TaskId, UserId};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn ada() -> User {
        User {
            id: UserId::new(1),
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            created_at: Utc
                .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
                .single()
                .expect("date"),
            updated_at: None,
        }
    }

    fn task(owner: Option<i64>, completed: bool) -> Task {
        Task {
            id: TaskId::new(4),
            title: "Write report".to_owned(),
            completed,
            user_id: owner.map(UserId::new),
            created_at: ada().created_at,
            updated_at: None,
        }
    }

    #[rstest]
    #[case::known_owner(Some(1), false, "[ ] #4 Write report (owner: Ada)\n")]
    #[case::dangling_owner(Some(9), true, "[x] #4 Write report (owner: #9)\n")]
    #[case::unassigned(None, false, "[ ] #4 Write report (unassigned)\n")]
    fn tasks_render_with_owner_names(
        #[case] owner: Option<i64>,
        #[case] completed: bool,
        #[case] expected: &str,
    ) {
        let mut out = Vec::new();
        write_task(&mut out, &task(owner, completed), &[ada()]).expect("write");
        assert_eq!(String::from_utf8(out).expect("utf8"), expected);
    }

    #[rstest]
    fn users_render_with_creation_time() {
        let mut out = Vec::new();
        write_user(&mut out, &ada()).expect("write");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "#1 Ada <ada@example.com> created 2024-05-01T12:00:00Z\n"
        );
    }
}
