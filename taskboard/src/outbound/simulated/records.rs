//! Persisted JSON records for the simulated adapters.
//!
//! Timestamps are stored as RFC 3339 strings with millisecond precision and a
//! `Z` suffix. Records are decoded field by field so a malformed timestamp is
//! reported rather than silently dropped.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Task, TaskId, User, UserId};

/// Failures converting between entities and slot text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(super) enum RecordError {
    #[error("failed to encode slot: {0}")]
    Encode(String),
    #[error("invalid slot JSON: {0}")]
    Json(String),
    #[error("invalid timestamp `{raw}`: {message}")]
    Timestamp { raw: String, message: String },
}

/// Entities that can live in a storage slot.
pub(super) trait SlotEntity: Clone + Send + Sync + 'static {
    type Record: Serialize + DeserializeOwned;

    fn raw_id(&self) -> i64;

    fn to_record(&self) -> Self::Record;

    fn from_record(record: Self::Record) -> Result<Self, RecordError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TaskRecord {
    pub(super) id: i64,
    pub(super) title: String,
    #[serde(default)]
    pub(super) completed: bool,
    #[serde(default)]
    pub(super) user_id: Option<i64>,
    pub(super) created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserRecord {
    pub(super) id: i64,
    pub(super) name: String,
    pub(super) email: String,
    pub(super) created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) updated_at: Option<String>,
}

impl SlotEntity for Task {
    type Record = TaskRecord;

    fn raw_id(&self) -> i64 {
        self.id.get()
    }

    fn to_record(&self) -> TaskRecord {
        TaskRecord {
            id: self.id.get(),
            title: self.title.clone(),
            completed: self.completed,
            user_id: self.user_id.map(UserId::get),
            created_at: encode_timestamp(self.created_at),
            updated_at: self.updated_at.map(encode_timestamp),
        }
    }

    fn from_record(record: TaskRecord) -> Result<Self, RecordError> {
        Ok(Self {
            id: TaskId::new(record.id),
            title: record.title,
            completed: record.completed,
            user_id: record.user_id.map(UserId::new),
            created_at: decode_timestamp(&record.created_at)?,
            updated_at: record.updated_at.as_deref().map(decode_timestamp).transpose()?,
        })
    }
}

impl SlotEntity for User {
    type Record = UserRecord;

    fn raw_id(&self) -> i64 {
        self.id.get()
    }

    fn to_record(&self) -> UserRecord {
        UserRecord {
            id: self.id.get(),
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: encode_timestamp(self.created_at),
            updated_at: self.updated_at.map(encode_timestamp),
        }
    }

    fn from_record(record: UserRecord) -> Result<Self, RecordError> {
        Ok(Self {
            id: UserId::new(record.id),
            name: record.name,
            email: record.email,
            created_at: decode_timestamp(&record.created_at)?,
            updated_at: record.updated_at.as_deref().map(decode_timestamp).transpose()?,
        })
    }
}

pub(super) fn encode_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(super) fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>, RecordError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|err| RecordError::Timestamp {
            raw: raw.to_owned(),
            message: err.to_string(),
        })
}

/// Serialize a collection into slot text.
pub(super) fn encode_collection<T: SlotEntity>(items: &[T]) -> Result<String, RecordError> {
    let records: Vec<T::Record> = items.iter().map(SlotEntity::to_record).collect();
    serde_json::to_string(&records).map_err(|err| RecordError::Encode(err.to_string()))
}

/// Parse slot text into a collection.
pub(super) fn decode_collection<T: SlotEntity>(raw: &str) -> Result<Vec<T>, RecordError> {
    let records: Vec<T::Record> =
        serde_json::from_str(raw).map_err(|err| RecordError::Json(err.to_string()))?;
    records.into_iter().map(T::from_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    fn at_millis(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).single().expect("valid millis")
    }

    #[rstest]
    fn timestamps_encode_with_millis_and_z_suffix() {
        let encoded = encode_timestamp(at_millis(1_714_564_800_123));
        assert_eq!(encoded, "2024-05-01T12:00:00.123Z");
        assert_eq!(decode_timestamp(&encoded), Ok(at_millis(1_714_564_800_123)));
    }

    #[rstest]
    fn offsets_are_normalised_to_utc() {
        let decoded = decode_timestamp("2024-05-01T14:00:00.000+02:00").expect("decodes");
        assert_eq!(decoded, at_millis(1_714_564_800_000));
    }

    #[rstest]
    fn task_records_use_camel_case_keys() {
        let task = Task {
            id: TaskId::new(3),
            title: "Write report".to_owned(),
            completed: true,
            user_id: Some(UserId::new(2)),
            created_at: at_millis(1_714_564_800_000),
            updated_at: Some(at_millis(1_714_564_860_500)),
        };

        let raw = encode_collection(&[task.clone()]).expect("encodes");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(
            value,
            json!([{
                "id": 3,
                "title": "Write report",
                "completed": true,
                "userId": 2,
                "createdAt": "2024-05-01T12:00:00.000Z",
                "updatedAt": "2024-05-01T12:01:00.500Z",
            }])
        );
        assert_eq!(decode_collection::<Task>(&raw), Ok(vec![task]));
    }

    #[rstest]
    fn users_without_updates_omit_updated_at() {
        let user = User {
            id: UserId::new(1),
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            created_at: at_millis(0),
            updated_at: None,
        };
        let raw = encode_collection(&[user]).expect("encodes");
        assert!(!raw.contains("updatedAt"));
    }

    #[rstest]
    #[case::not_json("{not json")]
    #[case::wrong_shape(r#"{"id": 1}"#)]
    fn unparsable_slots_are_rejected(#[case] raw: &str) {
        assert!(matches!(
            decode_collection::<User>(raw),
            Err(RecordError::Json(_))
        ));
    }

    #[rstest]
    fn bad_timestamps_name_the_offending_value() {
        let raw = r#"[{"id":1,"name":"a","email":"e","createdAt":"yesterday"}]"#;
        let Err(RecordError::Timestamp { raw: value, .. }) = decode_collection::<User>(raw) else {
            panic!("expected a timestamp error");
        };
        assert_eq!(value, "yesterday");
    }
}
