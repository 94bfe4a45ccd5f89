//! Transport and payload failures raised by remote adapters.

use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::ports::{TaskRepositoryError, UserRepositoryError};

/// Failure talking to a remote task service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The request never produced a response.
    #[error("transport failure: {message}")]
    Transport { message: String },
    /// The service answered with an error status or error payload.
    #[error("service error: {message}")]
    Rejected { message: String },
    /// The response body could not be decoded.
    #[error("invalid payload: {message}")]
    Decode { message: String },
}

impl RemoteError {
    pub(crate) fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub(crate) fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

impl From<RemoteError> for TaskRepositoryError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Transport { message } => Self::transport(message),
            RemoteError::Rejected { message } => Self::rejected(message),
            RemoteError::Decode { message } => Self::decode(message),
        }
    }
}

impl From<RemoteError> for UserRepositoryError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Transport { message } => Self::transport(message),
            RemoteError::Rejected { message } => Self::rejected(message),
            RemoteError::Decode { message } => Self::decode(message),
        }
    }
}

pub(crate) fn map_transport_error(error: reqwest::Error) -> RemoteError {
    let message = if error.is_timeout() {
        format!("request timed out: {error}")
    } else {
        error.to_string()
    };
    RemoteError::Transport { message }
}

pub(crate) fn map_status_error(status: StatusCode, body: &[u8]) -> RemoteError {
    let preview = body_preview(body);
    if preview.is_empty() {
        RemoteError::rejected(format!("status {}", status.as_u16()))
    } else {
        RemoteError::rejected(format!("status {}: {preview}", status.as_u16()))
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty(b"".as_slice(), "service error: status 500")]
    #[case::compacted(b"  upstream\n   down ".as_slice(), "service error: status 500: upstream down")]
    fn status_errors_carry_a_compact_preview(#[case] body: &[u8], #[case] expected: &str) {
        let err = map_status_error(StatusCode::INTERNAL_SERVER_ERROR, body);
        assert_eq!(err.to_string(), expected);
    }

    #[rstest]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(400);
        let RemoteError::Rejected { message } = map_status_error(StatusCode::BAD_GATEWAY, body.as_bytes())
        else {
            panic!("status errors are rejections");
        };
        assert!(message.ends_with("..."));
        assert!(message.len() < 200);
    }

    #[rstest]
    fn remote_errors_map_onto_port_variants() {
        let task_err: TaskRepositoryError = RemoteError::decode("bad id").into();
        assert_eq!(task_err, TaskRepositoryError::decode("bad id"));

        let user_err: UserRepositoryError = RemoteError::Transport {
            message: "refused".to_owned(),
        }
        .into();
        assert_eq!(user_err, UserRepositoryError::transport("refused"));
    }
}
