use reqwest::StatusCode;

/// Failure normalized from a single backend round trip. `Status` carries the
/// message shown to the user: a backend-supplied `detail` when one exists,
/// otherwise a status-derived fallback.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{message}")]
    Status { status: StatusCode, message: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    pub fn status(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status(),
        }
    }
}

/// Statuses the repository listing maps to a more useful message than the
/// generic fallback. 400 means the backend has no GitHub link for the user.
pub(crate) fn repositories_status_message(status: StatusCode) -> Option<String> {
    match status {
        StatusCode::BAD_REQUEST => Some("GitHub not connected".to_string()),
        StatusCode::NOT_FOUND => Some(
            "Repositories endpoint not found. Please check if the backend is deployed.".to_string(),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_displays_message() {
        let err = ClientError::status(StatusCode::INTERNAL_SERVER_ERROR, "backend exploded");
        assert_eq!(err.to_string(), "backend exploded");
        assert_eq!(err.status_code(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn repositories_statuses_map_to_messages() {
        let message = repositories_status_message(StatusCode::BAD_REQUEST).unwrap();
        assert_eq!(message, "GitHub not connected");
        let message = repositories_status_message(StatusCode::NOT_FOUND).unwrap();
        assert!(message.contains("backend is deployed"));
        assert!(repositories_status_message(StatusCode::INTERNAL_SERVER_ERROR).is_none());
    }
}
