use thiserror::Error;

/// Failure of a backend request.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),
    /// The bearer token was refused. Only produced for authenticated requests.
    #[error("your session has expired, please log in again")]
    Unauthorized,
    /// The backend answered with a non-success status. `message` is the
    /// backend's own wording.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected response from server: {0}")]
    Decode(String),
}

/// How the UI should react to an [`ApiError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Generic "action failed" notification, no retry.
    Transport,
    /// Drop the session and fall back to the anonymous view.
    AuthRejected,
    /// Show the backend's message as information.
    Business,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport(_) | ApiError::Decode(_) => ErrorKind::Transport,
            ApiError::Unauthorized => ErrorKind::AuthRejected,
            ApiError::Rejected { .. } => ErrorKind::Business,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(ApiError::Transport("down".into()).kind(), ErrorKind::Transport);
        assert_eq!(ApiError::Decode("bad".into()).kind(), ErrorKind::Transport);
        assert_eq!(ApiError::Unauthorized.kind(), ErrorKind::AuthRejected);
        let rejected = ApiError::Rejected {
            status: 400,
            message: "Already on this plan".into(),
        };
        assert_eq!(rejected.kind(), ErrorKind::Business);
        assert_eq!(rejected.to_string(), "Already on this plan");
        assert_eq!(rejected.status(), Some(400));
    }
}
