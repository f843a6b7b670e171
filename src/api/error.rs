//! API Error Types

use thiserror::Error;

/// Errors surfaced by the REST and streaming clients.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("network request failed: {0}")]
    Network(String),

    #[error("server returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("request was aborted")]
    Aborted,
}

impl ApiError {
    /// True for user-initiated aborts, which pages suppress from error UI.
    pub fn is_aborted(&self) -> bool {
        matches!(self, ApiError::Aborted)
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            status: 404,
            message: "stream not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "server returned status 404: stream not found"
        );
    }

    #[test]
    fn test_is_aborted() {
        assert!(ApiError::Aborted.is_aborted());
        assert!(!ApiError::Network("offline".to_string()).is_aborted());
    }
}
