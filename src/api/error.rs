use thiserror::Error;

/// Failures from the movie database API.
///
/// `Cancelled` marks a superseded request. Controllers swallow it and never show it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Something went wrong (HTTP {status})")]
    Network { status: u16 },

    #[error("{0}")]
    NotFound(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ApiError::Network { status: status.as_u16() }
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_message() {
        let err = ApiError::Network { status: 503 };
        assert_eq!(err.to_string(), "Something went wrong (HTTP 503)");
    }

    #[test]
    fn test_not_found_message_passthrough() {
        let err = ApiError::NotFound("Movie not found!".to_string());
        assert_eq!(err.to_string(), "Movie not found!");
    }

    #[test]
    fn test_is_cancelled() {
        assert!(ApiError::Cancelled.is_cancelled());
        assert!(!ApiError::Transport("timeout".to_string()).is_cancelled());
    }

    #[test]
    fn test_from_serde_json_error() {
        let err: ApiError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
