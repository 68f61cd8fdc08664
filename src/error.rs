//! Errors raised while talking to the eCourts portal
//!
//! The `Display` text of each variant is what ends up on screen, so keep
//! the messages short and readable.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Could not reach eCourts: {0}")]
    Transport(String),
    #[error("eCourts responded with HTTP {0}")]
    Status(u16),
    #[error("{0}")]
    Upstream(String),
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ServiceError::Status(status.as_u16()),
            None if err.is_timeout() => {
                ServiceError::Transport("request timed out".to_string())
            }
            None => ServiceError::Transport(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_is_verbatim() {
        let err = ServiceError::Upstream("Server unreachable".to_string());
        assert_eq!(err.to_string(), "Server unreachable");
    }

    #[test]
    fn test_status_message() {
        assert_eq!(
            ServiceError::Status(503).to_string(),
            "eCourts responded with HTTP 503"
        );
    }
}
