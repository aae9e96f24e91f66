use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Normalized backend failure, decoded from an `{ok: false, ...}` body or
/// synthesized from a bare non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiFailure {
    /// Machine-readable error code reported by the backend.
    pub error: String,
    pub message: Option<String>,
    /// HTTP status of the failing response, when one was received.
    pub status: Option<u16>,
    #[serde(rename = "requestId")]
    pub request_id: Option<String>,
}

impl ApiFailure {
    /// Human-facing rendering: backend message when present, with the
    /// request id appended for support lookups.
    pub fn display_message(&self, fallback: &str) -> String {
        let base = self.message.as_deref().unwrap_or(fallback);
        match &self.request_id {
            Some(id) => format!("{} (requestId: {})", base, id),
            None => base.to_string(),
        }
    }
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(msg) = &self.message {
            write!(f, ": {}", msg)?;
        }
        if let Some(status) = self.status {
            write!(f, " (status {})", status)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Backend error: {0}")]
    Api(ApiFailure),

    #[error("Validation failed: {}", .0.join(" "))]
    Validation(Vec<String>),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FolioError {
    /// The normalized backend failure, when this error carries one.
    pub fn api_failure(&self) -> Option<&ApiFailure> {
        match self {
            FolioError::Api(failure) => Some(failure),
            _ => None,
        }
    }

    /// Message suitable for per-operation UI state. Backend-reported
    /// errors are shown verbatim; everything else gets the fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            FolioError::Api(failure) => failure.display_message(fallback),
            FolioError::Validation(errors) => errors.join(" "),
            FolioError::Config(msg) => msg.clone(),
            _ => fallback.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_message_appends_request_id() {
        let failure = ApiFailure {
            error: "SlugTaken".into(),
            message: Some("Slug already exists.".into()),
            status: Some(409),
            request_id: Some("req-42".into()),
        };
        assert_eq!(
            failure.display_message("Failed to save blog post."),
            "Slug already exists. (requestId: req-42)"
        );
    }

    #[test]
    fn test_display_message_falls_back_without_backend_message() {
        let failure = ApiFailure {
            error: "RequestError".into(),
            message: None,
            status: Some(500),
            request_id: None,
        };
        assert_eq!(
            failure.display_message("Failed to save blog post."),
            "Failed to save blog post."
        );
    }

    #[test]
    fn test_user_message_joins_validation_errors() {
        let err = FolioError::Validation(vec![
            "Post title is required.".into(),
            "Post date is required.".into(),
        ]);
        assert_eq!(
            err.user_message("Failed."),
            "Post title is required. Post date is required."
        );
    }
}
