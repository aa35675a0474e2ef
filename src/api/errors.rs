use std::time::Duration;

use thiserror::Error;

use super::Endpoint;

/// Failure of a backend call, split by where it went wrong.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The bounded wait expired before a complete reply arrived.
    #[error("{endpoint} timed out after {}s", .after.as_secs())]
    TimedOut { endpoint: Endpoint, after: Duration },
    /// Connection refused, reset, or DNS/URL trouble.
    #[error("Backend unreachable ({endpoint}): {message}")]
    Transport { endpoint: Endpoint, message: String },
    /// Non-2xx HTTP status.
    #[error("{endpoint} returned HTTP {code}: {body}")]
    Status {
        endpoint: Endpoint,
        code: u16,
        body: String,
    },
    /// The reply was not the JSON shape we expected.
    #[error("Malformed reply from {endpoint}: {message}")]
    Malformed { endpoint: Endpoint, message: String },
    /// The backend answered with `state` not true.
    #[error("{endpoint} failed: {}", rejection_text(.error, .message))]
    Rejected {
        endpoint: Endpoint,
        message: Option<String>,
        error: Option<String>,
    },
    /// The configured base URL cannot address the endpoint.
    #[error("Invalid backend URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

fn rejection_text<'a>(error: &'a Option<String>, message: &'a Option<String>) -> &'a str {
    error
        .as_deref()
        .or(message.as_deref())
        .unwrap_or("no error given")
}

impl ApiError {
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            Self::TimedOut { endpoint, .. }
            | Self::Transport { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Malformed { endpoint, .. }
            | Self::Rejected { endpoint, .. } => Some(*endpoint),
            Self::InvalidUrl { .. } => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }

    /// Backend-provided text, shown in place of the "in progress" label.
    ///
    /// The status line wins over the error text when both are present.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, error, .. } => message.as_deref().or(error.as_deref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_prefers_error_text() {
        let err = ApiError::Rejected {
            endpoint: Endpoint::Solve,
            message: Some("Solver failed".into()),
            error: Some("KeyError: 'Bmin'".into()),
        };
        assert_eq!(err.to_string(), "/solve failed: KeyError: 'Bmin'");
        assert_eq!(err.backend_message(), Some("Solver failed"));
    }

    #[test]
    fn rejection_without_message_surfaces_error_text() {
        let err = ApiError::Rejected {
            endpoint: Endpoint::Spreadsheet,
            message: None,
            error: Some("Spreadsheet for 2024-05-02 not found".into()),
        };
        assert_eq!(
            err.backend_message(),
            Some("Spreadsheet for 2024-05-02 not found")
        );
        let bare = ApiError::Rejected {
            endpoint: Endpoint::Spreadsheet,
            message: None,
            error: None,
        };
        assert_eq!(bare.backend_message(), None);
    }

    #[test]
    fn timeout_display_names_endpoint() {
        let err = ApiError::TimedOut {
            endpoint: Endpoint::Institution,
            after: Duration::from_secs(30),
        };
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "/institution timed out after 30s");
    }
}
