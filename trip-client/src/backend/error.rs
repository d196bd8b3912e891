//! Backend client error types.

use std::fmt;

/// Errors from the backend HTTP clients.
#[derive(Debug)]
pub enum BackendError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    Api { status: u16, message: String },

    /// The requested resource does not exist (unknown line, no itineraries)
    NotFound { what: String },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Http(e) => write!(f, "HTTP error: {e}"),
            BackendError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            BackendError::Api { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            BackendError::NotFound { what } => write!(f, "not found: {what}"),
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackendError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = BackendError::NotFound {
            what: "transit line L99".into(),
        };
        assert_eq!(err.to_string(), "not found: transit line L99");

        let err = BackendError::Api {
            status: 502,
            message: "upstream router unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 502: upstream router unavailable");

        let err = BackendError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("<html>"));
    }
}
