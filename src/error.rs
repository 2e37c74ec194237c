//! Error types for the vault client.
//!
//! Two families reach the user: checks that failed locally before any request
//! was made, and requests that failed. Neither is fatal; every view stays
//! usable and the user retries by hand.

use thiserror::Error;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Local form checks. The display text is what the user sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Please select files to upload")]
    NoFilesSelected,

    #[error("Name cannot be empty")]
    EmptyName,
}

/// Common error type for client operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Rejected before any request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server answered 401; the session has been dropped.
    #[error("unauthorized: {}", .message.as_deref().unwrap_or("session expired"))]
    Unauthorized { message: Option<String> },

    /// Any other non-2xx answer.
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not what the client expected.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl Error {
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Text to show the user: the local check, the server's own message
    /// verbatim, or the per-action fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::Validation(v) => v.to_string(),
            Error::Unauthorized { message: Some(m) } | Error::Status { message: Some(m), .. } => {
                m.clone()
            }
            _ => fallback.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(e.to_string())
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_shown_verbatim() {
        let err = Error::from(ValidationError::PasswordTooShort);
        assert!(err.is_validation());
        assert_eq!(err.user_message("Registration failed"), "Password must be at least 6 characters");
    }

    #[test]
    fn test_server_message_wins_over_fallback() {
        let err = Error::Status { status: 409, message: Some("Email already registered".into()) };
        assert_eq!(err.user_message("Registration failed"), "Email already registered");

        let err = Error::Unauthorized { message: Some("Invalid credentials".into()) };
        assert_eq!(err.user_message("Login failed"), "Invalid credentials");
    }

    #[test]
    fn test_fallback_without_server_message() {
        let err = Error::Status { status: 500, message: None };
        assert_eq!(err.user_message("Failed to load files"), "Failed to load files");
        let err = Error::Network("connection refused".into());
        assert_eq!(err.user_message("Failed to load files"), "Failed to load files");
    }

    #[test]
    fn test_display() {
        let err = Error::Unauthorized { message: None };
        assert_eq!(err.to_string(), "unauthorized: session expired");
        let err = Error::Status { status: 404, message: None };
        assert_eq!(err.to_string(), "request failed with status 404");
    }
}
