//! Error types for the booking API client.
//!
//! # Design
//! Three classes of failure, none of them retried: configuration errors
//! (raised before any network activity), contract violations (unexpected
//! status or malformed body, named with expected vs actual), and transport
//! errors carried through from ureq untouched.

use std::fmt;

/// Errors returned by `BookingClient` operations and `Config` construction.
#[derive(Debug)]
pub enum ApiError {
    /// The environment selector was neither `test` nor `prod`.
    UnsupportedEnvironment(String),

    /// A required environment variable was not set.
    MissingConfig(&'static str),

    /// The server answered with a status code other than the one this
    /// endpoint's contract requires.
    UnexpectedStatus { expected: u16, actual: u16 },

    /// The auth endpoint answered 200 but the body carried no token.
    MissingToken,

    /// Transport-level failure (timeout, connection refused, DNS), carried
    /// through from ureq unmodified.
    Transport(ureq::Error),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::UnsupportedEnvironment(value) => {
                write!(f, "unsupported environment value: {value}")
            }
            ApiError::MissingConfig(var) => {
                write!(f, "missing environment variable: {var}")
            }
            ApiError::UnexpectedStatus { expected, actual } => {
                write!(f, "expected status code {expected} but got {actual}")
            }
            ApiError::MissingToken => write!(f, "auth response carried no token"),
            ApiError::Transport(e) => write!(f, "transport error: {e}"),
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ureq::Error> for ApiError {
    fn from(e: ureq::Error) -> Self {
        ApiError::Transport(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_status_names_both_codes() {
        let err = ApiError::UnexpectedStatus {
            expected: 201,
            actual: 405,
        };
        assert_eq!(err.to_string(), "expected status code 201 but got 405");
    }

    #[test]
    fn unsupported_environment_names_the_value() {
        let err = ApiError::UnsupportedEnvironment("staging".to_string());
        assert_eq!(err.to_string(), "unsupported environment value: staging");
    }

    #[test]
    fn missing_config_names_the_variable() {
        let err = ApiError::MissingConfig("TEST_BASE_URL");
        assert_eq!(err.to_string(), "missing environment variable: TEST_BASE_URL");
    }
}
