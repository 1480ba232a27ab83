//! Errors surfaced to the user when a weather lookup fails.
//!
//! Every variant renders as the exact message shown in place of the weather
//! display. The icon fetch never produces one of these.

use thiserror::Error;

/// Lookup failure, rendered verbatim to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The service answered with a non-success status.
    #[error("{}", status_message(.0))]
    Status(u16),

    #[error("Request timed out – server too slow")]
    Timeout,

    /// DNS failure, refused connection, unreachable network.
    #[error("Connection error – check internet or server down")]
    Connection,

    #[error("Unexpected request error: {0}")]
    Unexpected(String),
}

/// Fine-grained cause, for callers that style errors differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadInput,
    AuthFailure,
    NotFound,
    RateLimit,
    ServerError,
    NetworkFailure,
    Timeout,
    Unexpected,
}

/// Coarse taxonomy. None of these are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InputRejected,
    ServerFailure,
    Timeout,
    NetworkUnavailable,
    UnexpectedTransportError,
}

fn status_message(status: &u16) -> String {
    match *status {
        400 => "Bad request – check parameters".to_string(),
        401 => "Unauthorized – invalid API key".to_string(),
        402 => "Payment required".to_string(),
        403 => "Forbidden – access denied".to_string(),
        404 => "City not found".to_string(),
        429 => "Too many requests – rate limited".to_string(),
        500 => "Server error – try later".to_string(),
        503 => "Service unavailable".to_string(),
        other => format!("HTTP error {other}"),
    }
}

impl LookupError {
    /// Classify a transport error: timeout first, then connect, then anything else.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection
        } else {
            Self::Unexpected(err.to_string())
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Status(400) => ErrorKind::BadInput,
            Self::Status(401..=403) => ErrorKind::AuthFailure,
            Self::Status(404) => ErrorKind::NotFound,
            Self::Status(429) => ErrorKind::RateLimit,
            Self::Status(s) if *s >= 500 => ErrorKind::ServerError,
            Self::Status(_) => ErrorKind::BadInput,
            Self::Timeout => ErrorKind::Timeout,
            Self::Connection => ErrorKind::NetworkFailure,
            Self::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.kind() {
            ErrorKind::BadInput
            | ErrorKind::AuthFailure
            | ErrorKind::NotFound
            | ErrorKind::RateLimit => ErrorCategory::InputRejected,
            ErrorKind::ServerError => ErrorCategory::ServerFailure,
            ErrorKind::Timeout => ErrorCategory::Timeout,
            ErrorKind::NetworkFailure => ErrorCategory::NetworkUnavailable,
            ErrorKind::Unexpected => ErrorCategory::UnexpectedTransportError,
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        Self::from_reqwest(err)
    }
}
