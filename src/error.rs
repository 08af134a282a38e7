// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! Errors never reach the user with detail attached: the client controller
//! converts them into a terse [`Notice`](crate::models::Notice) or an empty
//! result and logs the rest.

/// Application error type shared by all collaborators.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error("Motion sensor error: {0}")]
    Sensor(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Client-side checks that short-circuit an operation before any backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PreconditionError {
    #[error("no image selected")]
    MissingImage,

    #[error("no image name entered")]
    MissingName,

    #[error("no signed-in user")]
    MissingIdentity,
}

impl AppError {
    /// Firebase error code for "the email/password pair is wrong".
    pub const INVALID_CREDENTIALS: &'static str = "INVALID_LOGIN_CREDENTIALS";

    /// Returns true if this error came from a client-side precondition.
    pub fn is_precondition(&self) -> bool {
        matches!(self, AppError::Precondition(_))
    }

    /// Returns true if the identity backend rejected the credentials themselves
    /// (as opposed to a transport or server failure).
    pub fn is_credential_error(&self) -> bool {
        match self {
            AppError::Auth(msg) => {
                msg.contains(Self::INVALID_CREDENTIALS)
                    || msg.contains("INVALID_PASSWORD")
                    || msg.contains("EMAIL_NOT_FOUND")
                    || msg.contains("INVALID_EMAIL")
                    || msg.contains("WEAK_PASSWORD")
                    || msg.contains("EMAIL_EXISTS")
            }
            _ => false,
        }
    }
}

/// Result type alias for collaborator operations.
pub type Result<T> = std::result::Result<T, AppError>;
