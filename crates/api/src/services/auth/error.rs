//! Authentication error type.

use thiserror::Error;

use crate::store::StoreError;

/// Errors from credential verification and token handling.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No account registered under the supplied email.
    #[error("user not found")]
    UnknownUser,

    /// Password did not match the stored hash.
    #[error("wrong password")]
    InvalidCredentials,

    /// No bearer credential present on the request.
    #[error("not authenticated")]
    MissingCredentials,

    /// Bearer token malformed, signature invalid, or expired.
    #[error("not authenticated")]
    InvalidToken,

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Token signing failed.
    #[error("token signing failed")]
    TokenSigning,

    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
