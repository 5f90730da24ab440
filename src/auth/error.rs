use thiserror::Error;

use super::claims::Role;

/// Authentication and authorization failures.
///
/// Inner components (codec, carrier, credential store) only return these;
/// the guards and login handler are the sole places that turn them into
/// HTTP responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no session token provided")]
    TokenMissing,

    #[error("session token is malformed")]
    TokenMalformed,

    #[error("session token signature does not match")]
    TokenBadSignature,

    #[error("session token has expired")]
    TokenExpired,

    #[error("role '{0}' is not permitted here")]
    RoleNotPermitted(Role),

    #[error("credentials do not match")]
    CredentialMismatch,

    #[error("failed to sign session token: {0}")]
    Signing(String),
}

impl AuthError {
    /// Stable internal code, for logs only.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::TokenMissing => "TOKEN_MISSING",
            AuthError::TokenMalformed => "TOKEN_MALFORMED",
            AuthError::TokenBadSignature => "TOKEN_BAD_SIGNATURE",
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::RoleNotPermitted(_) => "ROLE_NOT_PERMITTED",
            AuthError::CredentialMismatch => "CREDENTIAL_MISMATCH",
            AuthError::Signing(_) => "TOKEN_SIGNING_FAILED",
        }
    }
}
