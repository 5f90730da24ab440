use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request},
    http::{request::Parts, Extensions},
    middleware::Next,
    response::Response,
};

use super::session::SessionState;
use crate::auth::{AuthError, Role, SessionClaims};
use crate::error::ApiError;

/// Authenticated caller, present in request extensions only after
/// `require_auth` has accepted the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestIdentity {
    pub user_id: i32,
    pub username: String,
    pub role: Role,
}

impl From<SessionClaims> for RequestIdentity {
    fn from(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
            role: claims.role,
        }
    }
}

impl RequestIdentity {
    /// The one way handlers and guards read the caller.
    pub fn from_extensions(extensions: &Extensions) -> Result<Self, ApiError> {
        extensions
            .get::<RequestIdentity>()
            .cloned()
            .ok_or_else(|| AuthError::TokenMissing.into())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        RequestIdentity::from_extensions(&parts.extensions)
    }
}

/// Authentication guard: rejects anything short of a valid session.
pub async fn require_auth(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let session = request
        .extensions()
        .get::<SessionState>()
        .cloned()
        .unwrap_or(SessionState::Anonymous);

    let claims = match session {
        SessionState::Authenticated(claims) => claims,
        SessionState::Anonymous => {
            tracing::warn!("Rejected {} {}: {}", request.method(), request.uri().path(), AuthError::TokenMissing.code());
            return Err(AuthError::TokenMissing.into());
        }
        SessionState::Rejected(err) => {
            tracing::warn!("Rejected {} {}: {}", request.method(), request.uri().path(), err.code());
            return Err(err.into());
        }
    };

    request.extensions_mut().insert(RequestIdentity::from(claims));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_identity_is_unauthorized() {
        let err = RequestIdentity::from_extensions(&Extensions::new()).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn identity_from_claims() {
        let claims = SessionClaims {
            user_id: 7,
            username: "alice".to_string(),
            role: Role::Student,
            iat: 0,
            exp: 60,
            iss: "elearning".to_string(),
        };
        let mut extensions = Extensions::new();
        extensions.insert(RequestIdentity::from(claims));

        let identity = RequestIdentity::from_extensions(&extensions).unwrap();
        assert_eq!(identity.user_id, 7);
        assert_eq!(identity.role, Role::Student);
    }
}
