use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::{AuthError, SessionClaims};
use crate::state::AppState;

/// Outcome of reading the session cookie, stored in request extensions.
///
/// Extraction never rejects; guards decide what each state means.
#[derive(Clone, Debug)]
pub enum SessionState {
    Anonymous,
    Rejected(AuthError),
    Authenticated(SessionClaims),
}

impl SessionState {
    pub fn resolve(state: &AppState, jar: &CookieJar) -> Self {
        match state.carrier.extract(jar) {
            None => SessionState::Anonymous,
            Some(token) => match state.codec.decode(&token) {
                Ok(claims) => SessionState::Authenticated(claims),
                Err(err) => SessionState::Rejected(err),
            },
        }
    }
}

/// Claim extraction middleware, applied to every route.
///
/// A stale or forged cookie on a public route must not break it, so this
/// only records what it found.
pub async fn extract_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let session = SessionState::resolve(&state, &jar);
    if let SessionState::Rejected(err) = &session {
        tracing::debug!("Session cookie rejected: {}", err.code());
    }

    request.extensions_mut().insert(session);
    next.run(request).await
}
