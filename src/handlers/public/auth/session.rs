// handlers/public/auth/session.rs - POST /user/sign-out handler

use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;

use crate::middleware::ApiResponse;
use crate::state::AppState;

/// POST /user/sign-out - Expire the session cookie
///
/// Not guarded: signing out without a session, or with an expired one,
/// still answers 200 and still sends the expired cookie. The token itself
/// stays valid until its `exp`; there is no revocation list.
pub async fn sign_out(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, ApiResponse<&'static str>) {
    (state.carrier.clear(jar), ApiResponse::success("Signed out"))
}
