use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::OffsetDateTime;

use crate::config::SecurityConfig;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// Moves the session token between the server and a returning client
/// through an HTTP-only cookie.
#[derive(Debug, Clone, Copy)]
pub struct SessionCarrier {
    secure: bool,
}

impl SessionCarrier {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(security.cookie_secure)
    }

    /// Set the session cookie, expiring `ttl` from now.
    pub fn attach(&self, jar: CookieJar, token: String, ttl: chrono::Duration) -> CookieJar {
        let expires = OffsetDateTime::now_utc() + time::Duration::seconds(ttl.num_seconds());
        jar.add(self.cookie(token, expires))
    }

    /// The session token, if the client sent one. Absence is not an error.
    pub fn extract(&self, jar: &CookieJar) -> Option<String> {
        jar.get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Overwrite the session cookie with an already expired, empty one.
    ///
    /// Always emitted, whether or not the request carried a session.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        let mut cookie = self.cookie(String::new(), OffsetDateTime::UNIX_EPOCH);
        cookie.set_max_age(time::Duration::ZERO);
        jar.add(cookie)
    }

    fn cookie(&self, value: String, expires: OffsetDateTime) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .expires(expires)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_cookie(jar: &CookieJar) -> Cookie<'static> {
        let cookies: Vec<Cookie<'static>> = jar.iter().cloned().collect();
        assert_eq!(cookies.len(), 1);
        cookies.into_iter().next().unwrap()
    }

    #[test]
    fn attach_sets_http_only_path_scoped_cookie() {
        let jar = SessionCarrier::new(false).attach(CookieJar::new(), "abc".into(), chrono::Duration::minutes(15));
        let cookie = set_cookie(&jar);

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_ne!(cookie.secure(), Some(true));

        let expires = cookie.expires_datetime().unwrap();
        let remaining = expires - OffsetDateTime::now_utc();
        assert!(remaining > time::Duration::minutes(14));
        assert!(remaining <= time::Duration::minutes(15));
    }

    #[test]
    fn secure_flag_follows_configuration() {
        let jar = SessionCarrier::new(true).attach(CookieJar::new(), "abc".into(), chrono::Duration::minutes(15));
        assert_eq!(set_cookie(&jar).secure(), Some(true));
    }

    #[test]
    fn extract_returns_none_without_cookie() {
        let carrier = SessionCarrier::new(false);
        assert_eq!(carrier.extract(&CookieJar::new()), None);

        let jar = CookieJar::new().add(Cookie::new("other", "value"));
        assert_eq!(carrier.extract(&jar), None);

        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, ""));
        assert_eq!(carrier.extract(&jar), None);
    }

    #[test]
    fn extract_returns_token_value() {
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, "xyz"));
        assert_eq!(SessionCarrier::new(false).extract(&jar), Some("xyz".to_string()));
    }

    #[test]
    fn clear_expires_cookie_in_the_past() {
        let jar = SessionCarrier::new(false).clear(CookieJar::new());
        let cookie = set_cookie(&jar);

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "");
        assert!(cookie.expires_datetime().unwrap() < OffsetDateTime::now_utc());
    }
}
