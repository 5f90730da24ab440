use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::{Role, SessionClaims};
use super::error::AuthError;
use crate::config::SecurityConfig;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Signs and verifies session tokens with a single shared HMAC secret.
///
/// Built once at startup from configuration and shared read-only between
/// requests. Only HS256 is accepted on decode.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    ttl: Duration,
}

impl TokenCodec {
    /// `secret` must be non-empty; `AppConfig` refuses to start without one.
    pub fn new(secret: &str, issuer: impl Into<String>, ttl: Duration) -> Self {
        debug_assert!(!secret.is_empty(), "token secret must not be empty");
        let issuer = issuer.into();

        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer,
            ttl,
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(
            &security.jwt_secret,
            security.jwt_issuer.clone(),
            Duration::minutes(security.access_token_ttl_minutes),
        )
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Mint claims valid from `now` for one TTL.
    pub fn claims_for(&self, user_id: i32, username: &str, role: Role, now: DateTime<Utc>) -> SessionClaims {
        SessionClaims {
            user_id,
            username: username.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            iss: self.issuer.clone(),
        }
    }

    pub fn encode(&self, claims: &SessionClaims) -> Result<String, AuthError> {
        encode(&Header::new(ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    pub fn decode(&self, token: &str) -> Result<SessionClaims, AuthError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthError::TokenBadSignature,
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenMalformed,
            })
    }
}
