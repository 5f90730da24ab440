//! Session authentication core
//!
//! Stateless sessions: a signed token in an HTTP-only cookie is the only
//! record of a login. Nothing here writes HTTP responses; the guards in
//! `crate::middleware` do that.

pub mod claims;
pub mod codec;
pub mod cookie;
pub mod error;
pub mod password;

pub use claims::{Role, SessionClaims, UnknownRole};
pub use codec::TokenCodec;
pub use cookie::{SessionCarrier, SESSION_COOKIE};
pub use error::AuthError;
pub use password::{hash_password, verify_password, PasswordError};
