use serde::Serialize;
use std::sync::OnceLock;

use crate::auth::{hash_password, verify_password, AuthError, Role};
use crate::database::{DatabaseError, UserRepository};
use crate::error::ApiError;

/// Outcome of a successful credential check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedUser {
    pub user_id: i32,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::Auth(e) => e.into(),
            CredentialError::Database(e) => e.into(),
        }
    }
}

/// Checks a username/password pair against the stored Argon2 hashes.
pub struct CredentialStore<'a, R: UserRepository + ?Sized> {
    users: &'a R,
}

impl<'a, R: UserRepository + ?Sized> CredentialStore<'a, R> {
    pub fn new(users: &'a R) -> Self {
        Self { users }
    }

    /// Unknown users and wrong passwords both come back as
    /// `CredentialMismatch`, and both pay for one hash verification.
    pub async fn verify(&self, username: &str, password: &str) -> Result<VerifiedUser, CredentialError> {
        let user = match self.users.find_user_by_name(username).await? {
            Some(user) => user,
            None => {
                if let Some(hash) = placeholder_hash() {
                    verify_password(password, hash);
                }
                return Err(AuthError::CredentialMismatch.into());
            }
        };

        if !verify_password(password, &user.password_hash) {
            return Err(AuthError::CredentialMismatch.into());
        }

        Ok(VerifiedUser {
            user_id: user.user_id,
            username: user.name,
            role: user.role,
        })
    }
}

fn placeholder_hash() -> Option<&'static str> {
    static HASH: OnceLock<Option<String>> = OnceLock::new();
    HASH.get_or_init(|| hash_password("placeholder-password").ok())
        .as_deref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::NewUser;
    use crate::database::MemoryStore;

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .create_user(NewUser {
                name: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password_hash: hash_password("Secret123!").unwrap(),
                role: Role::Student,
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn accepts_correct_password() {
        let store = seeded().await;
        let verified = CredentialStore::new(&store).verify("alice", "Secret123!").await.unwrap();
        assert_eq!(verified.username, "alice");
        assert_eq!(verified.role, Role::Student);
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_look_the_same() {
        let store = seeded().await;
        let credentials = CredentialStore::new(&store);

        let wrong = credentials.verify("alice", "wrong").await.unwrap_err();
        let unknown = credentials.verify("mallory", "Secret123!").await.unwrap_err();

        assert!(matches!(wrong, CredentialError::Auth(AuthError::CredentialMismatch)));
        assert!(matches!(unknown, CredentialError::Auth(AuthError::CredentialMismatch)));
        assert_eq!(ApiError::from(wrong).message(), ApiError::from(unknown).message());
    }
}
