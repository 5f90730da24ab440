pub mod credentials;

pub use credentials::{CredentialError, CredentialStore, VerifiedUser};
