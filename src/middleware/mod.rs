pub mod auth;
pub mod extract;
pub mod response;
pub mod role;
pub mod session;

pub use auth::{require_auth, RequestIdentity};
pub use extract::{ApiJson, ApiPath};
pub use response::{ApiResponse, ApiResult};
pub use role::{require_role, AllowedRoles};
pub use session::{extract_session, SessionState};
