use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::auth::RequestIdentity;
use crate::auth::{AuthError, Role};
use crate::error::ApiError;

/// Roles admitted by one `require_role` layer.
#[derive(Clone, Copy, Debug)]
pub struct AllowedRoles(pub &'static [Role]);

impl AllowedRoles {
    pub fn permits(&self, role: Role) -> bool {
        self.0.contains(&role)
    }
}

/// Role guard. Reads only the identity left by `require_auth`; without it
/// the request is treated as unauthenticated.
///
/// ```ignore
/// .route_layer(from_fn_with_state(AllowedRoles(&[Role::Admin]), require_role))
/// ```
pub async fn require_role(
    State(allowed): State<AllowedRoles>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = match RequestIdentity::from_extensions(request.extensions()) {
        Ok(identity) => identity,
        Err(err) => {
            tracing::warn!("Role check without identity on {}", request.uri().path());
            return Err(err);
        }
    };

    if !allowed.permits(identity.role) {
        let err = AuthError::RoleNotPermitted(identity.role);
        tracing::warn!(
            "Rejected user {} on {}: {}",
            identity.user_id,
            request.uri().path(),
            err.code()
        );
        return Err(err.into());
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permits_only_listed_roles() {
        let staff = AllowedRoles(&[Role::Teacher, Role::Admin]);
        assert!(staff.permits(Role::Teacher));
        assert!(staff.permits(Role::Admin));
        assert!(!staff.permits(Role::Student));

        assert!(!AllowedRoles(&[]).permits(Role::Admin));
    }
}
