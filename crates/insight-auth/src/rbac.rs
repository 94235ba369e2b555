// Role-based access helpers (RBAC)

use crate::error::{AuthError, AuthResult};
use insight_commons::{InternalUser, Role};

/// Gate an already-resolved user against a route's role allow-list.
///
/// Failing here means "who you are is known, but you may not do this":
/// `AuthError::Forbidden`, distinct from any authentication failure.
pub fn require_roles(allowed: &[Role], user: &InternalUser) -> AuthResult<()> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        Err(AuthError::Forbidden(format!(
            "Role '{}' is not permitted to perform this operation",
            user.role
        )))
    }
}

/// Check if a role has admin privileges.
#[inline]
pub fn is_admin_role(role: Role) -> bool {
    matches!(role, Role::Admin)
}
