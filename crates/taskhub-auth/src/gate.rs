//! Activity and privilege checks applied after a token has been verified.
//!
//! Activity is always checked first, so an inactive admin gets the same
//! denial as any other inactive user.

use tracing::debug;

use crate::claims::UserClaims;
use crate::error::AuthError;

pub fn require_active(claims: &UserClaims) -> Result<(), AuthError> {
    if !claims.is_active {
        debug!(user.sub = %claims.sub, "Denied: inactive user");
        return Err(AuthError::AccessDenied);
    }
    Ok(())
}

pub fn require_admin(claims: &UserClaims) -> Result<(), AuthError> {
    require_active(claims)?;
    if !claims.is_admin {
        debug!(user.sub = %claims.sub, "Denied: admin required");
        return Err(AuthError::AccessDenied);
    }
    Ok(())
}
