//! Authorization checks, layered after authentication.
//!
//! Two independent checks compose per endpoint: an identity match
//! between the route parameter and the token identity, and a stored
//! role comparison against the store.

use canvass_auth::SessionClaims;
use canvass_core::models::user::Role;
use canvass_core::repository::UserRepository;

use crate::error::ApiError;

/// The email embedded in the route must equal the authenticated
/// identity's email. Prevents one authenticated user from querying
/// another's role.
pub fn ensure_identity_match(claims: &SessionClaims, email: &str) -> Result<(), ApiError> {
    if claims.email != email {
        return Err(ApiError::Forbidden);
    }
    Ok(())
}

/// True iff the stored role of `email` equals `role`.
///
/// A missing user record fails the check (`false`); it never aborts the
/// request.
pub async fn has_role<U: UserRepository>(
    users: &U,
    email: &str,
    role: Role,
) -> Result<bool, ApiError> {
    let user = users.find_by_email(email).await?;
    Ok(user.is_some_and(|u| u.role == role))
}
