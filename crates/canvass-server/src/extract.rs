//! Authentication gate.
//!
//! Extracts and verifies the session cookie before a handler runs. The
//! gate is pure with respect to the store — rejected requests never
//! reach a repository.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use canvass_auth::token::validate_session_token;
use canvass_auth::{SessionClaims, ValidatedClaims};
use surrealdb::Connection;
use tracing::warn;

use crate::error::ApiError;
use crate::session::SESSION_COOKIE;
use crate::state::AppState;

/// Authenticated request identity, decoded from the session cookie.
///
/// Absent or unverifiable tokens (malformed, bad signature, expired)
/// are all rejected identically as 401.
pub struct SessionUser(pub SessionClaims);

impl<C: Connection> FromRequestParts<AppState<C>> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<C>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Err(ApiError::Unauthenticated);
        };

        let ValidatedClaims(claims) =
            validate_session_token(cookie.value(), &state.auth).map_err(|e| {
                warn!(error = %e, "session token rejected");
                ApiError::Unauthenticated
            })?;

        Ok(SessionUser(claims))
    }
}
