//! Session open/close endpoints.
//!
//! `POST /jwt` signs whatever identity the client presents and delivers
//! it as the session cookie. `POST /clear-jwt` clears the cookie; the
//! token itself stays valid until its natural expiry (no server-side
//! blacklist).

use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;
use canvass_auth::SessionIdentity;
use canvass_auth::token::issue_session_token;
use serde::Serialize;
use surrealdb::Connection;
use tracing::error;

use crate::error::ApiError;
use crate::session::session_cookie;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionChanged {
    pub success: bool,
}

pub async fn issue_token<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
    Json(identity): Json<SessionIdentity>,
) -> Result<(CookieJar, Json<SessionChanged>), ApiError> {
    let token = issue_session_token(identity, &state.auth).map_err(|e| {
        error!(error = %e, "failed to sign session token");
        ApiError::Internal
    })?;

    let jar = jar.add(session_cookie(token, state.production));
    Ok((jar, Json(SessionChanged { success: true })))
}

pub async fn clear_token<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
) -> (CookieJar, Json<SessionChanged>) {
    let jar = jar.remove(session_cookie(String::new(), state.production));
    (jar, Json(SessionChanged { success: true }))
}
