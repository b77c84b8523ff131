//! User endpoints: registration, listing, operator role overrides, and
//! the four per-role predicates.

use axum::Json;
use axum::extract::{Path, State};
use canvass_auth::SessionClaims;
use canvass_core::models::user::{CreateUser, Role, User};
use canvass_core::repository::{InsertOutcome, RegisterOutcome, UpdateOutcome, UserRepository};
use serde::Serialize;
use surrealdb::Connection;
use uuid::Uuid;

use crate::authz::{ensure_identity_match, has_role};
use crate::error::ApiError;
use crate::extract::SessionUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RegisterResponse {
    Created(InsertOutcome),
    Exists { message: &'static str },
}

/// Idempotent registration: an existing email is reported, never
/// overwritten.
pub async fn register<C: Connection>(
    State(state): State<AppState<C>>,
    Json(input): Json<CreateUser>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let response = match state.users().register(input).await? {
        RegisterOutcome::Created(insert) => RegisterResponse::Created(insert),
        RegisterOutcome::AlreadyExists => RegisterResponse::Exists {
            message: "User already exists",
        },
    };
    Ok(Json(response))
}

pub async fn list<C: Connection>(
    State(state): State<AppState<C>>,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.users().list().await?))
}

/// Operator override: unconditional role set, admin targets included.
/// Deliberately ungated, mirroring the asymmetry of the promotion
/// engine's admin guard.
pub async fn make_pro_user<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<Uuid>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    set_role(&state, id, Role::ProUser).await
}

pub async fn make_user<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<Uuid>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    set_role(&state, id, Role::User).await
}

async fn set_role<C: Connection>(
    state: &AppState<C>,
    id: Uuid,
    role: Role,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let outcome = state.users().set_role_by_id(id, role).await?;
    if !outcome.matched() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(outcome))
}

// ---------------------------------------------------------------------------
// Role predicates
// ---------------------------------------------------------------------------
// Each predicate has its own route and its own boolean response key;
// the response shape is part of the client contract.

#[derive(Debug, Serialize)]
pub struct AdminFlag {
    pub admin: bool,
}

#[derive(Debug, Serialize)]
pub struct ProUserFlag {
    #[serde(rename = "proUser")]
    pub pro_user: bool,
}

#[derive(Debug, Serialize)]
pub struct SurveyorFlag {
    pub surveyor: bool,
}

#[derive(Debug, Serialize)]
pub struct UserFlag {
    pub user: bool,
}

async fn role_flag<C: Connection>(
    state: &AppState<C>,
    claims: &SessionClaims,
    email: &str,
    role: Role,
) -> Result<bool, ApiError> {
    ensure_identity_match(claims, email)?;
    has_role(&state.users(), email, role).await
}

pub async fn is_admin<C: Connection>(
    State(state): State<AppState<C>>,
    SessionUser(claims): SessionUser,
    Path(email): Path<String>,
) -> Result<Json<AdminFlag>, ApiError> {
    let admin = role_flag(&state, &claims, &email, Role::Admin).await?;
    Ok(Json(AdminFlag { admin }))
}

pub async fn is_pro_user<C: Connection>(
    State(state): State<AppState<C>>,
    SessionUser(claims): SessionUser,
    Path(email): Path<String>,
) -> Result<Json<ProUserFlag>, ApiError> {
    let pro_user = role_flag(&state, &claims, &email, Role::ProUser).await?;
    Ok(Json(ProUserFlag { pro_user }))
}

pub async fn is_surveyor<C: Connection>(
    State(state): State<AppState<C>>,
    SessionUser(claims): SessionUser,
    Path(email): Path<String>,
) -> Result<Json<SurveyorFlag>, ApiError> {
    let surveyor = role_flag(&state, &claims, &email, Role::Surveyor).await?;
    Ok(Json(SurveyorFlag { surveyor }))
}

pub async fn is_user<C: Connection>(
    State(state): State<AppState<C>>,
    SessionUser(claims): SessionUser,
    Path(email): Path<String>,
) -> Result<Json<UserFlag>, ApiError> {
    let user = role_flag(&state, &claims, &email, Role::User).await?;
    Ok(Json(UserFlag { user }))
}
