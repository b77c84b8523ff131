//! Comment and report endpoints — append-only collections, separate
//! from the survey documents they reference.

use axum::Json;
use axum::extract::State;
use canvass_core::models::comment::{Comment, CreateComment};
use canvass_core::models::report::{CreateReport, Report};
use canvass_core::repository::{CommentRepository, InsertOutcome, ReportRepository};
use surrealdb::Connection;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn create_comment<C: Connection>(
    State(state): State<AppState<C>>,
    Json(input): Json<CreateComment>,
) -> Result<Json<InsertOutcome>, ApiError> {
    Ok(Json(state.comments().append(input).await?))
}

pub async fn list_comments<C: Connection>(
    State(state): State<AppState<C>>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    Ok(Json(state.comments().list().await?))
}

pub async fn create_report<C: Connection>(
    State(state): State<AppState<C>>,
    Json(input): Json<CreateReport>,
) -> Result<Json<InsertOutcome>, ApiError> {
    Ok(Json(state.reports().append(input).await?))
}

pub async fn list_reports<C: Connection>(
    State(state): State<AppState<C>>,
) -> Result<Json<Vec<Report>>, ApiError> {
    Ok(Json(state.reports().list().await?))
}
