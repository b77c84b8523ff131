//! Survey endpoints: listing, creation (with owner promotion), edits,
//! publish toggles, and vote recording.

use axum::Json;
use axum::extract::{Path, State};
use canvass_core::models::participation::{CreateParticipation, Participation};
use canvass_core::models::survey::{CreateSurvey, Survey, SurveyStatus, UpdateSurvey};
use canvass_core::promotion::{PromotionEvent, apply_promotion};
use canvass_core::repository::{
    InsertOutcome, ParticipationRepository, SurveyRepository, UpdateOutcome,
};
use serde::{Deserialize, Serialize};
use surrealdb::Connection;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list<C: Connection>(
    State(state): State<AppState<C>>,
) -> Result<Json<Vec<Survey>>, ApiError> {
    Ok(Json(state.surveys().list().await?))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyCreated {
    pub result: InsertOutcome,
    /// Present when the owner's role was promoted alongside the insert.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_user_role: Option<UpdateOutcome>,
}

/// Insert the survey, then promote its owner to surveyor. The two steps
/// are not transactional: a committed insert stays committed even if
/// the promotion fails.
pub async fn create<C: Connection>(
    State(state): State<AppState<C>>,
    Json(input): Json<CreateSurvey>,
) -> Result<Json<SurveyCreated>, ApiError> {
    let owner = input.surveyor_email.clone();
    let result = state.surveys().insert(input).await?;

    let update_user_role =
        apply_promotion(&state.users(), &owner, PromotionEvent::SurveySubmitted).await?;

    Ok(Json(SurveyCreated {
        result,
        update_user_role,
    }))
}

pub async fn update<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateSurvey>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let outcome = state.surveys().update_details(id, input).await?;
    if !outcome.matched() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(outcome))
}

pub async fn publish<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<Uuid>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    set_status(&state, id, SurveyStatus::Publish).await
}

pub async fn unpublish<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<Uuid>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    set_status(&state, id, SurveyStatus::Unpublish).await
}

async fn set_status<C: Connection>(
    state: &AppState<C>,
    id: Uuid,
    status: SurveyStatus,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let outcome = state.surveys().set_status(id, status).await?;
    if !outcome.matched() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(outcome))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteSubmission {
    /// Caller-computed tally; stored as-is, never incremented.
    pub vote_count: u64,
    pub voter_name: String,
    pub voter_email: String,
    pub chosen_option: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecorded {
    pub tally: UpdateOutcome,
    pub participation: InsertOutcome,
}

/// Two independent effects, reported individually: the pair is not
/// atomic, and a partial outcome is surfaced rather than prevented.
/// A missing survey does not 404; the tally update reports
/// `matchedCount: 0` and the participation append still runs.
pub async fn vote<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<Uuid>,
    Json(vote): Json<VoteSubmission>,
) -> Result<Json<VoteRecorded>, ApiError> {
    let tally = state.surveys().set_vote_count(id, vote.vote_count).await?;

    let participation = state
        .participations()
        .append(CreateParticipation {
            voter_name: vote.voter_name,
            voter_email: vote.voter_email,
            survey_id: id,
            chosen_option: vote.chosen_option,
        })
        .await?;

    Ok(Json(VoteRecorded {
        tally,
        participation,
    }))
}

pub async fn list_participations<C: Connection>(
    State(state): State<AppState<C>>,
) -> Result<Json<Vec<Participation>>, ApiError> {
    Ok(Json(state.participations().list().await?))
}
