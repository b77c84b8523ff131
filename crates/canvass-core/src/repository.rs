//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Filters are only ever "by
//! generated id" or "by email equality"; the store performs no
//! referential-integrity checks across collections.

use uuid::Uuid;

use crate::error::CanvassResult;
use crate::models::{
    comment::{Comment, CreateComment},
    participation::{CreateParticipation, Participation},
    payment::{CreatePayment, Payment},
    report::{CreateReport, Report},
    survey::{CreateSurvey, Survey, SurveyStatus, UpdateSurvey},
    user::{CreateUser, Role, User},
};

use serde::{Deserialize, Serialize};

/// Result descriptor for a document insert, echoed back to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub inserted_id: String,
}

/// Result descriptor for a targeted field update, echoed back to
/// callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl UpdateOutcome {
    /// True when the targeted document existed.
    pub fn matched(&self) -> bool {
        self.matched_count > 0
    }
}

/// Outcome of an idempotent registration.
#[derive(Debug, Clone)]
pub enum RegisterOutcome {
    /// A new user document was inserted.
    Created(InsertOutcome),
    /// A user with this email already exists; nothing was written.
    AlreadyExists,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

pub trait UserRepository: Send + Sync {
    /// Idempotent: registering an existing email is a no-op reported as
    /// [`RegisterOutcome::AlreadyExists`]; the stored record (its role
    /// included) is never touched.
    fn register(
        &self,
        input: CreateUser,
    ) -> impl Future<Output = CanvassResult<RegisterOutcome>> + Send;

    /// A missing user is a valid outcome (`Ok(None)`), never an error —
    /// surveys and payments may reference emails with no user document.
    fn find_by_email(&self, email: &str)
    -> impl Future<Output = CanvassResult<Option<User>>> + Send;

    fn list(&self) -> impl Future<Output = CanvassResult<Vec<User>>> + Send;

    /// Single atomic update of the role field, targeted by record id.
    fn set_role_by_id(
        &self,
        id: Uuid,
        role: Role,
    ) -> impl Future<Output = CanvassResult<UpdateOutcome>> + Send;

    /// Single atomic update of the role field, targeted by email.
    fn set_role_by_email(
        &self,
        email: &str,
        role: Role,
    ) -> impl Future<Output = CanvassResult<UpdateOutcome>> + Send;
}

// ---------------------------------------------------------------------------
// Surveys
// ---------------------------------------------------------------------------

pub trait SurveyRepository: Send + Sync {
    /// New surveys are stored with status `draft` and a zero vote tally.
    fn insert(
        &self,
        input: CreateSurvey,
    ) -> impl Future<Output = CanvassResult<InsertOutcome>> + Send;

    fn find_by_id(&self, id: Uuid) -> impl Future<Output = CanvassResult<Option<Survey>>> + Send;

    fn list(&self) -> impl Future<Output = CanvassResult<Vec<Survey>>> + Send;

    fn update_details(
        &self,
        id: Uuid,
        input: UpdateSurvey,
    ) -> impl Future<Output = CanvassResult<UpdateOutcome>> + Send;

    fn set_status(
        &self,
        id: Uuid,
        status: SurveyStatus,
    ) -> impl Future<Output = CanvassResult<UpdateOutcome>> + Send;

    /// Overwrites the tally with the supplied value. The caller computes
    /// the tally; this is not an increment.
    fn set_vote_count(
        &self,
        id: Uuid,
        vote_count: u64,
    ) -> impl Future<Output = CanvassResult<UpdateOutcome>> + Send;
}

// ---------------------------------------------------------------------------
// Append-only ledgers
// ---------------------------------------------------------------------------

pub trait ParticipationRepository: Send + Sync {
    /// Append one record per vote cast. No update or delete operations
    /// exist.
    fn append(
        &self,
        input: CreateParticipation,
    ) -> impl Future<Output = CanvassResult<InsertOutcome>> + Send;

    fn list(&self) -> impl Future<Output = CanvassResult<Vec<Participation>>> + Send;
}

pub trait PaymentRepository: Send + Sync {
    fn append(
        &self,
        input: CreatePayment,
    ) -> impl Future<Output = CanvassResult<InsertOutcome>> + Send;

    fn list(&self) -> impl Future<Output = CanvassResult<Vec<Payment>>> + Send;
}

pub trait CommentRepository: Send + Sync {
    fn append(
        &self,
        input: CreateComment,
    ) -> impl Future<Output = CanvassResult<InsertOutcome>> + Send;

    fn list(&self) -> impl Future<Output = CanvassResult<Vec<Comment>>> + Send;
}

pub trait ReportRepository: Send + Sync {
    fn append(
        &self,
        input: CreateReport,
    ) -> impl Future<Output = CanvassResult<InsertOutcome>> + Send;

    fn list(&self) -> impl Future<Output = CanvassResult<Vec<Report>>> + Send;
}
