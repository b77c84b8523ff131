//! Participation record domain model.
//!
//! One record per vote cast. Append-only: records are never updated or
//! deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    pub id: Uuid,
    pub voter_name: String,
    pub voter_email: String,
    pub survey_id: Uuid,
    pub chosen_option: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParticipation {
    pub voter_name: String,
    pub voter_email: String,
    pub survey_id: Uuid,
    pub chosen_option: String,
}
