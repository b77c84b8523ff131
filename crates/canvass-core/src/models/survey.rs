//! Survey domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Publication state of a survey. New surveys start as drafts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SurveyStatus {
    Draft,
    Publish,
    Unpublish,
}

impl SurveyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurveyStatus::Draft => "draft",
            SurveyStatus::Publish => "publish",
            SurveyStatus::Unpublish => "unpublish",
        }
    }

    pub fn parse(s: &str) -> Option<SurveyStatus> {
        match s {
            "draft" => Some(SurveyStatus::Draft),
            "publish" => Some(SurveyStatus::Publish),
            "unpublish" => Some(SurveyStatus::Unpublish),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub deadline: DateTime<Utc>,
    pub status: SurveyStatus,
    /// Caller-maintained vote tally. The recorder overwrites this with
    /// whatever value the client supplies; it is never incremented
    /// server-side.
    pub vote_count: u64,
    /// Email of the owning surveyor. Join key into the user collection;
    /// no referential integrity is enforced.
    pub surveyor_email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSurvey {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub deadline: DateTime<Utc>,
    pub surveyor_email: String,
}

/// Partial edit of a survey's descriptive fields. `None` leaves the
/// stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSurvey {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}
