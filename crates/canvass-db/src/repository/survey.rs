//! SurrealDB implementation of [`SurveyRepository`].
//!
//! `set_vote_count` overwrites the tally with the caller-supplied value.
//! The vote/participation pair is deliberately not transactional; each
//! write stands alone.

use canvass_core::error::CanvassResult;
use canvass_core::models::survey::{CreateSurvey, Survey, SurveyStatus, UpdateSurvey};
use canvass_core::repository::{InsertOutcome, SurveyRepository, UpdateOutcome};
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct SurveyRow {
    title: String,
    description: String,
    category: String,
    image: String,
    deadline: DateTime<Utc>,
    status: String,
    vote_count: u64,
    surveyor_email: String,
    created_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct SurveyRowWithId {
    record_id: String,
    title: String,
    description: String,
    category: String,
    image: String,
    deadline: DateTime<Utc>,
    status: String,
    vote_count: u64,
    surveyor_email: String,
    created_at: DateTime<Utc>,
}

fn parse_status(s: &str) -> Result<SurveyStatus, DbError> {
    SurveyStatus::parse(s).ok_or_else(|| DbError::Migration(format!("unknown survey status: {s}")))
}

impl SurveyRow {
    fn into_survey(self, id: Uuid) -> Result<Survey, DbError> {
        Ok(Survey {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            image: self.image,
            deadline: self.deadline,
            status: parse_status(&self.status)?,
            vote_count: self.vote_count,
            surveyor_email: self.surveyor_email,
            created_at: self.created_at,
        })
    }
}

impl SurveyRowWithId {
    fn try_into_survey(self) -> Result<Survey, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Migration(format!("invalid UUID: {e}")))?;
        Ok(Survey {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            image: self.image,
            deadline: self.deadline,
            status: parse_status(&self.status)?,
            vote_count: self.vote_count,
            surveyor_email: self.surveyor_email,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the Survey repository.
#[derive(Clone)]
pub struct SurrealSurveyRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealSurveyRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> SurveyRepository for SurrealSurveyRepository<C> {
    async fn insert(&self, input: CreateSurvey) -> CanvassResult<InsertOutcome> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('survey', $id) SET \
                 title = $title, description = $description, \
                 category = $category, image = $image, \
                 deadline = $deadline, status = 'draft', \
                 vote_count = 0, surveyor_email = $surveyor_email",
            )
            .bind(("id", id_str.clone()))
            .bind(("title", input.title))
            .bind(("description", input.description))
            .bind(("category", input.category))
            .bind(("image", input.image))
            .bind(("deadline", input.deadline))
            .bind(("surveyor_email", input.surveyor_email))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<SurveyRow> = result.take(0).map_err(DbError::from)?;
        rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "survey".into(),
            id: id_str.clone(),
        })?;

        Ok(InsertOutcome {
            inserted_id: id_str,
        })
    }

    async fn find_by_id(&self, id: Uuid) -> CanvassResult<Option<Survey>> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('survey', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SurveyRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.into_survey(id)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> CanvassResult<Vec<Survey>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM survey \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SurveyRowWithId> = result.take(0).map_err(DbError::from)?;
        let surveys = rows
            .into_iter()
            .map(|row| row.try_into_survey())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(surveys)
    }

    async fn update_details(&self, id: Uuid, input: UpdateSurvey) -> CanvassResult<UpdateOutcome> {
        let mut sets = Vec::new();
        if input.title.is_some() {
            sets.push("title = $title");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        if input.category.is_some() {
            sets.push("category = $category");
        }
        if input.image.is_some() {
            sets.push("image = $image");
        }
        if input.deadline.is_some() {
            sets.push("deadline = $deadline");
        }

        if sets.is_empty() {
            // Nothing to write; report whether the target exists.
            let n = u64::from(self.find_by_id(id).await?.is_some());
            return Ok(UpdateOutcome {
                matched_count: n,
                modified_count: 0,
            });
        }

        let query = format!(
            "UPDATE type::record('survey', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id.to_string()));

        if let Some(title) = input.title {
            builder = builder.bind(("title", title));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(category) = input.category {
            builder = builder.bind(("category", category));
        }
        if let Some(image) = input.image {
            builder = builder.bind(("image", image));
        }
        if let Some(deadline) = input.deadline {
            builder = builder.bind(("deadline", deadline));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<SurveyRow> = result.take(0).map_err(DbError::from)?;
        let n = rows.len() as u64;
        Ok(UpdateOutcome {
            matched_count: n,
            modified_count: n,
        })
    }

    async fn set_status(&self, id: Uuid, status: SurveyStatus) -> CanvassResult<UpdateOutcome> {
        let mut result = self
            .db
            .query("UPDATE type::record('survey', $id) SET status = $status")
            .bind(("id", id.to_string()))
            .bind(("status", status.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SurveyRow> = result.take(0).map_err(DbError::from)?;
        let n = rows.len() as u64;
        Ok(UpdateOutcome {
            matched_count: n,
            modified_count: n,
        })
    }

    async fn set_vote_count(&self, id: Uuid, vote_count: u64) -> CanvassResult<UpdateOutcome> {
        let mut result = self
            .db
            .query("UPDATE type::record('survey', $id) SET vote_count = $vote_count")
            .bind(("id", id.to_string()))
            .bind(("vote_count", vote_count))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SurveyRow> = result.take(0).map_err(DbError::from)?;
        let n = rows.len() as u64;
        Ok(UpdateOutcome {
            matched_count: n,
            modified_count: n,
        })
    }
}
