//! SurrealDB implementation of [`ParticipationRepository`].

use canvass_core::error::CanvassResult;
use canvass_core::models::participation::{CreateParticipation, Participation};
use canvass_core::repository::{InsertOutcome, ParticipationRepository};
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct ParticipationRow {
    voter_name: String,
    voter_email: String,
    survey_id: String,
    chosen_option: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct ParticipationRowWithId {
    record_id: String,
    voter_name: String,
    voter_email: String,
    survey_id: String,
    chosen_option: String,
    created_at: DateTime<Utc>,
}

impl ParticipationRowWithId {
    fn try_into_participation(self) -> Result<Participation, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Migration(format!("invalid UUID: {e}")))?;
        let survey_id = Uuid::parse_str(&self.survey_id)
            .map_err(|e| DbError::Migration(format!("invalid survey UUID: {e}")))?;
        Ok(Participation {
            id,
            voter_name: self.voter_name,
            voter_email: self.voter_email,
            survey_id,
            chosen_option: self.chosen_option,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the Participation repository.
#[derive(Clone)]
pub struct SurrealParticipationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealParticipationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ParticipationRepository for SurrealParticipationRepository<C> {
    async fn append(&self, input: CreateParticipation) -> CanvassResult<InsertOutcome> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('participation', $id) SET \
                 voter_name = $voter_name, voter_email = $voter_email, \
                 survey_id = $survey_id, chosen_option = $chosen_option",
            )
            .bind(("id", id_str.clone()))
            .bind(("voter_name", input.voter_name))
            .bind(("voter_email", input.voter_email))
            .bind(("survey_id", input.survey_id.to_string()))
            .bind(("chosen_option", input.chosen_option))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<ParticipationRow> = result.take(0).map_err(DbError::from)?;
        rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "participation".into(),
            id: id_str.clone(),
        })?;

        Ok(InsertOutcome {
            inserted_id: id_str,
        })
    }

    async fn list(&self) -> CanvassResult<Vec<Participation>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM participation \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ParticipationRowWithId> = result.take(0).map_err(DbError::from)?;
        let records = rows
            .into_iter()
            .map(|row| row.try_into_participation())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(records)
    }
}
