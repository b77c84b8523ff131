//! SurrealDB implementation of [`ReportRepository`].

use canvass_core::error::CanvassResult;
use canvass_core::models::report::{CreateReport, Report};
use canvass_core::repository::{InsertOutcome, ReportRepository};
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct ReportRow {
    survey_id: String,
    reporter_email: String,
    message: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct ReportRowWithId {
    record_id: String,
    survey_id: String,
    reporter_email: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl ReportRowWithId {
    fn try_into_report(self) -> Result<Report, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Migration(format!("invalid UUID: {e}")))?;
        let survey_id = Uuid::parse_str(&self.survey_id)
            .map_err(|e| DbError::Migration(format!("invalid survey UUID: {e}")))?;
        Ok(Report {
            id,
            survey_id,
            reporter_email: self.reporter_email,
            message: self.message,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the Report repository.
#[derive(Clone)]
pub struct SurrealReportRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealReportRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ReportRepository for SurrealReportRepository<C> {
    async fn append(&self, input: CreateReport) -> CanvassResult<InsertOutcome> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('report', $id) SET \
                 survey_id = $survey_id, reporter_email = $reporter_email, \
                 message = $message",
            )
            .bind(("id", id_str.clone()))
            .bind(("survey_id", input.survey_id.to_string()))
            .bind(("reporter_email", input.reporter_email))
            .bind(("message", input.message))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<ReportRow> = result.take(0).map_err(DbError::from)?;
        rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "report".into(),
            id: id_str.clone(),
        })?;

        Ok(InsertOutcome {
            inserted_id: id_str,
        })
    }

    async fn list(&self) -> CanvassResult<Vec<Report>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM report \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ReportRowWithId> = result.take(0).map_err(DbError::from)?;
        let reports = rows
            .into_iter()
            .map(|row| row.try_into_report())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(reports)
    }
}
