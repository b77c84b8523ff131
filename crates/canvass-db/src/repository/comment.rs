//! SurrealDB implementation of [`CommentRepository`].

use canvass_core::error::CanvassResult;
use canvass_core::models::comment::{Comment, CreateComment};
use canvass_core::repository::{CommentRepository, InsertOutcome};
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct CommentRow {
    survey_id: String,
    author_email: String,
    text: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct CommentRowWithId {
    record_id: String,
    survey_id: String,
    author_email: String,
    text: String,
    created_at: DateTime<Utc>,
}

impl CommentRowWithId {
    fn try_into_comment(self) -> Result<Comment, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Migration(format!("invalid UUID: {e}")))?;
        let survey_id = Uuid::parse_str(&self.survey_id)
            .map_err(|e| DbError::Migration(format!("invalid survey UUID: {e}")))?;
        Ok(Comment {
            id,
            survey_id,
            author_email: self.author_email,
            text: self.text,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the Comment repository.
#[derive(Clone)]
pub struct SurrealCommentRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCommentRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> CommentRepository for SurrealCommentRepository<C> {
    async fn append(&self, input: CreateComment) -> CanvassResult<InsertOutcome> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('comment', $id) SET \
                 survey_id = $survey_id, author_email = $author_email, \
                 text = $text",
            )
            .bind(("id", id_str.clone()))
            .bind(("survey_id", input.survey_id.to_string()))
            .bind(("author_email", input.author_email))
            .bind(("text", input.text))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<CommentRow> = result.take(0).map_err(DbError::from)?;
        rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "comment".into(),
            id: id_str.clone(),
        })?;

        Ok(InsertOutcome {
            inserted_id: id_str,
        })
    }

    async fn list(&self) -> CanvassResult<Vec<Comment>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM comment \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CommentRowWithId> = result.take(0).map_err(DbError::from)?;
        let comments = rows
            .into_iter()
            .map(|row| row.try_into_comment())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(comments)
    }
}
