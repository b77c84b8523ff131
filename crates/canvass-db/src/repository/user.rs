//! SurrealDB implementation of [`UserRepository`].
//!
//! Registration is idempotent on the email key: an existing record is
//! reported, never overwritten. Role writes are single atomic
//! single-document updates; concurrent writers are last-write-wins.

use canvass_core::error::CanvassResult;
use canvass_core::models::user::{CreateUser, Role, User};
use canvass_core::repository::{InsertOutcome, RegisterOutcome, UpdateOutcome, UserRepository};
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct UserRow {
    email: String,
    name: String,
    role: String,
    created_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct UserRowWithId {
    record_id: String,
    email: String,
    name: String,
    role: String,
    created_at: DateTime<Utc>,
}

fn parse_role(s: &str) -> Result<Role, DbError> {
    Role::parse(s).ok_or_else(|| DbError::Migration(format!("unknown user role: {s}")))
}

impl UserRowWithId {
    fn try_into_user(self) -> Result<User, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Migration(format!("invalid UUID: {e}")))?;
        Ok(User {
            id,
            email: self.email,
            name: self.name,
            role: parse_role(&self.role)?,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the User repository.
#[derive(Clone)]
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn register(&self, input: CreateUser) -> CanvassResult<RegisterOutcome> {
        // Existing email wins; the stored record is left untouched.
        if self.find_by_email(&input.email).await?.is_some() {
            return Ok(RegisterOutcome::AlreadyExists);
        }

        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let role = input.role.unwrap_or(Role::User);

        let result = self
            .db
            .query(
                "CREATE type::record('user', $id) SET \
                 email = $email, name = $name, role = $role",
            )
            .bind(("id", id_str.clone()))
            .bind(("email", input.email))
            .bind(("name", input.name))
            .bind(("role", role.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str.clone(),
        })?;

        Ok(RegisterOutcome::Created(InsertOutcome {
            inserted_id: id_str,
        }))
    }

    async fn find_by_email(&self, email: &str) -> CanvassResult<Option<User>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 WHERE email = $email",
            )
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_user()?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> CanvassResult<Vec<User>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        let users = rows
            .into_iter()
            .map(|row| row.try_into_user())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(users)
    }

    async fn set_role_by_id(&self, id: Uuid, role: Role) -> CanvassResult<UpdateOutcome> {
        let mut result = self
            .db
            .query("UPDATE type::record('user', $id) SET role = $role")
            .bind(("id", id.to_string()))
            .bind(("role", role.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let n = rows.len() as u64;
        Ok(UpdateOutcome {
            matched_count: n,
            modified_count: n,
        })
    }

    async fn set_role_by_email(&self, email: &str, role: Role) -> CanvassResult<UpdateOutcome> {
        let mut result = self
            .db
            .query("UPDATE user SET role = $role WHERE email = $email")
            .bind(("email", email.to_string()))
            .bind(("role", role.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let n = rows.len() as u64;
        Ok(UpdateOutcome {
            matched_count: n,
            modified_count: n,
        })
    }
}
