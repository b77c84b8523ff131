//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation. The participation, payment,
//! comment, and report tables are append-only ledgers: updates and
//! deletes are denied at the schema level.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD name ON TABLE user TYPE string;
DEFINE FIELD role ON TABLE user TYPE string \
    ASSERT $value IN ['user', 'pro-user', 'surveyor', 'admin'];
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_email ON TABLE user \
    COLUMNS email UNIQUE;

-- =======================================================================
-- Surveys
-- =======================================================================
DEFINE TABLE survey SCHEMAFULL;
DEFINE FIELD title ON TABLE survey TYPE string;
DEFINE FIELD description ON TABLE survey TYPE string;
DEFINE FIELD category ON TABLE survey TYPE string;
DEFINE FIELD image ON TABLE survey TYPE string;
DEFINE FIELD deadline ON TABLE survey TYPE datetime;
DEFINE FIELD status ON TABLE survey TYPE string \
    ASSERT $value IN ['draft', 'publish', 'unpublish'];
DEFINE FIELD vote_count ON TABLE survey TYPE int;
DEFINE FIELD surveyor_email ON TABLE survey TYPE string;
DEFINE FIELD created_at ON TABLE survey TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_survey_owner ON TABLE survey \
    COLUMNS surveyor_email;

-- =======================================================================
-- Participation records (append-only)
-- =======================================================================
DEFINE TABLE participation SCHEMAFULL
    PERMISSIONS
        FOR create FULL
        FOR select FULL
        FOR update NONE
        FOR delete NONE;
DEFINE FIELD voter_name ON TABLE participation TYPE string;
DEFINE FIELD voter_email ON TABLE participation TYPE string;
DEFINE FIELD survey_id ON TABLE participation TYPE string;
DEFINE FIELD chosen_option ON TABLE participation TYPE string;
DEFINE FIELD created_at ON TABLE participation TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_participation_survey ON TABLE participation \
    COLUMNS survey_id;

-- =======================================================================
-- Payments (append-only)
-- =======================================================================
DEFINE TABLE payment SCHEMAFULL
    PERMISSIONS
        FOR create FULL
        FOR select FULL
        FOR update NONE
        FOR delete NONE;
DEFINE FIELD payer_email ON TABLE payment TYPE string;
DEFINE FIELD amount ON TABLE payment TYPE float;
DEFINE FIELD metadata ON TABLE payment TYPE object FLEXIBLE \
    DEFAULT {};
DEFINE FIELD created_at ON TABLE payment TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_payment_payer ON TABLE payment \
    COLUMNS payer_email;

-- =======================================================================
-- Comments (append-only)
-- =======================================================================
DEFINE TABLE comment SCHEMAFULL
    PERMISSIONS
        FOR create FULL
        FOR select FULL
        FOR update NONE
        FOR delete NONE;
DEFINE FIELD survey_id ON TABLE comment TYPE string;
DEFINE FIELD author_email ON TABLE comment TYPE string;
DEFINE FIELD text ON TABLE comment TYPE string;
DEFINE FIELD created_at ON TABLE comment TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_comment_survey ON TABLE comment \
    COLUMNS survey_id;

-- =======================================================================
-- Reports (append-only)
-- =======================================================================
DEFINE TABLE report SCHEMAFULL
    PERMISSIONS
        FOR create FULL
        FOR select FULL
        FOR update NONE
        FOR delete NONE;
DEFINE FIELD survey_id ON TABLE report TYPE string;
DEFINE FIELD reporter_email ON TABLE report TYPE string;
DEFINE FIELD message ON TABLE report TYPE string;
DEFINE FIELD created_at ON TABLE report TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_report_survey ON TABLE report \
    COLUMNS survey_id;
";

// -----------------------------------------------------------------------
// Migration runner
// -----------------------------------------------------------------------

pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
///
/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_is_nonempty() {
        assert!(!SCHEMA_V1.is_empty());
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }

    #[test]
    fn schema_defines_every_collection() {
        for table in [
            "user",
            "survey",
            "participation",
            "payment",
            "comment",
            "report",
        ] {
            assert!(
                SCHEMA_V1.contains(&format!("DEFINE TABLE {table} SCHEMAFULL")),
                "missing table definition: {table}"
            );
        }
    }
}
