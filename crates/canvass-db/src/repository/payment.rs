//! SurrealDB implementation of [`PaymentRepository`].

use canvass_core::error::CanvassResult;
use canvass_core::models::payment::{CreatePayment, Payment};
use canvass_core::repository::{InsertOutcome, PaymentRepository};
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct PaymentRow {
    payer_email: String,
    amount: f64,
    metadata: serde_json::Value,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct PaymentRowWithId {
    record_id: String,
    payer_email: String,
    amount: f64,
    metadata: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl PaymentRowWithId {
    fn try_into_payment(self) -> Result<Payment, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Migration(format!("invalid UUID: {e}")))?;
        Ok(Payment {
            id,
            payer_email: self.payer_email,
            amount: self.amount,
            metadata: self.metadata,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the Payment repository.
#[derive(Clone)]
pub struct SurrealPaymentRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPaymentRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> PaymentRepository for SurrealPaymentRepository<C> {
    async fn append(&self, input: CreatePayment) -> CanvassResult<InsertOutcome> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let metadata = input
            .metadata
            .unwrap_or(serde_json::Value::Object(Default::default()));

        let result = self
            .db
            .query(
                "CREATE type::record('payment', $id) SET \
                 payer_email = $payer_email, amount = $amount, \
                 metadata = $metadata",
            )
            .bind(("id", id_str.clone()))
            .bind(("payer_email", input.payer_email))
            .bind(("amount", input.amount))
            .bind(("metadata", metadata))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<PaymentRow> = result.take(0).map_err(DbError::from)?;
        rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "payment".into(),
            id: id_str.clone(),
        })?;

        Ok(InsertOutcome {
            inserted_id: id_str,
        })
    }

    async fn list(&self) -> CanvassResult<Vec<Payment>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM payment \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PaymentRowWithId> = result.take(0).map_err(DbError::from)?;
        let payments = rows
            .into_iter()
            .map(|row| row.try_into_payment())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(payments)
    }
}
