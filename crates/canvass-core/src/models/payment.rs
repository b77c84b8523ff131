//! Payment domain model.
//!
//! Append-only. Recording a payment triggers a role promotion for the
//! payer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub payer_email: String,
    pub amount: f64,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayment {
    pub payer_email: String,
    pub amount: f64,
    pub metadata: Option<serde_json::Value>,
}
