//! Request handlers, grouped by collection.

pub mod auth;
pub mod feedback;
pub mod payments;
pub mod surveys;
pub mod users;

/// Liveness probe.
pub async fn health() -> &'static str {
    "canvass is running"
}
