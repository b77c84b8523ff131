//! Canvass Server — HTTP boundary.
//!
//! Every state-changing request passes through the authentication gate
//! ([`extract::SessionUser`]), optionally the authorization checks
//! ([`authz`]), then a single repository operation; survey and payment
//! creation additionally run the role promotion engine.

pub mod authz;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod session;
pub mod state;

pub use config::ServerConfig;
pub use routes::{cors_layer, router};
pub use state::AppState;
