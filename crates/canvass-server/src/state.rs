//! Shared application state.
//!
//! Holds the one long-lived SurrealDB handle opened at process start —
//! no ambient globals; every handler reaches the store through this
//! state. Repositories are thin wrappers over the shared handle and are
//! constructed on demand.

use canvass_auth::AuthConfig;
use canvass_db::repository::{
    SurrealCommentRepository, SurrealParticipationRepository, SurrealPaymentRepository,
    SurrealReportRepository, SurrealSurveyRepository, SurrealUserRepository,
};
use surrealdb::{Connection, Surreal};

pub struct AppState<C: Connection> {
    pub db: Surreal<C>,
    pub auth: AuthConfig,
    /// Switches the session cookie's cross-site attributes.
    pub production: bool,
}

impl<C: Connection> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            auth: self.auth.clone(),
            production: self.production,
        }
    }
}

impl<C: Connection> AppState<C> {
    pub fn new(db: Surreal<C>, auth: AuthConfig, production: bool) -> Self {
        Self {
            db,
            auth,
            production,
        }
    }

    pub fn users(&self) -> SurrealUserRepository<C> {
        SurrealUserRepository::new(self.db.clone())
    }

    pub fn surveys(&self) -> SurrealSurveyRepository<C> {
        SurrealSurveyRepository::new(self.db.clone())
    }

    pub fn participations(&self) -> SurrealParticipationRepository<C> {
        SurrealParticipationRepository::new(self.db.clone())
    }

    pub fn payments(&self) -> SurrealPaymentRepository<C> {
        SurrealPaymentRepository::new(self.db.clone())
    }

    pub fn comments(&self) -> SurrealCommentRepository<C> {
        SurrealCommentRepository::new(self.db.clone())
    }

    pub fn reports(&self) -> SurrealReportRepository<C> {
        SurrealReportRepository::new(self.db.clone())
    }
}
