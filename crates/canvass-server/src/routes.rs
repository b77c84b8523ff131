//! Router assembly and cross-origin policy.

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, patch, post, put};
use surrealdb::Connection;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::handlers;
use crate::state::AppState;

/// Build the full route table over the shared state.
pub fn router<C: Connection>(state: AppState<C>) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        // Session lifecycle
        .route("/jwt", post(handlers::auth::issue_token::<C>))
        .route("/clear-jwt", post(handlers::auth::clear_token::<C>))
        // Users
        .route(
            "/users",
            post(handlers::users::register::<C>).get(handlers::users::list::<C>),
        )
        .route(
            "/users/{id}/make-pro-user",
            patch(handlers::users::make_pro_user::<C>),
        )
        .route(
            "/users/{id}/make-user",
            patch(handlers::users::make_user::<C>),
        )
        // Role predicates (authenticated + identity-matched)
        .route("/users/admin/{email}", get(handlers::users::is_admin::<C>))
        .route(
            "/users/proUser/{email}",
            get(handlers::users::is_pro_user::<C>),
        )
        .route(
            "/users/surveyor/{email}",
            get(handlers::users::is_surveyor::<C>),
        )
        .route("/users/user/{email}", get(handlers::users::is_user::<C>))
        // Surveys
        .route(
            "/surveys",
            get(handlers::surveys::list::<C>).post(handlers::surveys::create::<C>),
        )
        .route("/surveys/{id}", patch(handlers::surveys::update::<C>))
        .route(
            "/surveys/{id}/publish",
            patch(handlers::surveys::publish::<C>),
        )
        .route(
            "/surveys/{id}/unpublish",
            patch(handlers::surveys::unpublish::<C>),
        )
        .route("/surveys/{id}/vote", put(handlers::surveys::vote::<C>))
        .route(
            "/participates",
            get(handlers::surveys::list_participations::<C>),
        )
        // Payments
        .route(
            "/payments",
            post(handlers::payments::create::<C>).get(handlers::payments::list::<C>),
        )
        // Comments and reports
        .route(
            "/comments",
            post(handlers::feedback::create_comment::<C>).get(handlers::feedback::list_comments::<C>),
        )
        .route(
            "/reports",
            post(handlers::feedback::create_report::<C>).get(handlers::feedback::list_reports::<C>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Credentialed CORS for the configured browser origins. Cookies cross
/// origins in production, so wildcard origins are not an option here.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin
                .parse()
                .map_err(|_| warn!(%origin, "skipping unparseable CORS origin"))
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
        ])
        .allow_headers([header::CONTENT_TYPE])
}
