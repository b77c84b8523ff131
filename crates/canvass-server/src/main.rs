//! Canvass Server — application entry point.

use std::net::SocketAddr;

use canvass_db::DbManager;
use canvass_server::{AppState, ServerConfig, cors_layer, router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("canvass=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting Canvass server...");

    let config = ServerConfig::load();

    let manager = DbManager::connect(&config.db)
        .await
        .expect("database connection failed");
    canvass_db::run_migrations(manager.client())
        .await
        .expect("schema migration failed");
    manager.ping().await.expect("database ping failed");
    tracing::info!("Database ping successful");

    let state = AppState::new(
        manager.client().clone(),
        config.auth.clone(),
        config.production,
    );
    let app = router(state).layer(cors_layer(&config.allowed_origins));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listen address");
    tracing::info!(%addr, "Canvass server listening");

    axum::serve(listener, app).await.expect("server error");
}
