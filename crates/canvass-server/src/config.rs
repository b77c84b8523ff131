//! Server configuration loaded from environment variables.

use std::{env, fmt::Display, str::FromStr};

use canvass_auth::AuthConfig;
use canvass_db::DbConfig;
use tracing::{info, warn};

pub struct ServerConfig {
    pub port: u16,
    pub db: DbConfig,
    pub auth: AuthConfig,
    /// Production-like deployment: session cookies become
    /// `Secure` + `SameSite=None`.
    pub production: bool,
    /// Origins allowed to send credentialed cross-site requests.
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn load() -> Self {
        Self {
            port: try_load("CANVASS_PORT", "5000"),
            db: DbConfig {
                url: try_load("CANVASS_DB_URL", "127.0.0.1:8000"),
                namespace: try_load("CANVASS_DB_NS", "canvass"),
                database: try_load("CANVASS_DB_NAME", "main"),
                username: try_load("CANVASS_DB_USER", "root"),
                password: require("CANVASS_DB_PASS"),
            },
            auth: AuthConfig {
                token_secret: require("CANVASS_TOKEN_SECRET"),
                ..AuthConfig::default()
            },
            production: try_load::<String>("CANVASS_ENV", "development") == "production",
            allowed_origins: try_load::<String>("CANVASS_ALLOWED_ORIGINS", "http://localhost:5173")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

fn require(key: &str) -> String {
    env::var(key)
        .map_err(|_| {
            warn!("Required environment variable {key} is missing");
        })
        .expect("Secrets misconfigured!")
}
