//! Authentication configuration.

/// Configuration for the session token codec.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Process-wide HMAC secret for JWT signing and verification.
    pub token_secret: String,
    /// Session token lifetime in seconds (default: 3600 = 1 hour).
    pub token_lifetime_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: String::new(),
            token_lifetime_secs: 3600,
        }
    }
}
