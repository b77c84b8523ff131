//! JWT session token issuance and verification.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Identity a client presents when opening a session. Whatever is
/// supplied here is signed into the token verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// JWT claims embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject email.
    pub email: String,
    /// Display name, if the client supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Issue a signed HS256 session token expiring one configured lifetime
/// from now.
pub fn issue_session_token(
    identity: SessionIdentity,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        email: identity.email,
        name: identity.name,
        iat: now,
        exp: now + config.token_lifetime_secs as i64,
    };

    let key = EncodingKey::from_secret(config.token_secret.as_bytes());
    let header = Header::new(Algorithm::HS256);
    jsonwebtoken::encode(&header, &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

/// Decode and verify a session token against the process-wide secret.
pub fn verify_session_token(token: &str, config: &AuthConfig) -> Result<SessionClaims, AuthError> {
    let key = DecodingKey::from_secret(config.token_secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp", "iat"]);

    jsonwebtoken::decode::<SessionClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}

/// Verified session claims — a newtype proving the token was checked.
///
/// Used by the HTTP layer to attach authenticated context to incoming
/// requests.
#[derive(Debug, Clone)]
pub struct ValidatedClaims(pub SessionClaims);

/// Validate a session token (signature + expiry) and return the
/// verified claims.
///
/// This is the entry point for request-level authentication. It is
/// purely stateless — no database lookup is performed.
pub fn validate_session_token(
    token: &str,
    config: &AuthConfig,
) -> Result<ValidatedClaims, AuthError> {
    verify_session_token(token, config).map(ValidatedClaims)
}
