//! Admin bearer-token verification
//!
//! Administrator tokens are issued by an external identity provider that
//! shares the HS256 secret; this module only verifies them.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role claim value required on every administrative endpoint.
pub const ADMINISTRATOR_ROLE: &str = "Administrator";

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    /// Display name; falls back to `sub` for audit attribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl AdminClaims {
    pub fn is_administrator(&self) -> bool {
        self.role == ADMINISTRATOR_ROLE
    }

    /// Actor label stamped into audit metadata.
    pub fn actor(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.sub)
    }
}

pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str, issuer: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<AdminClaims, JwtError> {
        decode::<AdminClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::ValidationError(e.to_string()),
            })
    }
}
