//! Signed identity tokens.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use forgexp_domain::actor::Actor;
use forgexp_domain::id::UserId;

/// Default token lifetime in seconds (7 days).
pub const DEFAULT_TOKEN_TTL: u64 = 604_800;

/// Errors returned by an [`AuthProvider`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token")]
    Signing,
}

/// Opaque credential capability: mints tokens for an identity and verifies
/// them back into an [`Actor`].
pub trait AuthProvider: Send + Sync {
    fn issue(&self, actor: &Actor) -> Result<String, AuthError>;
    fn verify(&self, token: &str) -> Result<Actor, AuthError>;
}

/// JWT claims payload.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `sub` | user id as a decimal string |
/// | `is_admin` | admin privilege flag |
/// | `exp` | expiration, seconds since UNIX epoch |
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub is_admin: bool,
    pub exp: u64,
}

/// HS256 implementation of [`AuthProvider`].
#[derive(Clone)]
pub struct JwtAuthProvider {
    secret: Arc<str>,
    ttl_secs: u64,
}

impl JwtAuthProvider {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs: DEFAULT_TOKEN_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    fn issue_with_exp(&self, actor: &Actor, exp: u64) -> Result<String, AuthError> {
        let claims = JwtClaims {
            sub: actor.user_id.to_string(),
            is_admin: actor.is_admin,
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|_| AuthError::Signing)
    }
}

impl std::fmt::Debug for JwtAuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuthProvider")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

impl AuthProvider for JwtAuthProvider {
    fn issue(&self, actor: &Actor) -> Result<String, AuthError> {
        self.issue_with_exp(actor, now_secs() + self.ttl_secs)
    }

    /// Validation: HS256, `exp` checked with the default 60s leeway,
    /// required claims `exp` + `sub`.
    fn verify(&self, token: &str) -> Result<Actor, AuthError> {
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.validate_exp = true;
        validation.required_spec_claims.clear();
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
            jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            _ => AuthError::Malformed,
        })?;

        let user_id = data
            .claims
            .sub
            .parse::<UserId>()
            .map_err(|_| AuthError::Malformed)?;
        Ok(Actor {
            user_id,
            is_admin: data.claims.is_admin,
        })
    }
}
