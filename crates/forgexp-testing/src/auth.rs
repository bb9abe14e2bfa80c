//! Mock auth helpers for integration tests.
//!
//! Handlers authenticate with an `Authorization: Bearer` token. `MockAuth`
//! mints a real token with a shared test secret so router tests exercise the
//! same verification path as production.

use axum::http::{HeaderName, HeaderValue, header::AUTHORIZATION};

use forgexp_auth_types::token::{AuthProvider, JwtAuthProvider};
use forgexp_domain::actor::Actor;
use forgexp_domain::id::UserId;

/// Secret shared between `MockAuth` and the state built by tests.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-integration-tests";

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub actor: Actor,
}

impl MockAuth {
    pub fn user(user_id: i32) -> Self {
        Self {
            actor: Actor::user(UserId(user_id)),
        }
    }

    pub fn admin(user_id: i32) -> Self {
        Self {
            actor: Actor::admin(UserId(user_id)),
        }
    }

    /// Provider configured with [`TEST_JWT_SECRET`].
    pub fn provider() -> JwtAuthProvider {
        JwtAuthProvider::new(TEST_JWT_SECRET)
    }

    /// Return the `Authorization` header carrying a freshly signed token.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        let token = Self::provider()
            .issue(&self.actor)
            .expect("test token signing");
        let value = HeaderValue::from_str(&format!("Bearer {token}"))
            .expect("bearer token is a valid header value");
        (AUTHORIZATION, value)
    }
}
