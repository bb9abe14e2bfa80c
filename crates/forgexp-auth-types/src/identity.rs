//! Bearer-token identity extractor.

use axum::Json;
use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use http::StatusCode;
use http::request::Parts;

use forgexp_domain::actor::Actor;

use crate::token::{AuthError, AuthProvider, JwtAuthProvider};

/// Caller identity verified from an `Authorization: Bearer <token>` header.
///
/// Requires the router state to expose a [`JwtAuthProvider`] through
/// `FromRef`. Any failure is rejected with 401.
#[derive(Debug, Clone, Copy)]
pub struct Identity(pub Actor);

/// Rejection returned when the bearer token is missing or invalid.
#[derive(Debug)]
pub struct AuthRejection(pub AuthError);

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        tracing::debug!(reason = %self.0, "rejected credentials");
        let body = serde_json::json!({
            "kind": "UNAUTHORIZED",
            "message": self.0.to_string(),
        });
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    JwtAuthProvider: FromRef<S>,
{
    type Rejection = AuthRejection;

    // Verification is synchronous; resolve it before building the future so
    // nothing borrowed from `parts` or `state` is captured.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let provider = JwtAuthProvider::from_ref(state);
        let result = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .ok_or(AuthError::MissingToken)
            .and_then(|header| provider.verify(header.token()))
            .map(Identity)
            .map_err(AuthRejection);

        async move { result }
    }
}
