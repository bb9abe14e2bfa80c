use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use forgexp_auth_types::token::AuthError;

/// Social service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum SocialServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("post not found")]
    PostNotFound,
    #[error("community not found")]
    CommunityNotFound,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("account is protected")]
    ProtectedAccount,
    #[error("invalid relation")]
    InvalidRelation,
    #[error("conflicting concurrent update")]
    Conflict,
    /// A precondition the deployment must guarantee does not hold.
    #[error("invariant violated: {0}")]
    Invariant(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl SocialServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::PostNotFound => "POST_NOT_FOUND",
            Self::CommunityNotFound => "COMMUNITY_NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::ProtectedAccount => "PROTECTED_ACCOUNT",
            Self::InvalidRelation => "INVALID_RELATION",
            Self::Conflict => "CONFLICT",
            Self::Invariant(_) => "INVARIANT",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<AuthError> for SocialServiceError {
    fn from(_: AuthError) -> Self {
        Self::Unauthorized
    }
}

impl IntoResponse for SocialServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound | Self::PostNotFound | Self::CommunityNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden | Self::ProtectedAccount => StatusCode::FORBIDDEN,
            Self::InvalidRelation => StatusCode::BAD_REQUEST,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Invariant(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "internal error");
            }
            Self::Invariant(detail) => {
                tracing::error!(
                    detail = %detail,
                    kind = "INVARIANT",
                    "deployment defect: sentinel account missing or unusable"
                );
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
