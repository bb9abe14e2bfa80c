use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use forgexp_auth_types::identity::Identity;
use forgexp_domain::id::UserId;

use crate::error::SocialServiceError;
use crate::handlers::response::{PostResponse, UserResponse};
use crate::state::AppState;
use crate::usecase::deletion::DeleteUserUseCase;
use crate::usecase::read::GetUserUseCase;
use crate::usecase::relation::ListFavoritesUseCase;

// ── GET /user/{id} ───────────────────────────────────────────────────────────

pub async fn get_user(
    _identity: Identity,
    State(state): State<AppState>,
    Path(user): Path<UserId>,
) -> Result<Json<UserResponse>, SocialServiceError> {
    let usecase = GetUserUseCase {
        users: state.user_repo(),
    };
    Ok(Json(usecase.execute(user).await?.into()))
}

// ── GET /user/favorites ──────────────────────────────────────────────────────

pub async fn list_favorites(
    Identity(actor): Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<PostResponse>>, SocialServiceError> {
    let usecase = ListFavoritesUseCase {
        posts: state.post_repo(),
        relations: state.relation_repo(),
    };
    let posts = usecase.execute(actor.user_id).await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

// ── DELETE /user/delete/{id} ─────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeSummary {
    pub favorites_removed: u64,
    pub comments_removed: u64,
    pub likes_removed: u64,
    pub follows_removed: u64,
    pub memberships_removed: u64,
    pub posts_reassigned: u64,
    pub reassigned_to: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserResponse {
    pub deleted_user: UserResponse,
    pub cascade: CascadeSummary,
}

pub async fn delete_user(
    Identity(actor): Identity,
    State(state): State<AppState>,
    Path(target): Path<UserId>,
) -> Result<Json<DeleteUserResponse>, SocialServiceError> {
    let usecase = DeleteUserUseCase {
        store: state.cascade_store(),
        sentinel: state.sentinel.clone(),
    };
    let deleted = usecase.execute(actor, target).await?;
    let report = deleted.report;
    Ok(Json(DeleteUserResponse {
        deleted_user: deleted.user.into(),
        cascade: CascadeSummary {
            favorites_removed: report.favorites_removed,
            comments_removed: report.comments_removed,
            likes_removed: report.likes_removed,
            follows_removed: report.follows_removed,
            memberships_removed: report.memberships_removed,
            posts_reassigned: report.posts_reassigned,
            reassigned_to: report.reassigned_to.0,
        },
    }))
}
