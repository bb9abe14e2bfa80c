use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use forgexp_auth_types::identity::Identity;
use forgexp_domain::id::UserId;

use crate::domain::types::Direction;
use crate::error::SocialServiceError;
use crate::handlers::response::UserResponse;
use crate::state::AppState;
use crate::usecase::relation::{
    CountFollowUseCase, IsFollowingUseCase, ListFollowsUseCase, ToggleFollowUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowStateResponse {
    pub is_following: bool,
}

// ── POST /user/follow/{id} ───────────────────────────────────────────────────

pub async fn toggle_follow(
    Identity(actor): Identity,
    State(state): State<AppState>,
    Path(target): Path<UserId>,
) -> Result<Json<FollowStateResponse>, SocialServiceError> {
    let usecase = ToggleFollowUseCase {
        users: state.user_repo(),
        relations: state.relation_repo(),
    };
    let is_following = usecase.execute(actor, target).await?;
    Ok(Json(FollowStateResponse { is_following }))
}

// ── GET /user/isfollowing/{id} ───────────────────────────────────────────────

pub async fn is_following(
    Identity(actor): Identity,
    State(state): State<AppState>,
    Path(target): Path<UserId>,
) -> Result<Json<FollowStateResponse>, SocialServiceError> {
    let usecase = IsFollowingUseCase {
        users: state.user_repo(),
        relations: state.relation_repo(),
    };
    let is_following = usecase.execute(actor, target).await?;
    Ok(Json(FollowStateResponse { is_following }))
}

// ── GET /user/followed/{id}, GET /user/following/{id} ────────────────────────

async fn list_follows(
    state: AppState,
    user: UserId,
    direction: Direction,
) -> Result<Json<Vec<UserResponse>>, SocialServiceError> {
    let usecase = ListFollowsUseCase {
        users: state.user_repo(),
        relations: state.relation_repo(),
    };
    let users = usecase.execute(user, direction).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ── POST /user/followed, POST /user/following ───────────────────────────────

/// Accounts following the caller.
pub async fn list_my_followers(
    Identity(actor): Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, SocialServiceError> {
    list_follows(state, actor.user_id, Direction::Incoming).await
}

/// Accounts the caller follows.
pub async fn list_my_following(
    Identity(actor): Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, SocialServiceError> {
    list_follows(state, actor.user_id, Direction::Outgoing).await
}

/// Accounts following `id`.
pub async fn list_followers(
    _identity: Identity,
    State(state): State<AppState>,
    Path(user): Path<UserId>,
) -> Result<Json<Vec<UserResponse>>, SocialServiceError> {
    list_follows(state, user, Direction::Incoming).await
}

/// Accounts `id` follows.
pub async fn list_following(
    _identity: Identity,
    State(state): State<AppState>,
    Path(user): Path<UserId>,
) -> Result<Json<Vec<UserResponse>>, SocialServiceError> {
    list_follows(state, user, Direction::Outgoing).await
}

// ── GET /user/follow/counts/{id} ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct FollowCountsResponse {
    pub followers: u64,
    pub following: u64,
}

async fn count_follows(
    state: AppState,
    user: UserId,
) -> Result<Json<FollowCountsResponse>, SocialServiceError> {
    let usecase = CountFollowUseCase {
        users: state.user_repo(),
        relations: state.relation_repo(),
    };
    let counts = usecase.execute(user).await?;
    Ok(Json(FollowCountsResponse {
        followers: counts.followers,
        following: counts.following,
    }))
}

pub async fn follow_counts(
    _identity: Identity,
    State(state): State<AppState>,
    Path(user): Path<UserId>,
) -> Result<Json<FollowCountsResponse>, SocialServiceError> {
    count_follows(state, user).await
}

// ── GET /user/follow/counts/me ───────────────────────────────────────────────

pub async fn my_follow_counts(
    Identity(actor): Identity,
    State(state): State<AppState>,
) -> Result<Json<FollowCountsResponse>, SocialServiceError> {
    count_follows(state, actor.user_id).await
}
