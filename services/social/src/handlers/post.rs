use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use forgexp_auth_types::identity::Identity;
use forgexp_domain::actor::Actor;
use forgexp_domain::id::PostId;

use crate::domain::types::PostRelation;
use crate::error::SocialServiceError;
use crate::handlers::response::{PostResponse, UserResponse};
use crate::state::AppState;
use crate::usecase::read::GetPostUseCase;
use crate::usecase::relation::{
    HasPostRelationUseCase, ListLikersUseCase, TogglePostRelationUseCase,
};

#[derive(Serialize)]
pub struct LikeStateResponse {
    pub liked: bool,
}

#[derive(Serialize)]
pub struct FavoriteStateResponse {
    pub favorited: bool,
}

async fn toggle_on_post(
    state: &AppState,
    actor: Actor,
    kind: PostRelation,
    post: PostId,
) -> Result<bool, SocialServiceError> {
    let usecase = TogglePostRelationUseCase {
        users: state.user_repo(),
        posts: state.post_repo(),
        relations: state.relation_repo(),
    };
    usecase.execute(actor, kind, post).await
}

async fn has_on_post(
    state: &AppState,
    actor: Actor,
    kind: PostRelation,
    post: PostId,
) -> Result<bool, SocialServiceError> {
    let usecase = HasPostRelationUseCase {
        posts: state.post_repo(),
        relations: state.relation_repo(),
    };
    usecase.execute(actor, kind, post).await
}

// ── POST /post/{id}/like ─────────────────────────────────────────────────────

pub async fn toggle_like(
    Identity(actor): Identity,
    State(state): State<AppState>,
    Path(post): Path<PostId>,
) -> Result<Json<LikeStateResponse>, SocialServiceError> {
    let liked = toggle_on_post(&state, actor, PostRelation::Like, post).await?;
    Ok(Json(LikeStateResponse { liked }))
}

// ── GET /post/hasliked/{id} ──────────────────────────────────────────────────

pub async fn has_liked(
    Identity(actor): Identity,
    State(state): State<AppState>,
    Path(post): Path<PostId>,
) -> Result<Json<LikeStateResponse>, SocialServiceError> {
    let liked = has_on_post(&state, actor, PostRelation::Like, post).await?;
    Ok(Json(LikeStateResponse { liked }))
}

// ── POST /user/favorite/{id} ─────────────────────────────────────────────────

pub async fn toggle_favorite(
    Identity(actor): Identity,
    State(state): State<AppState>,
    Path(post): Path<PostId>,
) -> Result<Json<FavoriteStateResponse>, SocialServiceError> {
    let favorited = toggle_on_post(&state, actor, PostRelation::Favorite, post).await?;
    Ok(Json(FavoriteStateResponse { favorited }))
}

// ── GET /user/hasfav/{id} ────────────────────────────────────────────────────

pub async fn has_favorite(
    Identity(actor): Identity,
    State(state): State<AppState>,
    Path(post): Path<PostId>,
) -> Result<Json<FavoriteStateResponse>, SocialServiceError> {
    let favorited = has_on_post(&state, actor, PostRelation::Favorite, post).await?;
    Ok(Json(FavoriteStateResponse { favorited }))
}

// ── GET /post/{id}/likes ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct LikersResponse {
    pub count: usize,
    pub users: Vec<UserResponse>,
}

pub async fn list_likers(
    _identity: Identity,
    State(state): State<AppState>,
    Path(post): Path<PostId>,
) -> Result<Json<LikersResponse>, SocialServiceError> {
    let usecase = ListLikersUseCase {
        users: state.user_repo(),
        posts: state.post_repo(),
        relations: state.relation_repo(),
    };
    let users = usecase.execute(post).await?;
    Ok(Json(LikersResponse {
        count: users.len(),
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}

// ── GET /post/{id} ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub like_count: u64,
    pub favorite_count: u64,
}

pub async fn get_post(
    _identity: Identity,
    State(state): State<AppState>,
    Path(post): Path<PostId>,
) -> Result<Json<PostDetailResponse>, SocialServiceError> {
    let usecase = GetPostUseCase {
        posts: state.post_repo(),
        relations: state.relation_repo(),
    };
    let view = usecase.execute(post).await?;
    Ok(Json(PostDetailResponse {
        post: view.post.into(),
        like_count: view.like_count,
        favorite_count: view.favorite_count,
    }))
}
