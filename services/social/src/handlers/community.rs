use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use forgexp_auth_types::identity::Identity;
use forgexp_domain::id::CommunityId;

use crate::error::SocialServiceError;
use crate::handlers::response::CommunityResponse;
use crate::state::AppState;
use crate::usecase::deletion::DeleteCommunityUseCase;
use crate::usecase::read::GetCommunityUseCase;

// ── GET /games/{id} ──────────────────────────────────────────────────────────

pub async fn get_community(
    _identity: Identity,
    State(state): State<AppState>,
    Path(community): Path<CommunityId>,
) -> Result<Json<CommunityResponse>, SocialServiceError> {
    let usecase = GetCommunityUseCase {
        communities: state.community_repo(),
    };
    Ok(Json(usecase.execute(community).await?.into()))
}

// ── DELETE /games/delete/{id} ────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DeleteCommunityResponse {
    pub ok: bool,
    pub message: &'static str,
}

pub async fn delete_community(
    Identity(actor): Identity,
    State(state): State<AppState>,
    Path(community): Path<CommunityId>,
) -> Result<Json<DeleteCommunityResponse>, SocialServiceError> {
    let usecase = DeleteCommunityUseCase {
        store: state.cascade_store(),
    };
    usecase.execute(actor, community).await?;
    Ok(Json(DeleteCommunityResponse {
        ok: true,
        message: "Community deleted",
    }))
}
