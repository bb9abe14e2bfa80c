use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use forgexp_auth_types::identity::Identity;
use forgexp_domain::id::{CommunityId, UserId};

use crate::error::SocialServiceError;
use crate::handlers::response::CommunityResponse;
use crate::state::AppState;
use crate::usecase::membership::{ListMembershipsUseCase, ToggleMembershipUseCase};

// ── POST /user/join-game/{id} ────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MembershipStateResponse {
    pub joined: bool,
}

pub async fn toggle_membership(
    Identity(actor): Identity,
    State(state): State<AppState>,
    Path(community): Path<CommunityId>,
) -> Result<Json<MembershipStateResponse>, SocialServiceError> {
    let usecase = ToggleMembershipUseCase {
        users: state.user_repo(),
        communities: state.community_repo(),
        memberships: state.membership_repo(),
    };
    let joined = usecase.execute(actor, community).await?;
    Ok(Json(MembershipStateResponse { joined }))
}

// ── GET /user/communities/{id} ───────────────────────────────────────────────

pub async fn list_memberships(
    _identity: Identity,
    State(state): State<AppState>,
    Path(user): Path<UserId>,
) -> Result<Json<Vec<CommunityResponse>>, SocialServiceError> {
    let usecase = ListMembershipsUseCase {
        users: state.user_repo(),
        memberships: state.membership_repo(),
    };
    let communities = usecase.execute(user).await?;
    Ok(Json(
        communities.into_iter().map(CommunityResponse::from).collect(),
    ))
}
