use forgexp_domain::actor::Actor;
use forgexp_domain::id::{CommunityId, UserId};

use crate::domain::repository::{CommunityRepository, MembershipRepository, UserRepository};
use crate::domain::types::{GameCommunity, Membership};
use crate::error::SocialServiceError;
use crate::usecase::toggle::toggle;

// ── ToggleMembership ─────────────────────────────────────────────────────────

pub struct ToggleMembershipUseCase<
    U: UserRepository,
    C: CommunityRepository,
    M: MembershipRepository,
> {
    pub users: U,
    pub communities: C,
    pub memberships: M,
}

impl<U: UserRepository, C: CommunityRepository, M: MembershipRepository>
    ToggleMembershipUseCase<U, C, M>
{
    /// Join `community` if the actor is not a member, leave it otherwise.
    /// Returns whether the actor is a member afterwards.
    pub async fn execute(
        &self,
        actor: Actor,
        community: CommunityId,
    ) -> Result<bool, SocialServiceError> {
        self.users
            .find_by_id(actor.user_id)
            .await?
            .ok_or(SocialServiceError::UserNotFound)?;
        self.communities
            .find_by_id(community)
            .await?
            .ok_or(SocialServiceError::CommunityNotFound)?;
        toggle(
            &self.memberships,
            Membership {
                user: actor.user_id,
                community,
            },
        )
        .await
    }
}

// ── ListMemberships ──────────────────────────────────────────────────────────

pub struct ListMembershipsUseCase<U: UserRepository, M: MembershipRepository> {
    pub users: U,
    pub memberships: M,
}

impl<U: UserRepository, M: MembershipRepository> ListMembershipsUseCase<U, M> {
    pub async fn execute(&self, user: UserId) -> Result<Vec<GameCommunity>, SocialServiceError> {
        self.users
            .find_by_id(user)
            .await?
            .ok_or(SocialServiceError::UserNotFound)?;
        self.memberships.list_communities(user).await
    }
}
