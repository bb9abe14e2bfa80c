use tracing::{error, info};

use forgexp_domain::actor::Actor;
use forgexp_domain::id::{CommunityId, UserId};

use crate::domain::repository::{CascadeStore, CascadeTransaction, UserRepository};
use crate::domain::types::{
    CommunityCascadeReport, DeletedUser, SentinelUser, UserCascadeReport,
};
use crate::error::SocialServiceError;

fn missing_sentinel(username: &str) -> SocialServiceError {
    error!(
        sentinel = username,
        "sentinel account is missing; provision it before deleting users"
    );
    SocialServiceError::Invariant(format!("sentinel account {username:?} is missing"))
}

// ── ResolveSentinel (startup) ────────────────────────────────────────────────

pub struct ResolveSentinelUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ResolveSentinelUseCase<U> {
    /// Look the sentinel up by username. It is never created here.
    pub async fn execute(&self, username: &str) -> Result<SentinelUser, SocialServiceError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| missing_sentinel(username))?;
        Ok(SentinelUser::from_resolved(&user))
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<S: CascadeStore> {
    pub store: S,
    pub sentinel: SentinelUser,
}

impl<S: CascadeStore> DeleteUserUseCase<S> {
    /// Remove `target` and tombstone its content.
    ///
    /// Runs in one transaction, in this order:
    /// 1. re-resolve the sentinel
    /// 2. delete the target's favorites
    /// 3. delete the target's comments
    /// 4. reassign the target's posts to the sentinel
    /// 5. delete follows (both directions), likes and memberships, then the
    ///    user row
    pub async fn execute(
        &self,
        actor: Actor,
        target: UserId,
    ) -> Result<DeletedUser, SocialServiceError> {
        if !actor.can_manage(target) {
            return Err(SocialServiceError::Forbidden);
        }
        if target == self.sentinel.id() {
            return Err(SocialServiceError::ProtectedAccount);
        }

        let tx = self.store.begin().await?;
        let user = tx
            .find_user(target)
            .await?
            .ok_or(SocialServiceError::UserNotFound)?;
        let sentinel = tx
            .find_user_id_by_username(self.sentinel.username())
            .await?
            .ok_or_else(|| missing_sentinel(self.sentinel.username()))?;
        if sentinel == target {
            return Err(SocialServiceError::ProtectedAccount);
        }

        let favorites_removed = tx.delete_favorites_by_user(target).await?;
        let comments_removed = tx.delete_comments_by_user(target).await?;
        let posts_reassigned = tx.reassign_posts(target, sentinel).await?;
        let follows_removed = tx.delete_follows_of_user(target).await?;
        let likes_removed = tx.delete_likes_by_user(target).await?;
        let memberships_removed = tx.delete_memberships_of_user(target).await?;
        if !tx.delete_user(target).await? {
            // Row vanished after the read; dropping `tx` rolls back.
            return Err(SocialServiceError::UserNotFound);
        }
        tx.commit().await?;

        let report = UserCascadeReport {
            favorites_removed,
            comments_removed,
            likes_removed,
            follows_removed,
            memberships_removed,
            posts_reassigned,
            reassigned_to: sentinel,
        };
        info!(
            user_id = %target,
            actor_id = %actor.user_id,
            posts_reassigned,
            favorites_removed,
            comments_removed,
            "user deleted"
        );
        Ok(DeletedUser { user, report })
    }
}

// ── DeleteCommunity ──────────────────────────────────────────────────────────

pub struct DeleteCommunityUseCase<S: CascadeStore> {
    pub store: S,
}

impl<S: CascadeStore> DeleteCommunityUseCase<S> {
    /// Admin-only. Clears every dependent row of the community's posts,
    /// then the posts, memberships and the community itself, in one
    /// transaction.
    pub async fn execute(
        &self,
        actor: Actor,
        community: CommunityId,
    ) -> Result<CommunityCascadeReport, SocialServiceError> {
        if !actor.is_admin {
            return Err(SocialServiceError::Forbidden);
        }

        let tx = self.store.begin().await?;
        tx.find_community(community)
            .await?
            .ok_or(SocialServiceError::CommunityNotFound)?;

        let posts = tx.post_ids_in_community(community).await?;
        let favorites_removed = tx.delete_favorites_on_posts(&posts).await?;
        let likes_removed = tx.delete_likes_on_posts(&posts).await?;
        let comments_removed = tx.delete_comments_on_posts(&posts).await?;
        let posts_removed = tx.delete_posts(&posts).await?;
        let memberships_removed = tx.delete_memberships_of_community(community).await?;
        if !tx.delete_community(community).await? {
            return Err(SocialServiceError::CommunityNotFound);
        }
        tx.commit().await?;

        info!(
            community_id = %community,
            actor_id = %actor.user_id,
            posts_removed,
            favorites_removed,
            "community deleted"
        );
        Ok(CommunityCascadeReport {
            posts_removed,
            favorites_removed,
            likes_removed,
            comments_removed,
            memberships_removed,
        })
    }
}
