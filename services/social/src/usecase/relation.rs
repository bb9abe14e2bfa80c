use forgexp_domain::actor::Actor;
use forgexp_domain::id::{PostId, UserId};

use crate::domain::repository::{PostRepository, RelationRepository, UserRepository};
use crate::domain::types::{
    Direction, FollowCounts, Post, PostRelation, RelationKey, RelationKind, User,
};
use crate::error::SocialServiceError;
use crate::usecase::toggle::toggle;

async fn require_user<U: UserRepository>(users: &U, id: UserId) -> Result<(), SocialServiceError> {
    users
        .find_by_id(id)
        .await?
        .map(|_| ())
        .ok_or(SocialServiceError::UserNotFound)
}

async fn require_post<P: PostRepository>(posts: &P, id: PostId) -> Result<(), SocialServiceError> {
    posts
        .find_by_id(id)
        .await?
        .map(|_| ())
        .ok_or(SocialServiceError::PostNotFound)
}

// ── ToggleFollow ─────────────────────────────────────────────────────────────

pub struct ToggleFollowUseCase<U: UserRepository, R: RelationRepository> {
    pub users: U,
    pub relations: R,
}

impl<U: UserRepository, R: RelationRepository> ToggleFollowUseCase<U, R> {
    /// Returns whether the actor follows `target` afterwards.
    pub async fn execute(&self, actor: Actor, target: UserId) -> Result<bool, SocialServiceError> {
        if actor.user_id == target {
            return Err(SocialServiceError::InvalidRelation);
        }
        require_user(&self.users, actor.user_id).await?;
        require_user(&self.users, target).await?;
        toggle(&self.relations, RelationKey::follow(actor.user_id, target)).await
    }
}

// ── IsFollowing ──────────────────────────────────────────────────────────────

pub struct IsFollowingUseCase<U: UserRepository, R: RelationRepository> {
    pub users: U,
    pub relations: R,
}

impl<U: UserRepository, R: RelationRepository> IsFollowingUseCase<U, R> {
    /// Like the post lookups, an unknown target is `UserNotFound` rather
    /// than `false`.
    pub async fn execute(&self, actor: Actor, target: UserId) -> Result<bool, SocialServiceError> {
        require_user(&self.users, target).await?;
        self.relations
            .contains(RelationKey::follow(actor.user_id, target))
            .await
    }
}

// ── ListFollows ──────────────────────────────────────────────────────────────

pub struct ListFollowsUseCase<U: UserRepository, R: RelationRepository> {
    pub users: U,
    pub relations: R,
}

impl<U: UserRepository, R: RelationRepository> ListFollowsUseCase<U, R> {
    /// `Incoming` lists followers of `user`, `Outgoing` the accounts it follows.
    pub async fn execute(
        &self,
        user: UserId,
        direction: Direction,
    ) -> Result<Vec<User>, SocialServiceError> {
        require_user(&self.users, user).await?;
        let ids: Vec<UserId> = self
            .relations
            .list_related(RelationKind::Follow, user.0, direction)
            .await?
            .into_iter()
            .map(UserId)
            .collect();
        self.users.find_by_ids(&ids).await
    }
}

// ── CountFollow ──────────────────────────────────────────────────────────────

pub struct CountFollowUseCase<U: UserRepository, R: RelationRepository> {
    pub users: U,
    pub relations: R,
}

impl<U: UserRepository, R: RelationRepository> CountFollowUseCase<U, R> {
    pub async fn execute(&self, user: UserId) -> Result<FollowCounts, SocialServiceError> {
        require_user(&self.users, user).await?;
        let followers = self
            .relations
            .count_related(RelationKind::Follow, user.0, Direction::Incoming)
            .await?;
        let following = self
            .relations
            .count_related(RelationKind::Follow, user.0, Direction::Outgoing)
            .await?;
        Ok(FollowCounts {
            followers,
            following,
        })
    }
}

// ── TogglePostRelation (like / favorite) ─────────────────────────────────────

pub struct TogglePostRelationUseCase<U: UserRepository, P: PostRepository, R: RelationRepository>
{
    pub users: U,
    pub posts: P,
    pub relations: R,
}

impl<U: UserRepository, P: PostRepository, R: RelationRepository>
    TogglePostRelationUseCase<U, P, R>
{
    /// Returns whether the actor holds `kind` on `post` afterwards. Authors
    /// may like and favorite their own posts.
    pub async fn execute(
        &self,
        actor: Actor,
        kind: PostRelation,
        post: PostId,
    ) -> Result<bool, SocialServiceError> {
        require_user(&self.users, actor.user_id).await?;
        require_post(&self.posts, post).await?;
        toggle(
            &self.relations,
            RelationKey::on_post(kind, actor.user_id, post),
        )
        .await
    }
}

// ── HasPostRelation ──────────────────────────────────────────────────────────

pub struct HasPostRelationUseCase<P: PostRepository, R: RelationRepository> {
    pub posts: P,
    pub relations: R,
}

impl<P: PostRepository, R: RelationRepository> HasPostRelationUseCase<P, R> {
    pub async fn execute(
        &self,
        actor: Actor,
        kind: PostRelation,
        post: PostId,
    ) -> Result<bool, SocialServiceError> {
        require_post(&self.posts, post).await?;
        self.relations
            .contains(RelationKey::on_post(kind, actor.user_id, post))
            .await
    }
}

// ── ListFavorites ────────────────────────────────────────────────────────────

pub struct ListFavoritesUseCase<P: PostRepository, R: RelationRepository> {
    pub posts: P,
    pub relations: R,
}

impl<P: PostRepository, R: RelationRepository> ListFavoritesUseCase<P, R> {
    pub async fn execute(&self, user: UserId) -> Result<Vec<Post>, SocialServiceError> {
        let ids: Vec<PostId> = self
            .relations
            .list_related(RelationKind::Favorite, user.0, Direction::Outgoing)
            .await?
            .into_iter()
            .map(PostId)
            .collect();
        self.posts.find_by_ids(&ids).await
    }
}

// ── ListLikers ───────────────────────────────────────────────────────────────

pub struct ListLikersUseCase<U: UserRepository, P: PostRepository, R: RelationRepository> {
    pub users: U,
    pub posts: P,
    pub relations: R,
}

impl<U: UserRepository, P: PostRepository, R: RelationRepository> ListLikersUseCase<U, P, R> {
    pub async fn execute(&self, post: PostId) -> Result<Vec<User>, SocialServiceError> {
        require_post(&self.posts, post).await?;
        let ids: Vec<UserId> = self
            .relations
            .list_related(RelationKind::Like, post.0, Direction::Incoming)
            .await?
            .into_iter()
            .map(UserId)
            .collect();
        self.users.find_by_ids(&ids).await
    }
}
