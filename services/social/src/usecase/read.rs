use forgexp_domain::id::{CommunityId, PostId, UserId};

use crate::domain::repository::{
    CommunityRepository, PostRepository, RelationRepository, UserRepository,
};
use crate::domain::types::{Direction, GameCommunity, PostView, RelationKind, User};
use crate::error::SocialServiceError;

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetUserUseCase<U> {
    pub async fn execute(&self, id: UserId) -> Result<User, SocialServiceError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(SocialServiceError::UserNotFound)
    }
}

// ── GetPost ──────────────────────────────────────────────────────────────────

pub struct GetPostUseCase<P: PostRepository, R: RelationRepository> {
    pub posts: P,
    pub relations: R,
}

impl<P: PostRepository, R: RelationRepository> GetPostUseCase<P, R> {
    pub async fn execute(&self, id: PostId) -> Result<PostView, SocialServiceError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(SocialServiceError::PostNotFound)?;
        let like_count = self
            .relations
            .count_related(RelationKind::Like, id.0, Direction::Incoming)
            .await?;
        let favorite_count = self
            .relations
            .count_related(RelationKind::Favorite, id.0, Direction::Incoming)
            .await?;
        Ok(PostView {
            post,
            like_count,
            favorite_count,
        })
    }
}

// ── GetCommunity ─────────────────────────────────────────────────────────────

pub struct GetCommunityUseCase<C: CommunityRepository> {
    pub communities: C,
}

impl<C: CommunityRepository> GetCommunityUseCase<C> {
    pub async fn execute(&self, id: CommunityId) -> Result<GameCommunity, SocialServiceError> {
        self.communities
            .find_by_id(id)
            .await?
            .ok_or(SocialServiceError::CommunityNotFound)
    }
}
