#![allow(async_fn_in_trait)]

use std::fmt::Debug;

use forgexp_domain::id::{CommunityId, PostId, UserId};

use crate::domain::types::{
    Direction, GameCommunity, Membership, Post, RelationKey, RelationKind, User,
};
use crate::error::SocialServiceError;

/// Read access to user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, SocialServiceError>;
    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, SocialServiceError>;
    /// Users with the given ids, in ascending id order. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, SocialServiceError>;
}

pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, SocialServiceError>;
    /// Posts with the given ids, in ascending id order. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[PostId]) -> Result<Vec<Post>, SocialServiceError>;
}

pub trait CommunityRepository: Send + Sync {
    async fn find_by_id(&self, id: CommunityId)
    -> Result<Option<GameCommunity>, SocialServiceError>;
}

/// A set of unique pairs that supports the toggle protocol.
///
/// `insert` must fail with [`SocialServiceError::Conflict`] when the pair is
/// already stored; the store's unique key decides, not a prior read.
pub trait ToggleSet: Send + Sync {
    type Key: Copy + Debug + Send + Sync;

    async fn contains(&self, key: Self::Key) -> Result<bool, SocialServiceError>;
    async fn insert(&self, key: Self::Key) -> Result<(), SocialServiceError>;
    /// Returns `true` if a row was deleted.
    async fn remove(&self, key: Self::Key) -> Result<bool, SocialServiceError>;
}

/// Storage for follow, like and favorite rows.
pub trait RelationRepository: ToggleSet<Key = RelationKey> {
    /// Ids on the opposite side of every row whose `direction` side equals
    /// `anchor`, in ascending order.
    async fn list_related(
        &self,
        kind: RelationKind,
        anchor: i32,
        direction: Direction,
    ) -> Result<Vec<i32>, SocialServiceError>;

    async fn count_related(
        &self,
        kind: RelationKind,
        anchor: i32,
        direction: Direction,
    ) -> Result<u64, SocialServiceError>;
}

/// User ↔ community "joined" set. `insert` connects, `remove` disconnects.
pub trait MembershipRepository: ToggleSet<Key = Membership> {
    async fn list_communities(
        &self,
        user: UserId,
    ) -> Result<Vec<GameCommunity>, SocialServiceError>;
}

/// Opens the transaction a deletion cascade runs in.
pub trait CascadeStore: Send + Sync {
    type Tx: CascadeTransaction;

    async fn begin(&self) -> Result<Self::Tx, SocialServiceError>;
}

/// Steps available to a deletion cascade inside one transaction.
///
/// Nothing is visible to other readers until [`commit`](Self::commit);
/// dropping the transaction rolls every step back. Delete steps return the
/// number of rows removed.
pub trait CascadeTransaction: Send + Sync + Sized {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, SocialServiceError>;
    async fn find_user_id_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserId>, SocialServiceError>;
    async fn find_community(
        &self,
        id: CommunityId,
    ) -> Result<Option<GameCommunity>, SocialServiceError>;

    async fn delete_favorites_by_user(&self, user: UserId) -> Result<u64, SocialServiceError>;
    async fn delete_comments_by_user(&self, user: UserId) -> Result<u64, SocialServiceError>;
    /// Hand every post owned by `from` to `to`. Returns the number of posts moved.
    async fn reassign_posts(&self, from: UserId, to: UserId) -> Result<u64, SocialServiceError>;
    /// Follow rows where the user is on either side.
    async fn delete_follows_of_user(&self, user: UserId) -> Result<u64, SocialServiceError>;
    async fn delete_likes_by_user(&self, user: UserId) -> Result<u64, SocialServiceError>;
    async fn delete_memberships_of_user(&self, user: UserId)
    -> Result<u64, SocialServiceError>;
    async fn delete_user(&self, user: UserId) -> Result<bool, SocialServiceError>;

    async fn post_ids_in_community(
        &self,
        community: CommunityId,
    ) -> Result<Vec<PostId>, SocialServiceError>;
    async fn delete_favorites_on_posts(&self, posts: &[PostId])
    -> Result<u64, SocialServiceError>;
    async fn delete_likes_on_posts(&self, posts: &[PostId]) -> Result<u64, SocialServiceError>;
    async fn delete_comments_on_posts(&self, posts: &[PostId])
    -> Result<u64, SocialServiceError>;
    async fn delete_posts(&self, posts: &[PostId]) -> Result<u64, SocialServiceError>;
    async fn delete_memberships_of_community(
        &self,
        community: CommunityId,
    ) -> Result<u64, SocialServiceError>;
    async fn delete_community(&self, community: CommunityId) -> Result<bool, SocialServiceError>;

    async fn commit(self) -> Result<(), SocialServiceError>;
}
