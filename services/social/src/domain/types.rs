use chrono::{DateTime, Utc};

use forgexp_domain::id::{CommunityId, PostId, UserId};

/// Registered account as seen by the social service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub f_name: Option<String>,
    pub l_name: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// A post inside a game community.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    /// Original author, or the sentinel once the author's account is gone.
    pub owner_user_id: UserId,
    pub community_id: CommunityId,
    pub title: String,
    pub description: Option<String>,
    pub post_type: String,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameCommunity {
    pub id: CommunityId,
    pub game_name: String,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub hero_image: Option<String>,
    pub is_active: bool,
}

/// The "Deleted User" account that inherits posts of deleted users.
///
/// Only obtainable from a user row that was actually resolved from the
/// store, so holding one means the account existed at resolution time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentinelUser {
    id: UserId,
    username: String,
}

impl SentinelUser {
    pub fn from_resolved(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

// ── Toggle relations ─────────────────────────────────────────────────────────

/// Relation kinds stored as `(actor, target)` rows with a unique pair key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelationKind {
    /// user → user
    Follow,
    /// user → post
    Like,
    /// user → post
    Favorite,
}

/// Relations a user can hold on a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostRelation {
    Like,
    Favorite,
}

impl From<PostRelation> for RelationKind {
    fn from(kind: PostRelation) -> Self {
        match kind {
            PostRelation::Like => Self::Like,
            PostRelation::Favorite => Self::Favorite,
        }
    }
}

/// Unique key of one relation row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationKey {
    pub kind: RelationKind,
    pub actor: UserId,
    /// A `UserId` for follows, a `PostId` for likes and favorites.
    pub target: i32,
}

impl RelationKey {
    pub fn follow(follower: UserId, following: UserId) -> Self {
        Self {
            kind: RelationKind::Follow,
            actor: follower,
            target: following.0,
        }
    }

    pub fn on_post(kind: PostRelation, user: UserId, post: PostId) -> Self {
        Self {
            kind: kind.into(),
            actor: user,
            target: post.0,
        }
    }
}

/// Which side of a relation row the anchor id sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Anchor is the actor; yields targets (who a user follows, what they liked).
    Outgoing,
    /// Anchor is the target; yields actors (a user's followers, a post's likers).
    Incoming,
}

/// Unique key of one membership row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Membership {
    pub user: UserId,
    pub community: CommunityId,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FollowCounts {
    pub followers: u64,
    pub following: u64,
}

/// A post together with its engagement counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostView {
    pub post: Post,
    pub like_count: u64,
    pub favorite_count: u64,
}

// ── Cascades ─────────────────────────────────────────────────────────────────

/// What a user deletion removed or reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserCascadeReport {
    pub favorites_removed: u64,
    pub comments_removed: u64,
    pub likes_removed: u64,
    pub follows_removed: u64,
    pub memberships_removed: u64,
    pub posts_reassigned: u64,
    /// Account that now owns the reassigned posts.
    pub reassigned_to: UserId,
}

/// A deleted user's last snapshot plus the cascade report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedUser {
    pub user: User,
    pub report: UserCascadeReport,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommunityCascadeReport {
    pub posts_removed: u64,
    pub favorites_removed: u64,
    pub likes_removed: u64,
    pub comments_removed: u64,
    pub memberships_removed: u64,
}
