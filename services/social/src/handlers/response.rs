//! JSON shapes shared by several handlers.

use serde::Serialize;

use crate::domain::types::{GameCommunity, Post, User};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub f_name: Option<String>,
    pub l_name: Option<String>,
    pub is_admin: bool,
    #[serde(serialize_with = "forgexp_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.0,
            username: user.username,
            email: user.email,
            avatar: user.avatar,
            bio: user.bio,
            f_name: user.f_name,
            l_name: user.l_name,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i32,
    pub user_id: i32,
    pub community_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub post_type: String,
    pub content: Option<String>,
    #[serde(serialize_with = "forgexp_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.0,
            user_id: post.owner_user_id.0,
            community_id: post.community_id.0,
            title: post.title,
            description: post.description,
            post_type: post.post_type,
            content: post.content,
            created_at: post.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityResponse {
    pub id: i32,
    pub game_name: String,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub hero_image: Option<String>,
    pub is_active: bool,
}

impl From<GameCommunity> for CommunityResponse {
    fn from(community: GameCommunity) -> Self {
        Self {
            id: community.id.0,
            game_name: community.game_name,
            description: community.description,
            cover_image: community.cover_image,
            hero_image: community.hero_image,
            is_active: community.is_active,
        }
    }
}
