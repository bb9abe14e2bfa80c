//! Store entities for the social service.
//!
//! Relation tables (`follows`, `likes`, `favorites`, `user_communities`) use
//! composite primary keys, which is what enforces one row per ordered pair.

pub mod comments;
pub mod favorites;
pub mod follows;
pub mod game_communities;
pub mod likes;
pub mod posts;
pub mod user_communities;
pub mod users;
