pub mod community;
pub mod follow;
pub mod health;
pub mod membership;
pub mod post;
pub mod response;
pub mod user;
