use axum::{
    Router,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;

use forgexp_core::health::healthz;
use forgexp_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    community::{delete_community, get_community},
    follow::{
        follow_counts, is_following, list_followers, list_following, list_my_followers,
        list_my_following, my_follow_counts, toggle_follow,
    },
    health::readyz,
    membership::{list_memberships, toggle_membership},
    post::{get_post, has_favorite, has_liked, list_likers, toggle_favorite, toggle_like},
    user::{delete_user, get_user, list_favorites},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Follows
        .route("/user/follow/{id}", post(toggle_follow))
        .route("/user/isfollowing/{id}", get(is_following))
        .route("/user/followed/{id}", get(list_followers))
        .route("/user/following/{id}", get(list_following))
        .route("/user/followed", post(list_my_followers))
        .route("/user/following", post(list_my_following))
        .route("/user/follow/counts/me", get(my_follow_counts))
        .route("/user/follow/counts/{id}", get(follow_counts))
        // Favorites
        .route("/user/favorite/{id}", post(toggle_favorite))
        .route("/user/hasfav/{id}", get(has_favorite))
        .route("/user/favorites", get(list_favorites))
        // Memberships
        .route("/user/join-game/{id}", post(toggle_membership))
        .route("/user/communities/{id}", get(list_memberships))
        // Users
        .route("/user/delete/{id}", delete(delete_user))
        .route("/user/{id}", get(get_user))
        // Posts
        .route("/post/{id}/like", post(toggle_like))
        .route("/post/hasliked/{id}", get(has_liked))
        .route("/post/{id}/likes", get(list_likers))
        .route("/post/{id}", get(get_post))
        // Communities
        .route("/games/{id}", get(get_community))
        .route("/games/delete/{id}", delete(delete_community))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(trace_layer())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
