use forgexp_domain::actor::Actor;
use forgexp_domain::id::{PostId, UserId};
use forgexp_social::domain::types::{Direction, FollowCounts, PostRelation};
use forgexp_social::error::SocialServiceError;
use forgexp_social::usecase::read::GetPostUseCase;
use forgexp_social::usecase::relation::{
    CountFollowUseCase, IsFollowingUseCase, ListFollowsUseCase, ListLikersUseCase,
    ToggleFollowUseCase, TogglePostRelationUseCase,
};

use crate::helpers::{MemoryPosts, MemoryRelations, MemoryStore, MemoryUsers};

fn store_with_players() -> MemoryStore {
    let store = MemoryStore::with_sentinel();
    store.add_user(2, "kai");
    store.add_user(3, "mira");
    let community = store.add_community(10, "Celeste");
    store.add_post(100, UserId(3), community);
    store
}

fn follow(store: &MemoryStore) -> ToggleFollowUseCase<MemoryUsers, MemoryRelations> {
    ToggleFollowUseCase {
        users: store.users(),
        relations: store.relations(),
    }
}

fn on_post(
    store: &MemoryStore,
) -> TogglePostRelationUseCase<MemoryUsers, MemoryPosts, MemoryRelations> {
    TogglePostRelationUseCase {
        users: store.users(),
        posts: store.posts(),
        relations: store.relations(),
    }
}

// ── Follow scenario ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_follow_then_unfollow_and_leave_no_followers() {
    let store = store_with_players();
    let actor = Actor::user(UserId(2));

    assert!(follow(&store).execute(actor, UserId(3)).await.unwrap());
    assert!(!follow(&store).execute(actor, UserId(3)).await.unwrap());

    let counts = CountFollowUseCase {
        users: store.users(),
        relations: store.relations(),
    }
    .execute(UserId(3))
    .await
    .unwrap();
    assert_eq!(counts, FollowCounts::default());
}

#[tokio::test]
async fn should_keep_at_most_one_row_per_pair() {
    let store = store_with_players();
    let actor = Actor::user(UserId(2));

    for _ in 0..5 {
        follow(&store).execute(actor, UserId(3)).await.unwrap();
    }

    // Odd number of toggles: exactly one edge.
    assert_eq!(store.snapshot().follows.len(), 1);
    let is_following = IsFollowingUseCase {
        users: store.users(),
        relations: store.relations(),
    }
    .execute(actor, UserId(3))
    .await
    .unwrap();
    assert!(is_following);
}

#[tokio::test]
async fn should_net_out_double_toggle_for_every_kind() {
    let store = store_with_players();
    let before = store.snapshot();
    let actor = Actor::user(UserId(2));

    follow(&store).execute(actor, UserId(3)).await.unwrap();
    follow(&store).execute(actor, UserId(3)).await.unwrap();
    for kind in [PostRelation::Like, PostRelation::Favorite] {
        on_post(&store).execute(actor, kind, PostId(100)).await.unwrap();
        on_post(&store).execute(actor, kind, PostId(100)).await.unwrap();
    }

    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn should_list_followers_and_following_as_full_users() {
    let store = store_with_players();
    follow(&store)
        .execute(Actor::user(UserId(2)), UserId(3))
        .await
        .unwrap();
    let uc = ListFollowsUseCase {
        users: store.users(),
        relations: store.relations(),
    };

    let followers = uc.execute(UserId(3), Direction::Incoming).await.unwrap();
    let following = uc.execute(UserId(2), Direction::Outgoing).await.unwrap();

    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0].username, "kai");
    assert_eq!(following.len(), 1);
    assert_eq!(following[0].username, "mira");
}

#[tokio::test]
async fn should_return_not_found_for_unknown_user_lists() {
    let store = store_with_players();
    let result = ListFollowsUseCase {
        users: store.users(),
        relations: store.relations(),
    }
    .execute(UserId(77), Direction::Incoming)
    .await;
    assert!(matches!(result, Err(SocialServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_reject_self_follow_without_writing() {
    let store = store_with_players();
    let result = follow(&store)
        .execute(Actor::user(UserId(2)), UserId(2))
        .await;
    assert!(matches!(result, Err(SocialServiceError::InvalidRelation)));
    assert!(store.snapshot().follows.is_empty());
}

// ── Likes / favorites ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_count_likes_and_favorites_on_post() {
    let store = store_with_players();
    store.add_user(4, "nova");
    for user in [2, 3, 4] {
        on_post(&store)
            .execute(Actor::user(UserId(user)), PostRelation::Like, PostId(100))
            .await
            .unwrap();
    }
    on_post(&store)
        .execute(Actor::user(UserId(2)), PostRelation::Favorite, PostId(100))
        .await
        .unwrap();

    let view = GetPostUseCase {
        posts: store.posts(),
        relations: store.relations(),
    }
    .execute(PostId(100))
    .await
    .unwrap();
    assert_eq!(view.like_count, 3);
    assert_eq!(view.favorite_count, 1);

    let likers = ListLikersUseCase {
        users: store.users(),
        posts: store.posts(),
        relations: store.relations(),
    }
    .execute(PostId(100))
    .await
    .unwrap();
    let names: Vec<_> = likers.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["kai", "mira", "nova"]);
}

#[tokio::test]
async fn should_return_post_not_found_for_missing_post() {
    let store = store_with_players();
    let result = on_post(&store)
        .execute(Actor::user(UserId(2)), PostRelation::Favorite, PostId(999))
        .await;
    assert!(matches!(result, Err(SocialServiceError::PostNotFound)));
    assert!(store.snapshot().favorites.is_empty());
}
