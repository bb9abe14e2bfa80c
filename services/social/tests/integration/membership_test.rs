use forgexp_domain::actor::Actor;
use forgexp_domain::id::{CommunityId, UserId};
use forgexp_social::error::SocialServiceError;
use forgexp_social::usecase::deletion::DeleteCommunityUseCase;
use forgexp_social::usecase::membership::{ListMembershipsUseCase, ToggleMembershipUseCase};

use crate::helpers::{MemoryCommunities, MemoryMemberships, MemoryStore, MemoryUsers};

fn join(
    store: &MemoryStore,
) -> ToggleMembershipUseCase<MemoryUsers, MemoryCommunities, MemoryMemberships> {
    ToggleMembershipUseCase {
        users: store.users(),
        communities: store.communities(),
        memberships: store.memberships(),
    }
}

fn joined(store: &MemoryStore, user: UserId) -> Vec<String> {
    let tables = store.snapshot();
    tables
        .memberships
        .iter()
        .filter(|(u, _)| *u == user.0)
        .map(|(_, c)| tables.communities[&CommunityId(*c)].game_name.clone())
        .collect()
}

#[tokio::test]
async fn should_join_and_leave_with_toggle_semantics() {
    let store = MemoryStore::with_sentinel();
    let kai = store.add_user(2, "kai");
    let community = store.add_community(10, "Celeste");
    let actor = Actor::user(kai);

    assert!(join(&store).execute(actor, community).await.unwrap());
    assert_eq!(joined(&store, kai), vec!["Celeste"]);
    assert!(!join(&store).execute(actor, community).await.unwrap());
    assert!(joined(&store, kai).is_empty());
}

#[tokio::test]
async fn should_list_joined_communities_in_id_order() {
    let store = MemoryStore::with_sentinel();
    let kai = store.add_user(2, "kai");
    let celeste = store.add_community(10, "Celeste");
    let hades = store.add_community(11, "Hades");
    store.add_community(12, "Tunic");
    let actor = Actor::user(kai);
    join(&store).execute(actor, hades).await.unwrap();
    join(&store).execute(actor, celeste).await.unwrap();

    let communities = ListMembershipsUseCase {
        users: store.users(),
        memberships: store.memberships(),
    }
    .execute(kai)
    .await
    .unwrap();

    let names: Vec<_> = communities.iter().map(|c| c.game_name.as_str()).collect();
    assert_eq!(names, vec!["Celeste", "Hades"]);
}

#[tokio::test]
async fn should_return_not_found_for_missing_endpoints() {
    let store = MemoryStore::with_sentinel();
    let kai = store.add_user(2, "kai");
    let community = store.add_community(10, "Celeste");

    let missing_community = join(&store)
        .execute(Actor::user(kai), CommunityId(99))
        .await;
    assert!(matches!(
        missing_community,
        Err(SocialServiceError::CommunityNotFound)
    ));

    let missing_user = join(&store)
        .execute(Actor::user(UserId(42)), community)
        .await;
    assert!(matches!(missing_user, Err(SocialServiceError::UserNotFound)));
    assert!(store.snapshot().memberships.is_empty());
}

#[tokio::test]
async fn should_drop_memberships_with_deleted_community() {
    let store = MemoryStore::with_sentinel();
    let kai = store.add_user(2, "kai");
    let community = store.add_community(10, "Celeste");
    join(&store)
        .execute(Actor::user(kai), community)
        .await
        .unwrap();

    DeleteCommunityUseCase {
        store: store.cascade(),
    }
    .execute(Actor::admin(kai), community)
    .await
    .unwrap();

    let communities = ListMembershipsUseCase {
        users: store.users(),
        memberships: store.memberships(),
    }
    .execute(kai)
    .await
    .unwrap();
    assert!(communities.is_empty());
}
