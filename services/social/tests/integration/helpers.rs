use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use forgexp_domain::id::{CommunityId, PostId, UserId};
use forgexp_social::domain::repository::{
    CascadeStore, CascadeTransaction, CommunityRepository, MembershipRepository, PostRepository,
    RelationRepository, ToggleSet, UserRepository,
};
use forgexp_social::domain::types::{
    Direction, GameCommunity, Membership, Post, RelationKey, RelationKind, SentinelUser, User,
};
use forgexp_social::error::SocialServiceError;

pub const SENTINEL_ID: UserId = UserId(1);
pub const SENTINEL_USERNAME: &str = "Deleted User";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRow {
    pub user_id: UserId,
    pub post_id: PostId,
}

/// Whole-store snapshot. Relation sets hold `(actor, target)` pairs, so the
/// set itself enforces the unique pair key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    pub users: BTreeMap<UserId, User>,
    pub posts: BTreeMap<PostId, Post>,
    pub communities: BTreeMap<CommunityId, GameCommunity>,
    pub comments: BTreeMap<i32, CommentRow>,
    pub follows: BTreeSet<(i32, i32)>,
    pub likes: BTreeSet<(i32, i32)>,
    pub favorites: BTreeSet<(i32, i32)>,
    pub memberships: BTreeSet<(i32, i32)>,
}

impl Tables {
    fn relation(&mut self, kind: RelationKind) -> &mut BTreeSet<(i32, i32)> {
        match kind {
            RelationKind::Follow => &mut self.follows,
            RelationKind::Like => &mut self.likes,
            RelationKind::Favorite => &mut self.favorites,
        }
    }

    pub fn posts_owned_by(&self, user: UserId) -> usize {
        self.posts
            .values()
            .filter(|p| p.owner_user_id == user)
            .count()
    }
}

type Shared = Arc<Mutex<Tables>>;

// ── MemoryStore ──────────────────────────────────────────────────────────────

/// In-memory store backing every repository trait. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Shared,
    fail_step: Arc<Mutex<Option<&'static str>>>,
}

impl MemoryStore {
    /// Empty store containing only the sentinel account.
    pub fn with_sentinel() -> Self {
        let store = Self::default();
        store.add_user(SENTINEL_ID.0, SENTINEL_USERNAME);
        store
    }

    pub fn add_user(&self, id: i32, username: &str) -> UserId {
        let user = User {
            id: UserId(id),
            username: username.to_owned(),
            email: format!("{id}@forgexp.test"),
            avatar: None,
            bio: None,
            f_name: None,
            l_name: None,
            is_admin: false,
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().users.insert(user.id, user);
        UserId(id)
    }

    pub fn add_community(&self, id: i32, game_name: &str) -> CommunityId {
        let community = GameCommunity {
            id: CommunityId(id),
            game_name: game_name.to_owned(),
            description: None,
            cover_image: None,
            hero_image: None,
            is_active: true,
        };
        self.tables
            .lock()
            .unwrap()
            .communities
            .insert(community.id, community);
        CommunityId(id)
    }

    pub fn add_post(&self, id: i32, owner: UserId, community: CommunityId) -> PostId {
        let post = Post {
            id: PostId(id),
            owner_user_id: owner,
            community_id: community,
            title: format!("post {id}"),
            description: None,
            post_type: "discussion".to_owned(),
            content: Some("gg".to_owned()),
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().posts.insert(post.id, post);
        PostId(id)
    }

    pub fn add_comment(&self, id: i32, author: UserId, post: PostId) {
        self.tables.lock().unwrap().comments.insert(
            id,
            CommentRow {
                user_id: author,
                post_id: post,
            },
        );
    }

    pub fn add_favorite(&self, user: UserId, post: PostId) {
        self.tables.lock().unwrap().favorites.insert((user.0, post.0));
    }

    pub fn add_like(&self, user: UserId, post: PostId) {
        self.tables.lock().unwrap().likes.insert((user.0, post.0));
    }

    pub fn add_follow(&self, follower: UserId, following: UserId) {
        self.tables
            .lock()
            .unwrap()
            .follows
            .insert((follower.0, following.0));
    }

    pub fn add_membership(&self, user: UserId, community: CommunityId) {
        self.tables
            .lock()
            .unwrap()
            .memberships
            .insert((user.0, community.0));
    }

    pub fn remove_user_row(&self, id: UserId) {
        self.tables.lock().unwrap().users.remove(&id);
    }

    /// Make the named cascade step fail in every later transaction.
    pub fn fail_at(&self, step: &'static str) {
        *self.fail_step.lock().unwrap() = Some(step);
    }

    pub fn snapshot(&self) -> Tables {
        self.tables.lock().unwrap().clone()
    }

    pub fn sentinel(&self) -> SentinelUser {
        let tables = self.tables.lock().unwrap();
        SentinelUser::from_resolved(&tables.users[&SENTINEL_ID])
    }

    pub fn users(&self) -> MemoryUsers {
        MemoryUsers(Arc::clone(&self.tables))
    }

    pub fn posts(&self) -> MemoryPosts {
        MemoryPosts(Arc::clone(&self.tables))
    }

    pub fn communities(&self) -> MemoryCommunities {
        MemoryCommunities(Arc::clone(&self.tables))
    }

    pub fn relations(&self) -> MemoryRelations {
        MemoryRelations(Arc::clone(&self.tables))
    }

    pub fn memberships(&self) -> MemoryMemberships {
        MemoryMemberships(Arc::clone(&self.tables))
    }

    pub fn cascade(&self) -> MemoryCascadeStore {
        MemoryCascadeStore {
            tables: Arc::clone(&self.tables),
            fail_step: Arc::clone(&self.fail_step),
        }
    }
}

// ── Read repositories ────────────────────────────────────────────────────────

pub struct MemoryUsers(Shared);

impl UserRepository for MemoryUsers {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, SocialServiceError> {
        Ok(self.0.lock().unwrap().users.get(&id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, SocialServiceError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, SocialServiceError> {
        let tables = self.0.lock().unwrap();
        Ok(tables
            .users
            .values()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }
}

pub struct MemoryPosts(Shared);

impl PostRepository for MemoryPosts {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, SocialServiceError> {
        Ok(self.0.lock().unwrap().posts.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[PostId]) -> Result<Vec<Post>, SocialServiceError> {
        let tables = self.0.lock().unwrap();
        Ok(tables
            .posts
            .values()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }
}

pub struct MemoryCommunities(Shared);

impl CommunityRepository for MemoryCommunities {
    async fn find_by_id(
        &self,
        id: CommunityId,
    ) -> Result<Option<GameCommunity>, SocialServiceError> {
        Ok(self.0.lock().unwrap().communities.get(&id).cloned())
    }
}

// ── Toggle sets ──────────────────────────────────────────────────────────────

pub struct MemoryRelations(Shared);

impl ToggleSet for MemoryRelations {
    type Key = RelationKey;

    async fn contains(&self, key: RelationKey) -> Result<bool, SocialServiceError> {
        let mut tables = self.0.lock().unwrap();
        Ok(tables.relation(key.kind).contains(&(key.actor.0, key.target)))
    }

    async fn insert(&self, key: RelationKey) -> Result<(), SocialServiceError> {
        let mut tables = self.0.lock().unwrap();
        if tables.relation(key.kind).insert((key.actor.0, key.target)) {
            Ok(())
        } else {
            Err(SocialServiceError::Conflict)
        }
    }

    async fn remove(&self, key: RelationKey) -> Result<bool, SocialServiceError> {
        let mut tables = self.0.lock().unwrap();
        Ok(tables.relation(key.kind).remove(&(key.actor.0, key.target)))
    }
}

impl RelationRepository for MemoryRelations {
    async fn list_related(
        &self,
        kind: RelationKind,
        anchor: i32,
        direction: Direction,
    ) -> Result<Vec<i32>, SocialServiceError> {
        let mut tables = self.0.lock().unwrap();
        let mut ids: Vec<i32> = tables
            .relation(kind)
            .iter()
            .filter_map(|&(actor, target)| match direction {
                Direction::Outgoing if actor == anchor => Some(target),
                Direction::Incoming if target == anchor => Some(actor),
                _ => None,
            })
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn count_related(
        &self,
        kind: RelationKind,
        anchor: i32,
        direction: Direction,
    ) -> Result<u64, SocialServiceError> {
        Ok(self.list_related(kind, anchor, direction).await?.len() as u64)
    }
}

pub struct MemoryMemberships(Shared);

impl ToggleSet for MemoryMemberships {
    type Key = Membership;

    async fn contains(&self, key: Membership) -> Result<bool, SocialServiceError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .memberships
            .contains(&(key.user.0, key.community.0)))
    }

    async fn insert(&self, key: Membership) -> Result<(), SocialServiceError> {
        let inserted = self
            .0
            .lock()
            .unwrap()
            .memberships
            .insert((key.user.0, key.community.0));
        if inserted {
            Ok(())
        } else {
            Err(SocialServiceError::Conflict)
        }
    }

    async fn remove(&self, key: Membership) -> Result<bool, SocialServiceError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .memberships
            .remove(&(key.user.0, key.community.0)))
    }
}

impl MembershipRepository for MemoryMemberships {
    async fn list_communities(
        &self,
        user: UserId,
    ) -> Result<Vec<GameCommunity>, SocialServiceError> {
        let tables = self.0.lock().unwrap();
        Ok(tables
            .memberships
            .iter()
            .filter(|(u, _)| *u == user.0)
            .filter_map(|(_, c)| tables.communities.get(&CommunityId(*c)).cloned())
            .collect())
    }
}

// ── Cascade store ────────────────────────────────────────────────────────────

pub struct MemoryCascadeStore {
    tables: Shared,
    fail_step: Arc<Mutex<Option<&'static str>>>,
}

/// Works on a private copy of the tables; `commit` swaps it in.
pub struct MemoryTx {
    staged: Mutex<Tables>,
    target: Shared,
    fail_step: Option<&'static str>,
}

impl MemoryTx {
    fn step<T>(
        &self,
        name: &'static str,
        f: impl FnOnce(&mut Tables) -> T,
    ) -> Result<T, SocialServiceError> {
        if self.fail_step == Some(name) {
            return Err(anyhow::anyhow!("injected failure at {name}").into());
        }
        Ok(f(&mut self.staged.lock().unwrap()))
    }
}

impl CascadeStore for MemoryCascadeStore {
    type Tx = MemoryTx;

    async fn begin(&self) -> Result<MemoryTx, SocialServiceError> {
        Ok(MemoryTx {
            staged: Mutex::new(self.tables.lock().unwrap().clone()),
            target: Arc::clone(&self.tables),
            fail_step: *self.fail_step.lock().unwrap(),
        })
    }
}

fn drain(set: &mut BTreeSet<(i32, i32)>, pred: impl Fn(&(i32, i32)) -> bool) -> u64 {
    let before = set.len();
    set.retain(|row| !pred(row));
    (before - set.len()) as u64
}

impl CascadeTransaction for MemoryTx {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, SocialServiceError> {
        self.step("find user", |t| t.users.get(&id).cloned())
    }

    async fn find_user_id_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserId>, SocialServiceError> {
        self.step("resolve sentinel", |t| {
            t.users
                .values()
                .find(|u| u.username == username)
                .map(|u| u.id)
        })
    }

    async fn find_community(
        &self,
        id: CommunityId,
    ) -> Result<Option<GameCommunity>, SocialServiceError> {
        self.step("find community", |t| t.communities.get(&id).cloned())
    }

    async fn delete_favorites_by_user(&self, user: UserId) -> Result<u64, SocialServiceError> {
        self.step("favorites", |t| drain(&mut t.favorites, |(u, _)| *u == user.0))
    }

    async fn delete_comments_by_user(&self, user: UserId) -> Result<u64, SocialServiceError> {
        self.step("comments", |t| {
            let before = t.comments.len();
            t.comments.retain(|_, c| c.user_id != user);
            (before - t.comments.len()) as u64
        })
    }

    async fn reassign_posts(&self, from: UserId, to: UserId) -> Result<u64, SocialServiceError> {
        self.step("reassign", |t| {
            let mut moved = 0;
            for post in t.posts.values_mut().filter(|p| p.owner_user_id == from) {
                post.owner_user_id = to;
                moved += 1;
            }
            moved
        })
    }

    async fn delete_follows_of_user(&self, user: UserId) -> Result<u64, SocialServiceError> {
        self.step("follows", |t| {
            drain(&mut t.follows, |(a, b)| *a == user.0 || *b == user.0)
        })
    }

    async fn delete_likes_by_user(&self, user: UserId) -> Result<u64, SocialServiceError> {
        self.step("likes", |t| drain(&mut t.likes, |(u, _)| *u == user.0))
    }

    async fn delete_memberships_of_user(
        &self,
        user: UserId,
    ) -> Result<u64, SocialServiceError> {
        self.step("memberships", |t| {
            drain(&mut t.memberships, |(u, _)| *u == user.0)
        })
    }

    async fn delete_user(&self, user: UserId) -> Result<bool, SocialServiceError> {
        self.step("user", |t| t.users.remove(&user).is_some())
    }

    async fn post_ids_in_community(
        &self,
        community: CommunityId,
    ) -> Result<Vec<PostId>, SocialServiceError> {
        self.step("collect posts", |t| {
            t.posts
                .values()
                .filter(|p| p.community_id == community)
                .map(|p| p.id)
                .collect()
        })
    }

    async fn delete_favorites_on_posts(
        &self,
        posts: &[PostId],
    ) -> Result<u64, SocialServiceError> {
        self.step("post favorites", |t| {
            drain(&mut t.favorites, |(_, p)| posts.contains(&PostId(*p)))
        })
    }

    async fn delete_likes_on_posts(&self, posts: &[PostId]) -> Result<u64, SocialServiceError> {
        self.step("post likes", |t| {
            drain(&mut t.likes, |(_, p)| posts.contains(&PostId(*p)))
        })
    }

    async fn delete_comments_on_posts(
        &self,
        posts: &[PostId],
    ) -> Result<u64, SocialServiceError> {
        self.step("post comments", |t| {
            let before = t.comments.len();
            t.comments.retain(|_, c| !posts.contains(&c.post_id));
            (before - t.comments.len()) as u64
        })
    }

    async fn delete_posts(&self, ids: &[PostId]) -> Result<u64, SocialServiceError> {
        self.step("posts", |t| {
            let before = t.posts.len();
            t.posts.retain(|id, _| !ids.contains(id));
            (before - t.posts.len()) as u64
        })
    }

    async fn delete_memberships_of_community(
        &self,
        community: CommunityId,
    ) -> Result<u64, SocialServiceError> {
        self.step("community memberships", |t| {
            drain(&mut t.memberships, |(_, c)| *c == community.0)
        })
    }

    async fn delete_community(&self, community: CommunityId) -> Result<bool, SocialServiceError> {
        self.step("community", |t| t.communities.remove(&community).is_some())
    }

    async fn commit(self) -> Result<(), SocialServiceError> {
        let staged = self.staged.into_inner().unwrap();
        *self.target.lock().unwrap() = staged;
        Ok(())
    }
}
