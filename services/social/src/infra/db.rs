use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    sea_query::{Expr, Query},
};

use forgexp_core::sea_ext::DbErrExt as _;
use forgexp_domain::id::{CommunityId, PostId, UserId};
use forgexp_social_schema::{
    comments, favorites, follows, game_communities, likes, posts, user_communities, users,
};

use crate::domain::repository::{
    CascadeStore, CascadeTransaction, CommunityRepository, MembershipRepository, PostRepository,
    RelationRepository, ToggleSet, UserRepository,
};
use crate::domain::types::{
    Direction, GameCommunity, Membership, Post, RelationKey, RelationKind, User,
};
use crate::error::SocialServiceError;

/// Map a failed insert. Unique-key collisions become `Conflict`; a dangling
/// reference means the target row was deleted after the existence check and
/// becomes `missing`.
fn insert_error(
    e: DbErr,
    missing: SocialServiceError,
    what: &'static str,
) -> SocialServiceError {
    classify_insert(e.is_unique_violation(), e.is_foreign_key_violation(), missing)
        .unwrap_or_else(|| anyhow::Error::new(e).context(what).into())
}

fn classify_insert(
    duplicate: bool,
    dangling: bool,
    missing: SocialServiceError,
) -> Option<SocialServiceError> {
    if duplicate {
        Some(SocialServiceError::Conflict)
    } else if dangling {
        Some(missing)
    } else {
        None
    }
}

/// Error for a relation whose target vanished mid-toggle.
fn missing_target(kind: RelationKind) -> SocialServiceError {
    match kind {
        RelationKind::Follow => SocialServiceError::UserNotFound,
        RelationKind::Like | RelationKind::Favorite => SocialServiceError::PostNotFound,
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, SocialServiceError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, SocialServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, SocialServiceError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .context("find users by ids")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: UserId(model.id),
        username: model.username,
        email: model.email,
        avatar: model.avatar,
        bio: model.bio,
        f_name: model.f_name,
        l_name: model.l_name,
        is_admin: model.is_admin,
        created_at: model.created_at,
    }
}

// ── Post repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPostRepository {
    pub db: DatabaseConnection,
}

impl PostRepository for DbPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, SocialServiceError> {
        let model = posts::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find post by id")?;
        Ok(model.map(post_from_model))
    }

    async fn find_by_ids(&self, ids: &[PostId]) -> Result<Vec<Post>, SocialServiceError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = posts::Entity::find()
            .filter(posts::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .order_by_asc(posts::Column::Id)
            .all(&self.db)
            .await
            .context("find posts by ids")?;
        Ok(models.into_iter().map(post_from_model).collect())
    }
}

fn post_from_model(model: posts::Model) -> Post {
    Post {
        id: PostId(model.id),
        owner_user_id: UserId(model.user_id),
        community_id: CommunityId(model.community_id),
        title: model.title,
        description: model.description,
        post_type: model.post_type,
        content: model.content,
        created_at: model.created_at,
    }
}

// ── Community repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCommunityRepository {
    pub db: DatabaseConnection,
}

impl CommunityRepository for DbCommunityRepository {
    async fn find_by_id(
        &self,
        id: CommunityId,
    ) -> Result<Option<GameCommunity>, SocialServiceError> {
        let model = game_communities::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find community by id")?;
        Ok(model.map(community_from_model))
    }
}

fn community_from_model(model: game_communities::Model) -> GameCommunity {
    GameCommunity {
        id: CommunityId(model.id),
        game_name: model.game_name,
        description: model.description,
        cover_image: model.cover_image,
        hero_image: model.hero_image,
        is_active: model.is_active,
    }
}

// ── Relation repository (follows / likes / favorites) ────────────────────────

#[derive(Clone)]
pub struct DbRelationRepository {
    pub db: DatabaseConnection,
}

impl ToggleSet for DbRelationRepository {
    type Key = RelationKey;

    async fn contains(&self, key: RelationKey) -> Result<bool, SocialServiceError> {
        let pk = (key.actor.0, key.target);
        let found = match key.kind {
            RelationKind::Follow => follows::Entity::find_by_id(pk)
                .one(&self.db)
                .await
                .context("find follow")?
                .is_some(),
            RelationKind::Like => likes::Entity::find_by_id(pk)
                .one(&self.db)
                .await
                .context("find like")?
                .is_some(),
            RelationKind::Favorite => favorites::Entity::find_by_id(pk)
                .one(&self.db)
                .await
                .context("find favorite")?
                .is_some(),
        };
        Ok(found)
    }

    async fn insert(&self, key: RelationKey) -> Result<(), SocialServiceError> {
        let now = Utc::now();
        match key.kind {
            RelationKind::Follow => follows::Entity::insert(follows::ActiveModel {
                follower_id: Set(key.actor.0),
                following_id: Set(key.target),
                created_at: Set(now),
            })
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| insert_error(e, missing_target(key.kind), "insert follow"))?,
            RelationKind::Like => likes::Entity::insert(likes::ActiveModel {
                user_id: Set(key.actor.0),
                post_id: Set(key.target),
                created_at: Set(now),
            })
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| insert_error(e, missing_target(key.kind), "insert like"))?,
            RelationKind::Favorite => favorites::Entity::insert(favorites::ActiveModel {
                user_id: Set(key.actor.0),
                post_id: Set(key.target),
                created_at: Set(now),
            })
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| insert_error(e, missing_target(key.kind), "insert favorite"))?,
        };
        Ok(())
    }

    async fn remove(&self, key: RelationKey) -> Result<bool, SocialServiceError> {
        let pk = (key.actor.0, key.target);
        let result = match key.kind {
            RelationKind::Follow => follows::Entity::delete_by_id(pk)
                .exec(&self.db)
                .await
                .context("delete follow")?,
            RelationKind::Like => likes::Entity::delete_by_id(pk)
                .exec(&self.db)
                .await
                .context("delete like")?,
            RelationKind::Favorite => favorites::Entity::delete_by_id(pk)
                .exec(&self.db)
                .await
                .context("delete favorite")?,
        };
        Ok(result.rows_affected > 0)
    }
}

impl RelationRepository for DbRelationRepository {
    async fn list_related(
        &self,
        kind: RelationKind,
        anchor: i32,
        direction: Direction,
    ) -> Result<Vec<i32>, SocialServiceError> {
        use Direction::{Incoming, Outgoing};
        let db = &self.db;
        let ids = match (kind, direction) {
            (RelationKind::Follow, Outgoing) => {
                related_ids::<follows::Entity>(
                    db,
                    follows::Column::FollowerId,
                    follows::Column::FollowingId,
                    anchor,
                )
                .await
            }
            (RelationKind::Follow, Incoming) => {
                related_ids::<follows::Entity>(
                    db,
                    follows::Column::FollowingId,
                    follows::Column::FollowerId,
                    anchor,
                )
                .await
            }
            (RelationKind::Like, Outgoing) => {
                related_ids::<likes::Entity>(
                    db,
                    likes::Column::UserId,
                    likes::Column::PostId,
                    anchor,
                )
                .await
            }
            (RelationKind::Like, Incoming) => {
                related_ids::<likes::Entity>(
                    db,
                    likes::Column::PostId,
                    likes::Column::UserId,
                    anchor,
                )
                .await
            }
            (RelationKind::Favorite, Outgoing) => {
                related_ids::<favorites::Entity>(
                    db,
                    favorites::Column::UserId,
                    favorites::Column::PostId,
                    anchor,
                )
                .await
            }
            (RelationKind::Favorite, Incoming) => {
                related_ids::<favorites::Entity>(
                    db,
                    favorites::Column::PostId,
                    favorites::Column::UserId,
                    anchor,
                )
                .await
            }
        };
        Ok(ids.with_context(|| format!("list related {kind:?} ({direction:?})"))?)
    }

    async fn count_related(
        &self,
        kind: RelationKind,
        anchor: i32,
        direction: Direction,
    ) -> Result<u64, SocialServiceError> {
        use Direction::{Incoming, Outgoing};
        let db = &self.db;
        let count = match (kind, direction) {
            (RelationKind::Follow, Outgoing) => {
                count_rows::<follows::Entity>(db, follows::Column::FollowerId, anchor).await
            }
            (RelationKind::Follow, Incoming) => {
                count_rows::<follows::Entity>(db, follows::Column::FollowingId, anchor).await
            }
            (RelationKind::Like, Outgoing) => {
                count_rows::<likes::Entity>(db, likes::Column::UserId, anchor).await
            }
            (RelationKind::Like, Incoming) => {
                count_rows::<likes::Entity>(db, likes::Column::PostId, anchor).await
            }
            (RelationKind::Favorite, Outgoing) => {
                count_rows::<favorites::Entity>(db, favorites::Column::UserId, anchor).await
            }
            (RelationKind::Favorite, Incoming) => {
                count_rows::<favorites::Entity>(db, favorites::Column::PostId, anchor).await
            }
        };
        Ok(count.with_context(|| format!("count related {kind:?} ({direction:?})"))?)
    }
}

/// `other` column of every row whose `anchor_col` equals `anchor`, ascending.
async fn related_ids<E: EntityTrait>(
    db: &DatabaseConnection,
    anchor_col: E::Column,
    other: E::Column,
    anchor: i32,
) -> Result<Vec<i32>, DbErr> {
    E::find()
        .filter(anchor_col.eq(anchor))
        .select_only()
        .column(other)
        .order_by_asc(other)
        .into_tuple::<i32>()
        .all(db)
        .await
}

async fn count_rows<E>(
    db: &DatabaseConnection,
    anchor_col: E::Column,
    anchor: i32,
) -> Result<u64, DbErr>
where
    E: EntityTrait,
    E::Model: Sync,
{
    E::find().filter(anchor_col.eq(anchor)).count(db).await
}

// ── Membership repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMembershipRepository {
    pub db: DatabaseConnection,
}

impl ToggleSet for DbMembershipRepository {
    type Key = Membership;

    async fn contains(&self, key: Membership) -> Result<bool, SocialServiceError> {
        let row = user_communities::Entity::find_by_id((key.user.0, key.community.0))
            .one(&self.db)
            .await
            .context("find membership")?;
        Ok(row.is_some())
    }

    async fn insert(&self, key: Membership) -> Result<(), SocialServiceError> {
        user_communities::Entity::insert(user_communities::ActiveModel {
            user_id: Set(key.user.0),
            community_id: Set(key.community.0),
        })
        .exec_without_returning(&self.db)
        .await
        .map_err(|e| {
            insert_error(e, SocialServiceError::CommunityNotFound, "connect membership")
        })?;
        Ok(())
    }

    async fn remove(&self, key: Membership) -> Result<bool, SocialServiceError> {
        let result = user_communities::Entity::delete_by_id((key.user.0, key.community.0))
            .exec(&self.db)
            .await
            .context("disconnect membership")?;
        Ok(result.rows_affected > 0)
    }
}

impl MembershipRepository for DbMembershipRepository {
    async fn list_communities(
        &self,
        user: UserId,
    ) -> Result<Vec<GameCommunity>, SocialServiceError> {
        let models = game_communities::Entity::find()
            .filter(
                game_communities::Column::Id.in_subquery(
                    Query::select()
                        .column(user_communities::Column::CommunityId)
                        .from(user_communities::Entity)
                        .and_where(Expr::col(user_communities::Column::UserId).eq(user.0))
                        .to_owned(),
                ),
            )
            .order_by_asc(game_communities::Column::Id)
            .all(&self.db)
            .await
            .context("list joined communities")?;
        Ok(models.into_iter().map(community_from_model).collect())
    }
}

// ── Cascade store ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCascadeStore {
    pub db: DatabaseConnection,
}

impl CascadeStore for DbCascadeStore {
    type Tx = DbCascadeTransaction;

    async fn begin(&self) -> Result<DbCascadeTransaction, SocialServiceError> {
        let txn = self
            .db
            .begin()
            .await
            .context("begin cascade transaction")?;
        Ok(DbCascadeTransaction { txn })
    }
}

/// Rolled back on drop unless committed.
pub struct DbCascadeTransaction {
    txn: DatabaseTransaction,
}

impl CascadeTransaction for DbCascadeTransaction {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, SocialServiceError> {
        // Row lock: concurrent deletions of the same user serialize here.
        let model = users::Entity::find_by_id(id.0)
            .lock_exclusive()
            .one(&self.txn)
            .await
            .context("lock user for deletion")?;
        Ok(model.map(user_from_model))
    }

    async fn find_user_id_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserId>, SocialServiceError> {
        let id = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .select_only()
            .column(users::Column::Id)
            .lock_shared()
            .into_tuple::<i32>()
            .one(&self.txn)
            .await
            .context("resolve sentinel user")?;
        Ok(id.map(UserId))
    }

    async fn find_community(
        &self,
        id: CommunityId,
    ) -> Result<Option<GameCommunity>, SocialServiceError> {
        let model = game_communities::Entity::find_by_id(id.0)
            .lock_exclusive()
            .one(&self.txn)
            .await
            .context("lock community for deletion")?;
        Ok(model.map(community_from_model))
    }

    async fn delete_favorites_by_user(&self, user: UserId) -> Result<u64, SocialServiceError> {
        let result = favorites::Entity::delete_many()
            .filter(favorites::Column::UserId.eq(user.0))
            .exec(&self.txn)
            .await
            .context("delete favorites of user")?;
        Ok(result.rows_affected)
    }

    async fn delete_comments_by_user(&self, user: UserId) -> Result<u64, SocialServiceError> {
        let result = comments::Entity::delete_many()
            .filter(comments::Column::UserId.eq(user.0))
            .exec(&self.txn)
            .await
            .context("delete comments of user")?;
        Ok(result.rows_affected)
    }

    async fn reassign_posts(&self, from: UserId, to: UserId) -> Result<u64, SocialServiceError> {
        let result = posts::Entity::update_many()
            .col_expr(posts::Column::UserId, Expr::value(to.0))
            .filter(posts::Column::UserId.eq(from.0))
            .exec(&self.txn)
            .await
            .context("reassign posts to sentinel")?;
        Ok(result.rows_affected)
    }

    async fn delete_follows_of_user(&self, user: UserId) -> Result<u64, SocialServiceError> {
        let result = follows::Entity::delete_many()
            .filter(
                Condition::any()
                    .add(follows::Column::FollowerId.eq(user.0))
                    .add(follows::Column::FollowingId.eq(user.0)),
            )
            .exec(&self.txn)
            .await
            .context("delete follows of user")?;
        Ok(result.rows_affected)
    }

    async fn delete_likes_by_user(&self, user: UserId) -> Result<u64, SocialServiceError> {
        let result = likes::Entity::delete_many()
            .filter(likes::Column::UserId.eq(user.0))
            .exec(&self.txn)
            .await
            .context("delete likes of user")?;
        Ok(result.rows_affected)
    }

    async fn delete_memberships_of_user(
        &self,
        user: UserId,
    ) -> Result<u64, SocialServiceError> {
        let result = user_communities::Entity::delete_many()
            .filter(user_communities::Column::UserId.eq(user.0))
            .exec(&self.txn)
            .await
            .context("delete memberships of user")?;
        Ok(result.rows_affected)
    }

    async fn delete_user(&self, user: UserId) -> Result<bool, SocialServiceError> {
        let result = users::Entity::delete_by_id(user.0)
            .exec(&self.txn)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }

    async fn post_ids_in_community(
        &self,
        community: CommunityId,
    ) -> Result<Vec<PostId>, SocialServiceError> {
        let ids = posts::Entity::find()
            .filter(posts::Column::CommunityId.eq(community.0))
            .select_only()
            .column(posts::Column::Id)
            .order_by_asc(posts::Column::Id)
            .into_tuple::<i32>()
            .all(&self.txn)
            .await
            .context("collect posts of community")?;
        Ok(ids.into_iter().map(PostId).collect())
    }

    async fn delete_favorites_on_posts(
        &self,
        posts: &[PostId],
    ) -> Result<u64, SocialServiceError> {
        if posts.is_empty() {
            return Ok(0);
        }
        let result = favorites::Entity::delete_many()
            .filter(favorites::Column::PostId.is_in(posts.iter().map(|id| id.0)))
            .exec(&self.txn)
            .await
            .context("delete favorites on posts")?;
        Ok(result.rows_affected)
    }

    async fn delete_likes_on_posts(&self, posts: &[PostId]) -> Result<u64, SocialServiceError> {
        if posts.is_empty() {
            return Ok(0);
        }
        let result = likes::Entity::delete_many()
            .filter(likes::Column::PostId.is_in(posts.iter().map(|id| id.0)))
            .exec(&self.txn)
            .await
            .context("delete likes on posts")?;
        Ok(result.rows_affected)
    }

    async fn delete_comments_on_posts(
        &self,
        posts: &[PostId],
    ) -> Result<u64, SocialServiceError> {
        if posts.is_empty() {
            return Ok(0);
        }
        let result = comments::Entity::delete_many()
            .filter(comments::Column::PostId.is_in(posts.iter().map(|id| id.0)))
            .exec(&self.txn)
            .await
            .context("delete comments on posts")?;
        Ok(result.rows_affected)
    }

    async fn delete_posts(&self, ids: &[PostId]) -> Result<u64, SocialServiceError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = posts::Entity::delete_many()
            .filter(posts::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .exec(&self.txn)
            .await
            .context("delete posts")?;
        Ok(result.rows_affected)
    }

    async fn delete_memberships_of_community(
        &self,
        community: CommunityId,
    ) -> Result<u64, SocialServiceError> {
        let result = user_communities::Entity::delete_many()
            .filter(user_communities::Column::CommunityId.eq(community.0))
            .exec(&self.txn)
            .await
            .context("delete memberships of community")?;
        Ok(result.rows_affected)
    }

    async fn delete_community(&self, community: CommunityId) -> Result<bool, SocialServiceError> {
        let result = game_communities::Entity::delete_by_id(community.0)
            .exec(&self.txn)
            .await
            .context("delete community")?;
        Ok(result.rows_affected > 0)
    }

    async fn commit(self) -> Result<(), SocialServiceError> {
        self.txn.commit().await.context("commit cascade")?;
        Ok(())
    }
}
