use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use forgexp_auth_types::token::JwtAuthProvider;

use crate::domain::types::SentinelUser;
use crate::infra::db::{
    DbCascadeStore, DbCommunityRepository, DbMembershipRepository, DbPostRepository,
    DbRelationRepository, DbUserRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub auth: JwtAuthProvider,
    /// Resolved once at startup.
    pub sentinel: SentinelUser,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn post_repo(&self) -> DbPostRepository {
        DbPostRepository {
            db: self.db.clone(),
        }
    }

    pub fn community_repo(&self) -> DbCommunityRepository {
        DbCommunityRepository {
            db: self.db.clone(),
        }
    }

    pub fn relation_repo(&self) -> DbRelationRepository {
        DbRelationRepository {
            db: self.db.clone(),
        }
    }

    pub fn membership_repo(&self) -> DbMembershipRepository {
        DbMembershipRepository {
            db: self.db.clone(),
        }
    }

    pub fn cascade_store(&self) -> DbCascadeStore {
        DbCascadeStore {
            db: self.db.clone(),
        }
    }
}

impl FromRef<AppState> for JwtAuthProvider {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
