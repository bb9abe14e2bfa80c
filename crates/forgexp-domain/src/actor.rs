//! The authenticated principal behind a request.

use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// Verified identity of the caller, threaded explicitly into every core
/// operation. Produced by the auth layer from a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub user_id: UserId,
    pub is_admin: bool,
}

impl Actor {
    pub fn user(user_id: UserId) -> Self {
        Self {
            user_id,
            is_admin: false,
        }
    }

    pub fn admin(user_id: UserId) -> Self {
        Self {
            user_id,
            is_admin: true,
        }
    }

    /// An actor may manage an account if it is that account or an admin.
    pub fn can_manage(&self, target: UserId) -> bool {
        self.is_admin || self.user_id == target
    }
}
