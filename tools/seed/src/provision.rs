use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use forgexp_social_schema::users;

/// An account the seed run guarantees to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub is_admin: bool,
}

/// What happened to one account during a seed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created(i32),
    Promoted(i32),
    Unchanged(i32),
}

impl Outcome {
    pub fn id(self) -> i32 {
        match self {
            Outcome::Created(id) | Outcome::Promoted(id) | Outcome::Unchanged(id) => id,
        }
    }
}

/// Decide the outcome for an existing row. Admin rights are only ever
/// granted, never revoked.
pub fn reconcile(existing: &users::Model, wanted: &Account) -> Outcome {
    if wanted.is_admin && !existing.is_admin {
        Outcome::Promoted(existing.id)
    } else {
        Outcome::Unchanged(existing.id)
    }
}

/// Insert `account` if no row carries its username, promote it when an
/// admin flag is requested. Safe to run repeatedly.
pub async fn ensure_account<C: ConnectionTrait>(db: &C, account: &Account) -> Result<Outcome> {
    let existing = users::Entity::find()
        .filter(users::Column::Username.eq(&account.username))
        .one(db)
        .await
        .with_context(|| format!("failed to look up user {}", account.username))?;

    if let Some(model) = existing {
        let outcome = reconcile(&model, account);
        if let Outcome::Promoted(_) = outcome {
            let mut active: users::ActiveModel = model.into();
            active.is_admin = Set(true);
            active
                .update(db)
                .await
                .with_context(|| format!("failed to promote user {}", account.username))?;
        }
        return Ok(outcome);
    }

    let model = users::ActiveModel {
        username: Set(account.username.clone()),
        email: Set(account.email.clone()),
        avatar: Set(None),
        bio: Set(account.bio.clone()),
        f_name: Set(None),
        l_name: Set(None),
        is_admin: Set(account.is_admin),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .with_context(|| format!("failed to create user {}", account.username))?;

    Ok(Outcome::Created(model.id))
}
