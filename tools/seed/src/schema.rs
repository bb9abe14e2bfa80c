use anyhow::{Context, Result};
use sea_orm::sea_query::TableCreateStatement;
use sea_orm::{ConnectionTrait, DbBackend, Schema};

use forgexp_social_schema::{
    comments, favorites, follows, game_communities, likes, posts, user_communities, users,
};

/// `CREATE TABLE IF NOT EXISTS` for every entity, parents before children.
///
/// Foreign-key actions and composite keys come from the entity attributes,
/// so the store enforces exactly what the entities declare.
pub fn create_statements(backend: DbBackend) -> Vec<TableCreateStatement> {
    let schema = Schema::new(backend);
    let mut statements = vec![
        schema.create_table_from_entity(users::Entity),
        schema.create_table_from_entity(game_communities::Entity),
        schema.create_table_from_entity(posts::Entity),
        schema.create_table_from_entity(comments::Entity),
        schema.create_table_from_entity(follows::Entity),
        schema.create_table_from_entity(likes::Entity),
        schema.create_table_from_entity(favorites::Entity),
        schema.create_table_from_entity(user_communities::Entity),
    ];
    for statement in &mut statements {
        statement.if_not_exists();
    }
    statements
}

/// Create missing tables. Existing tables are left untouched.
pub async fn ensure_tables<C: ConnectionTrait>(db: &C) -> Result<usize> {
    let backend = db.get_database_backend();
    let statements = create_statements(backend);
    for statement in &statements {
        db.execute(backend.build(statement))
            .await
            .context("failed to create table")?;
    }
    Ok(statements.len())
}
