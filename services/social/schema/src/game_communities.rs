use sea_orm::entity::prelude::*;

/// A game community that owns posts and has members.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "game_communities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub game_name: String,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub hero_image: Option<String>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::posts::Entity")]
    Posts,
    #[sea_orm(has_many = "super::user_communities::Entity")]
    UserCommunities,
}

impl Related<super::posts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_communities::Relation::User.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_communities::Relation::Community.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
