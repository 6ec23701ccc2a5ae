use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Categories seeded on startup.
pub const DEFAULT_TAGS: &[&str] = &["general", "review", "recommendation", "question"];

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tag")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub tag_name: String,

    #[sea_orm(has_many)]
    pub articles: HasMany<super::article::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
