use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub nickname: String,

    #[sea_orm(has_many)]
    pub articles: HasMany<super::article::Entity>,

    #[sea_orm(has_many)]
    pub playlists: HasMany<super::playlist::Entity>,

    #[sea_orm(has_many)]
    pub tournaments: HasMany<super::tournament::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
