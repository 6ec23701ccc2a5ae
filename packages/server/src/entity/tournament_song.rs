use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A song in the tournament candidate pool.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tournament_song")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub song_id: i32,
    #[sea_orm(belongs_to, from = "song_id", to = "id")]
    pub song: HasOne<super::song::Entity>,

    #[sea_orm(has_many)]
    pub results: HasMany<super::tournament_result::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
