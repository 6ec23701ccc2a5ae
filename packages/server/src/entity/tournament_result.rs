use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tournament_result")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub tournament_id: i32,
    #[sea_orm(belongs_to, from = "tournament_id", to = "id")]
    pub tournament: HasOne<super::tournament::Entity>,

    pub tournament_song_id: i32,
    #[sea_orm(belongs_to, from = "tournament_song_id", to = "id")]
    pub tournament_song: HasOne<super::tournament_song::Entity>,

    /// 1 for the winner, 2 for the runner-up, 3 for both losing semifinalists.
    pub rank: i32,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
