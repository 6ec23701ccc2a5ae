use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "playlist_song")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub playlist_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub song_id: i32,
    #[sea_orm(belongs_to, from = "playlist_id", to = "id")]
    pub playlist: HasOne<super::playlist::Entity>,
    #[sea_orm(belongs_to, from = "song_id", to = "id")]
    pub song: HasOne<super::song::Entity>,

    pub added_at: DateTimeUtc,
    /// NULL while the song is in the playlist.
    pub deleted_at: Option<DateTimeUtc>,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Changes that take the song out of the playlist at `now`.
    pub fn soft_delete(self, now: DateTime<Utc>) -> ActiveModel {
        let mut active: ActiveModel = self.into();
        active.deleted_at = Set(Some(now));
        active
    }

    /// Changes that put a removed song back, counting it as added at `now`.
    pub fn reactivate(self, now: DateTime<Utc>) -> ActiveModel {
        let mut active: ActiveModel = self.into();
        active.deleted_at = Set(None);
        active.added_at = Set(now);
        active
    }
}
