use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "article")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    /// Set when the article was posted with an attachment; photos are only listed if true.
    pub has_photos: bool,

    pub tag_id: i32,
    #[sea_orm(belongs_to, from = "tag_id", to = "id")]
    pub tag: HasOne<super::tag::Entity>,

    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,

    #[sea_orm(has_many)]
    pub photos: HasMany<super::photo::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    /// NULL while the article is live.
    pub deleted_at: Option<DateTimeUtc>,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Changes that soft-delete this article at `now`.
    pub fn soft_delete(self, now: DateTime<Utc>) -> ActiveModel {
        let mut active: ActiveModel = self.into();
        active.deleted_at = Set(Some(now));
        active
    }

    /// Changes that overwrite the editable fields.
    pub fn revise(
        self,
        title: String,
        content: String,
        tag_id: i32,
        now: DateTime<Utc>,
    ) -> ActiveModel {
        let mut active: ActiveModel = self.into();
        active.title = Set(title);
        active.content = Set(content);
        active.tag_id = Set(tag_id);
        active.updated_at = Set(now);
        active
    }
}
