use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set};
use tracing::info;

use crate::entity::tag::{self, DEFAULT_TAGS};

/// Insert the default article tags, leaving existing ones untouched.
pub async fn seed_tags(db: &DatabaseConnection) -> Result<(), DbErr> {
    let mut inserted = 0u32;
    for &name in DEFAULT_TAGS {
        let model = tag::ActiveModel {
            tag_name: Set(name.to_string()),
            ..Default::default()
        };

        let result = tag::Entity::insert(model)
            .on_conflict(
                OnConflict::column(tag::Column::TagName)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(rows) => inserted += rows as u32,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if inserted > 0 {
        info!("Seeded {} new tags", inserted);
    }
    Ok(())
}
