use std::collections::HashMap;

use chrono::Utc;
use common::storage::{ImageStore, ImageUpload};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{info, instrument};

use super::user::find_user;
use crate::entity::{article, photo, tag, user};
use crate::error::AppError;
use crate::extractors::actor::Actor;
use crate::models::article::{ArticleModifyRequest, ArticleRegisterRequest, ArticleResponse};

pub struct ArticleService<'a, C: ConnectionTrait> {
    conn: &'a C,
    images: &'a dyn ImageStore,
}

impl<'a, C: ConnectionTrait> ArticleService<'a, C> {
    pub fn new(conn: &'a C, images: &'a dyn ImageStore) -> Self {
        Self { conn, images }
    }

    /// Post a new article for `actor`.
    ///
    /// The tag must exist. `has_photos` records whether an image came with the post, even if
    /// the image store keeps no copy of it.
    #[instrument(skip(self, request, image), fields(user_id = actor.user_id, category = request.category))]
    pub async fn register_article(
        &self,
        actor: Actor,
        request: ArticleRegisterRequest,
        image: Option<ImageUpload>,
    ) -> Result<article::Model, AppError> {
        let tag = find_tag(self.conn, request.category).await?;
        find_user(self.conn, actor.user_id).await?;

        let now = Utc::now();
        let has_photos = image.is_some();
        let model = article::ActiveModel {
            title: Set(request.title.trim().to_string()),
            content: Set(request.content),
            has_photos: Set(has_photos),
            tag_id: Set(tag.id),
            user_id: Set(actor.user_id),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;

        if let Some(image) = image {
            self.attach_image(model.id, &image).await?;
        }

        info!(article_id = model.id, has_photos, "Article registered");
        Ok(model)
    }

    /// Soft-delete an article owned by `actor`.
    #[instrument(skip(self), fields(user_id = actor.user_id))]
    pub async fn delete_article(&self, actor: Actor, id: i32) -> Result<(), AppError> {
        let existing = find_live_article(self.conn, id)
            .await?
            .ok_or_else(|| AppError::NoData(format!("Article {id} not found")))?;
        actor.require_owner(existing.user_id)?;

        existing.soft_delete(Utc::now()).update(self.conn).await?;

        info!(article_id = id, "Article deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn find_article(&self, id: i32) -> Result<ArticleResponse, AppError> {
        let existing = find_live_article(self.conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Article {id} not found")))?;

        self.into_responses(vec![existing])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal(format!("article {id} lost while mapping")))
    }

    /// Overwrite title, content and tag of an article owned by `actor`.
    ///
    /// An attached image is stored and appended to the article's photos.
    #[instrument(skip(self, request, image), fields(user_id = actor.user_id, category = request.category))]
    pub async fn modify_article(
        &self,
        actor: Actor,
        id: i32,
        request: ArticleModifyRequest,
        image: Option<ImageUpload>,
    ) -> Result<ArticleResponse, AppError> {
        let existing = find_live_article(self.conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Article {id} not found")))?;
        actor.require_owner(existing.user_id)?;
        let tag = find_tag(self.conn, request.category).await?;

        let mut active = existing.revise(
            request.title.trim().to_string(),
            request.content,
            tag.id,
            Utc::now(),
        );
        if image.is_some() {
            active.has_photos = Set(true);
        }
        let updated = active.update(self.conn).await?;

        if let Some(image) = image {
            self.attach_image(updated.id, &image).await?;
        }

        info!(article_id = id, "Article modified");
        self.into_responses(vec![updated])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal(format!("article {id} lost while mapping")))
    }

    /// All live articles, newest first.
    #[instrument(skip(self))]
    pub async fn find_all_articles(&self) -> Result<Vec<ArticleResponse>, AppError> {
        let articles = article::Entity::find()
            .filter(article::Column::DeletedAt.is_null())
            .order_by_desc(article::Column::CreatedAt)
            .order_by_desc(article::Column::Id)
            .all(self.conn)
            .await?;

        self.into_responses(articles).await
    }

    async fn attach_image(&self, article_id: i32, image: &ImageUpload) -> Result<(), AppError> {
        let Some(location) = self.images.save(image).await? else {
            return Ok(());
        };

        photo::ActiveModel {
            image: Set(location),
            article_id: Set(article_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        Ok(())
    }

    /// Resolve tag names, author nicknames and photos for a batch of articles.
    async fn into_responses(
        &self,
        articles: Vec<article::Model>,
    ) -> Result<Vec<ArticleResponse>, AppError> {
        if articles.is_empty() {
            return Ok(Vec::new());
        }

        let tag_names: HashMap<i32, String> = tag::Entity::find()
            .filter(tag::Column::Id.is_in(articles.iter().map(|a| a.tag_id).collect::<Vec<_>>()))
            .all(self.conn)
            .await?
            .into_iter()
            .map(|t| (t.id, t.tag_name))
            .collect();

        let nicknames: HashMap<i32, String> = user::Entity::find()
            .filter(user::Column::Id.is_in(articles.iter().map(|a| a.user_id).collect::<Vec<_>>()))
            .all(self.conn)
            .await?
            .into_iter()
            .map(|u| (u.id, u.nickname))
            .collect();

        // Photos are only listed for articles posted with an attachment.
        let with_photos: Vec<i32> = articles
            .iter()
            .filter(|a| a.has_photos)
            .map(|a| a.id)
            .collect();
        let mut files: HashMap<i32, Vec<String>> = HashMap::new();
        if !with_photos.is_empty() {
            let photos = photo::Entity::find()
                .filter(photo::Column::ArticleId.is_in(with_photos))
                .order_by_asc(photo::Column::Id)
                .all(self.conn)
                .await?;
            for p in photos {
                files.entry(p.article_id).or_default().push(p.image);
            }
        }

        articles
            .into_iter()
            .map(|a| {
                let tag_name = tag_names.get(&a.tag_id).cloned().ok_or_else(|| {
                    AppError::Internal(format!("tag {} of article {} missing", a.tag_id, a.id))
                })?;
                let nickname = nicknames.get(&a.user_id).cloned().ok_or_else(|| {
                    AppError::Internal(format!("author {} of article {} missing", a.user_id, a.id))
                })?;
                Ok(ArticleResponse {
                    files: files.remove(&a.id).unwrap_or_default(),
                    id: a.id,
                    title: a.title,
                    content: a.content,
                    tag_name,
                    nickname,
                    created_at: a.created_at,
                })
            })
            .collect()
    }
}

/// Look up a tag, failing with `NotFound` when absent.
async fn find_tag<C: ConnectionTrait>(db: &C, id: i32) -> Result<tag::Model, AppError> {
    tag::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Tag {id} not found")))
}

/// Soft-deleted articles are treated as absent.
async fn find_live_article<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<article::Model>, AppError> {
    Ok(article::Entity::find_by_id(id)
        .one(db)
        .await?
        .filter(|a| !a.is_deleted()))
}
