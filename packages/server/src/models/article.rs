use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::{validate_text, validate_title};
use crate::error::AppError;

const MAX_CONTENT_BYTES: usize = 1_000_000;

/// JSON carried in the `request` part of the article multipart form.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ArticleRegisterRequest {
    #[schema(example = "Best driving songs of the summer")]
    pub title: String,
    #[schema(example = "Here is my list...")]
    pub content: String,
    /// ID of the tag (category) the article is filed under.
    #[schema(example = 2)]
    pub category: i32,
}

/// JSON carried in the `request` part of the article edit form.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ArticleModifyRequest {
    pub title: String,
    pub content: String,
    /// ID of the new tag.
    pub category: i32,
}

pub fn validate_register_article(req: &ArticleRegisterRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    validate_text(&req.content, "Content", MAX_CONTENT_BYTES)
}

pub fn validate_modify_article(req: &ArticleModifyRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    validate_text(&req.content, "Content", MAX_CONTENT_BYTES)
}

/// Article as shown to readers.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ArticleResponse {
    #[schema(example = 12)]
    pub id: i32,
    pub title: String,
    pub content: String,
    #[schema(example = "review")]
    pub tag_name: String,
    /// Author's nickname.
    #[schema(example = "melody_hunter")]
    pub nickname: String,
    pub created_at: DateTime<Utc>,
    /// Photo locations; always empty for articles posted without an attachment.
    pub files: Vec<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ArticleListResponse {
    pub data: Vec<ArticleResponse>,
    pub total: u64,
}

/// Returned after an article is registered.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ArticleCreatedResponse {
    pub id: i32,
    pub title: String,
    pub tag_id: i32,
    pub user_id: i32,
    /// Whether the article was posted with an attachment.
    pub has_photos: bool,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::article::Model> for ArticleCreatedResponse {
    fn from(m: crate::entity::article::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            tag_id: m.tag_id,
            user_id: m.user_id,
            has_photos: m.has_photos,
            created_at: m.created_at,
        }
    }
}
