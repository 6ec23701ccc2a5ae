use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::actor::Actor;
use crate::models::article::*;
use crate::services::ArticleService;
use crate::state::AppState;
use crate::utils::upload::{ArticleForm, read_article_form};

/// Room for one image plus the JSON part and multipart framing.
pub fn article_body_limit(max_image_size: u64) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_image_size as usize + 2 * 1024 * 1024)
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Articles",
    operation_id = "registerArticle",
    summary = "Post a new article",
    description = "Multipart form with a JSON `request` part (`title`, `content`, `category`) \
        and an optional image `file` part. `category` must be an existing tag id.",
    request_body(content_type = "multipart/form-data", description = "Article JSON and optional image"),
    responses(
        (status = 201, description = "Article created", body = ArticleCreatedResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing identity (IDENTITY_MISSING)", body = ErrorBody),
        (status = 404, description = "Tag not found (NOT_FOUND) or user not found (NO_DATA)", body = ErrorBody),
    ),
    security(("actor" = [])),
)]
#[instrument(skip(state, actor, multipart), fields(user_id = actor.user_id))]
pub async fn register_article(
    actor: Actor,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let ArticleForm { request, image } = read_article_form::<ArticleRegisterRequest>(
        &mut multipart,
        state.config.upload.max_image_size,
    )
    .await?;
    validate_register_article(&request)?;

    let txn = state.db.begin().await?;
    let model = ArticleService::new(&txn, &*state.image_store)
        .register_article(actor, request, image)
        .await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(ArticleCreatedResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Articles",
    operation_id = "listArticles",
    summary = "List all articles",
    description = "Returns every live article, newest first.",
    responses(
        (status = 200, description = "List of articles", body = ArticleListResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn list_articles(
    State(state): State<AppState>,
) -> Result<Json<ArticleListResponse>, AppError> {
    let data = ArticleService::new(&state.db, &*state.image_store)
        .find_all_articles()
        .await?;

    Ok(Json(ArticleListResponse {
        total: data.len() as u64,
        data,
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Articles",
    operation_id = "getArticle",
    summary = "Get an article",
    params(("id" = i32, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Article with tag, author and photos", body = ArticleResponse),
        (status = 404, description = "Article not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ArticleResponse>, AppError> {
    let article = ArticleService::new(&state.db, &*state.image_store)
        .find_article(id)
        .await?;
    Ok(Json(article))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Articles",
    operation_id = "modifyArticle",
    summary = "Edit an article",
    description = "Replaces title, content and tag. An attached image is appended to the \
        article's photos. Only the author may edit.",
    params(("id" = i32, Path, description = "Article ID")),
    request_body(content_type = "multipart/form-data", description = "Article JSON and optional image"),
    responses(
        (status = 200, description = "Updated article", body = ArticleResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing identity (IDENTITY_MISSING)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Article or tag not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("actor" = [])),
)]
#[instrument(skip(state, actor, multipart), fields(user_id = actor.user_id))]
pub async fn modify_article(
    actor: Actor,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> Result<Json<ArticleResponse>, AppError> {
    let ArticleForm { request, image } = read_article_form::<ArticleModifyRequest>(
        &mut multipart,
        state.config.upload.max_image_size,
    )
    .await?;
    validate_modify_article(&request)?;

    let txn = state.db.begin().await?;
    let article = ArticleService::new(&txn, &*state.image_store)
        .modify_article(actor, id, request, image)
        .await?;
    txn.commit().await?;

    Ok(Json(article))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Articles",
    operation_id = "deleteArticle",
    summary = "Delete an article",
    description = "Soft-deletes the article. Only the author may delete.",
    params(("id" = i32, Path, description = "Article ID")),
    responses(
        (status = 204, description = "Article deleted"),
        (status = 401, description = "Missing identity (IDENTITY_MISSING)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Article not found (NO_DATA)", body = ErrorBody),
    ),
    security(("actor" = [])),
)]
#[instrument(skip(state, actor), fields(user_id = actor.user_id))]
pub async fn delete_article(
    actor: Actor,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let txn = state.db.begin().await?;
    ArticleService::new(&txn, &*state.image_store)
        .delete_article(actor, id)
        .await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
