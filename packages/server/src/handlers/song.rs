use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::song::*;
use crate::services::SongService;
use crate::state::AppState;

const DEFAULT_SIMILAR_LIMIT: u64 = 10;
const MAX_SIMILAR_LIMIT: u64 = 100;

#[utoipa::path(
    post,
    path = "/",
    tag = "Songs",
    operation_id = "createSong",
    summary = "Register a song",
    description = "Adds a song to the catalog. `tempo` and `features` come from audio analysis \
        and are needed for similarity search.",
    request_body = CreateSongRequest,
    responses(
        (status = 201, description = "Song created", body = SongResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_song(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateSongRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_song(&payload)?;

    let model = SongService::new(&state.db).create_song(payload).await?;

    Ok((StatusCode::CREATED, Json(SongResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Songs",
    operation_id = "getSong",
    summary = "Get a song",
    params(("id" = i32, Path, description = "Song ID")),
    responses(
        (status = 200, description = "Song", body = SongResponse),
        (status = 404, description = "Song not found (NO_DATA)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SongResponse>, AppError> {
    let model = SongService::new(&state.db).find_song(id).await?;
    Ok(Json(SongResponse::from(model)))
}

#[utoipa::path(
    get,
    path = "/{id}/similar",
    tag = "Songs",
    operation_id = "listSimilarSongs",
    summary = "Find songs that sound alike",
    description = "Ranks analysed songs by similarity of tempo and audio features to the given song.",
    params(("id" = i32, Path, description = "Song ID"), SimilarSongsQuery),
    responses(
        (status = 200, description = "Most similar songs first", body = SimilarSongListResponse),
        (status = 400, description = "Bad limit or song not analysed (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Song not found (NO_DATA)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_similar_songs(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<SimilarSongsQuery>,
) -> Result<Json<SimilarSongListResponse>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_SIMILAR_LIMIT);
    if !(1..=MAX_SIMILAR_LIMIT).contains(&limit) {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {MAX_SIMILAR_LIMIT}"
        )));
    }

    let data = SongService::new(&state.db)
        .find_similar(id, limit as usize)
        .await?;

    Ok(Json(SimilarSongListResponse { song_id: id, data }))
}

#[utoipa::path(
    post,
    path = "/{id}/candidate",
    tag = "Songs",
    operation_id = "addTournamentCandidate",
    summary = "Add a song to the tournament pool",
    params(("id" = i32, Path, description = "Song ID")),
    responses(
        (status = 201, description = "Song added to the pool", body = CandidateResponse),
        (status = 404, description = "Song not found (NO_DATA)", body = ErrorBody),
        (status = 409, description = "Already a candidate (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn add_candidate(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let model = SongService::new(&txn).add_candidate(id).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(CandidateResponse::from(model))))
}
