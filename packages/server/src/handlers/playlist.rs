use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::actor::Actor;
use crate::extractors::json::AppJson;
use crate::models::playlist::*;
use crate::services::PlaylistService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Playlists",
    operation_id = "createPlaylist",
    summary = "Create a playlist",
    request_body = CreatePlaylistRequest,
    responses(
        (status = 201, description = "Playlist created", body = PlaylistResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing identity (IDENTITY_MISSING)", body = ErrorBody),
        (status = 404, description = "User not found (NO_DATA)", body = ErrorBody),
    ),
    security(("actor" = [])),
)]
#[instrument(skip(state, actor, payload), fields(user_id = actor.user_id))]
pub async fn create_playlist(
    actor: Actor,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreatePlaylistRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_playlist(&payload)?;

    let txn = state.db.begin().await?;
    let playlist = PlaylistService::new(&txn)
        .create_playlist(actor, payload)
        .await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(playlist)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Playlists",
    operation_id = "getPlaylist",
    summary = "Get a playlist",
    description = "Returns the playlist with its songs in the order they were added.",
    params(("id" = i32, Path, description = "Playlist ID")),
    responses(
        (status = 200, description = "Playlist", body = PlaylistResponse),
        (status = 404, description = "Playlist not found (NO_DATA)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_playlist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PlaylistResponse>, AppError> {
    let playlist = PlaylistService::new(&state.db).find_playlist(id).await?;
    Ok(Json(playlist))
}

#[utoipa::path(
    post,
    path = "/{id}/songs",
    tag = "Playlists",
    operation_id = "addPlaylistSong",
    summary = "Add a song to a playlist",
    description = "A song that was removed earlier is added back. Only the owner may add songs.",
    params(("id" = i32, Path, description = "Playlist ID")),
    request_body = AddPlaylistSongRequest,
    responses(
        (status = 200, description = "Updated playlist", body = PlaylistResponse),
        (status = 401, description = "Missing identity (IDENTITY_MISSING)", body = ErrorBody),
        (status = 403, description = "Not the owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Playlist or song not found (NO_DATA)", body = ErrorBody),
        (status = 409, description = "Song already in playlist (CONFLICT)", body = ErrorBody),
    ),
    security(("actor" = [])),
)]
#[instrument(skip(state, actor, payload), fields(user_id = actor.user_id))]
pub async fn add_playlist_song(
    actor: Actor,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<AddPlaylistSongRequest>,
) -> Result<Json<PlaylistResponse>, AppError> {
    let txn = state.db.begin().await?;
    let playlist = PlaylistService::new(&txn)
        .add_song(actor, id, payload.song_id)
        .await?;
    txn.commit().await?;

    Ok(Json(playlist))
}

#[utoipa::path(
    delete,
    path = "/{id}/songs/{song_id}",
    tag = "Playlists",
    operation_id = "removePlaylistSong",
    summary = "Remove a song from a playlist",
    params(
        ("id" = i32, Path, description = "Playlist ID"),
        ("song_id" = i32, Path, description = "Song ID"),
    ),
    responses(
        (status = 204, description = "Song removed"),
        (status = 401, description = "Missing identity (IDENTITY_MISSING)", body = ErrorBody),
        (status = 403, description = "Not the owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Playlist not found or song not in it (NO_DATA)", body = ErrorBody),
    ),
    security(("actor" = [])),
)]
#[instrument(skip(state, actor), fields(user_id = actor.user_id))]
pub async fn remove_playlist_song(
    actor: Actor,
    State(state): State<AppState>,
    Path((id, song_id)): Path<(i32, i32)>,
) -> Result<StatusCode, AppError> {
    let txn = state.db.begin().await?;
    PlaylistService::new(&txn)
        .remove_song(actor, id, song_id)
        .await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
