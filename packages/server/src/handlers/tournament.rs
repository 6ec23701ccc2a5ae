use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::actor::Actor;
use crate::extractors::json::AppJson;
use crate::models::tournament::*;
use crate::services::TournamentService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/songs",
    tag = "Tournaments",
    operation_id = "findTournamentSongs",
    summary = "Deal songs for a bracket",
    description = "Returns `round` distinct songs drawn at random from the candidate pool.",
    params(FindTournamentSongQuery),
    responses(
        (status = 200, description = "Songs for the bracket", body = TournamentSongListResponse),
        (status = 400, description = "Invalid round (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Not enough candidates (NO_DATA)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn find_tournament_songs(
    State(state): State<AppState>,
    Query(query): Query<FindTournamentSongQuery>,
) -> Result<Json<TournamentSongListResponse>, AppError> {
    validate_round(query.round)?;

    let data = TournamentService::new(&state.db)
        .find_tournament_songs(query.round)
        .await?;

    Ok(Json(TournamentSongListResponse {
        round: query.round,
        data,
    }))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Tournaments",
    operation_id = "registerTournament",
    summary = "Start a tournament",
    description = "Records a new play session for the calling user.",
    responses(
        (status = 201, description = "Tournament created", body = TournamentResponse),
        (status = 401, description = "Missing identity (IDENTITY_MISSING)", body = ErrorBody),
        (status = 404, description = "User not found (NO_DATA)", body = ErrorBody),
    ),
    security(("actor" = [])),
)]
#[instrument(skip(state, actor), fields(user_id = actor.user_id))]
pub async fn register_tournament(
    actor: Actor,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let model = TournamentService::new(&txn)
        .register_tournament(actor)
        .await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(TournamentResponse::from(model))))
}

#[utoipa::path(
    post,
    path = "/{id}/results",
    tag = "Tournaments",
    operation_id = "registerTournamentResult",
    summary = "Record the final four",
    description = "Stores champion, runner-up and both semifinalists with ranks 1, 2, 3 and 3. \
        Ids are tournament song ids. A tournament's result can be recorded once.",
    params(("id" = i32, Path, description = "Tournament ID")),
    request_body = RegisterTournamentResultRequest,
    responses(
        (status = 201, description = "Result recorded", body = TournamentResultListResponse),
        (status = 400, description = "Duplicate song (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing identity (IDENTITY_MISSING)", body = ErrorBody),
        (status = 403, description = "Not the player (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Tournament or song not found (NO_DATA)", body = ErrorBody),
        (status = 409, description = "Result already recorded (CONFLICT)", body = ErrorBody),
    ),
    security(("actor" = [])),
)]
#[instrument(skip(state, actor, payload), fields(user_id = actor.user_id))]
pub async fn register_tournament_result(
    actor: Actor,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<RegisterTournamentResultRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_tournament_result(&payload)?;

    let txn = state.db.begin().await?;
    let results = TournamentService::new(&txn)
        .register_tournament_result(actor, id, payload)
        .await?;
    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(TournamentResultListResponse {
            tournament_id: id,
            results,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}/results",
    tag = "Tournaments",
    operation_id = "listTournamentResults",
    summary = "Get a tournament's result",
    params(("id" = i32, Path, description = "Tournament ID")),
    responses(
        (status = 200, description = "Results ordered by rank", body = TournamentResultListResponse),
        (status = 404, description = "Tournament not found (NO_DATA)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_tournament_results(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TournamentResultListResponse>, AppError> {
    let results = TournamentService::new(&state.db).find_results(id).await?;

    Ok(Json(TournamentResultListResponse {
        tournament_id: id,
        results,
    }))
}
