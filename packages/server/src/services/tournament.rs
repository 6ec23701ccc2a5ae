use std::collections::HashMap;

use chrono::Utc;
use rand::seq::SliceRandom;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set, sea_query::LockType,
};
use tracing::{info, instrument};

use super::user::find_user;
use crate::entity::{song, tournament, tournament_result, tournament_song};
use crate::error::AppError;
use crate::extractors::actor::Actor;
use crate::models::tournament::{
    RESULT_RANKS, RegisterTournamentResultRequest, TournamentResultResponse,
    TournamentSongResponse,
};

pub struct TournamentService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> TournamentService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Deal `round` distinct candidates, drawn uniformly at random from the pool.
    ///
    /// Fails with `NoData` when the pool holds fewer than `round` songs.
    #[instrument(skip(self))]
    pub async fn find_tournament_songs(
        &self,
        round: u32,
    ) -> Result<Vec<TournamentSongResponse>, AppError> {
        let pool = tournament_song::Entity::find().all(self.conn).await?;
        let round = round as usize;
        if pool.len() < round {
            return Err(AppError::NoData(format!(
                "A {round}-song tournament needs {round} candidates, only {} available",
                pool.len()
            )));
        }

        let drawn = draw(pool, round);
        let songs = load_songs(self.conn, drawn.iter().map(|c| c.song_id).collect()).await?;

        drawn
            .into_iter()
            .map(|candidate| {
                let song = songs.get(&candidate.song_id).ok_or_else(|| {
                    AppError::Internal(format!("song of candidate {} missing", candidate.id))
                })?;
                Ok(TournamentSongResponse {
                    tournament_song_id: candidate.id,
                    song_id: song.id,
                    title: song.title.clone(),
                    artist: song.artist.clone(),
                    image_url: song.image_url.clone(),
                    preview_url: song.preview_url.clone(),
                })
            })
            .collect()
    }

    #[instrument(skip(self), fields(user_id = actor.user_id))]
    pub async fn register_tournament(&self, actor: Actor) -> Result<tournament::Model, AppError> {
        find_user(self.conn, actor.user_id).await?;

        let model = tournament::ActiveModel {
            user_id: Set(actor.user_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;

        info!(tournament_id = model.id, "Tournament registered");
        Ok(model)
    }

    /// Record the final four of a tournament owned by `actor` with ranks `[1, 2, 3, 3]`.
    ///
    /// Every referenced row is checked before anything is written. A tournament's result
    /// can only be recorded once; the tournament row stays locked until the caller's
    /// transaction ends, so concurrent recordings of the same tournament serialise.
    #[instrument(skip(self, request), fields(user_id = actor.user_id))]
    pub async fn register_tournament_result(
        &self,
        actor: Actor,
        tournament_id: i32,
        request: RegisterTournamentResultRequest,
    ) -> Result<Vec<TournamentResultResponse>, AppError> {
        let played = lock_tournament(tournament_id)
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NoData(format!("Tournament {tournament_id} not found")))?;
        actor.require_owner(played.user_id)?;

        let mut finalists = Vec::with_capacity(RESULT_RANKS.len());
        for id in request.ranked_ids() {
            let candidate = tournament_song::Entity::find_by_id(id)
                .one(self.conn)
                .await?
                .ok_or_else(|| AppError::NoData(format!("Tournament song {id} not found")))?;
            finalists.push(candidate);
        }

        let recorded = tournament_result::Entity::find()
            .filter(tournament_result::Column::TournamentId.eq(tournament_id))
            .count(self.conn)
            .await?;
        if recorded > 0 {
            return Err(AppError::Conflict(format!(
                "Result of tournament {tournament_id} is already recorded"
            )));
        }

        let now = Utc::now();
        for (candidate, rank) in finalists.iter().zip(RESULT_RANKS) {
            tournament_result::ActiveModel {
                tournament_id: Set(tournament_id),
                tournament_song_id: Set(candidate.id),
                rank: Set(rank),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(self.conn)
            .await?;
        }

        info!(tournament_id, "Tournament result recorded");
        self.find_results(tournament_id).await
    }

    /// Recorded results of a tournament, by rank.
    #[instrument(skip(self))]
    pub async fn find_results(
        &self,
        tournament_id: i32,
    ) -> Result<Vec<TournamentResultResponse>, AppError> {
        find_tournament(self.conn, tournament_id).await?;

        let results = tournament_result::Entity::find()
            .filter(tournament_result::Column::TournamentId.eq(tournament_id))
            .order_by_asc(tournament_result::Column::Rank)
            .order_by_asc(tournament_result::Column::Id)
            .all(self.conn)
            .await?;
        if results.is_empty() {
            return Ok(Vec::new());
        }

        let candidates: HashMap<i32, i32> = tournament_song::Entity::find()
            .filter(
                tournament_song::Column::Id
                    .is_in(results.iter().map(|r| r.tournament_song_id).collect::<Vec<_>>()),
            )
            .all(self.conn)
            .await?
            .into_iter()
            .map(|c| (c.id, c.song_id))
            .collect();
        let songs = load_songs(self.conn, candidates.values().copied().collect()).await?;

        results
            .into_iter()
            .map(|r| {
                let song = candidates
                    .get(&r.tournament_song_id)
                    .and_then(|song_id| songs.get(song_id))
                    .ok_or_else(|| {
                        AppError::Internal(format!(
                            "song of tournament song {} missing",
                            r.tournament_song_id
                        ))
                    })?;
                Ok(TournamentResultResponse {
                    id: r.id,
                    tournament_song_id: r.tournament_song_id,
                    song_id: song.id,
                    title: song.title.clone(),
                    artist: song.artist.clone(),
                    rank: r.rank,
                })
            })
            .collect()
    }
}

/// Shuffle the pool and keep the first `size` entries.
fn draw<T>(mut pool: Vec<T>, size: usize) -> Vec<T> {
    pool.shuffle(&mut rand::rng());
    pool.truncate(size);
    pool
}

async fn find_tournament<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<tournament::Model, AppError> {
    tournament::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NoData(format!("Tournament {id} not found")))
}

/// `SELECT ... FOR UPDATE` of one tournament.
fn lock_tournament(id: i32) -> Select<tournament::Entity> {
    tournament::Entity::find_by_id(id).lock(LockType::Update)
}

async fn load_songs<C: ConnectionTrait>(
    db: &C,
    ids: Vec<i32>,
) -> Result<HashMap<i32, song::Model>, AppError> {
    Ok(song::Entity::find()
        .filter(song::Column::Id.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect())
}
