use chrono::Utc;
use common::similarity_score;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set, SqlErr,
};
use tracing::{info, instrument};

use crate::entity::{song, tournament_song};
use crate::error::AppError;
use crate::models::song::{CreateSongRequest, SimilarSongItem};

pub struct SongService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> SongService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    #[instrument(skip(self, request))]
    pub async fn create_song(&self, request: CreateSongRequest) -> Result<song::Model, AppError> {
        let model = song::ActiveModel {
            title: Set(request.title.trim().to_string()),
            artist: Set(request.artist.trim().to_string()),
            image_url: Set(request.image_url),
            preview_url: Set(request.preview_url),
            tempo: Set(request.tempo),
            features: Set(request.features.map(serde_json::Value::from)),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;

        info!(song_id = model.id, "Song created");
        Ok(model)
    }

    pub async fn find_song(&self, id: i32) -> Result<song::Model, AppError> {
        find_song(self.conn, id).await
    }

    /// Rank every other analysed song by similarity to song `id`, best first.
    ///
    /// Ties keep id order. Songs whose features cannot be compared are skipped.
    #[instrument(skip(self))]
    pub async fn find_similar(&self, id: i32, limit: usize) -> Result<Vec<SimilarSongItem>, AppError> {
        let reference = find_song(self.conn, id).await?;
        let features = reference
            .analysed_features()
            .ok_or_else(|| AppError::Validation(format!("Song {id} has not been analysed")))?;

        let others = song::Entity::find()
            .filter(song::Column::Id.ne(id))
            .filter(song::Column::Tempo.is_not_null())
            .filter(song::Column::Features.is_not_null())
            .all(self.conn)
            .await?;

        let mut scored: Vec<SimilarSongItem> = others
            .into_iter()
            .filter_map(|other| {
                let score = similarity_score(&features, &other.analysed_features()?)?;
                Some(SimilarSongItem {
                    id: other.id,
                    title: other.title,
                    artist: other.artist,
                    score,
                })
            })
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.id.cmp(&b.id)));
        scored.truncate(limit);

        Ok(scored)
    }

    /// Put song `id` into the tournament candidate pool.
    #[instrument(skip(self))]
    pub async fn add_candidate(&self, id: i32) -> Result<tournament_song::Model, AppError> {
        find_song(self.conn, id).await?;

        let existing = tournament_song::Entity::find()
            .filter(tournament_song::Column::SongId.eq(id))
            .one(self.conn)
            .await?;
        if existing.is_some() {
            return Err(already_candidate(id));
        }

        let model = insert_candidate(self.conn, id).await?;

        info!(tournament_song_id = model.id, song_id = id, "Candidate added");
        Ok(model)
    }
}

fn already_candidate(song_id: i32) -> AppError {
    AppError::Conflict(format!("Song {song_id} is already a tournament candidate"))
}

/// Insert a pool entry. A concurrent insert of the same song trips the unique index on
/// `song_id` and is reported as a conflict.
async fn insert_candidate<C: ConnectionTrait>(
    db: &C,
    song_id: i32,
) -> Result<tournament_song::Model, AppError> {
    tournament_song::ActiveModel {
        song_id: Set(song_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => already_candidate(song_id),
        _ => AppError::from(e),
    })
}

/// Look up a song, failing with `NoData` when absent.
pub(crate) async fn find_song<C: ConnectionTrait>(db: &C, id: i32) -> Result<song::Model, AppError> {
    song::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NoData(format!("Song {id} not found")))
}
