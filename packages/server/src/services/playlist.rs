use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{info, instrument};

use super::song::find_song;
use super::user::find_user;
use crate::entity::{playlist, playlist_song, song};
use crate::error::AppError;
use crate::extractors::actor::Actor;
use crate::models::playlist::{CreatePlaylistRequest, PlaylistResponse, PlaylistSongResponse};

pub struct PlaylistService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> PlaylistService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    #[instrument(skip(self, request), fields(user_id = actor.user_id))]
    pub async fn create_playlist(
        &self,
        actor: Actor,
        request: CreatePlaylistRequest,
    ) -> Result<PlaylistResponse, AppError> {
        find_user(self.conn, actor.user_id).await?;

        let model = playlist::ActiveModel {
            title: Set(request.title.trim().to_string()),
            user_id: Set(actor.user_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;

        info!(playlist_id = model.id, "Playlist created");
        Ok(PlaylistResponse {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            created_at: model.created_at,
            songs: Vec::new(),
        })
    }

    /// Add a song to a playlist owned by `actor`.
    ///
    /// A previously removed entry is brought back with a fresh `added_at`.
    #[instrument(skip(self), fields(user_id = actor.user_id))]
    pub async fn add_song(
        &self,
        actor: Actor,
        playlist_id: i32,
        song_id: i32,
    ) -> Result<PlaylistResponse, AppError> {
        let owned = find_playlist(self.conn, playlist_id).await?;
        actor.require_owner(owned.user_id)?;
        find_song(self.conn, song_id).await?;

        let now = Utc::now();
        match find_entry(self.conn, playlist_id, song_id).await? {
            Some(entry) if !entry.is_deleted() => {
                return Err(AppError::Conflict(format!(
                    "Song {song_id} is already in playlist {playlist_id}"
                )));
            }
            Some(entry) => {
                entry.reactivate(now).update(self.conn).await?;
            }
            None => {
                playlist_song::ActiveModel {
                    playlist_id: Set(playlist_id),
                    song_id: Set(song_id),
                    added_at: Set(now),
                    deleted_at: Set(None),
                    ..Default::default()
                }
                .insert(self.conn)
                .await?;
            }
        }

        info!(playlist_id, song_id, "Song added to playlist");
        self.with_songs(owned).await
    }

    #[instrument(skip(self), fields(user_id = actor.user_id))]
    pub async fn remove_song(
        &self,
        actor: Actor,
        playlist_id: i32,
        song_id: i32,
    ) -> Result<(), AppError> {
        let owned = find_playlist(self.conn, playlist_id).await?;
        actor.require_owner(owned.user_id)?;

        let entry = find_entry(self.conn, playlist_id, song_id)
            .await?
            .filter(|e| !e.is_deleted())
            .ok_or_else(|| {
                AppError::NoData(format!("Song {song_id} is not in playlist {playlist_id}"))
            })?;
        entry.soft_delete(Utc::now()).update(self.conn).await?;

        info!(playlist_id, song_id, "Song removed from playlist");
        Ok(())
    }

    pub async fn find_playlist(&self, id: i32) -> Result<PlaylistResponse, AppError> {
        let found = find_playlist(self.conn, id).await?;
        self.with_songs(found).await
    }

    /// Attach the live entries, oldest addition first.
    async fn with_songs(&self, list: playlist::Model) -> Result<PlaylistResponse, AppError> {
        let entries = playlist_song::Entity::find()
            .filter(playlist_song::Column::PlaylistId.eq(list.id))
            .filter(playlist_song::Column::DeletedAt.is_null())
            .order_by_asc(playlist_song::Column::AddedAt)
            .order_by_asc(playlist_song::Column::SongId)
            .all(self.conn)
            .await?;

        let mut songs: HashMap<i32, song::Model> = HashMap::new();
        if !entries.is_empty() {
            songs = song::Entity::find()
                .filter(song::Column::Id.is_in(entries.iter().map(|e| e.song_id).collect::<Vec<_>>()))
                .all(self.conn)
                .await?
                .into_iter()
                .map(|s| (s.id, s))
                .collect();
        }

        let songs = entries
            .into_iter()
            .map(|entry| {
                let song = songs.remove(&entry.song_id).ok_or_else(|| {
                    AppError::Internal(format!(
                        "song {} of playlist {} missing",
                        entry.song_id, list.id
                    ))
                })?;
                Ok(PlaylistSongResponse {
                    song_id: song.id,
                    title: song.title,
                    artist: song.artist,
                    added_at: entry.added_at,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(PlaylistResponse {
            id: list.id,
            user_id: list.user_id,
            title: list.title,
            created_at: list.created_at,
            songs,
        })
    }
}

async fn find_playlist<C: ConnectionTrait>(db: &C, id: i32) -> Result<playlist::Model, AppError> {
    playlist::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NoData(format!("Playlist {id} not found")))
}

async fn find_entry<C: ConnectionTrait>(
    db: &C,
    playlist_id: i32,
    song_id: i32,
) -> Result<Option<playlist_song::Model>, AppError> {
    Ok(playlist_song::Entity::find_by_id((playlist_id, song_id))
        .one(db)
        .await?)
}
