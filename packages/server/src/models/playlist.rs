use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::validate_title;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreatePlaylistRequest {
    #[schema(example = "Late night drive")]
    pub title: String,
}

pub fn validate_create_playlist(req: &CreatePlaylistRequest) -> Result<(), AppError> {
    validate_title(&req.title)
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct AddPlaylistSongRequest {
    pub song_id: i32,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PlaylistSongResponse {
    pub song_id: i32,
    pub title: String,
    pub artist: String,
    pub added_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PlaylistResponse {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub created_at: DateTime<Utc>,
    /// Songs currently in the playlist, oldest first.
    pub songs: Vec<PlaylistSongResponse>,
}
