use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::validate_title;
use crate::error::AppError;

/// Request body for registering a song.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateSongRequest {
    #[schema(example = "Hype Boy")]
    pub title: String,
    #[schema(example = "NewJeans")]
    pub artist: String,
    pub image_url: Option<String>,
    /// 30-second preview clip URL.
    pub preview_url: Option<String>,
    /// Global tempo in BPM.
    #[schema(example = 100.0)]
    pub tempo: Option<f64>,
    /// Audio feature vector (acousticness, danceability, energy, ...).
    #[schema(example = json!([0.12, 0.71, 0.65, 0.0, 0.11, 0.05, 0.8]))]
    pub features: Option<Vec<f64>>,
}

pub fn validate_create_song(req: &CreateSongRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    let artist = req.artist.trim();
    if artist.is_empty() || artist.chars().count() > 256 {
        return Err(AppError::Validation(
            "Artist must be 1-256 characters".into(),
        ));
    }
    if let Some(tempo) = req.tempo
        && (!tempo.is_finite() || tempo <= 0.0)
    {
        return Err(AppError::Validation("Tempo must be a positive number".into()));
    }
    if let Some(ref features) = req.features {
        if features.is_empty() || features.len() > 64 {
            return Err(AppError::Validation(
                "Features must contain 1-64 values".into(),
            ));
        }
        if features.iter().any(|f| !f.is_finite()) {
            return Err(AppError::Validation("Features must be finite numbers".into()));
        }
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SongResponse {
    pub id: i32,
    pub title: String,
    pub artist: String,
    pub image_url: Option<String>,
    pub preview_url: Option<String>,
    pub tempo: Option<f64>,
    pub features: Option<Vec<f64>>,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::song::Model> for SongResponse {
    fn from(m: crate::entity::song::Model) -> Self {
        let features = m
            .features
            .and_then(|v| serde_json::from_value::<Vec<f64>>(v).ok());
        Self {
            id: m.id,
            title: m.title,
            artist: m.artist,
            image_url: m.image_url,
            preview_url: m.preview_url,
            tempo: m.tempo,
            features,
            created_at: m.created_at,
        }
    }
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SimilarSongsQuery {
    /// Maximum number of songs to return (1-100, default 10).
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SimilarSongItem {
    pub id: i32,
    pub title: String,
    pub artist: String,
    /// Similarity to the reference song; 1.0 means identical.
    #[schema(example = 0.93)]
    pub score: f64,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SimilarSongListResponse {
    /// The reference song.
    pub song_id: i32,
    /// Most similar first.
    pub data: Vec<SimilarSongItem>,
}

/// Returned after a song joins the tournament candidate pool.
#[derive(Serialize, utoipa::ToSchema)]
pub struct CandidateResponse {
    pub tournament_song_id: i32,
    pub song_id: i32,
}

impl From<crate::entity::tournament_song::Model> for CandidateResponse {
    fn from(m: crate::entity::tournament_song::Model) -> Self {
        Self {
            tournament_song_id: m.id,
            song_id: m.song_id,
        }
    }
}
