use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::validate_distinct_ids;
use crate::error::AppError;

const MIN_ROUND: u32 = 4;
const MAX_ROUND: u32 = 128;

/// Ranks assigned to the four recorded songs: champion, runner-up and the two losing
/// semifinalists, who tie for third.
pub const RESULT_RANKS: [i32; 4] = [1, 2, 3, 3];

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FindTournamentSongQuery {
    /// Number of songs in the bracket (power of two, 4-128).
    #[param(example = 16)]
    pub round: u32,
}

pub fn validate_round(round: u32) -> Result<(), AppError> {
    if !(MIN_ROUND..=MAX_ROUND).contains(&round) || !round.is_power_of_two() {
        return Err(AppError::Validation(format!(
            "round must be a power of two between {MIN_ROUND} and {MAX_ROUND}"
        )));
    }
    Ok(())
}

/// A candidate song dealt into a bracket.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TournamentSongResponse {
    pub tournament_song_id: i32,
    pub song_id: i32,
    pub title: String,
    pub artist: String,
    pub image_url: Option<String>,
    pub preview_url: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TournamentSongListResponse {
    pub round: u32,
    pub data: Vec<TournamentSongResponse>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TournamentResponse {
    pub id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::tournament::Model> for TournamentResponse {
    fn from(m: crate::entity::tournament::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            created_at: m.created_at,
        }
    }
}

/// Final standings of a finished bracket, as tournament song ids.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterTournamentResultRequest {
    /// Champion.
    pub first_song_id: i32,
    /// Runner-up.
    pub second_song_id: i32,
    /// Semifinalist beaten by the champion or the runner-up.
    pub semi_final_song_one_id: i32,
    /// The other semifinalist.
    pub semi_final_song_two_id: i32,
}

impl RegisterTournamentResultRequest {
    /// Tournament song ids in rank order, aligned with [`RESULT_RANKS`].
    pub fn ranked_ids(&self) -> [i32; 4] {
        [
            self.first_song_id,
            self.second_song_id,
            self.semi_final_song_one_id,
            self.semi_final_song_two_id,
        ]
    }
}

pub fn validate_tournament_result(req: &RegisterTournamentResultRequest) -> Result<(), AppError> {
    validate_distinct_ids(&req.ranked_ids(), "tournament song")
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TournamentResultResponse {
    pub id: i32,
    pub tournament_song_id: i32,
    pub song_id: i32,
    pub title: String,
    pub artist: String,
    #[schema(example = 1)]
    pub rank: i32,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TournamentResultListResponse {
    pub tournament_id: i32,
    /// Ordered by rank.
    pub results: Vec<TournamentResultResponse>,
}
