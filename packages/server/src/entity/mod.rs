pub mod article;
pub mod photo;
pub mod playlist;
pub mod playlist_song;
pub mod song;
pub mod tag;
pub mod tournament;
pub mod tournament_result;
pub mod tournament_song;
pub mod user;
