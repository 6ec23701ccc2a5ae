pub mod article;
pub mod playlist;
pub mod song;
pub mod tag;
pub mod tournament;
pub mod user;
