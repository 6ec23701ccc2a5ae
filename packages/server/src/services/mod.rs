//! Use-case layer. Each service borrows a connection, which handlers pass as an open
//! transaction for mutations so that every call commits or rolls back as a unit.

pub mod article;
pub mod playlist;
pub mod song;
pub mod tournament;
pub mod user;

pub use article::ArticleService;
pub use playlist::PlaylistService;
pub use song::SongService;
pub use tournament::TournamentService;
pub use user::UserService;
