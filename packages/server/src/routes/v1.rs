use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::{AppConfig, UploadConfig};
use crate::handlers::{article, playlist, song, tag, tournament, user};
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/tags", tag_routes())
        .nest("/users", user_routes())
        .nest("/articles", article_routes(&config.upload))
        .nest("/songs", song_routes())
        .nest("/tournaments", tournament_routes())
        .nest("/playlists", playlist_routes())
}

fn tag_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(tag::list_tags))
}

fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(user::create_user))
        .routes(routes!(user::get_user))
}

fn article_routes(upload: &UploadConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(article::list_articles, article::register_article))
        .routes(routes!(
            article::get_article,
            article::modify_article,
            article::delete_article
        ))
        .layer(article::article_body_limit(upload.max_image_size))
}

fn song_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(song::create_song))
        .routes(routes!(song::get_song))
        .routes(routes!(song::list_similar_songs))
        .routes(routes!(song::add_candidate))
}

fn tournament_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(tournament::register_tournament))
        .routes(routes!(tournament::find_tournament_songs))
        .routes(routes!(
            tournament::register_tournament_result,
            tournament::list_tournament_results
        ))
}

fn playlist_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(playlist::create_playlist))
        .routes(routes!(playlist::get_playlist))
        .routes(routes!(playlist::add_playlist_song))
        .routes(routes!(playlist::remove_playlist_song))
}
