use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use ::common::storage::{ImageStore, ImageUpload, StorageError, UnconfiguredImageStore};
use reqwest::Client;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde_json::{Value, json};

use encore_server::config::{AppConfig, CorsConfig, DatabaseConfig, ServerConfig, UploadConfig};
use encore_server::entity::tag;
use encore_server::extractors::actor::ACTOR_HEADER;
use encore_server::state::AppState;

pub mod routes {
    pub const TAGS: &str = "/api/v1/tags";
    pub const USERS: &str = "/api/v1/users";
    pub const ARTICLES: &str = "/api/v1/articles";
    pub const SONGS: &str = "/api/v1/songs";
    pub const TOURNAMENTS: &str = "/api/v1/tournaments";
    pub const PLAYLISTS: &str = "/api/v1/playlists";

    pub fn user(id: i32) -> String {
        format!("/api/v1/users/{id}")
    }

    pub fn article(id: i32) -> String {
        format!("/api/v1/articles/{id}")
    }

    pub fn song(id: i32) -> String {
        format!("/api/v1/songs/{id}")
    }

    pub fn similar_songs(id: i32) -> String {
        format!("/api/v1/songs/{id}/similar")
    }

    pub fn candidate(song_id: i32) -> String {
        format!("/api/v1/songs/{song_id}/candidate")
    }

    pub fn tournament_songs(round: u32) -> String {
        format!("/api/v1/tournaments/songs?round={round}")
    }

    pub fn tournament_results(id: i32) -> String {
        format!("/api/v1/tournaments/{id}/results")
    }

    pub fn playlist(id: i32) -> String {
        format!("/api/v1/playlists/{id}")
    }

    pub fn playlist_songs(id: i32) -> String {
        format!("/api/v1/playlists/{id}/songs")
    }

    pub fn playlist_song(id: i32, song_id: i32) -> String {
        format!("/api/v1/playlists/{id}/songs/{song_id}")
    }
}

/// Image store that keeps nothing but hands out a distinct URL per upload.
#[derive(Default)]
pub struct FakeImageStore {
    counter: AtomicU32,
}

#[async_trait]
impl ImageStore for FakeImageStore {
    async fn save(&self, upload: &ImageUpload) -> Result<Option<String>, StorageError> {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        Ok(Some(format!("https://images.test/{n}/{}", upload.filename)))
    }
}

/// Image store whose backend refuses every upload.
pub struct RejectingImageStore;

#[async_trait]
impl ImageStore for RejectingImageStore {
    async fn save(&self, _upload: &ImageUpload) -> Result<Option<String>, StorageError> {
        Err(StorageError::Rejected("bucket is read-only".into()))
    }
}

/// An image attached to an article form.
pub struct TestImage {
    pub filename: &'static str,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl TestImage {
    pub fn png(filename: &'static str) -> Self {
        Self {
            filename,
            mime: "image/png",
            bytes: vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a],
        }
    }
}

/// A running test server.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestApp {
    /// Spawn a server whose image store discards uploads.
    pub async fn spawn() -> Self {
        Self::spawn_with(Arc::new(UnconfiguredImageStore), UploadConfig::default()).await
    }

    /// Spawn a server whose image store returns a URL for every upload.
    pub async fn spawn_with_images() -> Self {
        Self::spawn_with(Arc::new(FakeImageStore::default()), UploadConfig::default()).await
    }

    pub async fn spawn_with(image_store: Arc<dyn ImageStore>, upload: UploadConfig) -> Self {
        // One connection keeps the whole in-memory database alive and shared.
        let database = DatabaseConfig {
            max_connections: 1,
            min_connections: 1,
            ..DatabaseConfig::with_url("sqlite::memory:")
        };
        let db = encore_server::database::init_db(&database)
            .await
            .expect("Failed to initialise in-memory database");
        encore_server::seed::seed_tags(&db)
            .await
            .expect("Failed to seed tags");

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig::default(),
            },
            database,
            upload,
        };

        let state = AppState {
            db: db.clone(),
            config: app_config,
            image_store,
        };

        let app = encore_server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_as(&self, path: &str, body: &Value, user_id: i32) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header(ACTOR_HEADER, user_id.to_string())
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn delete_as(&self, path: &str, user_id: i32) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .header(ACTOR_HEADER, user_id.to_string())
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    fn article_form(request: &Value, image: Option<TestImage>) -> reqwest::multipart::Form {
        let mut form = reqwest::multipart::Form::new().text("request", request.to_string());
        if let Some(image) = image {
            let part = reqwest::multipart::Part::bytes(image.bytes)
                .file_name(image.filename)
                .mime_str(image.mime)
                .expect("Failed to set MIME type");
            form = form.part("file", part);
        }
        form
    }

    /// POST an article form. `user_id` of `None` sends no identity header.
    pub async fn post_article(
        &self,
        user_id: Option<i32>,
        request: &Value,
        image: Option<TestImage>,
    ) -> TestResponse {
        let mut req = self
            .client
            .post(self.url(routes::ARTICLES))
            .multipart(Self::article_form(request, image));
        if let Some(id) = user_id {
            req = req.header(ACTOR_HEADER, id.to_string());
        }
        let res = req.send().await.expect("Failed to send multipart request");

        TestResponse::from_response(res).await
    }

    pub async fn put_article(
        &self,
        user_id: i32,
        article_id: i32,
        request: &Value,
        image: Option<TestImage>,
    ) -> TestResponse {
        let res = self
            .client
            .put(self.url(&routes::article(article_id)))
            .header(ACTOR_HEADER, user_id.to_string())
            .multipart(Self::article_form(request, image))
            .send()
            .await
            .expect("Failed to send multipart request");

        TestResponse::from_response(res).await
    }

    /// Create a user via the API and return its `id`.
    pub async fn create_user(&self, nickname: &str) -> i32 {
        let res = self
            .post(routes::USERS, &json!({ "nickname": nickname }))
            .await;
        assert_eq!(res.status, 201, "create_user failed: {}", res.text);
        res.id()
    }

    /// Id of a seeded tag.
    pub async fn tag_id(&self, name: &str) -> i32 {
        tag::Entity::find()
            .filter(tag::Column::TagName.eq(name))
            .one(&self.db)
            .await
            .expect("DB query failed")
            .expect("Seeded tag missing")
            .id
    }

    /// Post an article without an image and return its `id`.
    pub async fn create_article(&self, user_id: i32, title: &str, category: i32) -> i32 {
        let res = self
            .post_article(
                Some(user_id),
                &json!({ "title": title, "content": "Some words", "category": category }),
                None,
            )
            .await;
        assert_eq!(res.status, 201, "create_article failed: {}", res.text);
        res.id()
    }

    /// Create a song via the API and return its `id`.
    pub async fn create_song(&self, title: &str, tempo: Option<f64>, features: Option<Vec<f64>>) -> i32 {
        let res = self
            .post(
                routes::SONGS,
                &json!({
                    "title": title,
                    "artist": "Test Artist",
                    "image_url": format!("https://img.test/{title}.jpg"),
                    "preview_url": null,
                    "tempo": tempo,
                    "features": features,
                }),
            )
            .await;
        assert_eq!(res.status, 201, "create_song failed: {}", res.text);
        res.id()
    }

    /// Create a song, put it into the tournament pool and return the tournament song `id`.
    pub async fn create_candidate(&self, title: &str) -> i32 {
        let song_id = self.create_song(title, None, None).await;
        let res = self.post(&routes::candidate(song_id), &json!({})).await;
        assert_eq!(res.status, 201, "add_candidate failed: {}", res.text);
        res.body["tournament_song_id"]
            .as_i64()
            .expect("candidate response should contain 'tournament_song_id'") as i32
    }

    /// Start a tournament for `user_id` and return its `id`.
    pub async fn create_tournament(&self, user_id: i32) -> i32 {
        let res = self.post_as(routes::TOURNAMENTS, &json!({}), user_id).await;
        assert_eq!(res.status, 201, "create_tournament failed: {}", res.text);
        res.id()
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    pub fn id(&self) -> i32 {
        self.body["id"]
            .as_i64()
            .expect("response body should contain 'id'") as i32
    }

    pub fn code(&self) -> &str {
        self.body["code"].as_str().unwrap_or_default()
    }
}
