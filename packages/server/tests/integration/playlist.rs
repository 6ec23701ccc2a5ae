use crate::common::{TestApp, routes};
use serde_json::json;

async fn create_playlist(app: &TestApp, owner: i32, title: &str) -> i32 {
    let res = app
        .post_as(routes::PLAYLISTS, &json!({ "title": title }), owner)
        .await;
    assert_eq!(res.status, 201, "create_playlist failed: {}", res.text);
    res.id()
}

async fn add_song(app: &TestApp, owner: i32, playlist: i32, song: i32) -> crate::common::TestResponse {
    app.post_as(
        &routes::playlist_songs(playlist),
        &json!({ "song_id": song }),
        owner,
    )
    .await
}

fn song_ids(body: &serde_json::Value) -> Vec<i64> {
    body["songs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["song_id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn new_playlist_is_empty() {
    let app = TestApp::spawn().await;
    let owner = app.create_user("listener").await;
    let id = create_playlist(&app, owner, "Night drive").await;

    let res = app.get(&routes::playlist(id)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["title"], "Night drive");
    assert_eq!(res.body["user_id"], owner);
    assert_eq!(res.body["songs"], json!([]));
}

#[tokio::test]
async fn songs_are_listed_in_the_order_added() {
    let app = TestApp::spawn().await;
    let owner = app.create_user("listener").await;
    let list = create_playlist(&app, owner, "Mix").await;
    let a = app.create_song("A", None, None).await;
    let b = app.create_song("B", None, None).await;

    assert_eq!(add_song(&app, owner, list, b).await.status, 200);
    let res = add_song(&app, owner, list, a).await;
    assert_eq!(res.status, 200);
    assert_eq!(song_ids(&res.body), [b as i64, a as i64]);
}

#[tokio::test]
async fn adding_a_present_song_conflicts() {
    let app = TestApp::spawn().await;
    let owner = app.create_user("listener").await;
    let list = create_playlist(&app, owner, "Mix").await;
    let song = app.create_song("A", None, None).await;

    add_song(&app, owner, list, song).await;
    let res = add_song(&app, owner, list, song).await;
    assert_eq!(res.status, 409);
    assert_eq!(res.code(), "CONFLICT");
}

#[tokio::test]
async fn removed_song_can_be_added_back() {
    let app = TestApp::spawn().await;
    let owner = app.create_user("listener").await;
    let list = create_playlist(&app, owner, "Mix").await;
    let a = app.create_song("A", None, None).await;
    let b = app.create_song("B", None, None).await;
    add_song(&app, owner, list, a).await;
    add_song(&app, owner, list, b).await;

    let res = app.delete_as(&routes::playlist_song(list, a), owner).await;
    assert_eq!(res.status, 204);
    assert_eq!(song_ids(&app.get(&routes::playlist(list)).await.body), [b as i64]);

    // Re-adding counts as a fresh addition, so it moves to the end.
    let res = add_song(&app, owner, list, a).await;
    assert_eq!(res.status, 200);
    assert_eq!(song_ids(&res.body), [b as i64, a as i64]);
}

#[tokio::test]
async fn removing_an_absent_song_is_no_data() {
    let app = TestApp::spawn().await;
    let owner = app.create_user("listener").await;
    let list = create_playlist(&app, owner, "Mix").await;
    let song = app.create_song("A", None, None).await;

    let res = app.delete_as(&routes::playlist_song(list, song), owner).await;
    assert_eq!(res.status, 404);
    assert_eq!(res.code(), "NO_DATA");
}

#[tokio::test]
async fn only_the_owner_may_change_a_playlist() {
    let app = TestApp::spawn().await;
    let owner = app.create_user("listener").await;
    let other = app.create_user("stranger").await;
    let list = create_playlist(&app, owner, "Mine").await;
    let song = app.create_song("A", None, None).await;

    let res = add_song(&app, other, list, song).await;
    assert_eq!(res.status, 403);
    assert_eq!(res.code(), "PERMISSION_DENIED");
}

#[tokio::test]
async fn unknown_song_or_playlist_is_no_data() {
    let app = TestApp::spawn().await;
    let owner = app.create_user("listener").await;
    let list = create_playlist(&app, owner, "Mix").await;

    assert_eq!(add_song(&app, owner, list, 404).await.code(), "NO_DATA");
    assert_eq!(app.get(&routes::playlist(404)).await.code(), "NO_DATA");
}
