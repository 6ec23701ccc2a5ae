use std::collections::HashSet;

use crate::common::{TestApp, routes};
use encore_server::entity::tournament_result;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

/// Fill the candidate pool with `n` songs and return their tournament song ids.
async fn fill_pool(app: &TestApp, n: usize) -> Vec<i32> {
    let mut ids = Vec::with_capacity(n);
    for i in 0..n {
        ids.push(app.create_candidate(&format!("Song {i}")).await);
    }
    ids
}

fn result_body(ids: &[i32]) -> serde_json::Value {
    json!({
        "first_song_id": ids[0],
        "second_song_id": ids[1],
        "semi_final_song_one_id": ids[2],
        "semi_final_song_two_id": ids[3],
    })
}

mod bracket {
    use super::*;

    #[tokio::test]
    async fn deals_distinct_songs_from_the_pool() {
        let app = TestApp::spawn().await;
        let pool: HashSet<i64> = fill_pool(&app, 10)
            .await
            .into_iter()
            .map(i64::from)
            .collect();

        let res = app.get(&routes::tournament_songs(8)).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["round"], 8);
        let dealt: HashSet<i64> = res.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["tournament_song_id"].as_i64().unwrap())
            .collect();
        assert_eq!(dealt.len(), 8);
        assert!(dealt.is_subset(&pool));
    }

    #[tokio::test]
    async fn small_pool_is_no_data() {
        let app = TestApp::spawn().await;
        fill_pool(&app, 3).await;

        let res = app.get(&routes::tournament_songs(4)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NO_DATA");
    }

    #[tokio::test]
    async fn round_must_be_a_power_of_two() {
        let app = TestApp::spawn().await;
        fill_pool(&app, 6).await;

        let res = app.get(&routes::tournament_songs(6)).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }
}

mod results {
    use super::*;

    #[tokio::test]
    async fn final_four_get_ranks_one_two_three_three() {
        let app = TestApp::spawn().await;
        let player = app.create_user("player").await;
        let ids = fill_pool(&app, 4).await;
        let tournament = app.create_tournament(player).await;

        let res = app
            .post_as(
                &routes::tournament_results(tournament),
                &result_body(&ids),
                player,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let stored = app.get(&routes::tournament_results(tournament)).await;
        assert_eq!(stored.status, 200);
        let ranked: Vec<(i64, i64)> = stored.body["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| {
                (
                    r["tournament_song_id"].as_i64().unwrap(),
                    r["rank"].as_i64().unwrap(),
                )
            })
            .collect();
        assert_eq!(
            ranked,
            [
                (ids[0] as i64, 1),
                (ids[1] as i64, 2),
                (ids[2] as i64, 3),
                (ids[3] as i64, 3),
            ]
        );
        assert_eq!(stored.body["results"][0]["title"], "Song 0");
    }

    #[tokio::test]
    async fn unknown_song_writes_no_result() {
        let app = TestApp::spawn().await;
        let player = app.create_user("player").await;
        let mut ids = fill_pool(&app, 3).await;
        ids.push(9999);
        let tournament = app.create_tournament(player).await;

        let res = app
            .post_as(
                &routes::tournament_results(tournament),
                &result_body(&ids),
                player,
            )
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NO_DATA");
        assert_eq!(
            tournament_result::Entity::find().count(&app.db).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn unknown_tournament_is_no_data() {
        let app = TestApp::spawn().await;
        let player = app.create_user("player").await;
        let ids = fill_pool(&app, 4).await;

        let res = app
            .post_as(&routes::tournament_results(321), &result_body(&ids), player)
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NO_DATA");
        assert_eq!(app.get(&routes::tournament_results(321)).await.code(), "NO_DATA");
    }

    #[tokio::test]
    async fn duplicate_finalist_is_rejected() {
        let app = TestApp::spawn().await;
        let player = app.create_user("player").await;
        let ids = fill_pool(&app, 4).await;
        let tournament = app.create_tournament(player).await;

        let res = app
            .post_as(
                &routes::tournament_results(tournament),
                &result_body(&[ids[0], ids[0], ids[2], ids[3]]),
                player,
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn result_is_recorded_once() {
        let app = TestApp::spawn().await;
        let player = app.create_user("player").await;
        let ids = fill_pool(&app, 4).await;
        let tournament = app.create_tournament(player).await;
        let path = routes::tournament_results(tournament);

        assert_eq!(app.post_as(&path, &result_body(&ids), player).await.status, 201);
        let res = app.post_as(&path, &result_body(&ids), player).await;
        assert_eq!(res.status, 409);
        assert_eq!(
            tournament_result::Entity::find().count(&app.db).await.unwrap(),
            4
        );
    }

    #[tokio::test]
    async fn only_the_player_may_record() {
        let app = TestApp::spawn().await;
        let player = app.create_user("player").await;
        let other = app.create_user("other").await;
        let ids = fill_pool(&app, 4).await;
        let tournament = app.create_tournament(player).await;

        let res = app
            .post_as(&routes::tournament_results(tournament), &result_body(&ids), other)
            .await;
        assert_eq!(res.status, 403);
    }

    #[tokio::test]
    async fn starting_a_tournament_needs_a_known_user() {
        let app = TestApp::spawn().await;
        let res = app.post_as(routes::TOURNAMENTS, &json!({}), 55).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NO_DATA");
    }
}
