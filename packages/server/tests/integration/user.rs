use crate::common::{TestApp, routes};
use serde_json::json;

mod users {
    use super::*;

    #[tokio::test]
    async fn created_user_can_be_fetched() {
        let app = TestApp::spawn().await;
        let id = app.create_user("  melody_hunter ").await;

        let res = app.get(&routes::user(id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["nickname"], "melody_hunter");
    }

    #[tokio::test]
    async fn blank_nickname_is_rejected() {
        let app = TestApp::spawn().await;
        let res = app.post(routes::USERS, &json!({ "nickname": "   " })).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn unknown_user_is_no_data() {
        let app = TestApp::spawn().await;
        let res = app.get(&routes::user(999)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NO_DATA");
    }
}

mod tags {
    use super::*;

    #[tokio::test]
    async fn default_tags_are_seeded_once() {
        let app = TestApp::spawn().await;
        // Seeding again must not duplicate anything.
        encore_server::seed::seed_tags(&app.db).await.unwrap();

        let res = app.get(routes::TAGS).await;
        assert_eq!(res.status, 200);
        let names: Vec<&str> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["tag_name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["general", "review", "recommendation", "question"]);
    }
}
