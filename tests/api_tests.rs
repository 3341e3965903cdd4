// tests/api_tests.rs

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use sqlx::sqlite::SqlitePoolOptions;
use survey_backend::{
    catalog::Catalog, config::Config, routes, state::AppState, store::SqliteSubmissionStore,
    survey::SessionRegistry,
};

const ADMIN_KEY: &str = "test_admin_key";

fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        admin_key: Some(ADMIN_KEY.to_string()),
        rust_log: "error".to_string(),
        default_language: "en".to_string(),
        content_path: None,
        session_ttl_secs: 600,
        port: 0,
        cors_origins: Vec::new(),
    }
}

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    let config = test_config();

    // 1. One connection keeps the in-memory database alive for the whole test
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(&config.database_url)
        .await
        .expect("Failed to open in-memory SQLite");

    // 2. Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    // 3. Create the state
    let state = AppState {
        store: Arc::new(SqliteSubmissionStore::new(pool)),
        catalog: Arc::new(Catalog::builtin()),
        sessions: SessionRegistry::new(Duration::from_secs(config.session_ttl_secs)),
        config,
    };

    // 4. Create the router with the app state
    let app = routes::create_router(state);

    // 5. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 6. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn open_session(client: &reqwest::Client, address: &str, body: Value) -> Value {
    let response = client
        .post(format!("{}/api/sessions", address))
        .json(&body)
        .send()
        .await
        .expect("Failed to open session");
    assert_eq!(response.status().as_u16(), 201);
    response.json().await.unwrap()
}

async fn send_answer(
    client: &reqwest::Client,
    address: &str,
    id: &str,
    input: Value,
) -> reqwest::Response {
    client
        .put(format!("{}/api/sessions/{}/answer", address, id))
        .json(&input)
        .send()
        .await
        .expect("Failed to send answer")
}

async fn step(client: &reqwest::Client, address: &str, id: &str, direction: &str) -> reqwest::Response {
    client
        .post(format!("{}/api/sessions/{}/{}", address, id, direction))
        .send()
        .await
        .expect("Failed to navigate")
}

/// Answers whatever question the view shows with the first valid input.
async fn answer_current(client: &reqwest::Client, address: &str, view: &Value) -> Value {
    let id = view["id"].as_str().unwrap();
    let question = &view["question"];
    let mut last = None;

    match question["type"].as_str().unwrap() {
        "single_choice" | "likert" => {
            let value = question["options"][0]["value"].clone();
            last = Some(send_answer(client, address, id, json!({"kind": "choice", "value": value})).await);
        }
        "multi_choice" => {
            let value = question["options"][0]["value"].clone();
            last = Some(send_answer(client, address, id, json!({"kind": "toggle", "value": value})).await);
        }
        "rating_matrix" => {
            for sub in question["sub_questions"].as_array().unwrap() {
                last = Some(
                    send_answer(
                        client,
                        address,
                        id,
                        json!({"kind": "rating", "sub_question_id": sub["id"], "rating": 4}),
                    )
                    .await,
                );
            }
        }
        "text" => {
            last = Some(send_answer(client, address, id, json!({"kind": "text", "value": "  my thoughts "})).await);
        }
        other => panic!("unexpected question type {}", other),
    }

    let response = last.expect("No answer sent");
    assert_eq!(response.status().as_u16(), 200);
    response.json().await.unwrap()
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn languages_and_content_fallback() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let languages: Value = client
        .get(format!("{}/api/languages", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(languages["languages"], json!(["en"]));
    assert_eq!(languages["default"], "en");

    let content: Value = client
        .get(format!("{}/api/content/ja", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(content["language"], "en");
    assert_eq!(content["content"]["initial_question"]["id"], "q0_grade");
    assert_eq!(content["content"]["university_track"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn new_session_starts_at_branching_question() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let view = open_session(&client, &address, json!({})).await;

    assert_eq!(view["position"]["stage"], "pre_track");
    assert_eq!(view["question"]["id"], "q0_grade");
    assert_eq!(view["can_proceed"], false);
    assert_eq!(view["progress"], 0.0);
    assert_eq!(view["step"], Value::Null);
    assert_eq!(view["language"], "en");
}

#[tokio::test]
async fn advance_without_answer_is_rejected() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let view = open_session(&client, &address, json!({})).await;
    let id = view["id"].as_str().unwrap();

    let response = step(&client, &address, id, "advance").await;
    assert_eq!(response.status().as_u16(), 400);

    let current: Value = client
        .get(format!("{}/api/sessions/{}", address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(current["position"]["stage"], "pre_track");
}

#[tokio::test]
async fn invalid_answers_are_rejected() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let view = open_session(&client, &address, json!({})).await;
    let id = view["id"].as_str().unwrap();

    // Not an option of the branching question
    let response = send_answer(&client, &address, id, json!({"kind": "choice", "value": "kindergarten"})).await;
    assert_eq!(response.status().as_u16(), 400);

    // Wrong input kind for a single choice question
    let response = send_answer(&client, &address, id, json!({"kind": "text", "value": "uni"})).await;
    assert_eq!(response.status().as_u16(), 400);

    // Move to the university matrix question and send an out-of-range rating
    send_answer(&client, &address, id, json!({"kind": "choice", "value": "uni"})).await;
    step(&client, &address, id, "advance").await;
    send_answer(&client, &address, id, json!({"kind": "choice", "value": "phd"})).await;
    step(&client, &address, id, "advance").await;
    send_answer(&client, &address, id, json!({"kind": "choice", "value": "stem"})).await;
    let moved: Value = step(&client, &address, id, "advance").await.json().await.unwrap();
    assert_eq!(moved["session"]["question"]["id"], "u3_usage");

    let response = send_answer(
        &client,
        &address,
        id,
        json!({"kind": "rating", "sub_question_id": "low", "rating": 9}),
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);

    // Ratings too wide for a stored rating still get the range error
    for rating in [300, -2] {
        let response = send_answer(
            &client,
            &address,
            id,
            json!({"kind": "rating", "sub_question_id": "low", "rating": rating}),
        )
        .await;
        assert_eq!(response.status().as_u16(), 400);
    }

    let response = send_answer(
        &client,
        &address,
        id,
        json!({"kind": "rating", "sub_question_id": "nope", "rating": 3}),
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn branch_choice_and_retreat_keep_answers() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let view = open_session(&client, &address, json!({"language": "en"})).await;
    let id = view["id"].as_str().unwrap();

    let answered: Value = send_answer(&client, &address, id, json!({"kind": "choice", "value": "uni"}))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(answered["can_proceed"], true);

    let moved: Value = step(&client, &address, id, "advance").await.json().await.unwrap();
    assert_eq!(moved["status"], "in_progress");
    assert_eq!(moved["session"]["position"]["stage"], "in_track");
    assert_eq!(moved["session"]["position"]["track"], "university");
    assert_eq!(moved["session"]["position"]["index"], 0);
    assert_eq!(moved["session"]["track_label"], "university");
    assert_eq!(moved["session"]["progress"], 0.1);
    assert_eq!(moved["session"]["step"], json!({"current": 1, "total": 10}));

    let back: Value = step(&client, &address, id, "retreat").await.json().await.unwrap();
    assert_eq!(back["status"], "in_progress");
    assert_eq!(back["session"]["position"]["stage"], "pre_track");
    assert_eq!(back["session"]["answer"], "uni");

    let home: Value = step(&client, &address, id, "retreat").await.json().await.unwrap();
    assert_eq!(home["status"], "home");

    // Returning home discards the session
    let gone = client
        .get(format!("{}/api/sessions/{}", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(gone.status().as_u16(), 404);
}

#[tokio::test]
async fn multi_choice_toggle_over_http() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let mut view = open_session(&client, &address, json!({})).await;
    let id = view["id"].as_str().unwrap().to_string();

    send_answer(&client, &address, &id, json!({"kind": "choice", "value": "middle"})).await;
    let mut moved: Value = step(&client, &address, &id, "advance").await.json().await.unwrap();

    // Walk to the multi-select question
    while moved["session"]["question"]["type"] != "multi_choice" {
        view = answer_current(&client, &address, &moved["session"]).await;
        assert_eq!(view["can_proceed"], true);
        moved = step(&client, &address, &id, "advance").await.json().await.unwrap();
    }
    assert_eq!(moved["session"]["question"]["id"], "q10_awkward");

    let selected: Value = send_answer(&client, &address, &id, json!({"kind": "toggle", "value": "doubt"}))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(selected["answer"], json!(["doubt"]));
    assert_eq!(selected["can_proceed"], true);

    let cleared: Value = send_answer(&client, &address, &id, json!({"kind": "toggle", "value": "doubt"}))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(cleared["answer"], json!([]));
    assert_eq!(cleared["can_proceed"], false);
}

#[tokio::test]
async fn full_university_track_is_submitted() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let view = open_session(&client, &address, json!({})).await;
    let id = view["id"].as_str().unwrap().to_string();

    send_answer(&client, &address, &id, json!({"kind": "choice", "value": "uni"})).await;
    let mut result: Value = step(&client, &address, &id, "advance").await.json().await.unwrap();

    let mut last_progress = 0.0;
    while result["status"] == "in_progress" {
        let progress = result["session"]["progress"].as_f64().unwrap();
        assert!(progress > last_progress);
        last_progress = progress;

        answer_current(&client, &address, &result["session"]).await;
        result = step(&client, &address, &id, "advance").await.json().await.unwrap();
    }

    assert_eq!(last_progress, 1.0);
    assert_eq!(result["status"], "complete");
    let record_id = result["record_id"].as_str().unwrap().to_string();

    // The session is discarded after a successful submission
    let gone = client
        .get(format!("{}/api/sessions/{}", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(gone.status().as_u16(), 404);

    let records: Vec<Value> = client
        .get(format!("{}/api/admin/responses", address))
        .header("x-admin-key", ADMIN_KEY)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], record_id.as_str());
    assert_eq!(records[0]["track_label"], "university");
    assert_eq!(records[0]["answers"]["q0_grade"], "uni");
    assert_eq!(records[0]["answers"]["u1_stage"], "bachelor");
    assert_eq!(
        records[0]["answers"]["u3_usage"],
        json!({"low": 4, "mid": 4, "high": 4})
    );
    assert_eq!(records[0]["answers"]["u11_open_uni"], "  my thoughts ");
}

#[tokio::test]
async fn abandoned_session_is_gone() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let view = open_session(&client, &address, json!({})).await;
    let id = view["id"].as_str().unwrap();

    let response = client
        .delete(format!("{}/api/sessions/{}", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let response = step(&client, &address, id, "advance").await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn invalid_language_code_is_rejected() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/sessions", address))
        .json(&json!({"language": "x"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    // Well-formed but unsupported codes fall back to the default language
    let view = open_session(&client, &address, json!({"language": "fr"})).await;
    assert_eq!(view["language"], "en");
}

#[tokio::test]
async fn session_opens_without_a_body() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/sessions", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);

    let view: Value = response.json().await.unwrap();
    assert_eq!(view["language"], "en");
    assert_eq!(view["position"]["stage"], "pre_track");
}
