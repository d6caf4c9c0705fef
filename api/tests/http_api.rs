use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::{TestRequest, TestServer};
use chrono::{Days, Utc};
use clap::Parser;
use serde_json::{Value, json};
use vitaplan_api::{
    application::http::server::{app_state::AppState, http_server::api_routes},
    args::Args,
};
use vitaplan_core::{
    application::service_with_storage,
    domain::recommendation::engine::RecommendationEngine,
    infrastructure::{local::LocalStore, storage::Storage},
};

async fn server() -> TestServer {
    let args = Args::parse_from(["vitaplan", "--server-root-path", ""]);
    let store = LocalStore::in_memory().await.unwrap();
    let service = service_with_storage(Storage::Local(store), RecommendationEngine::builtin(2));
    let state = AppState::new(Arc::new(args), service);

    TestServer::new(api_routes(state)).unwrap()
}

fn as_user(request: TestRequest, user_id: &'static str) -> TestRequest {
    request.add_header(
        HeaderName::from_static("x-user-id"),
        HeaderValue::from_static(user_id),
    )
}

async fn signup(server: &TestServer, user_id: &'static str, profile: Value) {
    as_user(server.put("/users/me"), user_id)
        .json(&profile)
        .await
        .assert_status_ok();
}

fn today() -> String {
    Utc::now().date_naive().to_string()
}

#[tokio::test]
async fn health_and_readiness_report_the_local_backend() {
    let server = server().await;

    server.get("/health").await.assert_status_ok();

    let ready: Value = server.get("/health/ready").await.json();
    assert_eq!(ready["backend"], "local");
    assert_eq!(ready["mode"], "strict");
    assert_eq!(ready["reachable"], true);
}

#[tokio::test]
async fn requests_without_a_user_id_are_rejected() {
    let server = server().await;

    let response = server.get("/users/me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["code"], "E_UNAUTHORIZED");

    as_user(server.get("/diet-plans/today"), " ")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_upsert_derives_bmi_and_validates() {
    let server = server().await;

    as_user(server.get("/users/me"), "u-1")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    signup(
        &server,
        "u-1",
        json!({
            "name": "Asha",
            "age": 34,
            "gender": "female",
            "height_cm": 160.0,
            "weight_kg": 64.0,
            "health_conditions": ["Type 2 diabetes"],
            "allergies": ["nuts"]
        }),
    )
    .await;

    let profile: Value = as_user(server.get("/users/me"), "u-1").await.json();
    assert_eq!(profile["data"]["bmi"], 25.0);
    assert_eq!(profile["bmi_category"], "overweight");

    as_user(server.put("/users/me"), "u-1")
        .json(&json!({ "name": "Asha", "age": 150 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    as_user(server.put("/users/me"), "u-1")
        .json(&json!({ "name": "" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn recommendations_respect_allergies() {
    let server = server().await;
    signup(
        &server,
        "u-1",
        json!({ "name": "Asha", "health_conditions": ["diabetic"], "allergies": ["nuts"] }),
    )
    .await;

    let body: Value = as_user(server.get("/recommendations?slot=breakfast"), "u-1")
        .await
        .json();
    let meals = body["data"]["meals"].as_array().unwrap();
    assert_eq!(body["data"]["condition"], "diabetic");
    assert!(!meals.is_empty());
    assert!(
        meals
            .iter()
            .all(|m| !m.as_str().unwrap().to_lowercase().contains("nuts"))
    );

    as_user(server.get("/recommendations?slot=brunch"), "u-1")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn todays_plan_is_generated_once_and_listed() {
    let server = server().await;

    as_user(server.get("/diet-plans/today"), "u-1")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    signup(&server, "u-1", json!({ "name": "Ravi", "health_conditions": ["heart disease"] })).await;

    let first: Value = as_user(server.get("/diet-plans/today"), "u-1").await.json();
    let second: Value = as_user(server.get("/diet-plans/today"), "u-1").await.json();
    assert_eq!(first["data"]["condition"], "cardiac");
    assert_eq!(first["data"]["strategy"], "standard");
    assert_eq!(first, second);

    let by_date: Value = as_user(server.get(&format!("/diet-plans/{}", today())), "u-1")
        .await
        .json();
    assert_eq!(by_date, first);

    let history: Value = as_user(server.get("/diet-plans"), "u-1").await.json();
    assert_eq!(history["data"].as_array().unwrap().len(), 1);

    let calendar: Value = as_user(
        server.get(&format!("/diet-plans/calendar?start={}&end={}", today(), today())),
        "u-1",
    )
    .await
    .json();
    assert_eq!(calendar["data"]["dates"], json!([today()]));
}

#[tokio::test]
async fn generating_for_a_past_date_is_rejected() {
    let server = server().await;
    signup(&server, "u-1", json!({ "name": "Ravi" })).await;

    let yesterday = Utc::now().date_naive() - Days::new(1);
    as_user(server.post("/diet-plans"), "u-1")
        .json(&json!({ "date": yesterday.to_string() }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let tomorrow = Utc::now().date_naive() + Days::new(1);
    as_user(server.post("/diet-plans"), "u-1")
        .json(&json!({ "date": tomorrow.to_string() }))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn substitutions_drop_unavailable_items() {
    let server = server().await;
    signup(&server, "u-1", json!({ "name": "Ravi" })).await;
    as_user(server.get("/diet-plans/today"), "u-1")
        .await
        .assert_status_ok();

    let body: Value = as_user(
        server.post(&format!("/diet-plans/{}/substitutions", today())),
        "u-1",
    )
    .json(&json!({ "unavailable_items": ["rice"] }))
    .await
    .json();

    assert_eq!(body["data"]["unavailable_items"], json!(["rice"]));
    for slot in ["breakfast", "lunch", "dinner", "snacks"] {
        for meal in body["data"]["meal_plan"][slot].as_array().unwrap() {
            assert!(!meal.as_str().unwrap().to_lowercase().contains("rice"));
        }
    }

    as_user(server.post("/diet-plans/2020-01-01/substitutions"), "u-1")
        .json(&json!({ "unavailable_items": ["rice"] }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn feedback_is_scored_once_per_plan() {
    let server = server().await;
    signup(&server, "u-1", json!({ "name": "Meera", "health_conditions": ["PCOS"] })).await;

    let path = format!("/diet-plans/{}/feedback", today());
    as_user(server.post(&path), "u-1")
        .json(&json!({ "text": "great" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    as_user(server.get("/diet-plans/today"), "u-1")
        .await
        .assert_status_ok();

    let response = as_user(server.post(&path), "u-1")
        .json(&json!({ "text": "Too complicated and I felt hungry" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let outcome: Value = response.json();
    assert_eq!(outcome["data"]["analysis"]["adherence_score"], 0.0);
    assert_eq!(outcome["data"]["analysis"]["adjustment"], "simplify");

    as_user(server.post(&path), "u-1")
        .json(&json!({ "text": "again" }))
        .await
        .assert_status(StatusCode::CONFLICT);

    let stored: Value = as_user(server.get(&path), "u-1").await.json();
    assert_eq!(stored["data"]["text"], "Too complicated and I felt hungry");

    let summary: Value = as_user(server.get("/feedback/summary?days=7"), "u-1")
        .await
        .json();
    assert_eq!(summary["data"]["plans"], 1);
    assert_eq!(summary["data"]["plans_with_feedback"], 1);

    as_user(server.get("/feedback/summary?days=365"), "u-1")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn daily_status_tracks_the_day() {
    let server = server().await;

    let fresh: Value = as_user(server.get("/daily-status"), "u-1").await.json();
    assert_eq!(fresh["data"]["status"]["is_new_day"], true);
    assert_eq!(fresh["data"]["status"]["days_since_last_interaction"], Value::Null);

    signup(&server, "u-1", json!({ "name": "Meera" })).await;
    as_user(server.get("/diet-plans/today"), "u-1")
        .await
        .assert_status_ok();

    let after: Value = as_user(server.get("/daily-status"), "u-1").await.json();
    assert_eq!(after["data"]["status"]["has_diet_plan"], true);
    assert_eq!(after["data"]["status"]["should_collect_feedback"], true);
    assert!(after["data"]["feedback_prompt"].is_string());
}

#[tokio::test]
async fn conversation_history_is_newest_first() {
    let server = server().await;

    for message in ["first", "second"] {
        as_user(server.post("/conversations"), "u-1")
            .json(&json!({ "message": message }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let history: Value = as_user(server.get("/conversations?limit=1"), "u-1")
        .await
        .json();
    let entries = history["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["message"], "second");
    assert_eq!(entries[0]["message_type"], "user_input");
}
