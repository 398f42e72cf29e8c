// Integration tests for Team Algo

use actix_web::{test, web, App};
use serde_json::{json, Value};
use std::sync::Arc;
use team_algo::config::PartitionSettings;
use team_algo::routes::{configure_routes, teams::AppState};
use team_algo::services::TeamStore;

fn state_with(limits: PartitionSettings, store: TeamStore) -> AppState {
    AppState::new(limits, Arc::new(store))
}

fn state() -> AppState {
    state_with(PartitionSettings::default(), TeamStore::in_memory())
}

fn roster_json() -> Value {
    let mut roster = Vec::new();
    for i in 0..6 {
        roster.push(json!({"id": format!("m{}", i), "firstName": "M", "lastName": i.to_string(), "gender": "Male", "age": 15 + i}));
    }
    for i in 0..8 {
        roster.push(json!({"id": format!("f{}", i), "first_name": "F", "last_name": i.to_string(), "gender": "Female", "age": 14 + i}));
    }
    roster.push(json!({"id": "o0", "gender": "Other", "age": 16}));
    roster.push(json!({"id": "lead1", "gender": "Female", "age": 30, "isLeader": true}));
    roster.push(json!({"id": "lead2", "gender": "Male", "age": 45, "is_leader": true}));
    Value::Array(roster)
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health() {
    let app = app!(state());
    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_generate_excludes_leaders() {
    let app = app!(state());
    let req = test::TestRequest::post()
        .uri("/api/v1/teams/generate")
        .set_json(json!({"roster": roster_json(), "teamCount": 3}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["excludedLeaders"], 2);
    let teams = body["teams"].as_array().unwrap();
    assert_eq!(teams.len(), 3);
    for team in teams {
        let members = team.as_array().unwrap();
        assert_eq!(members.len(), 5);
        assert!(members.iter().all(|m| !m["id"].as_str().unwrap().starts_with("lead")));
    }

    let summaries = body["summaries"].as_array().unwrap();
    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries[0]["count"], 5);
    assert!(body["ageSpread"].as_f64().unwrap() <= 2.5);
    assert!(body["savedAt"].is_null());
}

#[actix_web::test]
async fn test_generate_zero_teams() {
    let app = app!(state());
    let req = test::TestRequest::post()
        .uri("/api/v1/teams/generate")
        .set_json(json!({"roster": roster_json(), "teamCount": -2}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["teams"], json!([]));
    assert_eq!(body["summaries"], json!([]));
}

#[actix_web::test]
async fn test_generate_rejects_too_many_teams() {
    let limits = PartitionSettings {
        max_team_count: 4,
        ..PartitionSettings::default()
    };
    let app = app!(state_with(limits, TeamStore::in_memory()));
    let req = test::TestRequest::post()
        .uri("/api/v1/teams/generate")
        .set_json(json!({"roster": roster_json(), "teamCount": 5}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_generate_rejects_blank_id() {
    let app = app!(state());
    let req = test::TestRequest::post()
        .uri("/api/v1/teams/generate")
        .set_json(json!({"roster": [{"id": "", "gender": "Male", "age": 15}], "teamCount": 1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_generate_and_save() {
    let app = app!(state());
    let req = test::TestRequest::post()
        .uri("/api/v1/teams/generate")
        .set_json(json!({"roster": roster_json(), "teamCount": "2", "parity": "loose", "save": true, "savedBy": "ana"}))
        .to_request();
    let generated: Value = test::call_and_read_body_json(&app, req).await;
    assert!(generated["savedAt"].is_string());

    let req = test::TestRequest::get().uri("/api/v1/teams").to_request();
    let saved: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(saved["ok"], true);
    assert_eq!(saved["savedBy"], "ana");

    let expected: Vec<Vec<String>> = generated["teams"]
        .as_array()
        .unwrap()
        .iter()
        .map(|team| {
            team.as_array()
                .unwrap()
                .iter()
                .map(|m| m["id"].as_str().unwrap().to_string())
                .collect()
        })
        .collect();
    assert_eq!(saved["teams"], json!(expected));
}

#[actix_web::test]
async fn test_save_load_clear() {
    let app = app!(state());

    let req = test::TestRequest::get().uri("/api/v1/teams").to_request();
    let empty: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(empty["teams"], json!([]));
    assert!(empty["savedAt"].is_null());
    assert!(empty["savedBy"].is_null());

    let req = test::TestRequest::post()
        .uri("/api/v1/teams")
        .set_json(json!({"teams": [["a", "b"], ["c"]], "savedBy": "coordinator"}))
        .to_request();
    let saved: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(saved["ok"], true);
    assert_eq!(saved["savedBy"], "coordinator");

    let req = test::TestRequest::get().uri("/api/v1/teams").to_request();
    let loaded: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(loaded["teams"], json!([["a", "b"], ["c"]]));

    let req = test::TestRequest::delete().uri("/api/v1/teams").to_request();
    let cleared: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(cleared["ok"], true);

    let req = test::TestRequest::get().uri("/api/v1/teams").to_request();
    let after: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(after["teams"], json!([]));
}

#[actix_web::test]
async fn test_save_rejects_non_array_teams() {
    let app = app!(state());
    let req = test::TestRequest::post()
        .uri("/api/v1/teams")
        .set_json(json!({"teams": "nope"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_saved_teams_persist_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("teams.json");

    let store = TeamStore::open(&path).await.unwrap();
    let app = app!(state_with(PartitionSettings::default(), store));
    let req = test::TestRequest::post()
        .uri("/api/v1/teams")
        .set_json(json!({"teams": [["x"], ["y", "z"]]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let reopened = TeamStore::open(&path).await.unwrap();
    let snapshot = reopened.load().await.unwrap();
    assert_eq!(snapshot.teams, vec![vec!["x".to_string()], vec!["y".to_string(), "z".to_string()]]);
    assert!(snapshot.saved_by.is_none());
}

#[actix_web::test]
async fn test_generate_accepts_integer_keyed_records() {
    let app = app!(state());
    let roster = json!([
        {"id": 1, "first_name": "A", "last_name": "One", "gender": "Male", "age": 15, "is_leader": 0},
        {"id": 2, "first_name": "B", "last_name": "Two", "gender": "Female", "age": 16, "is_leader": 1},
        {"id": 3, "first_name": "C", "last_name": "Three", "gender": "Female", "age": 17, "is_leader": 0},
        {"id": 4, "first_name": "D", "last_name": "Four", "gender": "Male", "age": 18, "is_leader": "0"}
    ]);
    let req = test::TestRequest::post()
        .uri("/api/v1/teams/generate")
        .set_json(json!({"roster": roster, "teamCount": 2, "save": true}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["excludedLeaders"], 1);
    let mut ids: Vec<String> = body["teams"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|team| team.as_array().unwrap().iter())
        .map(|m| m["id"].as_str().unwrap().to_string())
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["1", "3", "4"]);
}

#[actix_web::test]
async fn test_save_accepts_numeric_ids() {
    let app = app!(state());
    let req = test::TestRequest::post()
        .uri("/api/v1/teams")
        .set_json(json!({"teams": [[1, 2], [3]]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get().uri("/api/v1/teams").to_request();
    let loaded: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(loaded["teams"], json!([["1", "2"], ["3"]]));
}
