//! End-to-end API integration tests
//!
//! These tests drive the complete router over the in-memory backend:
//! - User registration and authentication
//! - League, team and match management with ownership checks
//! - Scoreboard computation and pagination envelopes
//! - Weather lookups through a stub service

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use league_planner_api::api::{self, AppState, Repositories};
use league_planner_api::config::AppConfig;
use league_planner_api::infrastructure::repositories::InMemoryStore;
use league_planner_api::infrastructure::weather::{WeatherError, WeatherService};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for oneshot

/// Weather service that answers without leaving the process
struct StubWeather {
    good: bool,
}

#[async_trait]
impl WeatherService for StubWeather {
    async fn is_weather_good(&self, _city: &str, _date: DateTime<Utc>) -> Result<bool, WeatherError> {
        Ok(self.good)
    }
}

/// Setup test application with a fresh in-memory store
fn setup_app() -> Router {
    let config = AppConfig {
        jwt_secret: "integration-test-secret".to_string(),
        bcrypt_cost: 4,
        ..AppConfig::default()
    };
    let state = AppState::new(
        Repositories::in_memory(InMemoryStore::new()),
        Arc::new(StubWeather { good: false }),
        &config,
    );

    api::router(state)
}

/// Send one request and decode the body as JSON (or a JSON string for plain text)
async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, json)
}

/// Register a user and return a bearer token for it
async fn login_as(app: &Router, username: &str) -> String {
    let credentials = json!({ "username": username, "password": "correct-horse" });

    let (status, _) = send(app, "POST", "/register", None, Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(app, "POST", "/login", None, Some(credentials)).await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

async fn create(app: &Router, token: &str, uri: &str, body: Value) -> i64 {
    let (status, body) = send(app, "POST", uri, Some(token), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "POST {} failed: {}", uri, body);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_app();

    let (status, body) = send(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("OK"));
}

#[tokio::test]
async fn test_register_and_login_flow() {
    let app = setup_app();
    let credentials = json!({ "username": "coach", "password": "securepass456" });

    // Step 1: Register user
    let (status, registered) = send(&app, "POST", "/register", None, Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(registered["username"], "coach");
    assert!(registered["id"].is_string());

    // Step 2: Login with registered credentials
    let (status, body) = send(&app, "POST", "/login", None, Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], registered["id"]);
    assert!(!body["token"].as_str().unwrap().is_empty());

    // Step 3: The username is taken now
    let (status, _) = send(&app, "POST", "/register", None, Some(credentials)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let app = setup_app();
    login_as(&app, "coach").await;

    let wrong = json!({ "username": "coach", "password": "not-the-password" });
    let (status, body) = send(&app, "POST", "/login", None, Some(wrong)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    let unknown = json!({ "username": "nobody", "password": "correct-horse" });
    let (status, _) = send(&app, "POST", "/login", None, Some(unknown)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = setup_app();

    let credentials = json!({ "username": "coach", "password": "short" });
    let (status, body) = send(&app, "POST", "/register", None, Some(credentials)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("at least 8"));
}

#[tokio::test]
async fn test_protected_endpoints_require_token() {
    let app = setup_app();

    let (status, body) = send(&app, "GET", "/leagues", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, "GET", "/teams", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/leagues/1/scoreboard", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_scoreboard_ranks_teams() {
    let app = setup_app();
    let token = login_as(&app, "organizer").await;

    let league = create(&app, &token, "/leagues", json!({ "name": "Mundial" })).await;
    let polska = create(&app, &token, "/teams", json!({ "league": league, "name": "Polska" })).await;
    let argentyna =
        create(&app, &token, "/teams", json!({ "league": league, "name": "Argentyna" })).await;
    let meksyk = create(&app, &token, "/teams", json!({ "league": league, "name": "Meksyk" })).await;

    for (host, visitor, host_score, visitor_score) in [
        (polska, argentyna, 0, 2),
        (polska, meksyk, 0, 0),
        (meksyk, argentyna, 0, 2),
    ] {
        let fixture = json!({
            "league": league,
            "host": host,
            "visitor": visitor,
            "host_score": host_score,
            "visitor_score": visitor_score,
        });
        create(&app, &token, "/matches", fixture).await;
    }
    // scheduled but not played yet
    create(&app, &token, "/matches", json!({ "league": league, "host": argentyna, "visitor": polska })).await;

    let uri = format!("/leagues/{}/scoreboard", league);
    let (status, body) = send(&app, "GET", &uri, Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(body["next"], Value::Null);
    assert_eq!(body["previous"], Value::Null);

    let table: Vec<(&str, i64)> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| (entry["name"].as_str().unwrap(), entry["score"].as_i64().unwrap()))
        .collect();
    assert_eq!(table, vec![("Argentyna", 6), ("Meksyk", 1), ("Polska", 1)]);
    assert_eq!(body["results"][0]["city"], "Not Set");
    assert_eq!(body["results"][0]["league"], league);
}

#[tokio::test]
async fn test_scoreboard_of_unknown_league_is_not_found() {
    let app = setup_app();
    let token = login_as(&app, "organizer").await;

    let (status, _) = send(&app, "GET", "/leagues/999/scoreboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_scoreboard_of_empty_league_is_empty() {
    let app = setup_app();
    let token = login_as(&app, "organizer").await;
    let league = create(&app, &token, "/leagues", json!({ "name": "Empty" })).await;

    let uri = format!("/leagues/{}/scoreboard", league);
    let (status, body) = send(&app, "GET", &uri, Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["results"], json!([]));
}

#[tokio::test]
async fn test_only_owner_can_write() {
    let app = setup_app();
    let owner = login_as(&app, "owner").await;
    let stranger = login_as(&app, "stranger").await;

    let league = create(&app, &owner, "/leagues", json!({ "name": "Private" })).await;
    let team = create(&app, &owner, "/teams", json!({ "league": league, "name": "Home" })).await;

    // reads are open to everyone signed in
    let (status, body) = send(&app, "GET", &format!("/leagues/{}", league), Some(&stranger), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Private");

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/leagues/{}", league),
        Some(&stranger),
        Some(json!({ "name": "Hijacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        "POST",
        "/teams",
        Some(&stranger),
        Some(json!({ "league": league, "name": "Intruders" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "DELETE", &format!("/teams/{}", team), Some(&stranger), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/leagues/{}", league),
        Some(&owner),
        Some(json!({ "name": "Renamed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Renamed");
}

#[tokio::test]
async fn test_create_in_unknown_league_is_bad_request() {
    let app = setup_app();
    let token = login_as(&app, "organizer").await;

    let (status, _) = send(
        &app,
        "POST",
        "/teams",
        Some(&token),
        Some(json!({ "league": 404, "name": "Orphans" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_team_name_is_rejected() {
    let app = setup_app();
    let token = login_as(&app, "organizer").await;
    let league = create(&app, &token, "/leagues", json!({ "name": "Liga" })).await;
    create(&app, &token, "/teams", json!({ "league": league, "name": "Lech" })).await;

    let (status, body) = send(
        &app,
        "POST",
        "/teams",
        Some(&token),
        Some(json!({ "league": league, "name": "Lech" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_deleting_league_removes_its_teams_and_matches() {
    let app = setup_app();
    let token = login_as(&app, "organizer").await;
    let league = create(&app, &token, "/leagues", json!({ "name": "Short lived" })).await;
    let host = create(&app, &token, "/teams", json!({ "league": league, "name": "Host" })).await;
    let visitor = create(&app, &token, "/teams", json!({ "league": league, "name": "Visitor" })).await;
    let fixture = create(
        &app,
        &token,
        "/matches",
        json!({ "league": league, "host": host, "visitor": visitor }),
    )
    .await;

    let (status, _) = send(&app, "DELETE", &format!("/leagues/{}", league), Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/teams/{}", host), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", &format!("/matches/{}", fixture), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_team_keeps_its_matches() {
    let app = setup_app();
    let token = login_as(&app, "organizer").await;
    let league = create(&app, &token, "/leagues", json!({ "name": "Liga" })).await;
    let host = create(&app, &token, "/teams", json!({ "league": league, "name": "Host" })).await;
    let visitor = create(&app, &token, "/teams", json!({ "league": league, "name": "Visitor" })).await;
    let fixture = create(
        &app,
        &token,
        "/matches",
        json!({ "league": league, "host": host, "visitor": visitor, "host_score": 1, "visitor_score": 0 }),
    )
    .await;

    let (status, _) = send(&app, "DELETE", &format!("/teams/{}", host), Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &format!("/matches/{}", fixture), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["host"], Value::Null);
    assert_eq!(body["visitor"], visitor);

    // the remaining team is still ranked, with nothing from the orphaned match
    let (_, table) = send(&app, "GET", &format!("/leagues/{}/scoreboard", league), Some(&token), None).await;
    assert_eq!(table["count"], 1);
    assert_eq!(table["results"][0]["score"], 0);
}

#[tokio::test]
async fn test_list_filters_by_league_and_paginates() {
    let app = setup_app();
    let token = login_as(&app, "organizer").await;
    let first = create(&app, &token, "/leagues", json!({ "name": "First" })).await;
    let second = create(&app, &token, "/leagues", json!({ "name": "Second" })).await;
    for name in ["A", "B", "C"] {
        create(&app, &token, "/teams", json!({ "league": first, "name": name })).await;
    }
    create(&app, &token, "/teams", json!({ "league": second, "name": "X" })).await;

    let (status, body) = send(&app, "GET", "/teams", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 4);

    let uri = format!("/teams?league={}&page_size=2", first);
    let (status, body) = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    assert_eq!(body["next"], format!("/teams?league={}&page_size=2&page=2", first));
    assert_eq!(body["previous"], Value::Null);

    let (status, body) = send(&app, "GET", &format!("{}&page=2", uri), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
    assert_eq!(body["results"][0]["name"], "C");
    assert_eq!(body["next"], Value::Null);

    let (status, body) = send(&app, "GET", &format!("{}&page=3", uri), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Invalid page"));

    let both = format!("/teams?league={},{}", first, second);
    let (_, body) = send(&app, "GET", &both, Some(&token), None).await;
    assert_eq!(body["count"], 4);

    let (status, _) = send(&app, "GET", "/teams?league=abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patch_null_clears_scores() {
    let app = setup_app();
    let token = login_as(&app, "organizer").await;
    let league = create(&app, &token, "/leagues", json!({ "name": "Liga" })).await;
    let host = create(&app, &token, "/teams", json!({ "league": league, "name": "Host" })).await;
    let visitor = create(&app, &token, "/teams", json!({ "league": league, "name": "Visitor" })).await;
    let fixture = create(
        &app,
        &token,
        "/matches",
        json!({
            "league": league,
            "host": host,
            "visitor": visitor,
            "host_score": 3,
            "visitor_score": 1,
            "address": "Stadion Narodowy",
        }),
    )
    .await;
    let uri = format!("/matches/{}", fixture);

    let (status, body) = send(
        &app,
        "PATCH",
        &uri,
        Some(&token),
        Some(json!({ "host_score": null, "visitor_score": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["host_score"], Value::Null);
    assert_eq!(body["visitor_score"], Value::Null);
    // absent fields are untouched
    assert_eq!(body["address"], "Stadion Narodowy");
    assert_eq!(body["host"], host);

    let (_, table) = send(&app, "GET", &format!("/leagues/{}/scoreboard", league), Some(&token), None).await;
    assert!(table["results"]
        .as_array()
        .unwrap()
        .iter()
        .all(|entry| entry["score"] == 0));
}

#[tokio::test]
async fn test_match_teams_must_belong_to_its_league() {
    let app = setup_app();
    let token = login_as(&app, "organizer").await;
    let league = create(&app, &token, "/leagues", json!({ "name": "Liga" })).await;
    let other = create(&app, &token, "/leagues", json!({ "name": "Other" })).await;
    let home = create(&app, &token, "/teams", json!({ "league": league, "name": "Home" })).await;
    let away = create(&app, &token, "/teams", json!({ "league": other, "name": "Away" })).await;

    let (status, _) = send(
        &app,
        "POST",
        "/matches",
        Some(&token),
        Some(json!({ "league": league, "host": home, "visitor": away })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/matches",
        Some(&token),
        Some(json!({ "league": league, "host": home, "visitor": home })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/matches",
        Some(&token),
        Some(json!({ "league": league, "host": home, "host_score": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_league_of_a_team_cannot_change() {
    let app = setup_app();
    let token = login_as(&app, "organizer").await;
    let league = create(&app, &token, "/leagues", json!({ "name": "Liga" })).await;
    let other = create(&app, &token, "/leagues", json!({ "name": "Other" })).await;
    let team = create(&app, &token, "/teams", json!({ "league": league, "name": "Stayers" })).await;
    let uri = format!("/teams/{}", team);

    let (status, _) = send(&app, "PATCH", &uri, Some(&token), Some(json!({ "league": other }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "PATCH", &uri, Some(&token), Some(json!({ "city": "Poznań" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "Poznań");
    assert_eq!(body["name"], "Stayers");
}

#[tokio::test]
async fn test_match_weather() {
    let app = setup_app();
    let token = login_as(&app, "organizer").await;
    let league = create(&app, &token, "/leagues", json!({ "name": "Liga" })).await;
    let host = create(
        &app,
        &token,
        "/teams",
        json!({ "league": league, "name": "Lech", "city": "Poznań" }),
    )
    .await;
    let dated = create(
        &app,
        &token,
        "/matches",
        json!({ "league": league, "host": host, "datetime": "2030-06-01T18:00:00Z" }),
    )
    .await;
    let undated = create(&app, &token, "/matches", json!({ "league": league, "host": host })).await;

    let (status, body) = send(&app, "GET", &format!("/matches/{}/weather", dated), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["match"], dated);
    assert_eq!(body["city"], "Poznań");
    assert_eq!(body["date"], "2030-06-01");
    assert_eq!(body["good_weather"], false);

    let (status, _) = send(&app, "GET", &format!("/matches/{}/weather", undated), Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/matches/999/weather", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_cannot_put_one_team_in_both_slots() {
    let app = setup_app();
    let token = login_as(&app, "organizer").await;
    let league = create(&app, &token, "/leagues", json!({ "name": "Liga" })).await;
    let host = create(&app, &token, "/teams", json!({ "league": league, "name": "Host" })).await;
    let visitor = create(&app, &token, "/teams", json!({ "league": league, "name": "Visitor" })).await;
    let fixture = create(
        &app,
        &token,
        "/matches",
        json!({ "league": league, "host": host, "visitor": visitor, "host_score": 1, "visitor_score": 1 }),
    )
    .await;
    let uri = format!("/matches/{}", fixture);

    let (status, body) = send(&app, "PATCH", &uri, Some(&token), Some(json!({ "host": visitor }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("different teams"));

    let (status, _) = send(&app, "PUT", &uri, Some(&token), Some(json!({ "visitor": host }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // the stored match and the draw it records are untouched
    let (_, stored) = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(stored["host"], host);
    assert_eq!(stored["visitor"], visitor);

    let (_, table) = send(&app, "GET", &format!("/leagues/{}/scoreboard", league), Some(&token), None).await;
    assert!(table["results"]
        .as_array()
        .unwrap()
        .iter()
        .all(|entry| entry["score"] == 1));

    // swapping both slots at once is fine
    let (status, body) = send(
        &app,
        "PATCH",
        &uri,
        Some(&token),
        Some(json!({ "host": visitor, "visitor": host })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["host"], visitor);
    assert_eq!(body["visitor"], host);
}

#[tokio::test]
async fn test_scoreboard_is_paginated() {
    let app = setup_app();
    let token = login_as(&app, "organizer").await;
    let league = create(&app, &token, "/leagues", json!({ "name": "Liga" })).await;
    let a = create(&app, &token, "/teams", json!({ "league": league, "name": "A" })).await;
    let b = create(&app, &token, "/teams", json!({ "league": league, "name": "B" })).await;
    create(&app, &token, "/teams", json!({ "league": league, "name": "C" })).await;
    create(
        &app,
        &token,
        "/matches",
        json!({ "league": league, "host": b, "visitor": a, "host_score": 2, "visitor_score": 0 }),
    )
    .await;

    let uri = format!("/leagues/{}/scoreboard?page_size=2", league);
    let (status, body) = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    assert_eq!(body["results"][0]["name"], "B");
    assert_eq!(
        body["next"],
        format!("/leagues/{}/scoreboard?page_size=2&page=2", league)
    );

    let (status, body) = send(&app, "GET", &format!("{}&page=2", uri), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
    assert_eq!(body["results"][0]["name"], "C");
    assert_eq!(body["next"], Value::Null);

    let (status, _) = send(&app, "GET", &format!("{}&page=3", uri), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
