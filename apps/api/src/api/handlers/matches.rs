use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::errors::ApiError;
use crate::api::handlers::teams::same_league;
use crate::api::middleware::AuthUser;
use crate::api::pagination::{ListQuery, Page};
use crate::api::permissions::{league_for_creation, owned_league};
use crate::api::state::AppState;
use crate::domain::matches::{Match, MatchChanges, NewMatch};
use crate::domain::repositories::RepositoryError;

/// Request body for creating a match
#[derive(Debug, Deserialize)]
pub struct CreateMatchRequest {
    pub league: i64,
    pub host: Option<i64>,
    pub visitor: Option<i64>,
    pub host_score: Option<i32>,
    pub visitor_score: Option<i32>,
    pub address: Option<String>,
    pub datetime: Option<DateTime<Utc>>,
}

/// Body of PUT and PATCH
///
/// An absent field is left unchanged, an explicit `null` clears it.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMatchRequest {
    pub league: Option<i64>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub host: Option<Option<i64>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub visitor: Option<Option<i64>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub host_score: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub visitor_score: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub address: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub datetime: Option<Option<DateTime<Utc>>>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub id: i64,
    pub league: i64,
    pub host: Option<i64>,
    pub host_score: Option<i32>,
    pub visitor: Option<i64>,
    pub visitor_score: Option<i32>,
    pub address: Option<String>,
    pub datetime: Option<DateTime<Utc>>,
}

impl From<Match> for MatchResponse {
    fn from(fixture: Match) -> Self {
        Self {
            id: fixture.id,
            league: fixture.league_id,
            host: fixture.host_id,
            host_score: fixture.host_score,
            visitor: fixture.visitor_id,
            visitor_score: fixture.visitor_score,
            address: fixture.address,
            datetime: fixture.datetime,
        }
    }
}

/// Forecast verdict for a match venue
#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    #[serde(rename = "match")]
    pub match_id: i64,
    pub city: String,
    pub date: NaiveDate,
    pub good_weather: bool,
}

async fn find_match(state: &AppState, id: i64) -> Result<Match, ApiError> {
    Ok(state
        .matches
        .find_by_id(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("match", id))?)
}

/// Every named team must exist and play in `league_id`
async fn ensure_teams_in_league(
    state: &AppState,
    league_id: i64,
    teams: &[(&'static str, i64)],
) -> Result<(), ApiError> {
    for &(role, team_id) in teams {
        let team = state.teams.find_by_id(team_id).await?.ok_or_else(|| {
            ApiError::bad_request(format!("Invalid {} team id: {}", role, team_id))
        })?;
        if team.league_id != league_id {
            return Err(ApiError::bad_request(format!(
                "{} team {} does not play in league {}",
                role, team_id, league_id
            )));
        }
    }
    Ok(())
}

/// List matches, optionally restricted to some leagues
///
/// GET /matches?league=1,2
pub async fn list_matches(
    State(state): State<AppState>,
    _user: AuthUser,
    uri: Uri,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<MatchResponse>>, ApiError> {
    let filter = query.league_filter()?;
    let page = state.matches.list(&filter, query.window()?).await?;

    Ok(Json(Page::from_paginated(
        &uri,
        &query,
        page.map(MatchResponse::from),
    )?))
}

/// POST /matches
pub async fn create_match(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateMatchRequest>,
) -> Result<(StatusCode, Json<MatchResponse>), ApiError> {
    let league = league_for_creation(&state, user, req.league).await?;

    let fixture = NewMatch::new(
        league.id,
        req.host,
        req.visitor,
        req.host_score,
        req.visitor_score,
        req.address.as_deref(),
        req.datetime,
    )?;
    let slots = [("host", fixture.host_id), ("visitor", fixture.visitor_id)];
    let assigned: Vec<(&'static str, i64)> = slots
        .into_iter()
        .filter_map(|(role, id)| id.map(|id| (role, id)))
        .collect();
    ensure_teams_in_league(&state, league.id, &assigned).await?;

    let fixture = state.matches.create(&fixture).await?;
    info!(match_id = fixture.id, league_id = league.id, "match created");

    Ok((StatusCode::CREATED, Json(fixture.into())))
}

/// GET /matches/:id
pub async fn get_match(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<MatchResponse>, ApiError> {
    Ok(Json(find_match(&state, id).await?.into()))
}

/// PUT or PATCH /matches/:id
pub async fn update_match(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateMatchRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    let fixture = find_match(&state, id).await?;
    owned_league(&state, user, fixture.league_id).await?;
    same_league(req.league, fixture.league_id)?;

    let changes = MatchChanges::new(
        req.host,
        req.visitor,
        req.host_score,
        req.visitor_score,
        req.address.as_ref().map(|address| address.as_deref()),
        req.datetime,
    )?;
    // the merged match must still name two different teams
    let mut merged = fixture.clone();
    merged.apply(&changes)?;

    let assigned: Vec<(&'static str, i64)> = changes.assigned_teams().collect();
    ensure_teams_in_league(&state, fixture.league_id, &assigned).await?;

    let fixture = state.matches.update(id, &changes).await?;
    Ok(Json(fixture.into()))
}

/// DELETE /matches/:id
pub async fn delete_match(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let fixture = find_match(&state, id).await?;
    owned_league(&state, user, fixture.league_id).await?;

    state.matches.delete(id).await?;
    info!(match_id = id, league_id = fixture.league_id, "match deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Whether the weather in the host team's city suits the match date
///
/// GET /matches/:id/weather
pub async fn match_weather(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<WeatherResponse>, ApiError> {
    let fixture = find_match(&state, id).await?;

    let host_id = fixture
        .host_id
        .ok_or_else(|| ApiError::bad_request("Match has no host team"))?;
    let datetime = fixture
        .datetime
        .ok_or_else(|| ApiError::bad_request("Match has no date"))?;
    let host = state
        .teams
        .find_by_id(host_id)
        .await?
        .ok_or_else(|| ApiError::bad_request("Match has no host team"))?;

    let good_weather = state.weather.is_weather_good(&host.city, datetime).await?;

    Ok(Json(WeatherResponse {
        match_id: fixture.id,
        city: host.city,
        date: datetime.date_naive(),
        good_weather,
    }))
}
