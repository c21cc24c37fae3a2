use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::AuthUser;
use crate::api::pagination::{ListQuery, Page};
use crate::api::permissions::owned_league;
use crate::api::state::AppState;
use crate::domain::league::{League, LeagueChanges, NewLeague};
use crate::domain::pagination::Paginated;
use crate::domain::repositories::RepositoryError;
use crate::domain::scoreboard::ScoreEntry;

#[derive(Debug, Deserialize)]
pub struct CreateLeagueRequest {
    pub name: String,
}

/// Body of PUT and PATCH; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateLeagueRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LeagueResponse {
    pub id: i64,
    pub name: String,
    pub owner: Uuid,
}

impl From<League> for LeagueResponse {
    fn from(league: League) -> Self {
        Self {
            id: league.id,
            name: league.name,
            owner: league.owner_id,
        }
    }
}

/// One row of the standings table
#[derive(Debug, Serialize)]
pub struct ScoreboardEntryResponse {
    pub id: i64,
    pub league: i64,
    pub name: String,
    pub city: String,
    pub score: u32,
}

impl From<ScoreEntry> for ScoreboardEntryResponse {
    fn from(entry: ScoreEntry) -> Self {
        let score = entry.score();
        Self {
            id: entry.team.id,
            league: entry.team.league_id,
            name: entry.team.name,
            city: entry.team.city,
            score,
        }
    }
}

/// GET /leagues
pub async fn list_leagues(
    State(state): State<AppState>,
    _user: AuthUser,
    uri: Uri,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<LeagueResponse>>, ApiError> {
    let page = state.leagues.list(query.window()?).await?;
    Ok(Json(Page::from_paginated(
        &uri,
        &query,
        page.map(LeagueResponse::from),
    )?))
}

/// POST /leagues
///
/// The caller becomes the owner.
pub async fn create_league(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<CreateLeagueRequest>,
) -> Result<(StatusCode, Json<LeagueResponse>), ApiError> {
    let league = state
        .leagues
        .create(&NewLeague::new(&req.name, user_id)?)
        .await?;
    info!(league_id = league.id, owner = %user_id, "league created");

    Ok((StatusCode::CREATED, Json(league.into())))
}

/// GET /leagues/:id
pub async fn get_league(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<LeagueResponse>, ApiError> {
    let league = state
        .leagues
        .find_by_id(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("league", id))?;

    Ok(Json(league.into()))
}

/// PUT or PATCH /leagues/:id
pub async fn update_league(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateLeagueRequest>,
) -> Result<Json<LeagueResponse>, ApiError> {
    owned_league(&state, user, id).await?;

    let changes = LeagueChanges::new(req.name.as_deref())?;
    let league = state.leagues.update(id, &changes).await?;

    Ok(Json(league.into()))
}

/// DELETE /leagues/:id
///
/// Takes the league's teams and matches with it.
pub async fn delete_league(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    owned_league(&state, user, id).await?;
    state.leagues.delete(id).await?;
    info!(league_id = id, "league deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /leagues/:id/scoreboard
///
/// Teams of the league, best first. The whole table is ranked before the
/// requested page is cut from it.
pub async fn league_scoreboard(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
    uri: Uri,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<ScoreboardEntryResponse>>, ApiError> {
    let window = query.window()?;
    if state.leagues.find_by_id(id).await?.is_none() {
        return Err(RepositoryError::not_found("league", id).into());
    }

    let table = state.scoreboard.compute_scoreboard(id).await?;
    let page = Paginated::from_ordered(table, window).map(ScoreboardEntryResponse::from);

    Ok(Json(Page::from_paginated(&uri, &query, page)?))
}
