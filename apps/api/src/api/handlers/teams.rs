use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::errors::ApiError;
use crate::api::middleware::AuthUser;
use crate::api::pagination::{ListQuery, Page};
use crate::api::permissions::{league_for_creation, owned_league};
use crate::api::state::AppState;
use crate::domain::repositories::RepositoryError;
use crate::domain::team::{NewTeam, Team, TeamChanges};

/// Request body for creating a team
#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub league: i64,
    pub name: String,
    pub city: Option<String>,
}

/// Body of PUT and PATCH; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTeamRequest {
    pub league: Option<i64>,
    pub name: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: i64,
    pub league: i64,
    pub name: String,
    pub city: String,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            league: team.league_id,
            name: team.name,
            city: team.city,
        }
    }
}

/// Fails unless a body that names a league names the current one
pub(crate) fn same_league(requested: Option<i64>, current: i64) -> Result<(), ApiError> {
    match requested {
        Some(league) if league != current => Err(ApiError::bad_request(
            "league cannot be changed after creation",
        )),
        _ => Ok(()),
    }
}

async fn find_team(state: &AppState, id: i64) -> Result<Team, ApiError> {
    Ok(state
        .teams
        .find_by_id(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("team", id))?)
}

/// List teams, optionally restricted to some leagues
///
/// GET /teams?league=1,2
pub async fn list_teams(
    State(state): State<AppState>,
    _user: AuthUser,
    uri: Uri,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<TeamResponse>>, ApiError> {
    let filter = query.league_filter()?;
    let page = state.teams.list(&filter, query.window()?).await?;

    Ok(Json(Page::from_paginated(
        &uri,
        &query,
        page.map(TeamResponse::from),
    )?))
}

/// Create a new team
///
/// POST /teams
pub async fn create_team(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    let league = league_for_creation(&state, user, req.league).await?;

    let team = NewTeam::new(league.id, &req.name, req.city.as_deref())?;
    let team = state.teams.create(&team).await?;
    info!(team_id = team.id, league_id = league.id, "team created");

    Ok((StatusCode::CREATED, Json(team.into())))
}

/// Get a team by ID
///
/// GET /teams/:id
pub async fn get_team(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<TeamResponse>, ApiError> {
    Ok(Json(find_team(&state, id).await?.into()))
}

/// PUT or PATCH /teams/:id
pub async fn update_team(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTeamRequest>,
) -> Result<Json<TeamResponse>, ApiError> {
    let team = find_team(&state, id).await?;
    owned_league(&state, user, team.league_id).await?;
    same_league(req.league, team.league_id)?;

    let changes = TeamChanges::new(req.name.as_deref(), req.city.as_deref())?;
    let team = state.teams.update(id, &changes).await?;

    Ok(Json(team.into()))
}

/// Delete a team
///
/// Matches it played stay, with the team's slot emptied.
///
/// DELETE /teams/:id
pub async fn delete_team(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let team = find_team(&state, id).await?;
    owned_league(&state, user, team.league_id).await?;

    state.teams.delete(id).await?;
    info!(team_id = id, league_id = team.league_id, "team deleted");

    Ok(StatusCode::NO_CONTENT)
}
