//! Ownership checks for write endpoints
//!
//! Reads are open to any authenticated user. Writes to a league, or to a team
//! or match inside it, are reserved for the league's owner.

use tracing::warn;

use crate::api::errors::ApiError;
use crate::api::middleware::AuthUser;
use crate::api::state::AppState;
use crate::domain::league::League;
use crate::domain::repositories::RepositoryError;

pub fn ensure_owner(league: &League, AuthUser(user_id): AuthUser) -> Result<(), ApiError> {
    if league.is_owned_by(user_id) {
        return Ok(());
    }

    warn!(league_id = league.id, %user_id, "write rejected for non-owner");
    Err(ApiError::forbidden(
        "You do not have permission to perform this action.",
    ))
}

/// League of an existing resource, checked for ownership
pub async fn owned_league(state: &AppState, user: AuthUser, league_id: i64) -> Result<League, ApiError> {
    let league = state
        .leagues
        .find_by_id(league_id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("league", league_id))?;
    ensure_owner(&league, user)?;
    Ok(league)
}

/// League named in a create request body
///
/// An unknown league is a client error here rather than a missing resource.
pub async fn league_for_creation(
    state: &AppState,
    user: AuthUser,
    league_id: i64,
) -> Result<League, ApiError> {
    let league = state
        .leagues
        .find_by_id(league_id)
        .await?
        .ok_or_else(|| ApiError::bad_request(format!("Invalid league id: {}", league_id)))?;
    ensure_owner(&league, user)?;
    Ok(league)
}
