use std::sync::Arc;

use tracing::debug;

use crate::domain::repositories::{MatchRepository, RepositoryResult, TeamRepository};
use crate::domain::scoreboard::{rank_teams, PointsSystem, ScoreEntry};

/// Computes league standings from stored teams and matches
///
/// Results are never cached: every call reads the repositories afresh, with
/// one query for the teams and one for the matches regardless of league size.
#[derive(Clone)]
pub struct ScoreboardService {
    teams: Arc<dyn TeamRepository>,
    matches: Arc<dyn MatchRepository>,
    points: PointsSystem,
}

impl ScoreboardService {
    pub fn new(
        teams: Arc<dyn TeamRepository>,
        matches: Arc<dyn MatchRepository>,
        points: PointsSystem,
    ) -> Self {
        Self {
            teams,
            matches,
            points,
        }
    }

    /// Ranked standings for a league
    ///
    /// A league with no teams, including one that does not exist, yields an
    /// empty table. Callers that must tell the two apart check the league
    /// first. Repository failures are returned as-is.
    pub async fn compute_scoreboard(&self, league_id: i64) -> RepositoryResult<Vec<ScoreEntry>> {
        let teams = self.teams.find_by_league(league_id).await?;
        if teams.is_empty() {
            return Ok(Vec::new());
        }

        let matches = self.matches.find_by_league(league_id).await?;
        debug!(
            league_id,
            teams = teams.len(),
            matches = matches.len(),
            "computing scoreboard"
        );

        Ok(rank_teams(teams, &matches, self.points))
    }
}
