//! Standings computation for a league.
//!
//! [`PointsSystem::points_for`] turns one match result into the points awarded to
//! each side, and [`rank_teams`] folds a league's matches into a ranked table.
//! Both are pure: loading teams and matches is left to
//! [`ScoreboardService`](crate::services::ScoreboardService).

use std::cmp::Ordering;
use std::collections::HashMap;

use super::matches::Match;
use super::team::Team;

/// Points awarded for each match outcome
///
/// # Example
/// ```
/// use league_planner_api::domain::scoreboard::PointsSystem;
///
/// let points = PointsSystem::default();
/// assert_eq!(points.points_for(Some(2), Some(0)), (3, 0));
/// assert_eq!(points.points_for(Some(1), None), (0, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointsSystem {
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
}

impl PointsSystem {
    pub const POINTS_PER_WIN: u32 = 3;
    pub const POINTS_PER_DRAW: u32 = 1;
    pub const POINTS_PER_LOSS: u32 = 0;

    pub fn new(win: u32, draw: u32, loss: u32) -> Self {
        Self { win, draw, loss }
    }

    /// Points for `(host, visitor)` given the two scores
    ///
    /// A match missing either score has not been played and awards nothing to
    /// either side, whatever `loss` is configured to.
    pub fn points_for(&self, host_score: Option<i32>, visitor_score: Option<i32>) -> (u32, u32) {
        let (Some(host), Some(visitor)) = (host_score, visitor_score) else {
            return (0, 0);
        };

        match host.cmp(&visitor) {
            Ordering::Greater => (self.win, self.loss),
            Ordering::Equal => (self.draw, self.draw),
            Ordering::Less => (self.loss, self.win),
        }
    }
}

impl Default for PointsSystem {
    fn default() -> Self {
        Self::new(
            Self::POINTS_PER_WIN,
            Self::POINTS_PER_DRAW,
            Self::POINTS_PER_LOSS,
        )
    }
}

/// One row of the standings table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub team: Team,
    pub points_as_host: u32,
    pub points_as_visitor: u32,
}

impl ScoreEntry {
    /// Total points: earned as host plus earned as visitor
    ///
    /// Saturates at `u32::MAX` rather than wrapping.
    pub fn score(&self) -> u32 {
        self.points_as_host.saturating_add(self.points_as_visitor)
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    as_host: u32,
    as_visitor: u32,
}

/// Ranks `teams` by the points they earned in `matches`
///
/// Only teams in `teams` are credited; a match slot naming any other team, or
/// no team at all, is skipped. Entries are sorted by score, then by points
/// earned as visitor, both descending. The sort is stable, so teams equal on
/// both keys keep their input order.
pub fn rank_teams(teams: Vec<Team>, matches: &[Match], points: PointsSystem) -> Vec<ScoreEntry> {
    let mut tallies: HashMap<i64, Tally> = teams
        .iter()
        .map(|team| (team.id, Tally::default()))
        .collect();

    for fixture in matches {
        let (host_points, visitor_points) =
            points.points_for(fixture.host_score, fixture.visitor_score);

        if let Some(tally) = fixture.host_id.and_then(|id| tallies.get_mut(&id)) {
            tally.as_host = tally.as_host.saturating_add(host_points);
        }
        if let Some(tally) = fixture.visitor_id.and_then(|id| tallies.get_mut(&id)) {
            tally.as_visitor = tally.as_visitor.saturating_add(visitor_points);
        }
    }

    let mut entries: Vec<ScoreEntry> = teams
        .into_iter()
        .map(|team| {
            let tally = tallies.get(&team.id).copied().unwrap_or_default();
            ScoreEntry {
                team,
                points_as_host: tally.as_host,
                points_as_visitor: tally.as_visitor,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        (b.score(), b.points_as_visitor).cmp(&(a.score(), a.points_as_visitor))
    });
    entries
}
