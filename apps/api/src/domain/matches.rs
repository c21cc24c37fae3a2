use chrono::{DateTime, Utc};

use super::errors::{bounded_text, DomainError, DomainResult};

/// Maximum length of a match venue address
pub const MATCH_ADDRESS_MAX_LEN: usize = 100;

/// A fixture between two teams of a league, optionally scored
///
/// Either team slot may be empty (never filled in, or the team was
/// deleted). A match with either score unset is unplayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub id: i64,
    pub league_id: i64,
    pub host_id: Option<i64>,
    pub visitor_id: Option<i64>,
    pub host_score: Option<i32>,
    pub visitor_score: Option<i32>,
    pub address: Option<String>,
    pub datetime: Option<DateTime<Utc>>,
}

impl Match {
    /// Returns true once both scores are recorded
    pub fn is_played(&self) -> bool {
        self.host_score.is_some() && self.visitor_score.is_some()
    }

    /// Applies a validated change set in place
    ///
    /// Fails when the result would name the same team in both slots.
    pub fn apply(&mut self, changes: &MatchChanges) -> DomainResult<()> {
        let mut updated = self.clone();
        if let Some(host_id) = changes.host_id {
            updated.host_id = host_id;
        }
        if let Some(visitor_id) = changes.visitor_id {
            updated.visitor_id = visitor_id;
        }
        if let Some(host_score) = changes.host_score {
            updated.host_score = host_score;
        }
        if let Some(visitor_score) = changes.visitor_score {
            updated.visitor_score = visitor_score;
        }
        if let Some(address) = &changes.address {
            updated.address = address.clone();
        }
        if let Some(datetime) = changes.datetime {
            updated.datetime = datetime;
        }

        distinct_slots(updated.host_id, updated.visitor_id)?;
        *self = updated;
        Ok(())
    }
}

/// Validated input for creating a match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatch {
    pub league_id: i64,
    pub host_id: Option<i64>,
    pub visitor_id: Option<i64>,
    pub host_score: Option<i32>,
    pub visitor_score: Option<i32>,
    pub address: Option<String>,
    pub datetime: Option<DateTime<Utc>>,
}

impl NewMatch {
    /// Validates scores, address and team slots
    ///
    /// Whether the named teams belong to `league_id` needs a lookup and is
    /// checked by the caller.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        league_id: i64,
        host_id: Option<i64>,
        visitor_id: Option<i64>,
        host_score: Option<i32>,
        visitor_score: Option<i32>,
        address: Option<&str>,
        datetime: Option<DateTime<Utc>>,
    ) -> DomainResult<Self> {
        distinct_slots(host_id, visitor_id)?;

        Ok(Self {
            league_id,
            host_id,
            visitor_id,
            host_score: score("host_score", host_score)?,
            visitor_score: score("visitor_score", visitor_score)?,
            address: address
                .map(|address| bounded_text("address", address, MATCH_ADDRESS_MAX_LEN))
                .transpose()?,
            datetime,
        })
    }
}

/// Validated partial update of a match
///
/// The outer `Option` says whether a field was sent at all; the inner one
/// carries an explicit null, which clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchChanges {
    pub host_id: Option<Option<i64>>,
    pub visitor_id: Option<Option<i64>>,
    pub host_score: Option<Option<i32>>,
    pub visitor_score: Option<Option<i32>>,
    pub address: Option<Option<String>>,
    pub datetime: Option<Option<DateTime<Utc>>>,
}

impl MatchChanges {
    pub fn new(
        host_id: Option<Option<i64>>,
        visitor_id: Option<Option<i64>>,
        host_score: Option<Option<i32>>,
        visitor_score: Option<Option<i32>>,
        address: Option<Option<&str>>,
        datetime: Option<Option<DateTime<Utc>>>,
    ) -> DomainResult<Self> {
        let host_score = host_score
            .map(|value| score("host_score", value))
            .transpose()?;
        let visitor_score = visitor_score
            .map(|value| score("visitor_score", value))
            .transpose()?;
        let address = address
            .map(|value| {
                value
                    .map(|address| bounded_text("address", address, MATCH_ADDRESS_MAX_LEN))
                    .transpose()
            })
            .transpose()?;

        Ok(Self {
            host_id,
            visitor_id,
            host_score,
            visitor_score,
            address,
            datetime,
        })
    }

    /// Team ids this change set assigns to a slot
    pub fn assigned_teams(&self) -> impl Iterator<Item = (&'static str, i64)> + '_ {
        [("host", self.host_id), ("visitor", self.visitor_id)]
            .into_iter()
            .filter_map(|(role, slot)| slot.flatten().map(|id| (role, id)))
    }
}

fn score(field: &'static str, value: Option<i32>) -> DomainResult<Option<i32>> {
    match value {
        Some(value) if value < 0 => Err(DomainError::Negative { field }),
        other => Ok(other),
    }
}

fn distinct_slots(host_id: Option<i64>, visitor_id: Option<i64>) -> DomainResult<()> {
    match (host_id, visitor_id) {
        (Some(host), Some(visitor)) if host == visitor => Err(DomainError::Invalid(
            "host and visitor must be different teams".to_string(),
        )),
        _ => Ok(()),
    }
}
