use uuid::Uuid;

use super::errors::{required_text, DomainResult};

/// Maximum length of a league name
pub const LEAGUE_NAME_MAX_LEN: usize = 50;

/// A named competition owned by a user
///
/// Owns its teams and matches: deleting a league deletes both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct League {
    pub id: i64,
    pub name: String,
    pub owner_id: Uuid,
}

impl League {
    /// Returns true when `user_id` may modify this league and its resources
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Applies a validated change set in place
    pub fn apply(&mut self, changes: &LeagueChanges) {
        if let Some(name) = changes.name() {
            self.name = name.to_string();
        }
    }
}

/// Validated input for creating a league
///
/// # Example
/// ```
/// use league_planner_api::domain::league::NewLeague;
/// use uuid::Uuid;
///
/// let league = NewLeague::new(" NBA ", Uuid::new_v4()).expect("valid league");
/// assert_eq!(league.name(), "NBA");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLeague {
    name: String,
    owner_id: Uuid,
}

impl NewLeague {
    pub fn new(name: &str, owner_id: Uuid) -> DomainResult<Self> {
        Ok(Self {
            name: required_text("name", name, LEAGUE_NAME_MAX_LEN)?,
            owner_id,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}

/// Validated partial update of a league
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeagueChanges {
    name: Option<String>,
}

impl LeagueChanges {
    pub fn new(name: Option<&str>) -> DomainResult<Self> {
        let name = name
            .map(|name| required_text("name", name, LEAGUE_NAME_MAX_LEN))
            .transpose()?;
        Ok(Self { name })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
