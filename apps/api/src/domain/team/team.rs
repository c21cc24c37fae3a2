use crate::domain::errors::{bounded_text, required_text, DomainResult};

/// Maximum length of a team name
pub const TEAM_NAME_MAX_LEN: usize = 50;
/// Maximum length of a team's city
pub const TEAM_CITY_MAX_LEN: usize = 50;
/// City stored when none is given at creation
pub const DEFAULT_CITY: &str = "Not Set";

/// A participant in a league
///
/// Matches reference teams weakly: deleting a team clears the host or
/// visitor slot on its matches instead of deleting them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: i64,
    pub league_id: i64,
    pub name: String,
    pub city: String,
}

impl Team {
    /// Applies a validated change set in place
    pub fn apply(&mut self, changes: &TeamChanges) {
        if let Some(name) = changes.name() {
            self.name = name.to_string();
        }
        if let Some(city) = changes.city() {
            self.city = city.to_string();
        }
    }
}

/// Validated input for creating a team
///
/// # Example
/// ```
/// use league_planner_api::domain::team::{NewTeam, DEFAULT_CITY};
///
/// let team = NewTeam::new(1, "Polska", None).expect("valid team");
/// assert_eq!(team.city(), DEFAULT_CITY);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    league_id: i64,
    name: String,
    city: String,
}

impl NewTeam {
    pub fn new(league_id: i64, name: &str, city: Option<&str>) -> DomainResult<Self> {
        let name = required_text("name", name, TEAM_NAME_MAX_LEN)?;
        let city = match city {
            Some(city) => bounded_text("city", city, TEAM_CITY_MAX_LEN)?,
            None => DEFAULT_CITY.to_string(),
        };

        Ok(Self {
            league_id,
            name,
            city,
        })
    }

    pub fn league_id(&self) -> i64 {
        self.league_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Validated partial update of a team
///
/// The owning league is fixed at creation and cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamChanges {
    name: Option<String>,
    city: Option<String>,
}

impl TeamChanges {
    pub fn new(name: Option<&str>, city: Option<&str>) -> DomainResult<Self> {
        Ok(Self {
            name: name
                .map(|name| required_text("name", name, TEAM_NAME_MAX_LEN))
                .transpose()?,
            city: city
                .map(|city| bounded_text("city", city, TEAM_CITY_MAX_LEN))
                .transpose()?,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }
}
