// Team domain module
// Contains the team entity plus its creation and update inputs

#![allow(clippy::module_inception)]

pub mod team;

// Re-export main types for convenience
pub use team::{NewTeam, Team, TeamChanges, DEFAULT_CITY, TEAM_CITY_MAX_LEN, TEAM_NAME_MAX_LEN};
