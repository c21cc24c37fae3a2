// Domain layer module exports
// Domain is independent of infrastructure concerns

pub mod errors;
pub mod league;
pub mod matches;
pub mod pagination;
pub mod repositories;
pub mod scoreboard;
pub mod team;
pub mod user;
