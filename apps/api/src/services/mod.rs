// Application services composed from repository ports

pub mod scoreboard;

pub use scoreboard::ScoreboardService;
