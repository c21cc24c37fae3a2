//! League Planner API Library
//!
//! This library provides the core functionality for the League Planner API:
//! leagues, teams and matches with per-league scoreboards, plus the
//! repositories, authentication and weather lookups behind them.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod services;
