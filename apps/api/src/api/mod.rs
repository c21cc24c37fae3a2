// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod pagination;
pub mod permissions;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};

use handlers::{auth as auth_handlers, leagues, matches, teams};
pub use state::{AppState, Repositories};

/// Builds the application router
///
/// Request tracing and CORS layers are added by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(auth_handlers::health_check))
        // Auth routes
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login))
        // League routes
        .route(
            "/leagues",
            get(leagues::list_leagues).post(leagues::create_league),
        )
        .route(
            "/leagues/:id",
            get(leagues::get_league)
                .put(leagues::update_league)
                .patch(leagues::update_league)
                .delete(leagues::delete_league),
        )
        .route("/leagues/:id/scoreboard", get(leagues::league_scoreboard))
        // Team routes
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route(
            "/teams/:id",
            get(teams::get_team)
                .put(teams::update_team)
                .patch(teams::update_team)
                .delete(teams::delete_team),
        )
        // Match routes
        .route(
            "/matches",
            get(matches::list_matches).post(matches::create_match),
        )
        .route(
            "/matches/:id",
            get(matches::get_match)
                .put(matches::update_match)
                .patch(matches::update_match)
                .delete(matches::delete_match),
        )
        .route("/matches/:id/weather", get(matches::match_weather))
        .with_state(state)
}
