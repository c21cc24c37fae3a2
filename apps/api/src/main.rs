use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use league_planner_api::api::{self, AppState, Repositories};
use league_planner_api::config::{AppConfig, StorageBackend};
use league_planner_api::infrastructure::repositories::InMemoryStore;
use league_planner_api::infrastructure::weather::WeatherApiClient;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let repositories = match config.storage {
        StorageBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(&config.database_url)
                .await
                .expect("Failed to connect to database");

            sqlx::migrate!()
                .run(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database connected successfully");

            Repositories::postgres(pool)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on shutdown");
            Repositories::in_memory(InMemoryStore::new())
        }
    };

    let weather = WeatherApiClient::new(&config.weather_api_base_url, &config.weather_api_key)
        .expect("Failed to build weather client");
    let state = AppState::new(repositories, Arc::new(weather), &config);

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!(
        addr = %config.bind_addr,
        points = ?config.points,
        "Server listening"
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
