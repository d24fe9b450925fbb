use axum::{
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

// Re-export shared types from millwright-types
pub use millwright_types::*;

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod hooks;
pub mod seed;

use config::Config;
use database::setup_database;
use error::{AppError, Result};
use hooks::PostMigrate;
use seed::SeedDefaultSettings;

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
}

/// Hooks run after migrations on every boot.
pub fn post_migrate_hooks(config: &Config) -> PostMigrate {
    let mut hooks = PostMigrate::new();
    if config.seed_on_startup {
        hooks.connect(SeedDefaultSettings::new(config.default_settings_path.clone()));
    }
    hooks
}

pub async fn run_server() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;

    // Setup database, seeding defaults once migrations are in place
    let hooks = post_migrate_hooks(&config);
    let db = setup_database(&config.database_url, &hooks).await?;

    let server_address = config.server_address.clone();

    let state = AppState { db, config };

    // Build the application router
    let app = create_app(state);

    // Create TCP listener
    let listener = tokio::net::TcpListener::bind(&server_address)
        .await
        .map_err(|e| {
            AppError::ServerError(format!("Failed to bind to {}: {}", server_address, e))
        })?;

    tracing::info!("🚀 Millwright backend server starting on {}", server_address);

    // Start the server
    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::ServerError(format!("Server error: {}", e)))?;

    Ok(())
}

fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/api/default-settings", get(handlers::get_settings))
        .route("/api/admin/seed", post(handlers::seed_settings))
        // Health check
        .route("/health", get(handlers::health_check))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
