use crate::error::Result;
use crate::hooks::PostMigrate;
use millwright_migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;

pub async fn setup_database(database_url: &str, hooks: &PostMigrate) -> Result<DatabaseConnection> {
    tracing::info!("🔗 Connecting to database: {}", database_url);

    // Connect to database
    let db = Database::connect(connect_options(database_url)).await?;

    // Run migrations
    tracing::info!("🔄 Running database migrations...");
    Migrator::up(&db, None).await?;
    tracing::info!("✅ Migrations completed successfully");

    hooks.dispatch(&db).await?;

    Ok(db)
}

fn connect_options(database_url: &str) -> ConnectOptions {
    let mut opt = ConnectOptions::new(database_url.to_string());

    // Every pooled connection to an in-memory SQLite database sees its own
    // empty database, so keep exactly one connection alive
    if database_url.starts_with("sqlite::memory:") {
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        return opt;
    }

    opt.max_connections(100)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8))
        .sqlx_logging(true);
    opt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BUNDLED_DEFAULTS;
    use crate::seed::{get_default_settings, SeedDefaultSettings};

    #[tokio::test]
    async fn test_setup_seeds_after_migrations() {
        let mut hooks = PostMigrate::new();
        hooks.connect(SeedDefaultSettings::new(BUNDLED_DEFAULTS));

        let db = setup_database("sqlite::memory:", &hooks).await.unwrap();

        assert!(get_default_settings(&db).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_setup_without_hooks_leaves_table_empty() {
        let db = setup_database("sqlite::memory:", &PostMigrate::new())
            .await
            .unwrap();

        assert!(get_default_settings(&db).await.unwrap().is_none());
    }

    #[test]
    fn test_memory_database_uses_single_connection() {
        let opt = connect_options("sqlite::memory:");
        assert_eq!(opt.get_max_connections(), Some(1));

        let opt = connect_options("postgres://localhost/millwright");
        assert_eq!(opt.get_max_connections(), Some(100));
    }
}
