pub mod memory;
pub mod models;
pub mod recipes;
pub mod store;

pub use memory::MemoryStore;
pub use recipes::SqliteStore;
pub use store::RecipeStore;

use crate::config::DatabaseConfig;
use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub type DbPool = Pool<Sqlite>;

/// In-memory SQLite databases live and die with their connection
fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

async fn ensure_data_dir(database_url: &str) -> Result<()> {
    if is_in_memory(database_url) {
        return Ok(());
    }

    if let Some(path) = database_url.strip_prefix("sqlite:") {
        let path = path.trim_start_matches("//");
        let path = path.split('?').next().unwrap_or(path);
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
    }

    Ok(())
}

/// Initialize database connection pool
pub async fn init_pool(database_url: &str) -> Result<DbPool> {
    init_pool_with_config(&DatabaseConfig {
        url: database_url.to_string(),
        max_connections: 5,
        min_connections: 1,
        connection_timeout_seconds: 30,
        idle_timeout_seconds: 600,
    })
    .await
}

/// Initialize database connection pool with custom configuration
pub async fn init_pool_with_config(config: &DatabaseConfig) -> Result<DbPool> {
    ensure_data_dir(&config.url).await?;

    let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

    let pool = if is_in_memory(&config.url) {
        // A single connection that is never recycled keeps one shared database
        debug!("Using a single pinned connection for in-memory SQLite");
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect_with(options)
            .await?
    };

    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Open the recipe store selected by configuration
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn RecipeStore>> {
    if config.is_memory_store() {
        info!("Using in-memory recipe store (contents are lost on exit)");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let pool = init_pool_with_config(config).await?;
    info!(
        "Database connection established (max_connections: {}, min_connections: {})",
        config.max_connections, config.min_connections
    );

    run_migrations(&pool).await?;
    debug!("Database migrations completed");

    Ok(Arc::new(SqliteStore::new(pool)))
}
