//! Async database connection pool implementation.
//!
//! Uses bb8 connection pool manager with diesel_async for PostgreSQL
//! connections. Migrations run over a blocking wrapper since the diesel
//! migration harness is synchronous.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::Pool;
use diesel_migrations::{EmbeddedMigrations, embed_migrations};

use crate::config::DatabaseConfig;
use crate::error::AppError;

/// Async connection pool type alias.
///
/// bb8::Pool internally uses Arc, so Clone is cheap (just reference count
/// increment). Structures holding AsyncDbPool can derive Clone without
/// additional Arc wrapping.
pub type AsyncDbPool = Pool<AsyncPgConnection>;

/// Embedded schema migrations for the appointment store tables.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Creates an async database connection pool from database settings.
///
/// # Arguments
/// * `config` - Database configuration (URL, pool sizing, timeouts)
///
/// # Returns
/// Returns `Ok(AsyncDbPool)` on success, or `AppError` on failure.
///
/// # Errors
/// - `AppError::ConnectionPool` - If connection pool creation fails
pub async fn establish_async_connection_pool(
    config: &DatabaseConfig,
) -> Result<AsyncDbPool, AppError> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.url);

    Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .await
        .map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })
}

/// Applies all pending embedded migrations.
///
/// The diesel migration harness is synchronous, so this establishes a
/// dedicated blocking connection instead of borrowing from the async pool.
pub async fn run_migrations(database_url: &str) -> anyhow::Result<()> {
    use diesel::Connection;
    use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
    use diesel_migrations::MigrationHarness;

    let url = database_url.to_string();
    tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
        let mut conn: AsyncConnectionWrapper<AsyncPgConnection> =
            AsyncConnectionWrapper::establish(&url)?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow::anyhow!("failed to run migrations: {}", e))?;

        for version in applied {
            tracing::info!(migration = %version, "Migration applied");
        }
        Ok(())
    })
    .await?
}
