//! Database pool wiring.
//!
//! The library owns no schema of its own; it only configures a small bounded
//! connection pool around whatever URL the settings file provides and hands
//! the connection to commands through [`crate::BotData`]. Schema creation and
//! migration stay with the consuming bot (`SeaORM`'s `Schema` or a migration
//! crate).

use crate::errors::Result;
use poise::BoxFuture;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::{error, info};

/// A one-shot database setup hook, run right after the pool connects and
/// before any command can execute. Schema creation and migrations go here;
/// the connection handle is a pool, so cloning it into the future is cheap.
pub type DatabaseHook =
    Box<dyn FnOnce(DatabaseConnection) -> BoxFuture<'static, Result<()>> + Send>;

/// Maximum connections in the pool. Bots issue few concurrent queries; a
/// small pool keeps leaked connections visible quickly.
const MAX_CONNECTIONS: u32 = 3;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(8);
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connects to the database with the library's pool configuration.
///
/// # Errors
/// Returns [`crate::Error::Database`] when the connection cannot be
/// established.
pub async fn connect(url: &str) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(url.to_string());
    options
        .max_connections(MAX_CONNECTIONS)
        .connect_timeout(CONNECT_TIMEOUT)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .sqlx_logging(false);
    Database::connect(options).await.map_err(Into::into)
}

/// Connects to the database, degrading to `None` on failure.
///
/// Startup continues without a pool when the database is unreachable; the
/// failure is logged and commands see `None` in [`crate::BotData::database`].
pub async fn try_connect(url: &str) -> Option<DatabaseConnection> {
    match connect(url).await {
        Ok(connection) => {
            info!("Database pool established");
            Some(connection)
        }
        Err(e) => {
            error!("Failed to connect to database, continuing without one: {e}");
            None
        }
    }
}

/// Connects to the database and runs the setup hook, degrading to `None`
/// when either step fails.
///
/// A hook failure is treated like a connection failure: the error is logged
/// and the bot starts without a pool rather than with a half-initialized
/// schema.
pub(crate) async fn try_connect_and_setup(
    url: &str,
    hook: Option<DatabaseHook>,
) -> Option<DatabaseConnection> {
    let connection = try_connect(url).await?;
    if let Some(hook) = hook {
        if let Err(e) = hook(connection.clone()).await {
            error!("Database setup failed, continuing without a database: {e}");
            return None;
        }
        info!("Database setup complete");
    }
    Some(connection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectionTrait, Statement};

    #[tokio::test]
    async fn connects_to_in_memory_sqlite() -> Result<()> {
        let db = connect("sqlite::memory:").await?;
        let backend = db.get_database_backend();
        db.execute(Statement::from_string(backend, "SELECT 1")).await?;
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_database_degrades_to_none() {
        assert!(try_connect("postgres://127.0.0.1:1/nope?connect_timeout=1")
            .await
            .is_none());
    }

    #[tokio::test]
    async fn setup_hook_runs_before_the_pool_is_handed_out() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        let hook: DatabaseHook = Box::new(move |db| {
            Box::pin(async move {
                let backend = db.get_database_backend();
                db.execute(Statement::from_string(backend, "CREATE TABLE marker (id INTEGER)"))
                    .await?;
                flag.store(true, Ordering::SeqCst);
                Ok(())
            })
        });
        let db = try_connect_and_setup("sqlite::memory:", Some(hook)).await;
        assert!(db.is_some());
        assert!(ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn failing_setup_hook_degrades_to_none() {
        use crate::errors::Error;

        let hook: DatabaseHook =
            Box::new(|_db| Box::pin(async { Err(Error::Config("schema mismatch".to_string())) }));
        assert!(try_connect_and_setup("sqlite::memory:", Some(hook))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn no_hook_connects_plainly() {
        assert!(try_connect_and_setup("sqlite::memory:", None).await.is_some());
    }
}
