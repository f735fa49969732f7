//! Opening the traffic-light database.
//!
//! One pool per process. Every light store handed out shares it, and the
//! schema is brought up to date before the first store exists.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::StorageError;
use crate::light_store::SqliteLightStore;

/// Pool size used by [`Config::new`].
pub const DEFAULT_MAX_CONNECTIONS: u32 = 4;

/// Where the light table lives and how many connections may reach it.
#[derive(Debug, Clone)]
pub struct Config {
    /// `SQLite` URL, e.g. `sqlite:signalhub.db?mode=rwc` or `sqlite::memory:`.
    pub database_url: String,
    /// Upper bound on open connections; `0` is treated as `1`.
    pub max_connections: u32,
}

impl Config {
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Open the database, creating the file when missing, and apply the
    /// embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] when the URL is malformed or the
    /// file cannot be opened, and [`StorageError::Migration`] when the schema
    /// cannot be applied.
    pub async fn build(self) -> Result<Database, StorageError> {
        let options = SqliteConnectOptions::from_str(&self.database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(self.max_connections.max(1))
            .connect_with(options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::info!(
            database_url = %self.database_url,
            max_connections = self.max_connections.max(1),
            "traffic light database ready"
        );
        Ok(Database { pool })
    }
}

/// Open traffic-light database.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Light store sharing this database's pool.
    #[must_use]
    pub fn light_store(&self) -> SqliteLightStore {
        SqliteLightStore::new(self.pool.clone())
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
