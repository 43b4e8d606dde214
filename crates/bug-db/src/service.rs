//! Service layer wrapping the database handle and the stored-record schema.
//!
//! `BugService` owns `BugDb` (raw database access) and `BugSchema`
//! (stored-record validation). Repository methods are implemented as
//! `impl BugService` blocks under [`crate::repos`].

use std::time::Duration;

use bug_config::DatabaseConfig;
use bug_schema::BugSchema;

use crate::BugDb;
use crate::error::DatabaseError;

/// Orchestrates bug persistence.
///
/// Every write follows this protocol:
/// 1. Build the full record as it will be stored
/// 2. Validate it against the `Bug` JSON Schema
/// 3. Execute SQL
pub struct BugService {
    db: BugDb,
    schema: BugSchema,
}

impl BugService {
    /// Create a new service wrapping a local database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = BugDb::open_local(db_path).await?;
        Ok(Self::from_db(db))
    }

    /// Create a new service backed by a remote libSQL database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be reached.
    pub async fn new_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = BugDb::open_remote(url, auth_token).await?;
        Ok(Self::from_db(db))
    }

    /// Open whichever database the configuration points at.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if config.is_remote() {
            Self::new_remote(&config.url, &config.auth_token).await
        } else {
            Self::new_local(&config.url).await
        }
    }

    /// Create from an existing `BugDb`.
    #[must_use]
    pub fn from_db(db: BugDb) -> Self {
        Self {
            db,
            schema: BugSchema::new(),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &BugDb {
        &self.db
    }

    /// The schema every write is checked against.
    #[must_use]
    pub const fn schema(&self) -> &BugSchema {
        &self.schema
    }

    /// Round-trip time of a trivial query.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn ping(&self) -> Result<Duration, DatabaseError> {
        self.db.ping().await
    }
}
