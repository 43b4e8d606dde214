//! # bug-db
//!
//! libSQL persistence for bug records.
//!
//! `BugDb` owns the database handle and its single connection. It is opened
//! explicitly (local file, `":memory:"`, or a remote libSQL server) and then
//! handed to [`service::BugService`], which hosts the repository methods.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

mod test_support;

use std::time::{Duration, Instant};

use error::DatabaseError;
use libsql::Builder;
use tracing::{debug, info};

/// Database handle for bug records.
pub struct BugDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl BugDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let bug_db = Self { db, conn };
        bug_db.run_migrations().await?;
        info!(path, "opened local bug database");
        Ok(bug_db)
    }

    /// Open a remote libSQL database (Turso or `sqld`).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be established or
    /// migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        let conn = db.connect()?;

        let bug_db = Self { db, conn };
        bug_db.run_migrations().await?;
        info!(url, "opened remote bug database");
        Ok(bug_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a 24-character lowercase hex identifier.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!(
                    "SELECT lower(hex(randomblob({})))",
                    bug_core::ids::ID_BYTES
                ),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }

    /// Run a trivial query and report how long the round trip took.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn ping(&self) -> Result<Duration, DatabaseError> {
        let started = Instant::now();
        let mut rows = self.conn.query("SELECT 1", ()).await?;
        rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let elapsed = started.elapsed();
        debug!(?elapsed, "database ping");
        Ok(elapsed)
    }
}
