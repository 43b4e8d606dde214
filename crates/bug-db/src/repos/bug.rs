//! Bug repository: create, list, get, partial update, delete.

use tracing::{debug, warn};

use bug_core::entities::{Bug, DEFAULT_REPORTER};
use bug_core::ids;

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_opt_string, now, opt_text_value, parse_datetime, parse_enum};
use crate::service::BugService;
use crate::updates::bug::{BugUpdate, NewBug};

const SELECT_COLS: &str = "id, title, description, status, priority, reported_by, \
     steps_to_reproduce, expected_behavior, actual_behavior, created_at, updated_at";

fn row_to_bug(row: &libsql::Row) -> Result<Bug, DatabaseError> {
    Ok(Bug {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        priority: parse_enum(&row.get::<String>(4)?)?,
        reported_by: row.get(5)?,
        steps_to_reproduce: get_opt_string(row, 6)?,
        expected_behavior: get_opt_string(row, 7)?,
        actual_behavior: get_opt_string(row, 8)?,
        created_at: parse_datetime(&row.get::<String>(9)?)?,
        updated_at: parse_datetime(&row.get::<String>(10)?)?,
    })
}

/// Trim free text; blank means absent.
fn clean_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Trim the reporter name, falling back to the default when blank.
fn reporter(value: Option<String>) -> String {
    clean_text(value).unwrap_or_else(|| DEFAULT_REPORTER.to_string())
}

fn parse_id(id: &str) -> Result<String, DatabaseError> {
    ids::normalize(id).ok_or_else(|| DatabaseError::InvalidIdentifier(id.to_string()))
}

impl BugService {
    /// Insert a new bug with defaults applied and server-assigned fields.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::SchemaValidation` when the trimmed record is
    /// out of bounds, or a query error if the insert fails.
    pub async fn create_bug(&self, new: NewBug) -> Result<Bug, DatabaseError> {
        let now = now();
        let id = self.db().generate_id().await?;

        let bug = Bug {
            id,
            title: new.title.trim().to_string(),
            description: new.description.trim().to_string(),
            status: new.status.unwrap_or_default(),
            priority: new.priority.unwrap_or_default(),
            reported_by: reporter(new.reported_by),
            steps_to_reproduce: clean_text(new.steps_to_reproduce),
            expected_behavior: clean_text(new.expected_behavior),
            actual_behavior: clean_text(new.actual_behavior),
            created_at: now,
            updated_at: now,
        };
        self.schema().validate_bug(&bug)?;

        let params: Vec<libsql::Value> = vec![
            bug.id.as_str().into(),
            bug.title.as_str().into(),
            bug.description.as_str().into(),
            bug.status.as_str().into(),
            bug.priority.as_str().into(),
            bug.reported_by.as_str().into(),
            opt_text_value(bug.steps_to_reproduce.as_deref()),
            opt_text_value(bug.expected_behavior.as_deref()),
            opt_text_value(bug.actual_behavior.as_deref()),
            format_timestamp(&bug.created_at).into(),
            format_timestamp(&bug.updated_at).into(),
        ];
        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO bugs ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
                ),
                libsql::params_from_iter(params),
            )
            .await?;

        debug!(id = %bug.id, "created bug");
        Ok(bug)
    }

    /// All bugs, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be parsed.
    pub async fn list_bugs(&self) -> Result<Vec<Bug>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM bugs ORDER BY created_at DESC, rowid DESC"),
                (),
            )
            .await?;

        let mut bugs = Vec::new();
        while let Some(row) = rows.next().await? {
            bugs.push(row_to_bug(&row)?);
        }
        Ok(bugs)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidIdentifier` for malformed ids and
    /// `DatabaseError::NotFound` when no bug has this id.
    pub async fn get_bug(&self, id: &str) -> Result<Bug, DatabaseError> {
        let id = parse_id(id)?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM bugs WHERE id = ?1"),
                [id.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound { id })?;
        row_to_bug(&row)
    }

    /// Apply a partial update and return the stored record.
    ///
    /// `updatedAt` always moves forward, even for an empty update.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidIdentifier`, `DatabaseError::NotFound`,
    /// or `DatabaseError::SchemaValidation` when the merged record is out of
    /// bounds.
    pub async fn update_bug(&self, id: &str, update: BugUpdate) -> Result<Bug, DatabaseError> {
        let current = self.get_bug(id).await?;
        let mut bug = current.clone();
        let mut sets: Vec<(&'static str, libsql::Value)> = Vec::new();

        if let Some(title) = update.title {
            bug.title = title.trim().to_string();
            sets.push(("title", bug.title.as_str().into()));
        }
        if let Some(description) = update.description {
            bug.description = description.trim().to_string();
            sets.push(("description", bug.description.as_str().into()));
        }
        if let Some(status) = update.status {
            bug.status = status;
            sets.push(("status", status.as_str().into()));
        }
        if let Some(priority) = update.priority {
            bug.priority = priority;
            sets.push(("priority", priority.as_str().into()));
        }
        if let Some(reported_by) = update.reported_by {
            bug.reported_by = reporter(Some(reported_by));
            sets.push(("reported_by", bug.reported_by.as_str().into()));
        }
        if let Some(steps) = update.steps_to_reproduce {
            bug.steps_to_reproduce = clean_text(steps);
            sets.push((
                "steps_to_reproduce",
                opt_text_value(bug.steps_to_reproduce.as_deref()),
            ));
        }
        if let Some(expected) = update.expected_behavior {
            bug.expected_behavior = clean_text(expected);
            sets.push((
                "expected_behavior",
                opt_text_value(bug.expected_behavior.as_deref()),
            ));
        }
        if let Some(actual) = update.actual_behavior {
            bug.actual_behavior = clean_text(actual);
            sets.push((
                "actual_behavior",
                opt_text_value(bug.actual_behavior.as_deref()),
            ));
        }

        let mut updated_at = now();
        if updated_at <= current.updated_at {
            updated_at = current.updated_at + chrono::Duration::microseconds(1);
        }
        bug.updated_at = updated_at;
        self.schema().validate_bug(&bug)?;

        sets.push(("updated_at", format_timestamp(&updated_at).into()));

        let mut clauses = Vec::with_capacity(sets.len());
        let mut params: Vec<libsql::Value> = Vec::with_capacity(sets.len() + 1);
        for (idx, (column, value)) in sets.into_iter().enumerate() {
            clauses.push(format!("{column} = ?{}", idx + 1));
            params.push(value);
        }
        let id_idx = params.len() + 1;
        params.push(bug.id.as_str().into());

        let sql = format!(
            "UPDATE bugs SET {} WHERE id = ?{id_idx}",
            clauses.join(", ")
        );
        let affected = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if affected == 0 {
            warn!(id = %bug.id, "bug disappeared during update");
            return Err(DatabaseError::NotFound { id: bug.id });
        }

        debug!(id = %bug.id, "updated bug");
        Ok(bug)
    }

    /// Hard-delete a bug.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidIdentifier` for malformed ids and
    /// `DatabaseError::NotFound` when nothing was removed.
    pub async fn delete_bug(&self, id: &str) -> Result<(), DatabaseError> {
        let id = parse_id(id)?;
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM bugs WHERE id = ?1", [id.as_str()])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NotFound { id });
        }
        debug!(%id, "deleted bug");
        Ok(())
    }
}
