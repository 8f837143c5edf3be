//! Score store
//!
//! Persistence for users and their per-subject score entries.

mod schema;

pub use schema::*;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Score entry already exists for user {user_id}: {name}")]
    DuplicateScoreEntry { user_id: i64, name: String },
}

pub type DbResult<T> = Result<T, DbError>;

const USER_COLUMNS: &str = "id, first_name, last_name, full_name, telegram_id, created_at, updated_at";
const SCORE_COLUMNS: &str = "id, name, point, user_id, created_at, updated_at";

/// Thread-safe database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> DbResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    // ==================== User Operations ====================

    /// Create a new user
    pub fn create_user(
        &self,
        first_name: &str,
        last_name: &str,
        full_name: &str,
        telegram_id: &str,
    ) -> DbResult<User> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO users (first_name, last_name, full_name, telegram_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![first_name, last_name, full_name, telegram_id, now.to_rfc3339()],
        )?;

        Ok(User {
            id: conn.last_insert_rowid(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            full_name: full_name.to_string(),
            telegram_id: telegram_id.to_string(),
            created_at: now,
            updated_at: None,
        })
    }

    /// Get user by ID; absence is a value, not an error
    pub fn get_user(&self, id: i64) -> DbResult<Option<User>> {
        let conn = self.conn.lock().unwrap();
        fetch_user(&conn, id)
    }

    /// Get user by external chat identity (first match wins)
    pub fn get_user_by_telegram_id(&self, telegram_id: &str) -> DbResult<Option<User>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE telegram_id = ?1 ORDER BY id LIMIT 1"),
            params![telegram_id],
            row_to_user,
        )
        .optional()
        .map_err(DbError::from)
    }

    /// List users in insertion order
    pub fn list_users(&self, skip: i64, limit: i64) -> DbResult<Vec<User>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id LIMIT ?1 OFFSET ?2"))?;
        let rows = stmt.query_map(params![limit, skip], row_to_user)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    /// Replace a user's fields; returns the updated row, or None if missing
    pub fn update_user(
        &self,
        id: i64,
        first_name: &str,
        last_name: &str,
        full_name: &str,
        telegram_id: &str,
    ) -> DbResult<Option<User>> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "UPDATE users SET first_name = ?1, last_name = ?2, full_name = ?3,
                              telegram_id = ?4, updated_at = ?5
             WHERE id = ?6",
            params![first_name, last_name, full_name, telegram_id, Utc::now().to_rfc3339(), id],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        fetch_user(&conn, id)
    }

    /// Delete a user; returns the deleted row, or None if missing
    pub fn delete_user(&self, id: i64) -> DbResult<Option<User>> {
        let conn = self.conn.lock().unwrap();
        let existing = fetch_user(&conn, id)?;
        if existing.is_some() {
            conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
        }
        Ok(existing)
    }

    // ==================== Score Entry Operations ====================

    /// Insert a score entry.
    ///
    /// The `UNIQUE(user_id, name)` constraint arbitrates duplicates: a second
    /// entry for the same user and subject comes back as
    /// [`DbError::DuplicateScoreEntry`], with the stored row untouched.
    pub fn create_score_entry(&self, name: &str, point: i64, user_id: i64) -> DbResult<ScoreEntry> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now();

        match conn.execute(
            "INSERT INTO score_entries (name, point, user_id, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![name, point, user_id, now.to_rfc3339()],
        ) {
            Ok(_) => Ok(ScoreEntry {
                id: conn.last_insert_rowid(),
                name: name.to_string(),
                point,
                user_id,
                created_at: now,
                updated_at: None,
            }),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(DbError::DuplicateScoreEntry {
                    user_id,
                    name: name.to_string(),
                })
            }
            Err(e) => Err(DbError::Sqlite(e)),
        }
    }

    /// Get score entry by ID
    pub fn get_score_entry(&self, id: i64) -> DbResult<Option<ScoreEntry>> {
        let conn = self.conn.lock().unwrap();
        fetch_score_entry(&conn, id)
    }

    /// List score entries in insertion order
    pub fn list_score_entries(&self, skip: i64, limit: i64) -> DbResult<Vec<ScoreEntry>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {SCORE_COLUMNS} FROM score_entries ORDER BY id LIMIT ?1 OFFSET ?2"
        ))?;
        let rows = stmt.query_map(params![limit, skip], row_to_score_entry)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    /// All entries for one user, in insertion order; empty when none
    pub fn get_score_entries_by_user(&self, user_id: i64) -> DbResult<Vec<ScoreEntry>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {SCORE_COLUMNS} FROM score_entries WHERE user_id = ?1 ORDER BY id"
        ))?;
        let rows = stmt.query_map(params![user_id], row_to_score_entry)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    /// Entry for one user and subject, exact case-sensitive match
    pub fn get_score_entry_by_user_and_name(
        &self,
        user_id: i64,
        name: &str,
    ) -> DbResult<Option<ScoreEntry>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            &format!("SELECT {SCORE_COLUMNS} FROM score_entries WHERE user_id = ?1 AND name = ?2"),
            params![user_id, name],
            row_to_score_entry,
        )
        .optional()
        .map_err(DbError::from)
    }

    /// Replace an entry's subject and point; returns None if missing
    pub fn update_score_entry(
        &self,
        id: i64,
        name: &str,
        point: i64,
    ) -> DbResult<Option<ScoreEntry>> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "UPDATE score_entries SET name = ?1, point = ?2, updated_at = ?3 WHERE id = ?4",
            params![name, point, Utc::now().to_rfc3339(), id],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        fetch_score_entry(&conn, id)
    }

    /// Delete an entry; returns the deleted row, or None if missing
    pub fn delete_score_entry(&self, id: i64) -> DbResult<Option<ScoreEntry>> {
        let conn = self.conn.lock().unwrap();
        let existing = fetch_score_entry(&conn, id)?;
        if existing.is_some() {
            conn.execute("DELETE FROM score_entries WHERE id = ?1", params![id])?;
        }
        Ok(existing)
    }
}

fn fetch_user(conn: &Connection, id: i64) -> DbResult<Option<User>> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
        params![id],
        row_to_user,
    )
    .optional()
    .map_err(DbError::from)
}

fn fetch_score_entry(conn: &Connection, id: i64) -> DbResult<Option<ScoreEntry>> {
    conn.query_row(
        &format!("SELECT {SCORE_COLUMNS} FROM score_entries WHERE id = ?1"),
        params![id],
        row_to_score_entry,
    )
    .optional()
    .map_err(DbError::from)
}

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        full_name: row.get(3)?,
        telegram_id: row.get(4)?,
        created_at: parse_datetime(&row.get::<_, String>(5)?),
        updated_at: row.get::<_, Option<String>>(6)?.as_deref().map(parse_datetime),
    })
}

fn row_to_score_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<ScoreEntry> {
    Ok(ScoreEntry {
        id: row.get(0)?,
        name: row.get(1)?,
        point: row.get(2)?,
        user_id: row.get(3)?,
        created_at: parse_datetime(&row.get::<_, String>(4)?),
        updated_at: row.get::<_, Option<String>>(5)?.as_deref().map(parse_datetime),
    })
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}
