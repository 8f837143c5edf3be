//! Database schema and row types

use chrono::{DateTime, Utc};

/// SQL schema for initialization
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    full_name TEXT NOT NULL,
    telegram_id TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_users_telegram_id ON users(telegram_id);

CREATE TABLE IF NOT EXISTS score_entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    point INTEGER NOT NULL,
    user_id INTEGER NOT NULL REFERENCES users(id),
    created_at TEXT NOT NULL,
    updated_at TEXT,

    UNIQUE(user_id, name)
);

CREATE INDEX IF NOT EXISTS idx_score_entries_user ON score_entries(user_id);
";

/// A registered user.
///
/// `telegram_id` holds the external chat identity as an opaque string. It
/// is unique by convention only: the bot looks up before creating, and the
/// schema carries no UNIQUE constraint on it.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub telegram_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One recorded exam score.
///
/// `point` is any integer at this layer; the 0-100 rule belongs to the
/// conversation flow. At most one entry per `(user_id, name)`, enforced by
/// the UNIQUE constraint above.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub id: i64,
    pub name: String,
    pub point: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
