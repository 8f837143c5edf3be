//! API request and response types
//!
//! Shared by the server handlers and the bot-side client, so everything
//! here derives both directions of serde.

use crate::db;
use serde::{Deserialize, Serialize};

/// Request to create a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub telegram_id: String,
}

/// User as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRead {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub telegram_id: String,
}

impl From<db::User> for UserRead {
    fn from(user: db::User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            full_name: user.full_name,
            telegram_id: user.telegram_id,
        }
    }
}

/// Request to create a score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntryCreate {
    pub name: String,
    pub point: i64,
    pub user_id: i64,
}

/// Score entry as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntryRead {
    pub id: i64,
    pub name: String,
    pub point: i64,
    pub user_id: i64,
}

impl From<db::ScoreEntry> for ScoreEntryRead {
    fn from(entry: db::ScoreEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            point: entry.point,
            user_id: entry.user_id,
        }
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
