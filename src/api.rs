//! HTTP surface over the score store

mod handlers;
mod types;

pub use handlers::create_router;
pub use types::*;

use crate::db::Database;

/// Shared state for API handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}
