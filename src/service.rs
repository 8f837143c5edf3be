//! Score entry creation policy
//!
//! One score per (user, subject). The store's UNIQUE constraint arbitrates,
//! so concurrent submissions cannot slip past each other; this layer turns
//! the constraint violation into an absent value for callers.

use crate::db::{Database, DbError, DbResult, ScoreEntry};

/// Create a score entry unless one already exists for this user and subject.
///
/// Returns `Ok(None)` when the pair is already taken; the stored entry is
/// left untouched. Any other store failure propagates.
pub fn create_new_score_entry(
    db: &Database,
    name: &str,
    point: i64,
    user_id: i64,
) -> DbResult<Option<ScoreEntry>> {
    match db.create_score_entry(name, point, user_id) {
        Ok(entry) => Ok(Some(entry)),
        Err(DbError::DuplicateScoreEntry { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}
