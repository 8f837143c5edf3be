//! In-memory [`ScoreApi`] fake for dialog tests
//!
//! Mirrors the store's observable behavior, including the one-score-per
//! (user, subject) rule, and records every call so tests can assert which
//! lookups a transition made.

use crate::api::{ScoreEntryCreate, ScoreEntryRead, UserCreate, UserRead};
use crate::client::{ApiError, CreateScoreOutcome, ScoreApi};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;

pub struct MockScoreApi {
    users: Mutex<Vec<UserRead>>,
    entries: Mutex<Vec<ScoreEntryRead>>,
    next_user_id: AtomicI64,
    next_entry_id: AtomicI64,
    calls: Mutex<Vec<String>>,
    fail_next: AtomicBool,
}

impl MockScoreApi {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            entries: Mutex::new(Vec::new()),
            next_user_id: AtomicI64::new(1),
            next_entry_id: AtomicI64::new(1),
            calls: Mutex::new(Vec::new()),
            fail_next: AtomicBool::new(false),
        }
    }

    pub fn seed_user(&self, telegram_id: &str, first_name: &str, last_name: &str) -> i64 {
        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst);
        self.users.lock().unwrap().push(UserRead {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            full_name: format!("{first_name} {last_name}"),
            telegram_id: telegram_id.to_string(),
        });
        id
    }

    pub fn seed_entry(&self, user_id: i64, name: &str, point: i64) {
        let id = self.next_entry_id.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().unwrap().push(ScoreEntryRead {
            id,
            name: name.to_string(),
            point,
            user_id,
        });
    }

    pub fn users(&self) -> Vec<UserRead> {
        self.users.lock().unwrap().clone()
    }

    pub fn entries(&self) -> Vec<ScoreEntryRead> {
        self.entries.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Make the next call fail with a 500, then recover.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn begin(&self, call: String) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 500,
                body: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ScoreApi for MockScoreApi {
    async fn get_user(&self, id: i64) -> Result<Option<UserRead>, ApiError> {
        self.begin(format!("get_user {id}"))?;
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn get_user_by_telegram_id(
        &self,
        telegram_id: &str,
    ) -> Result<Option<UserRead>, ApiError> {
        self.begin(format!("get_user_by_telegram_id {telegram_id}"))?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.telegram_id == telegram_id)
            .cloned())
    }

    async fn create_user(&self, user: &UserCreate) -> Result<UserRead, ApiError> {
        self.begin(format!("create_user {}", user.telegram_id))?;
        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst);
        let created = UserRead {
            id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            full_name: user.full_name.clone(),
            telegram_id: user.telegram_id.clone(),
        };
        self.users.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_score_entries(&self, user_id: i64) -> Result<Vec<ScoreEntryRead>, ApiError> {
        self.begin(format!("list_score_entries {user_id}"))?;
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_score_entry(
        &self,
        entry: &ScoreEntryCreate,
    ) -> Result<CreateScoreOutcome, ApiError> {
        self.begin(format!("create_score_entry {} {}", entry.user_id, entry.name))?;
        let mut entries = self.entries.lock().unwrap();
        if entries
            .iter()
            .any(|e| e.user_id == entry.user_id && e.name == entry.name)
        {
            return Ok(CreateScoreOutcome::AlreadyExists);
        }
        let id = self.next_entry_id.fetch_add(1, Ordering::SeqCst);
        let created = ScoreEntryRead {
            id,
            name: entry.name.clone(),
            point: entry.point,
            user_id: entry.user_id,
        };
        entries.push(created.clone());
        Ok(CreateScoreOutcome::Created(created))
    }
}
