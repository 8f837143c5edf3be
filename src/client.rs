//! Bot-side client for the score API
//!
//! The dialog layer only ever sees the [`ScoreApi`] trait; tests inject an
//! in-memory fake, production wires [`ApiClient`] over HTTP.

use crate::api::{ScoreEntryCreate, ScoreEntryRead, UserCreate, UserRead};
use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("score API request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("score API returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Outcome of a score submission
#[derive(Debug, Clone, PartialEq)]
pub enum CreateScoreOutcome {
    Created(ScoreEntryRead),
    /// The write path refused: this user already has a score for the subject.
    AlreadyExists,
}

/// Store access as the dialog layer sees it
#[async_trait]
pub trait ScoreApi: Send + Sync {
    async fn get_user(&self, id: i64) -> Result<Option<UserRead>, ApiError>;

    /// Absent users are `Ok(None)`, never an error.
    async fn get_user_by_telegram_id(&self, telegram_id: &str)
        -> Result<Option<UserRead>, ApiError>;

    async fn create_user(&self, user: &UserCreate) -> Result<UserRead, ApiError>;

    async fn list_score_entries(&self, user_id: i64) -> Result<Vec<ScoreEntryRead>, ApiError>;

    async fn create_score_entry(
        &self,
        entry: &ScoreEntryCreate,
    ) -> Result<CreateScoreOutcome, ApiError>;
}

/// HTTP implementation of [`ScoreApi`].
///
/// No request timeout is configured: a hung store call blocks its chat
/// session until the store answers. There is no retry and no backoff.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ScoreApi for ApiClient {
    async fn get_user(&self, id: i64) -> Result<Option<UserRead>, ApiError> {
        let response = self.http.get(self.url(&format!("/users/{id}"))).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            status => Err(status_error(status, response).await),
        }
    }

    async fn get_user_by_telegram_id(
        &self,
        telegram_id: &str,
    ) -> Result<Option<UserRead>, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/users/telegram/{telegram_id}")))
            .send()
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            status => Err(status_error(status, response).await),
        }
    }

    async fn create_user(&self, user: &UserCreate) -> Result<UserRead, ApiError> {
        let response = self.http.post(self.url("/users/")).json(user).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(status_error(status, response).await)
        }
    }

    async fn list_score_entries(&self, user_id: i64) -> Result<Vec<ScoreEntryRead>, ApiError> {
        let response = self.http.get(self.url(&format!("/objects/{user_id}"))).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(status_error(status, response).await)
        }
    }

    async fn create_score_entry(
        &self,
        entry: &ScoreEntryCreate,
    ) -> Result<CreateScoreOutcome, ApiError> {
        let response = self.http.post(self.url("/objects/")).json(entry).send().await?;
        match response.status() {
            StatusCode::BAD_REQUEST => Ok(CreateScoreOutcome::AlreadyExists),
            status if status.is_success() => Ok(CreateScoreOutcome::Created(response.json().await?)),
            status => Err(status_error(status, response).await),
        }
    }
}

async fn status_error(status: StatusCode, response: reqwest::Response) -> ApiError {
    let body = response.text().await.unwrap_or_default();
    ApiError::Status {
        status: status.as_u16(),
        body,
    }
}
