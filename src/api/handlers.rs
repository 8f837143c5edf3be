//! HTTP request handlers

use super::types::{ErrorResponse, ScoreEntryCreate, ScoreEntryRead, UserCreate, UserRead};
use super::AppState;
use crate::service;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/users/", post(create_user))
        .route("/users/:id", get(get_user))
        .route("/users/telegram/:telegram_id", get(get_user_by_telegram_id))
        .route("/objects/", post(create_score_entry))
        .route("/objects/:user_id", get(list_user_score_entries))
        .with_state(state)
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserRead>, AppError> {
    let user = state
        .db
        .get_user(id)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    user.map(|u| Json(UserRead::from(u)))
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

async fn get_user_by_telegram_id(
    State(state): State<AppState>,
    Path(telegram_id): Path<String>,
) -> Result<Json<UserRead>, AppError> {
    let user = state
        .db
        .get_user_by_telegram_id(&telegram_id)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    user.map(|u| Json(UserRead::from(u)))
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<UserCreate>,
) -> Result<Json<UserRead>, AppError> {
    let user = state
        .db
        .create_user(&body.first_name, &body.last_name, &body.full_name, &body.telegram_id)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user_id = user.id, telegram_id = %user.telegram_id, "Created user");
    Ok(Json(UserRead::from(user)))
}

/// All score entries for a user; an unknown user is just an empty list.
async fn list_user_score_entries(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<ScoreEntryRead>>, AppError> {
    let entries = state
        .db
        .get_score_entries_by_user(user_id)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(entries.into_iter().map(ScoreEntryRead::from).collect()))
}

async fn create_score_entry(
    State(state): State<AppState>,
    Json(body): Json<ScoreEntryCreate>,
) -> Result<Json<ScoreEntryRead>, AppError> {
    let created = service::create_new_score_entry(&state.db, &body.name, body.point, body.user_id)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    match created {
        Some(entry) => {
            tracing::info!(user_id = entry.user_id, subject = %entry.name, "Recorded score");
            Ok(Json(ScoreEntryRead::from(entry)))
        }
        None => Err(AppError::BadRequest("Object already exists".to_string())),
    }
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
