//! User CRUD handlers: create, read, update, delete.
//!
//! Each handler is identifier-parse (extractor) → decode (extractor) →
//! validate → one store call → envelope. Failures leave through
//! [`AppError`] and become error envelopes.

use crate::error::{AppError, Operation};
use crate::extractors::{JsonBody, UserId};
use crate::model::{User, UserRequest};
use crate::response::{success_ok, success_one_ok};
use crate::state::AppState;
use crate::validation::validate_user;
use axum::{extract::State, http::header, response::IntoResponse};

/// POST /user
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UserRequest>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(request = ?body, "request body decoded");
    validate_user(&body)?;
    let user = User::create(body);
    state
        .store
        .create(&user)
        .await
        .map_err(|e| AppError::store(Operation::Create, e))?;
    tracing::info!(id = %user.id, "user created");
    let (status, envelope) = success_ok();
    Ok((status, [(header::LOCATION, format!("/user/{}", user.id))], envelope))
}

/// GET /user/:id
pub async fn read(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .store
        .read(id)
        .await
        .map_err(|e| AppError::store(Operation::Read, e))?;
    tracing::info!(%id, "user retrieved");
    Ok(success_one_ok(user))
}

/// PATCH /user/:id
pub async fn update(
    State(state): State<AppState>,
    UserId(id): UserId,
    JsonBody(body): JsonBody<UserRequest>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(request = ?body, "request body decoded");
    validate_user(&body)?;
    let user = state
        .store
        .update(&User::edit(id, body))
        .await
        .map_err(|e| AppError::store(Operation::Update, e))?;
    tracing::info!(%id, "user updated");
    Ok(success_one_ok(user))
}

/// DELETE /user/:id
pub async fn delete(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<impl IntoResponse, AppError> {
    state
        .store
        .delete(id)
        .await
        .map_err(|e| AppError::store(Operation::Delete, e))?;
    tracing::info!(%id, "user deleted");
    Ok(success_ok())
}
