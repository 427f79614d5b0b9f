//! User CRUD handlers: list, create, read, update, delete.

use crate::error::AppError;
use crate::model::{CreateUserRequest, UserPatch};
use crate::response::{created, message, ok};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

fn parse_id(id_str: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id_str).map_err(|_| AppError::BadRequest("invalid user id".into()))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = state.users.find_all().await?;
    Ok(ok(users))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let new_user = RequestValidator::validate_create(body)?;
    let user = state.users.insert(new_user.into_user(Utc::now())).await?;
    tracing::info!(id = %user.id, "user created");
    Ok(created(user))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(AppError::user_not_found)?;
    Ok(ok(user))
}

/// Read, merge the patch, save. Concurrent updates to one user are last-write-wins.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<UserPatch>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let mut user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(AppError::user_not_found)?;
    let Json(patch) = body?;
    let patch = RequestValidator::validate_patch(patch)?;
    user.apply(patch, Utc::now());
    let user = state
        .users
        .save(&user)
        .await?
        .ok_or_else(AppError::user_not_found)?;
    Ok(ok(user))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(AppError::user_not_found)?;
    if !state.users.delete(id).await? {
        return Err(AppError::user_not_found());
    }
    tracing::info!(%id, "user removed");
    Ok(message("User removed"))
}
