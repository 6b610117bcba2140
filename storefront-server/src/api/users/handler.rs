//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{User, UserCreate, UserUpdate};

use crate::core::ServerState;
use crate::store::NewUser;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, optional_text, require_text,
    validate_email, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode, JsonBody};

/// POST /users - 注册用户资料
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<UserCreate>,
) -> AppResult<(StatusCode, Json<User>)> {
    let email = require_text(payload.email, "email", MAX_EMAIL_LEN)?;
    validate_email(&email)?;

    let new = NewUser {
        uid: require_text(payload.uid, "uid", MAX_SHORT_TEXT_LEN)?,
        username: require_text(payload.username, "username", MAX_NAME_LEN)?,
        email,
        full_name: require_text(payload.full_name, "fullName", MAX_NAME_LEN)?,
        photo_url: optional_text(payload.photo_url, "photoUrl", MAX_URL_LEN)?,
        is_admin: false,
    };

    let user = state.store.create_user(new)?;
    tracing::info!(user_id = user.id, uid = %user.uid, "User registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users/{user_id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<User>> {
    let user = state
        .store
        .get_user(user_id)?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound).with_detail("userId", user_id))?;
    Ok(Json(user))
}

/// GET /users/by-uid/{uid}
pub async fn get_by_uid(
    State(state): State<ServerState>,
    Path(uid): Path<String>,
) -> AppResult<Json<User>> {
    let user = state
        .store
        .find_user_by_uid(&uid)?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound).with_detail("uid", uid))?;
    Ok(Json(user))
}

/// PUT /users/{user_id} - 更新资料 (缺省字段保持不变)
pub async fn update(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
    JsonBody(payload): JsonBody<UserUpdate>,
) -> AppResult<Json<User>> {
    if let Some(username) = &payload.username {
        validate_required_text(username, "username", MAX_NAME_LEN)?;
    }
    if let Some(full_name) = &payload.full_name {
        validate_required_text(full_name, "fullName", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.photo_url, "photoUrl", MAX_URL_LEN)?;

    let user = state.store.update_user(user_id, payload)?;
    Ok(Json(user))
}
