//! Entitlement API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Entitlement, EntitlementWithCourse, ProgressUpdate};

use crate::core::ServerState;
use crate::progress;
use crate::utils::validation::require;
use crate::utils::{AppError, AppResult, ErrorCode, JsonBody};

/// GET /users/{user_id}/entitlements - 用户已购课程
pub async fn list_for_user(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<EntitlementWithCourse>>> {
    if state.store.get_user(user_id)?.is_none() {
        return Err(AppError::new(ErrorCode::UserNotFound).with_detail("userId", user_id));
    }

    let mut items = Vec::new();
    for entitlement in state.store.list_entitlements_for_user(user_id)? {
        match state.store.get_course(entitlement.course_id)? {
            Some(course) => items.push(EntitlementWithCourse {
                entitlement,
                course: course.summary(),
            }),
            None => tracing::warn!(
                entitlement_id = entitlement.id,
                course_id = entitlement.course_id,
                "Entitlement references a missing course, skipped"
            ),
        }
    }
    Ok(Json(items))
}

/// POST /entitlements/{id}/progress - 记录完成的课时
pub async fn record_progress(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<ProgressUpdate>,
) -> AppResult<Json<Entitlement>> {
    let lessons = require(payload.completed_lessons, "completedLessons")?;
    let entitlement = progress::record_progress(&state.store, id, &lessons)?;
    Ok(Json(entitlement))
}
