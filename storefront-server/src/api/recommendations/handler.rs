//! Recommendation API Handlers

use axum::{Json, extract::State};
use shared::models::{Course, RecommendationRequest};

use crate::core::ServerState;
use crate::recommend::recommend as pick_course;
use crate::utils::validation::require;
use crate::utils::{AppError, AppResult, ErrorCode, JsonBody};

/// POST /recommendations - 问卷答案 → 已发布课程
pub async fn recommend(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<RecommendationRequest>,
) -> AppResult<Json<Course>> {
    let goal = require(payload.goal, "goal")?;
    let time = require(payload.time, "time")?;
    let experience = require(payload.experience, "experience")?;

    let slug = pick_course(goal, time, experience);
    let course = state
        .store
        .find_course_by_slug(slug)?
        .filter(|c| c.is_published)
        .ok_or_else(|| AppError::new(ErrorCode::RecommendationUnavailable).with_detail("slug", slug))?;
    Ok(Json(course))
}
