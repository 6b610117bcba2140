//! Referral API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{IssueReferralRequest, IssueReferralResponse, Referral};

use crate::core::ServerState;
use crate::utils::validation::require;
use crate::utils::{AppResult, JsonBody};

/// POST /referrals - 为 (user, course) 生成新推荐码
pub async fn issue(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<IssueReferralRequest>,
) -> AppResult<(StatusCode, Json<IssueReferralResponse>)> {
    let user_id = require(payload.user_id, "userId")?;
    let course_id = require(payload.course_id, "courseId")?;

    let referral = state.referrals.issue_code(user_id, course_id)?;
    Ok((
        StatusCode::CREATED,
        Json(IssueReferralResponse {
            code: referral.code,
        }),
    ))
}

/// GET /referrals/{code}
pub async fn get_by_code(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<Referral>> {
    Ok(Json(state.referrals.get(&code)?))
}

/// GET /users/{user_id}/referrals
pub async fn list_for_user(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<Referral>>> {
    Ok(Json(state.referrals.list_for_user(user_id)?))
}
