//! Course API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use shared::models::{Course, CourseContent, CourseContentCreate, CourseCreate, CourseUpdate};

use crate::core::ServerState;
use crate::store::NewCourseContent;
use crate::utils::validation::{
    MAX_CONTENT_LEN, MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, require,
    require_text, validate_lessons, validate_max_len, validate_optional_text, validate_price,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode, JsonBody};

#[derive(Debug, Default, Deserialize)]
pub struct CourseQuery {
    pub category: Option<String>,
}

fn course_not_found(key: &str, value: impl Into<serde_json::Value>) -> AppError {
    AppError::new(ErrorCode::CourseNotFound).with_detail(key, value)
}

/// GET /courses - 已发布课程，可按分类过滤
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<CourseQuery>,
) -> AppResult<Json<Vec<Course>>> {
    let category = query.category.filter(|c| !c.is_empty());
    let courses = state
        .store
        .list_courses()?
        .into_iter()
        .filter(|c| c.is_published)
        .filter(|c| category.as_deref().is_none_or(|cat| c.category == cat))
        .collect();
    Ok(Json(courses))
}

/// GET /courses/featured
pub async fn featured(State(state): State<ServerState>) -> AppResult<Json<Vec<Course>>> {
    let courses = state
        .store
        .list_courses()?
        .into_iter()
        .filter(|c| c.is_published && c.is_featured)
        .collect();
    Ok(Json(courses))
}

/// GET /courses/{slug} - 未发布课程视为不存在
pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Course>> {
    let course = state
        .store
        .find_course_by_slug(&slug)?
        .filter(|c| c.is_published)
        .ok_or_else(|| course_not_found("slug", slug))?;
    Ok(Json(course))
}

/// GET /courses/{slug}/content - 课程内容，按 order 排序
pub async fn list_content(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Vec<CourseContent>>> {
    let course = state
        .store
        .find_course_by_slug(&slug)?
        .filter(|c| c.is_published)
        .ok_or_else(|| course_not_found("slug", slug))?;
    Ok(Json(state.store.list_course_content(course.id)?))
}

fn validate_create(payload: &CourseCreate) -> Result<(), AppError> {
    validate_required_text(&payload.slug, "slug", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_required_text(&payload.category, "category", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.instructor_name, "instructorName", MAX_NAME_LEN)?;
    validate_required_text(&payload.level, "level", MAX_SHORT_TEXT_LEN)?;
    validate_max_len(&payload.description, "description", MAX_DESCRIPTION_LEN)?;
    validate_max_len(&payload.image, "image", MAX_URL_LEN)?;
    validate_price(payload.price, "price")?;
    validate_price(payload.original_price, "originalPrice")?;
    validate_lessons(payload.lessons)
}

/// POST /admin/courses - 创建课程
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<CourseCreate>,
) -> AppResult<(StatusCode, Json<Course>)> {
    validate_create(&payload)?;
    let course = state.store.create_course(payload)?;
    tracing::info!(course_id = course.id, slug = %course.slug, "Course created");
    Ok((StatusCode::CREATED, Json(course)))
}

/// PUT /admin/courses/{id} - 更新课程
///
/// 已创建订单保留下单时的价格快照，不受改价影响。
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<CourseUpdate>,
) -> AppResult<Json<Course>> {
    if let Some(title) = &payload.title {
        validate_required_text(title, "title", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_DESCRIPTION_LEN)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;
    if let Some(price) = payload.price {
        validate_price(price, "price")?;
    }
    if let Some(original_price) = payload.original_price {
        validate_price(original_price, "originalPrice")?;
    }
    if let Some(lessons) = payload.lessons {
        validate_lessons(lessons)?;
    }

    let course = state.store.update_course(id, payload)?;
    tracing::info!(course_id = course.id, "Course updated");
    Ok(Json(course))
}

/// POST /admin/courses/{id}/content - 添加课程内容
///
/// order 即课时编号 (1..=lessons)，同一课程内唯一。
pub async fn create_content(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<CourseContentCreate>,
) -> AppResult<(StatusCode, Json<CourseContent>)> {
    let new = NewCourseContent {
        title: require_text(payload.title, "title", MAX_NAME_LEN)?,
        content_type: require(payload.content_type, "type")?,
        content: require_text(payload.content, "content", MAX_CONTENT_LEN)?,
        duration: payload.duration,
        order: require(payload.order, "order")?,
    };

    let item = state.store.create_course_content(id, new)?;
    tracing::info!(course_id = id, content_id = item.id, order = item.order, "Course content created");
    Ok((StatusCode::CREATED, Json(item)))
}
