//! Course API 模块
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /courses | GET | 已发布课程 (?category=) | 无 |
//! | /courses/featured | GET | 推荐课程 | 无 |
//! | /courses/{slug} | GET | 课程详情 | 无 |
//! | /courses/{slug}/content | GET | 课程内容 (按 order) | 无 |
//! | /admin/courses | POST | 创建课程 | ADMIN_API_KEY |
//! | /admin/courses/{id} | PUT | 更新课程 | ADMIN_API_KEY |
//! | /admin/courses/{id}/content | POST | 添加课程内容 | ADMIN_API_KEY |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin_key;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/courses", get(handler::list))
        .route("/courses/featured", get(handler::featured))
        .route("/courses/{slug}", get(handler::get_by_slug))
        .route("/courses/{slug}/content", get(handler::list_content));

    let admin_routes = Router::new()
        .route("/admin/courses", post(handler::create))
        .route("/admin/courses/{id}", put(handler::update))
        .route("/admin/courses/{id}/content", post(handler::create_content))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin_key,
        ));

    read_routes.merge(admin_routes)
}
