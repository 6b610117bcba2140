//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`orders`] - 下单、支付确认、订单查询
//! - [`users`] - 用户资料
//! - [`entitlements`] - 已购课程与学习进度
//! - [`referrals`] - 推荐码
//! - [`courses`] - 课程目录与管理
//! - [`recommendations`] - 选课问卷

pub mod courses;
pub mod entitlements;
pub mod health;
pub mod orders;
pub mod recommendations;
pub mod referrals;
pub mod users;

use axum::Router;
use http::StatusCode;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(users::router())
        .merge(entitlements::router())
        .merge(referrals::router())
        .merge(recommendations::router())
        // Admin routes need state for the key check
        .merge(courses::router(state))
}

/// Build the fully configured application
///
/// Used by both the HTTP server and oneshot tests.
pub fn build_app(state: ServerState) -> Router {
    let request_timeout = state.config.request_timeout();
    build_router(&state)
        .layer(
            ServiceBuilder::new()
                // Trace - Request tracing (logs at INFO level), outermost
                .layer(TraceLayer::new_for_http())
                // Bound every request
                .layer(request_timeout_layer(request_timeout))
                // CORS - Handle cross-origin requests
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Requests still running after `timeout` are answered with 408
fn request_timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}
