//! 认证中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use shared::error::{AppError, ErrorCode};

use crate::core::ServerState;
use crate::security_log;

/// 从 `Authorization` 头提取 Bearer token
fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
}

/// 常量时间比较 token 与管理 key
///
/// 先取 SHA-256 摘要，比较时长度固定，耗时与不匹配位置无关。
fn admin_key_matches(token: &str, expected: &str) -> bool {
    if token.is_empty() || expected.is_empty() {
        return false;
    }
    let a = Sha256::digest(token.as_bytes());
    let b = Sha256::digest(expected.as_bytes());
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// 管理员中间件 - 校验管理 API key
///
/// # 错误
///
/// | 情况 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 NotAuthenticated |
/// | key 不匹配 | 401 AdminRequired |
pub async fn require_admin_key(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    match bearer_token(&req) {
        Some(token) if admin_key_matches(token, &state.config.admin_api_key) => {
            Ok(next.run(req).await)
        }
        Some(_) => {
            security_log!(
                "WARN",
                "admin_key_invalid",
                method = req.method().as_str(),
                uri = req.uri().path()
            );
            Err(AppError::new(ErrorCode::AdminRequired))
        }
        None => {
            security_log!(
                "WARN",
                "admin_key_missing",
                method = req.method().as_str(),
                uri = req.uri().path()
            );
            Err(AppError::not_authenticated())
        }
    }
}
