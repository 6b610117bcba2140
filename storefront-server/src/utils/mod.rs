//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`JsonBody`] - 统一错误格式的 JSON 提取器
//! - [`validation`] - 请求字段校验
//! - [`logger`] - 日志初始化

pub mod json;
pub mod logger;
pub mod validation;

pub use json::JsonBody;
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
