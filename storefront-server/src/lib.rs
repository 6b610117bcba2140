//! Storefront Server - 课程商城的下单、支付校验与授权核心
//!
//! # 架构概述
//!
//! - **存储** (`store`): 嵌入式 redb，用户 / 课程 / 订单 / 授权 / 推荐码
//! - **结算** (`checkout`): 创建订单、支付网关适配、签名校验、授权
//! - **推荐码** (`referrals`): 生成推荐码并统计成交
//! - **学习进度** (`progress`)、**选课问卷** (`recommend`)
//! - **HTTP API** (`api`): axum 路由和处理器
//!
//! # 模块结构
//!
//! ```text
//! storefront-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── auth/          # 管理接口 API key
//! ├── api/           # HTTP 路由和处理器
//! ├── checkout/      # 订单与支付校验
//! ├── referrals/     # 推荐码
//! ├── store/         # redb 存储层
//! └── utils/         # 日志、校验、提取器
//! ```

pub mod api;
pub mod auth;
pub mod checkout;
pub mod core;
pub mod progress;
pub mod recommend;
pub mod referrals;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use checkout::{OrderManager, PaymentVerifier};
pub use core::{Config, Server, ServerState};
pub use referrals::ReferralTracker;
pub use store::EntitlementStore;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::warn!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境: 按配置初始化日志
pub fn setup_environment(config: &Config) {
    init_logger_with_file(&config.log_level, config.log_dir.as_deref());
}
