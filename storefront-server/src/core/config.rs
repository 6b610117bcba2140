use super::error::{Result, ServerError};
use std::path::PathBuf;
use std::time::Duration;

/// 支付网关模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayMode {
    /// 本地生成网关订单号，不访问外部服务 (开发 / 测试)
    Local,
    /// Razorpay Orders API
    Razorpay,
}

impl std::str::FromStr for GatewayMode {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "razorpay" => Ok(Self::Razorpay),
            other => Err(ServerError::Config(format!("Unknown GATEWAY_MODE: {other}"))),
        }
    }
}

/// 支付网关配置
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub mode: GatewayMode,
    /// 公开 key id，返回给前端 checkout 组件
    pub key_id: String,
    /// HMAC 签名密钥，仅服务端持有
    pub key_secret: String,
    /// 网关调用超时
    pub timeout_ms: u64,
}

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | ENVIRONMENT | development | 运行环境 |
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | DATA_DIR | ./data | 数据目录 (storefront.redb) |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 未设置时) |
/// | LOG_DIR | - | 设置后按天滚动写入日志文件 |
/// | GATEWAY_MODE | local | local / razorpay |
/// | RAZORPAY_KEY_ID | rzp_test_local | 网关 key id |
/// | RAZORPAY_KEY_SECRET | 非开发环境必填 | 签名密钥 |
/// | GATEWAY_TIMEOUT_MS | 10000 | 网关调用超时(毫秒) |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | CURRENCY | INR | 订单币种 |
/// | ADMIN_API_KEY | 非开发环境必填 | 管理接口 Bearer token |
/// | SEED_SAMPLE_COURSES | 开发环境 true | 空目录时写入示例课程 |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 GATEWAY_MODE=razorpay RAZORPAY_KEY_SECRET=... cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 运行环境: development | staging | production
    pub environment: String,
    pub http_port: u16,
    pub data_dir: PathBuf,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub gateway: GatewayConfig,
    pub request_timeout_ms: u64,
    pub currency: String,
    pub admin_api_key: String,
    pub seed_sample_courses: bool,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 从任意键值来源加载配置 (测试时传入 HashMap)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let is_development = environment == "development";

        let parse_or = |name: &str, default: u64| -> u64 {
            lookup(name)
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        };

        let gateway = GatewayConfig {
            mode: lookup("GATEWAY_MODE")
                .map(|m| m.parse::<GatewayMode>())
                .transpose()?
                .unwrap_or(GatewayMode::Local),
            key_id: lookup("RAZORPAY_KEY_ID")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "rzp_test_local".into()),
            key_secret: require_secret(&lookup, "RAZORPAY_KEY_SECRET", &environment)?,
            timeout_ms: parse_or("GATEWAY_TIMEOUT_MS", 10_000),
        };

        Ok(Self {
            http_port: lookup("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            data_dir: lookup("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./data")),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: lookup("LOG_DIR").filter(|s| !s.is_empty()),
            gateway,
            request_timeout_ms: parse_or("REQUEST_TIMEOUT_MS", 30_000),
            currency: lookup("CURRENCY").unwrap_or_else(|| "INR".into()),
            admin_api_key: require_secret(&lookup, "ADMIN_API_KEY", &environment)?,
            seed_sample_courses: lookup("SEED_SAMPLE_COURSES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(is_development),
            environment,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("storefront.redb")
    }

    pub fn gateway_timeout(&self) -> Duration {
        Duration::from_millis(self.gateway.timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

/// 密钥类配置: 非开发环境必须设置且非空，开发环境生成占位值
fn require_secret(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    environment: &str,
) -> Result<String> {
    let val = match lookup(name) {
        Some(v) => v,
        None => {
            if environment != "development" {
                return Err(ServerError::Config(format!(
                    "{name} must be set in {environment} environment"
                )));
            }
            format!("dev-{name}-not-for-production")
        }
    };
    if val.is_empty() && environment != "development" {
        return Err(ServerError::Config(format!(
            "{name} must not be empty in {environment} environment"
        )));
    }
    Ok(val)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_development_defaults() {
        let config = load(&[]).unwrap();
        assert!(config.is_development());
        assert_eq!(config.http_port, 5000);
        assert_eq!(config.currency, "INR");
        assert_eq!(config.gateway.mode, GatewayMode::Local);
        assert_eq!(config.gateway_timeout(), Duration::from_secs(10));
        assert_eq!(config.gateway.key_secret, "dev-RAZORPAY_KEY_SECRET-not-for-production");
        assert!(config.seed_sample_courses);
        assert_eq!(config.db_path(), PathBuf::from("./data/storefront.redb"));
    }

    #[test]
    fn test_production_requires_secrets() {
        let err = load(&[("ENVIRONMENT", "production")]).unwrap_err();
        assert!(err.to_string().contains("RAZORPAY_KEY_SECRET"));

        let err = load(&[
            ("ENVIRONMENT", "production"),
            ("RAZORPAY_KEY_SECRET", "s3cret"),
            ("ADMIN_API_KEY", ""),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("ADMIN_API_KEY"));
    }

    #[test]
    fn test_production_config() {
        let config = load(&[
            ("ENVIRONMENT", "production"),
            ("GATEWAY_MODE", "Razorpay"),
            ("RAZORPAY_KEY_ID", "rzp_live_abc"),
            ("RAZORPAY_KEY_SECRET", "s3cret"),
            ("ADMIN_API_KEY", "admin-token"),
            ("HTTP_PORT", "8080"),
            ("GATEWAY_TIMEOUT_MS", "2500"),
        ])
        .unwrap();
        assert!(config.is_production());
        assert_eq!(config.gateway.mode, GatewayMode::Razorpay);
        assert_eq!(config.gateway.key_id, "rzp_live_abc");
        assert_eq!(config.gateway_timeout(), Duration::from_millis(2500));
        assert_eq!(config.http_port, 8080);
        assert!(!config.seed_sample_courses);
    }

    #[test]
    fn test_unknown_gateway_mode() {
        let err = load(&[("GATEWAY_MODE", "paypal")]).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }
}
