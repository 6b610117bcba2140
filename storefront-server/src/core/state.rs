use std::sync::Arc;

use crate::checkout::{
    LocalGateway, OrderManager, PaymentGateway, PaymentVerifier, RazorpayGateway,
};
use crate::core::{Config, GatewayMode, Result};
use crate::referrals::ReferralTracker;
use crate::store::{EntitlementStore, seed};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 各服务内部共享同一个 [`EntitlementStore`]，clone 成本极低。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | store | redb 存储 |
/// | orders | 订单创建 (调用支付网关) |
/// | verifier | 支付确认校验与授权 |
/// | referrals | 推荐码 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub store: EntitlementStore,
    pub orders: OrderManager,
    pub verifier: PaymentVerifier,
    pub referrals: ReferralTracker,
}

impl ServerState {
    /// 使用已打开的存储和网关构造 (测试时注入 stub 网关)
    pub fn new(config: Config, store: EntitlementStore, gateway: Arc<dyn PaymentGateway>) -> Self {
        let orders = OrderManager::new(
            store.clone(),
            gateway,
            config.currency.clone(),
            config.gateway_timeout(),
        );
        let verifier = PaymentVerifier::new(store.clone(), config.gateway.key_secret.clone());
        let referrals = ReferralTracker::new(store.clone());

        Self {
            config: Arc::new(config),
            store,
            orders,
            verifier,
            referrals,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 创建数据目录并打开 `storefront.redb`
    /// 2. 按需写入示例课程
    /// 3. 按 `GATEWAY_MODE` 构造支付网关
    pub fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;
        let store = EntitlementStore::open(config.db_path())?;
        tracing::info!(path = %config.db_path().display(), "Storage opened");

        if config.seed_sample_courses {
            seed::seed_sample_courses(&store)?;
        }

        let gateway: Arc<dyn PaymentGateway> = match config.gateway.mode {
            GatewayMode::Local => {
                tracing::warn!("Using local payment gateway, no real payments are taken");
                Arc::new(LocalGateway::new(config.gateway.key_id.clone()))
            }
            GatewayMode::Razorpay => Arc::new(RazorpayGateway::new(
                config.gateway.key_id.clone(),
                config.gateway.key_secret.clone(),
            )),
        };

        Ok(Self::new(config.clone(), store, gateway))
    }
}
