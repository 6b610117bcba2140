use storefront_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载 .env (不存在时忽略)
    let _ = dotenvy::dotenv();

    // 2. 加载配置
    let config = Config::from_env()?;

    // 3. 初始化日志
    setup_environment(&config);
    tracing::info!("Storefront server starting...");

    // 4. 初始化服务器状态 (存储、示例课程、支付网关)
    let state = ServerState::initialize(&config)?;

    // 5. 启动 HTTP 服务器
    let server = Server::new(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
