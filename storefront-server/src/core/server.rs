//! Server Implementation
//!
//! HTTP 服务器启动和管理

use crate::api;
use crate::core::{Config, Result, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    pub fn new(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    /// 监听 HTTP_PORT，Ctrl+C 时优雅退出
    pub async fn run(&self) -> Result<()> {
        let app = api::build_app(self.state.clone());

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(
            "Storefront server listening on {} (env: {})",
            addr,
            self.config.environment
        );

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
