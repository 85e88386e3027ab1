//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::time::Duration;

use crate::api;
use crate::core::{Config, Result, ServerError, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    /// Create server with an initialized state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    pub async fn run(&self) -> Result<()> {
        let app = api::build_app(self.state.clone());

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        tracing::info!("Order server listening on {}", addr);

        let shutdown_timeout = Duration::from_millis(self.config.shutdown_timeout_ms);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

/// 等待 Ctrl+C；之后给在途请求 `timeout` 的时间，超时强制退出
async fn shutdown_signal(timeout: Duration) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutting down...");

    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        tracing::warn!(
            timeout_ms = timeout.as_millis() as u64,
            "Graceful shutdown timed out, exiting"
        );
        std::process::exit(1);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_reports_bind_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let taken = std::net::TcpListener::bind(("0.0.0.0", 0)).unwrap();
        let port = taken.local_addr().unwrap().port();

        let config = Config::with_overrides(tmp.path().to_string_lossy(), port);
        let state = ServerState::initialize(&config).await.unwrap();
        let server = Server::with_state(config, state);

        let err = server.run().await.unwrap_err();
        assert!(matches!(err, ServerError::Bind { addr, .. } if addr.port() == port));
    }
}
