//! Storyline - 故事 / 章节 / 气泡 三层文档后端
//!
//! 启动流程: 配置 → 日志 → 存储 → HTTP 服务

use std::sync::Arc;

use storyline::application::DocumentStorePort;
use storyline::config::{load_config, print_config, StoreBackend, StoreConfig};
use storyline::infrastructure::http::{AppState, HttpServer, ServerConfig};
use storyline::infrastructure::persistence::{
    DisconnectedStore, InMemoryDocumentStore, MongoConfig, MongoDocumentStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},storyline={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Storyline - 故事文档后端");
    print_config(&config);

    let store = open_store(&config.store).await;

    let state = AppState::new(store);
    let server_config = ServerConfig::new(config.server.host.clone(), config.server.port);
    let server = HttpServer::new(server_config, state);

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
                return;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 打开文档存储
///
/// Mongo 后端缺少连接串或连接失败时不退出，降级为未连接存储
async fn open_store(config: &StoreConfig) -> Arc<dyn DocumentStorePort> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, data is lost on restart");
            Arc::new(InMemoryDocumentStore::new())
        }
        StoreBackend::Mongo => {
            let Some(url) = config.url.clone() else {
                tracing::warn!("DATABASE_URL not set, starting without a database");
                return Arc::new(DisconnectedStore::new("DATABASE_URL not set", false));
            };

            let mongo_config = MongoConfig {
                url,
                database: config.database.clone(),
                connect_timeout_ms: config.connect_timeout_ms,
            };
            match MongoDocumentStore::connect(&mongo_config).await {
                Ok(store) => Arc::new(store),
                Err(e) => {
                    tracing::warn!(error = %e, "MongoDB connection failed, starting without a database");
                    Arc::new(DisconnectedStore::new(e.to_string(), true))
                }
            }
        }
    }
}
