//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 部署平台约定的环境变量（DATABASE_URL / DATABASE_NAME / PORT）
//! 2. 带前缀的环境变量（STORYLINE_）
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 不带前缀的部署环境变量
#[derive(Debug, Clone, Default)]
pub struct PlatformEnv {
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub port: Option<String>,
}

impl PlatformEnv {
    /// 读取当前进程环境，空值视为未设置
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            database_url: var("DATABASE_URL"),
            database_name: var("DATABASE_NAME"),
            port: var("PORT"),
        }
    }
}

/// 加载应用配置
///
/// # 环境变量示例
/// - `DATABASE_URL=mongodb://localhost:27017`
/// - `PORT=8080`
/// - `STORYLINE_STORE__BACKEND=memory`
/// - `STORYLINE_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None, &PlatformEnv::from_env())
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
/// - `platform` - 最高优先级的部署环境变量
pub fn load_config_from_path(
    config_path: Option<&Path>,
    platform: &PlatformEnv,
) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("store.backend", "mongo")?
        .set_default("store.database", "storyline")?
        .set_default("store.connect_timeout_ms", 3000)?
        .set_default("log.level", "info")?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 带前缀的环境变量，例如: STORYLINE_STORE__DATABASE=stories
    builder = builder.add_source(
        Environment::with_prefix("STORYLINE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 部署环境变量覆盖
    builder = builder
        .set_override_option("store.url", platform.database_url.clone())?
        .set_override_option("store.database", platform.database_name.clone())?
        .set_override_option("server.port", platform.port.clone())?;

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.store.database.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Database name cannot be empty".to_string(),
        ));
    }

    if config.store.connect_timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "Store connect timeout cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
///
/// 连接串可能含凭据，只报告是否设置
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Store Backend: {:?}", config.store.backend);
    tracing::info!(
        "Database URL: {}",
        if config.store.url.is_some() { "set" } else { "not set" }
    );
    tracing::info!("Database Name: {}", config.store.database);
    tracing::info!("Connect Timeout: {}ms", config.store.connect_timeout_ms);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
