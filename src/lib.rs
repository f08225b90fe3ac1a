//! Storyline - 故事 / 章节 / 气泡 三层文档后端
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Story Context: 标识符、标题、排序值，以及故事树的组装
//!
//! 应用层 (application/):
//! - Ports: 文档存储端口（DocumentStorePort）
//! - Commands: 创建故事、章节、气泡（含父级存在性校验）
//! - Queries: 列表、故事详情、存储自检
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Persistence: MongoDB / 内存 / 未连接 三种存储实现

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
