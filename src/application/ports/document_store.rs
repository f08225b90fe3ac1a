//! Document Store Port - 出站端口
//!
//! 面向具名集合的通用文档存储抽象。
//! 具体实现在 infrastructure 层（MongoDB / 内存 / 未连接）。
//!
//! 存储原生的 id 类型不会越过此边界：进出端口的标识一律为已校验的 `Identifier`，
//! 因此格式错误的 id 在到达存储之前就已被拒绝。

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::story::Identifier;

/// 存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("文档存储不可用: {0}")]
    Unavailable(String),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("序列化错误: {0}")]
    Serialization(String),
}

/// 集合名称（每种实体一个集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Story,
    Chapter,
    Bubble,
}

impl Collection {
    /// 存储中的集合名
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Story => "story",
            Collection::Chapter => "chapter",
            Collection::Bubble => "bubble",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 待写入的记录字段（不含 id，id 由存储分配）
pub type NewRecord = Map<String, Value>;

/// 从存储读出的记录
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub id: Identifier,
    pub fields: Map<String, Value>,
}

/// 等值过滤条件，所有子句需同时满足
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    id: Option<Identifier>,
    fields: Vec<(String, Value)>,
}

impl Filter {
    /// 匹配集合内所有记录
    pub fn all() -> Self {
        Self::default()
    }

    /// 按 id 匹配
    pub fn by_id(id: &Identifier) -> Self {
        Self {
            id: Some(id.clone()),
            fields: Vec::new(),
        }
    }

    /// 按字段等值匹配
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and_eq(field, value)
    }

    pub fn and_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((field.into(), value.into()));
        self
    }

    pub fn id(&self) -> Option<&Identifier> {
        self.id.as_ref()
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    /// 判断记录是否满足过滤条件
    pub fn matches(&self, record: &StoredRecord) -> bool {
        if let Some(id) = &self.id {
            if &record.id != id {
                return false;
            }
        }
        self.fields
            .iter()
            .all(|(field, value)| record.fields.get(field) == Some(value))
    }
}

/// 连接状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    Disconnected { reason: String },
}

/// 存储自检结果（尽力而为，不会失败）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStatus {
    pub backend: &'static str,
    pub connection: ConnectionState,
    /// 是否配置了连接串
    pub url_configured: bool,
    pub database_name: Option<String>,
    /// 最多 10 个集合名
    pub collections: Vec<String>,
    /// 连接成功但枚举集合失败时的错误信息
    pub introspection_error: Option<String>,
}

impl StoreStatus {
    pub const MAX_COLLECTIONS: usize = 10;
}

/// Document Store Port
///
/// `find_all` 不保证返回顺序，调用方必须显式排序。
#[async_trait]
pub trait DocumentStorePort: Send + Sync {
    /// 写入记录，返回存储分配的新标识
    async fn insert(
        &self,
        collection: Collection,
        record: NewRecord,
    ) -> Result<Identifier, StoreError>;

    /// 返回所有满足过滤条件的记录
    async fn find_all(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<Vec<StoredRecord>, StoreError>;

    /// 根据 id 查找记录
    async fn find_by_id(
        &self,
        collection: Collection,
        id: &Identifier,
    ) -> Result<Option<StoredRecord>, StoreError>;

    /// 统计满足过滤条件的记录数
    async fn count_matching(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<u64, StoreError>;

    /// 存储自检
    async fn status(&self) -> StoreStatus;
}
