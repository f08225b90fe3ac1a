//! Disconnected Store - 降级模式
//!
//! 未配置连接串或启动时连接失败时使用。服务照常启动：
//! 数据操作一律返回 `StoreError::Unavailable`，自检端点如实报告未连接。

use async_trait::async_trait;

use crate::application::ports::{
    Collection, ConnectionState, DocumentStorePort, Filter, NewRecord, StoreError, StoreStatus,
    StoredRecord,
};
use crate::domain::story::Identifier;

/// 未连接的文档存储
pub struct DisconnectedStore {
    reason: String,
    url_configured: bool,
}

impl DisconnectedStore {
    pub fn new(reason: impl Into<String>, url_configured: bool) -> Self {
        Self {
            reason: reason.into(),
            url_configured,
        }
    }

    fn unavailable(&self) -> StoreError {
        StoreError::Unavailable(self.reason.clone())
    }
}

#[async_trait]
impl DocumentStorePort for DisconnectedStore {
    async fn insert(
        &self,
        _collection: Collection,
        _record: NewRecord,
    ) -> Result<Identifier, StoreError> {
        Err(self.unavailable())
    }

    async fn find_all(
        &self,
        _collection: Collection,
        _filter: Filter,
    ) -> Result<Vec<StoredRecord>, StoreError> {
        Err(self.unavailable())
    }

    async fn find_by_id(
        &self,
        _collection: Collection,
        _id: &Identifier,
    ) -> Result<Option<StoredRecord>, StoreError> {
        Err(self.unavailable())
    }

    async fn count_matching(
        &self,
        _collection: Collection,
        _filter: Filter,
    ) -> Result<u64, StoreError> {
        Err(self.unavailable())
    }

    async fn status(&self) -> StoreStatus {
        StoreStatus {
            backend: "disconnected",
            connection: ConnectionState::Disconnected {
                reason: self.reason.clone(),
            },
            url_configured: self.url_configured,
            database_name: None,
            collections: Vec::new(),
            introspection_error: None,
        }
    }
}
