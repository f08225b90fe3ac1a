//! In-Memory Document Store
//!
//! 每个集合内按插入顺序保存记录，查询按插入顺序返回。
//! 用于测试和 `store.backend = "memory"` 的开发模式，进程退出即丢失。

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::Utc;
use dashmap::DashMap;
use serde_json::Value;

use crate::application::ports::{
    Collection, ConnectionState, DocumentStorePort, Filter, NewRecord, StoreError, StoreStatus,
    StoredRecord,
};
use crate::domain::story::Identifier;

/// 内存文档存储
pub struct InMemoryDocumentStore {
    collections: DashMap<Collection, Vec<StoredRecord>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            collections: DashMap::new(),
        }
    }

    fn next_id() -> Result<Identifier, StoreError> {
        Identifier::parse(&ObjectId::new().to_hex())
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStorePort for InMemoryDocumentStore {
    async fn insert(
        &self,
        collection: Collection,
        mut record: NewRecord,
    ) -> Result<Identifier, StoreError> {
        let id = Self::next_id()?;
        let now = Value::String(Utc::now().to_rfc3339());
        record.insert("created_at".to_string(), now.clone());
        record.insert("updated_at".to_string(), now);

        self.collections
            .entry(collection)
            .or_default()
            .push(StoredRecord {
                id: id.clone(),
                fields: record,
            });

        tracing::debug!(collection = %collection, id = %id, "Record inserted (memory)");
        Ok(id)
    }

    async fn find_all(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<Vec<StoredRecord>, StoreError> {
        Ok(self
            .collections
            .get(&collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| filter.matches(r))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: &Identifier,
    ) -> Result<Option<StoredRecord>, StoreError> {
        Ok(self
            .collections
            .get(&collection)
            .and_then(|records| records.iter().find(|r| &r.id == id).cloned()))
    }

    async fn count_matching(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<u64, StoreError> {
        Ok(self
            .collections
            .get(&collection)
            .map(|records| records.iter().filter(|r| filter.matches(r)).count() as u64)
            .unwrap_or(0))
    }

    async fn status(&self) -> StoreStatus {
        let mut collections: Vec<String> = self
            .collections
            .iter()
            .map(|entry| entry.key().as_str().to_string())
            .collect();
        collections.sort();

        StoreStatus {
            backend: "memory",
            connection: ConnectionState::Connected,
            url_configured: false,
            database_name: Some("memory".to_string()),
            collections,
            introspection_error: None,
        }
    }
}
