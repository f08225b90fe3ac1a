//! MongoDB Document Store
//!
//! 每种实体对应一个集合；记录以 ObjectId 作为 `_id`。
//! 写入时附加 `created_at` / `updated_at` 元数据。

use std::time::Duration;

use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Bson, Document};
use futures_util::TryStreamExt;
use mongodb::{options::ClientOptions, Client, Database};
use serde_json::Value;

use crate::application::ports::{
    Collection, ConnectionState, DocumentStorePort, Filter, NewRecord, StoreError, StoreStatus,
    StoredRecord,
};
use crate::domain::story::Identifier;

/// MongoDB 连接配置
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// 连接串
    pub url: String,
    /// 数据库名
    pub database: String,
    /// 服务器选择与连接超时（毫秒）
    pub connect_timeout_ms: u64,
}

/// MongoDB 文档存储
pub struct MongoDocumentStore {
    database: Database,
}

impl MongoDocumentStore {
    /// 连接并 ping 数据库
    ///
    /// 设置超时以免不可达的服务器让启动长时间挂起。
    pub async fn connect(config: &MongoConfig) -> Result<Self, StoreError> {
        let timeout = Duration::from_millis(config.connect_timeout_ms);

        let mut options = ClientOptions::parse(&config.url)
            .await
            .map_err(|e| StoreError::Unavailable(format!("Invalid MongoDB URL: {}", e)))?;
        options.server_selection_timeout = Some(timeout);
        options.connect_timeout = Some(timeout);

        let client = Client::with_options(options)
            .map_err(|e| StoreError::Unavailable(format!("Failed to create client: {}", e)))?;
        let database = client.database(&config.database);

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Unavailable(format!("MongoDB ping failed: {}", e)))?;

        tracing::info!(database = %config.database, "Connected to MongoDB");

        Ok(Self { database })
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.database.collection::<Document>(collection.as_str())
    }
}

fn database_error(e: mongodb::error::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

fn object_id(id: &Identifier) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id.as_str()).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// 记录字段 → BSON 文档，附加时间戳
fn encode_record(record: NewRecord, now: bson::DateTime) -> Result<Document, StoreError> {
    let mut document =
        bson::to_document(&record).map_err(|e| StoreError::Serialization(e.to_string()))?;
    document.insert("created_at", now);
    document.insert("updated_at", now);
    Ok(document)
}

/// BSON 文档 → 存储记录，`_id` 转为标识符，其余字段转为宽松扩展 JSON
fn decode_document(mut document: Document) -> Result<StoredRecord, StoreError> {
    let id = match document.remove("_id") {
        Some(Bson::ObjectId(oid)) => Identifier::parse(&oid.to_hex())
            .map_err(|e| StoreError::Serialization(e.to_string()))?,
        other => {
            return Err(StoreError::Serialization(format!(
                "document _id is not an ObjectId: {:?}",
                other
            )))
        }
    };

    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(fields) => Ok(StoredRecord { id, fields }),
        other => Err(StoreError::Serialization(format!(
            "document {} is not an object: {}",
            id, other
        ))),
    }
}

/// 过滤条件 → BSON 查询文档
fn filter_document(filter: &Filter) -> Result<Document, StoreError> {
    let mut document = Document::new();
    if let Some(id) = filter.id() {
        document.insert("_id", object_id(id)?);
    }
    for (field, value) in filter.fields() {
        let value = Bson::try_from(value.clone())
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        document.insert(field.clone(), value);
    }
    Ok(document)
}

#[async_trait]
impl DocumentStorePort for MongoDocumentStore {
    async fn insert(
        &self,
        collection: Collection,
        record: NewRecord,
    ) -> Result<Identifier, StoreError> {
        let document = encode_record(record, bson::DateTime::now())?;

        let result = self
            .collection(collection)
            .insert_one(document)
            .await
            .map_err(database_error)?;

        let oid = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Database("Failed to get inserted ID".into()))?;

        Identifier::parse(&oid.to_hex()).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    async fn find_all(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<Vec<StoredRecord>, StoreError> {
        let cursor = self
            .collection(collection)
            .find(filter_document(&filter)?)
            .await
            .map_err(database_error)?;

        let documents: Vec<Document> = cursor.try_collect().await.map_err(database_error)?;

        documents.into_iter().map(decode_document).collect()
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: &Identifier,
    ) -> Result<Option<StoredRecord>, StoreError> {
        self.collection(collection)
            .find_one(doc! { "_id": object_id(id)? })
            .await
            .map_err(database_error)?
            .map(decode_document)
            .transpose()
    }

    async fn count_matching(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<u64, StoreError> {
        self.collection(collection)
            .count_documents(filter_document(&filter)?)
            .await
            .map_err(database_error)
    }

    async fn status(&self) -> StoreStatus {
        let (collections, introspection_error) = match self.database.list_collection_names().await
        {
            Ok(mut names) => {
                names.truncate(StoreStatus::MAX_COLLECTIONS);
                (names, None)
            }
            Err(e) => (Vec::new(), Some(e.to_string())),
        };

        StoreStatus {
            backend: "mongo",
            connection: ConnectionState::Connected,
            url_configured: true,
            database_name: Some(self.database.name().to_string()),
            collections,
            introspection_error,
        }
    }
}

#[cfg(test)]
mod tests {
    // 需要运行中的 MongoDB 的集成测试不在此处；这里只覆盖纯转换逻辑
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_record_stamps_metadata() {
        let record = json!({"story_id": "65a1b2c3d4e5f60718293a4b", "title": "C1", "order": 2})
            .as_object()
            .cloned()
            .unwrap();
        let now = bson::DateTime::from_millis(1_700_000_000_000);

        let document = encode_record(record, now).unwrap();

        assert_eq!(document.get_str("title").unwrap(), "C1");
        assert_eq!(document.get_i64("order").unwrap(), 2);
        assert_eq!(document.get_datetime("created_at").unwrap(), &now);
        assert_eq!(document.get_datetime("updated_at").unwrap(), &now);
        assert!(!document.contains_key("_id"));
    }

    #[test]
    fn test_decode_document_extracts_id() {
        let oid = ObjectId::parse_str("65a1b2c3d4e5f60718293a4b").unwrap();
        let document = doc! {
            "_id": oid,
            "title": "A",
            "author": Bson::Null,
            "order": 3_i64,
        };

        let record = decode_document(document).unwrap();

        assert_eq!(record.id.as_str(), "65a1b2c3d4e5f60718293a4b");
        assert_eq!(record.fields["title"], "A");
        assert_eq!(record.fields["author"], Value::Null);
        assert_eq!(record.fields["order"], 3);
        assert!(!record.fields.contains_key("_id"));
    }

    #[test]
    fn test_decode_document_rejects_foreign_id() {
        let document = doc! { "_id": "plain-string", "title": "A" };
        assert!(matches!(
            decode_document(document),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_filter_document() {
        let id = Identifier::parse("65a1b2c3d4e5f60718293a4b").unwrap();

        let by_id = filter_document(&Filter::by_id(&id)).unwrap();
        assert_eq!(
            by_id.get_object_id("_id").unwrap().to_hex(),
            "65a1b2c3d4e5f60718293a4b"
        );

        let by_parent = filter_document(&Filter::eq("story_id", id.as_str())).unwrap();
        assert_eq!(by_parent.get_str("story_id").unwrap(), id.as_str());

        assert!(filter_document(&Filter::all()).unwrap().is_empty());
    }
}
