//! 引用完整性检查
//!
//! 创建子实体之前确认父实体存在：先校验 id 格式，再按 id 计数。
//!
//! 检查与随后的写入不在同一事务内。当前没有删除操作，所以父实体不会在两步之间消失；
//! 一旦引入删除，这里会出现检查后父实体被删、子实体成为孤儿的竞态。

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{Collection, DocumentStorePort, Filter};
use crate::domain::story::Identifier;

/// 父实体存在性守卫
pub struct ParentGuard {
    store: Arc<dyn DocumentStorePort>,
}

impl ParentGuard {
    pub fn new(store: Arc<dyn DocumentStorePort>) -> Self {
        Self { store }
    }

    /// 确认 `raw_id` 指向 `parent` 集合中的一条记录，返回规范化后的标识
    ///
    /// - 格式错误：`InvalidIdentifier`，不访问存储
    /// - 不存在：`NotFound`
    pub async fn ensure_exists(
        &self,
        parent: Collection,
        raw_id: &str,
    ) -> Result<Identifier, ApplicationError> {
        let id = Identifier::parse(raw_id)
            .map_err(|_| ApplicationError::invalid_identifier(parent.as_str()))?;

        let count = self
            .store
            .count_matching(parent, Filter::by_id(&id))
            .await?;

        if count == 0 {
            tracing::debug!(parent = %parent, id = %id, "Parent not found");
            return Err(ApplicationError::not_found(format!(
                "Parent {} not found",
                parent
            )));
        }

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::memory::InMemoryDocumentStore;
    use serde_json::Map;

    #[tokio::test]
    async fn test_existing_parent_passes() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let id = store.insert(Collection::Story, Map::new()).await.unwrap();
        let guard = ParentGuard::new(store);

        let checked = guard
            .ensure_exists(Collection::Story, &id.as_str().to_uppercase())
            .await
            .unwrap();
        assert_eq!(checked, id);
    }

    #[tokio::test]
    async fn test_missing_parent_not_found() {
        let guard = ParentGuard::new(Arc::new(InMemoryDocumentStore::new()));

        let err = guard
            .ensure_exists(Collection::Chapter, "000000000000000000000001")
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(ref msg) if msg == "Parent chapter not found"));
    }

    #[tokio::test]
    async fn test_parent_in_other_collection_not_found() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let id = store.insert(Collection::Chapter, Map::new()).await.unwrap();
        let guard = ParentGuard::new(store);

        let err = guard
            .ensure_exists(Collection::Story, id.as_str())
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_malformed_id_never_reaches_store() {
        // 未连接的存储对任何访问都会报错，格式错误必须先于存储访问被识别
        let store = Arc::new(crate::infrastructure::persistence::DisconnectedStore::new(
            "not configured",
            false,
        ));
        let guard = ParentGuard::new(store);

        let err = guard
            .ensure_exists(Collection::Story, "not-an-id")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::InvalidIdentifier { resource_type: "story" }
        ));
    }
}
