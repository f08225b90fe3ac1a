//! 有序列表服务
//!
//! 取出某个父实体下的全部子实体，按 `order` 升序返回。
//!
//! 列表不校验父实体是否存在：父实体不存在、没有子实体、或给出的父 id 格式错误，
//! 都返回空列表。与创建操作（会校验父实体）的不对称是有意保留的行为。

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{Collection, DocumentStorePort, Filter};
use crate::application::records::{bubble_from_record, chapter_from_record};
use crate::domain::story::{sort_by_order, Bubble, Chapter, Identifier};

/// 按父实体列出有序子实体
pub struct OrderedListing {
    store: Arc<dyn DocumentStorePort>,
}

impl OrderedListing {
    pub fn new(store: Arc<dyn DocumentStorePort>) -> Self {
        Self { store }
    }

    /// 故事下的章节
    pub async fn chapters_of(&self, story_id: &Identifier) -> Result<Vec<Chapter>, ApplicationError> {
        let records = self
            .store
            .find_all(Collection::Chapter, Filter::eq("story_id", story_id.as_str()))
            .await?;

        let mut chapters = records
            .into_iter()
            .map(chapter_from_record)
            .collect::<Result<Vec<_>, _>>()?;
        sort_by_order(&mut chapters);

        tracing::debug!(story_id = %story_id, count = chapters.len(), "Chapters listed");
        Ok(chapters)
    }

    /// 章节下的气泡
    pub async fn bubbles_of(&self, chapter_id: &Identifier) -> Result<Vec<Bubble>, ApplicationError> {
        let records = self
            .store
            .find_all(Collection::Bubble, Filter::eq("chapter_id", chapter_id.as_str()))
            .await?;

        let mut bubbles = records
            .into_iter()
            .map(bubble_from_record)
            .collect::<Result<Vec<_>, _>>()?;
        sort_by_order(&mut bubbles);

        tracing::debug!(chapter_id = %chapter_id, count = bubbles.len(), "Bubbles listed");
        Ok(bubbles)
    }

    /// 按原始字符串列出章节，格式错误时返回空列表
    pub async fn chapters_of_raw(&self, story_id: &str) -> Result<Vec<Chapter>, ApplicationError> {
        match Identifier::parse(story_id) {
            Ok(id) => self.chapters_of(&id).await,
            Err(_) => Ok(Vec::new()),
        }
    }

    /// 按原始字符串列出气泡，格式错误时返回空列表
    pub async fn bubbles_of_raw(&self, chapter_id: &str) -> Result<Vec<Bubble>, ApplicationError> {
        match Identifier::parse(chapter_id) {
            Ok(id) => self.bubbles_of(&id).await,
            Err(_) => Ok(Vec::new()),
        }
    }
}
