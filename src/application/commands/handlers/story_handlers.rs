//! Story Command Handlers
//!
//! 校验顺序：请求字段约束 → 父 id 格式 → 父实体存在 → 写入。
//! 每次创建只有一次插入，不存在部分写入。

use std::sync::Arc;

use crate::application::commands::{CreateBubble, CreateChapter, CreateStory};
use crate::application::error::ApplicationError;
use crate::application::integrity::ParentGuard;
use crate::application::ports::{Collection, DocumentStorePort};
use crate::application::records::{bubble_to_record, chapter_to_record, story_to_record};
use crate::domain::story::{Identifier, NewBubble, NewChapter, NewStory, Order, Title};

// ============================================================================
// CreateStory
// ============================================================================

/// CreateStory Handler
pub struct CreateStoryHandler {
    store: Arc<dyn DocumentStorePort>,
}

impl CreateStoryHandler {
    pub fn new(store: Arc<dyn DocumentStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, command: CreateStory) -> Result<Identifier, ApplicationError> {
        let story = NewStory::new(
            Title::new(command.title)?,
            command.author,
            command.cover_image,
            command.description,
        );

        let id = self
            .store
            .insert(Collection::Story, story_to_record(&story)?)
            .await?;

        tracing::info!(story_id = %id, title = %story.title(), "Story created");

        Ok(id)
    }
}

// ============================================================================
// CreateChapter
// ============================================================================

/// CreateChapter Handler - 写入前确认父故事存在
pub struct CreateChapterHandler {
    store: Arc<dyn DocumentStorePort>,
    parents: ParentGuard,
}

impl CreateChapterHandler {
    pub fn new(store: Arc<dyn DocumentStorePort>) -> Self {
        Self {
            parents: ParentGuard::new(store.clone()),
            store,
        }
    }

    pub async fn handle(&self, command: CreateChapter) -> Result<Identifier, ApplicationError> {
        let order = Order::new(command.order)?;

        let story_id = self
            .parents
            .ensure_exists(Collection::Story, &command.story_id)
            .await?;

        let chapter = NewChapter::new(story_id, command.title, order);
        let id = self
            .store
            .insert(Collection::Chapter, chapter_to_record(&chapter)?)
            .await?;

        tracing::info!(
            chapter_id = %id,
            story_id = %chapter.story_id(),
            order = %chapter.order(),
            "Chapter created"
        );

        Ok(id)
    }
}

// ============================================================================
// CreateBubble
// ============================================================================

/// CreateBubble Handler - 写入前确认父章节存在
pub struct CreateBubbleHandler {
    store: Arc<dyn DocumentStorePort>,
    parents: ParentGuard,
}

impl CreateBubbleHandler {
    pub fn new(store: Arc<dyn DocumentStorePort>) -> Self {
        Self {
            parents: ParentGuard::new(store.clone()),
            store,
        }
    }

    pub async fn handle(&self, command: CreateBubble) -> Result<Identifier, ApplicationError> {
        let order = Order::new(command.order)?;

        let chapter_id = self
            .parents
            .ensure_exists(Collection::Chapter, &command.chapter_id)
            .await?;

        let bubble = NewBubble::new(chapter_id, command.content_html, order);
        let id = self
            .store
            .insert(Collection::Bubble, bubble_to_record(&bubble)?)
            .await?;

        tracing::info!(
            bubble_id = %id,
            chapter_id = %bubble.chapter_id(),
            order = %bubble.order(),
            "Bubble created"
        );

        Ok(id)
    }
}
