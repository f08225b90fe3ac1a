//! Story Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::listing::OrderedListing;
use crate::application::ports::{Collection, DocumentStorePort, Filter};
use crate::application::queries::{GetStoryDetail, ListBubbles, ListChapters, ListStories};
use crate::application::records::story_from_record;
use crate::domain::story::{Bubble, Chapter, Identifier, Story, StoryTree};

/// ListStories Handler
///
/// 按存储自然顺序返回，不排序。
pub struct ListStoriesHandler {
    store: Arc<dyn DocumentStorePort>,
}

impl ListStoriesHandler {
    pub fn new(store: Arc<dyn DocumentStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, _query: ListStories) -> Result<Vec<Story>, ApplicationError> {
        let records = self.store.find_all(Collection::Story, Filter::all()).await?;
        let stories = records
            .into_iter()
            .map(story_from_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(stories)
    }
}

/// GetStoryDetail Handler - 组装完整的故事树
///
/// 每个章节单独查询一次气泡（N+1）。任一子查询失败则整体失败。
pub struct GetStoryDetailHandler {
    store: Arc<dyn DocumentStorePort>,
    listing: OrderedListing,
}

impl GetStoryDetailHandler {
    pub fn new(store: Arc<dyn DocumentStorePort>) -> Self {
        Self {
            listing: OrderedListing::new(store.clone()),
            store,
        }
    }

    pub async fn handle(&self, query: GetStoryDetail) -> Result<StoryTree, ApplicationError> {
        let story_id = Identifier::parse(&query.story_id)
            .map_err(|_| ApplicationError::invalid_identifier("story"))?;

        let record = self
            .store
            .find_by_id(Collection::Story, &story_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Story not found"))?;
        let story = story_from_record(record)?;

        let chapters = self.listing.chapters_of(&story_id).await?;

        let mut tree = StoryTree::new(story);
        for chapter in chapters {
            let bubbles = self.listing.bubbles_of(chapter.id()).await?;
            tree.attach_chapter(chapter, bubbles)?;
        }

        tracing::debug!(
            story_id = %story_id,
            chapters = tree.chapters().len(),
            bubbles = tree.bubble_count(),
            "Story detail assembled"
        );

        Ok(tree)
    }
}

/// ListChapters Handler
pub struct ListChaptersHandler {
    listing: OrderedListing,
}

impl ListChaptersHandler {
    pub fn new(store: Arc<dyn DocumentStorePort>) -> Self {
        Self {
            listing: OrderedListing::new(store),
        }
    }

    pub async fn handle(&self, query: ListChapters) -> Result<Vec<Chapter>, ApplicationError> {
        self.listing.chapters_of_raw(&query.story_id).await
    }
}

/// ListBubbles Handler
pub struct ListBubblesHandler {
    listing: OrderedListing,
}

impl ListBubblesHandler {
    pub fn new(store: Arc<dyn DocumentStorePort>) -> Self {
        Self {
            listing: OrderedListing::new(store),
        }
    }

    pub async fn handle(&self, query: ListBubbles) -> Result<Vec<Bubble>, ApplicationError> {
        self.listing.bubbles_of_raw(&query.chapter_id).await
    }
}
